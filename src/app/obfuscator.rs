//! Source-to-source JavaScript obfuscation built on oxc.
//!
//! The pipeline is: parse, rewrite string literals by span, parse the
//! rewritten text again, rename bindings through the semantic symbol table,
//! then print with `oxc_codegen`.

pub mod names;
pub mod options;
pub mod renamer;
pub mod strings;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use thiserror::Error;

use self::names::NameGenerator;
pub use self::options::{ObfuscatorOptions, TransformProfile};

#[derive(Debug, Error)]
pub enum ObfuscateError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("semantic error: {0}")]
    Semantic(String),
    #[error("option {0} is not supported by this engine")]
    Unsupported(&'static str),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("could not emit string literal: {0}")]
    Emit(String),
}

/// Output of one engine call.
#[derive(Debug, Clone)]
pub struct ObfuscationResult {
    code: String,
}

impl ObfuscationResult {
    pub fn obfuscated_code(&self) -> &str {
        &self.code
    }
}

/// Obfuscates `source` under the given profile.
pub fn invoke(source: &str, profile: TransformProfile) -> Result<String, ObfuscateError> {
    let options = profile.options();
    if log::log_enabled!(log::Level::Debug) {
        if let Ok(json) = serde_json::to_string(&options) {
            log::debug!("Using {} profile: {}", profile, json);
        }
    }
    obfuscate(source, &options).map(|result| result.obfuscated_code().to_owned())
}

pub fn obfuscate(
    source: &str,
    options: &ObfuscatorOptions,
) -> Result<ObfuscationResult, ObfuscateError> {
    options.validate()?;

    let mut names = NameGenerator::new(options.identifier_names_generator);

    let prepared = {
        let allocator = Allocator::default();
        let program = parse(&allocator, source)?;
        strings::rewrite_strings(source, &program, options, &mut names)?
    };

    let allocator = Allocator::default();
    let program = parse(&allocator, &prepared)?;

    let semantic_ret = SemanticBuilder::new().build(&program);
    if !semantic_ret.errors.is_empty() {
        return Err(ObfuscateError::Semantic(join_errors(&semantic_ret.errors)));
    }

    let mut scoping = semantic_ret.semantic.into_scoping();
    let renamed = renamer::rename_symbols(&mut scoping, options, &mut names);
    log::debug!("Renamed {} bindings", renamed);

    let codegen_options = if options.compact {
        CodegenOptions::minify()
    } else {
        CodegenOptions::default()
    };
    let code = Codegen::new()
        .with_options(codegen_options)
        .with_scoping(Some(scoping))
        .build(&program)
        .code;

    Ok(ObfuscationResult { code })
}

/// Parses as an ES module with JSX, falling back to a classic script.
fn parse<'a>(allocator: &'a Allocator, source: &'a str) -> Result<Program<'a>, ObfuscateError> {
    let module = Parser::new(allocator, source, SourceType::mjs().with_jsx(true)).parse();
    if module.errors.is_empty() && !module.panicked {
        return Ok(module.program);
    }

    let script_type = SourceType::mjs().with_module(false).with_jsx(true);
    let script = Parser::new(allocator, source, script_type).parse();
    if script.errors.is_empty() && !script.panicked {
        log::debug!("Source is not a module, parsed as script");
        return Ok(script.program);
    }

    Err(ObfuscateError::Parse(join_errors(&module.errors)))
}

fn join_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
