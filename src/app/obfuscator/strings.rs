//! String-literal rewriting done on the source text before renaming.
//!
//! Literals are collected from the AST and replaced by byte span. The
//! rewritten text is parsed again before renaming.

use oxc_ast::ast::{
    BindingIdentifier, Directive, ExportAllDeclaration, ExportNamedDeclaration, IdentifierReference,
    ImportDeclaration, ImportDeclarationSpecifier, JSXAttributeValue, Program, PropertyKey,
    StringLiteral,
};
use oxc_ast_visit::{walk, Visit};
use rand::Rng;
use std::collections::HashMap;

use super::names::NameGenerator;
use super::options::{ObfuscatorOptions, StringArrayEncoding};
use super::ObfuscateError;

const CONSOLE_METHODS: &str =
    "['log','warn','info','error','exception','table','trace','debug']";

struct Literal {
    start: u32,
    end: u32,
    value: String,
}

/// Collects replaceable string literals and every identifier in use.
#[derive(Default)]
struct LiteralCollector {
    literals: Vec<Literal>,
    identifiers: Vec<String>,
}

impl<'a> Visit<'a> for LiteralCollector {
    fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
        // `value` encodes lone surrogates internally; leave those literals alone.
        if it.lone_surrogates {
            return;
        }
        self.literals.push(Literal {
            start: it.span.start,
            end: it.span.end,
            value: it.value.to_string(),
        });
    }

    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.identifiers.push(it.name.to_string());
    }

    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        self.identifiers.push(it.name.to_string());
    }

    // "use strict" and friends must stay literal.
    fn visit_directive(&mut self, _it: &Directive<'a>) {}

    fn visit_property_key(&mut self, it: &PropertyKey<'a>) {
        if !matches!(it, PropertyKey::StringLiteral(_)) {
            walk::walk_property_key(self, it);
        }
    }

    fn visit_jsx_attribute_value(&mut self, it: &JSXAttributeValue<'a>) {
        if !matches!(it, JSXAttributeValue::StringLiteral(_)) {
            walk::walk_jsx_attribute_value(self, it);
        }
    }

    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if let Some(specifiers) = &it.specifiers {
            for specifier in specifiers {
                let local = match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => &s.local,
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => &s.local,
                };
                self.visit_binding_identifier(local);
            }
        }
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(declaration) = &it.declaration {
            self.visit_declaration(declaration);
        }
    }

    fn visit_export_all_declaration(&mut self, _it: &ExportAllDeclaration<'a>) {}
}

enum Replacement {
    Slot(usize),
    Split(String),
}

struct Edit {
    start: u32,
    end: u32,
    text: String,
}

/// Applies string array extraction, string splitting and the console guard.
///
/// Returns the source unchanged when none of them has anything to do.
pub fn rewrite_strings(
    source: &str,
    program: &Program<'_>,
    options: &ObfuscatorOptions,
    names: &mut NameGenerator,
) -> Result<String, ObfuscateError> {
    let mut collector = LiteralCollector::default();
    collector.visit_program(program);
    names.reserve_all(collector.identifiers.drain(..));

    let mut rng = rand::thread_rng();
    let mut entries: Vec<String> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut replacements: Vec<(u32, u32, Replacement)> = Vec::new();

    for literal in collector.literals {
        if options.string_array && rng.gen_bool(options.string_array_threshold) {
            let slot = *slots.entry(literal.value.clone()).or_insert_with(|| {
                entries.push(literal.value.clone());
                entries.len() - 1
            });
            replacements.push((literal.start, literal.end, Replacement::Slot(slot)));
        } else if options.split_strings
            && literal.value.chars().count() > options.split_strings_chunk_length
        {
            let split = split_literal(&literal.value, options.split_strings_chunk_length)?;
            replacements.push((literal.start, literal.end, Replacement::Split(split)));
        }
    }

    if replacements.is_empty() && !options.disable_console_output {
        return Ok(source.to_string());
    }

    let mut prelude = String::new();
    let mut array_name: Option<String> = None;

    if !entries.is_empty() {
        let name = names.next_name();
        prelude.push_str(&array_declaration(
            &name,
            &entries,
            options.string_array_encoding,
        )?);
        array_name = Some(name);
    }

    if options.disable_console_output {
        prelude.push_str(&format!(
            "(function(){{var g=typeof globalThis!=='undefined'?globalThis:typeof window!=='undefined'?window:this;var c=g&&g.console;if(!c){{return;}}{}.forEach(function(m){{c[m]=function(){{}};}});}})();\n",
            CONSOLE_METHODS
        ));
    }

    let mut edits: Vec<Edit> = Vec::with_capacity(replacements.len() + 1);
    for (start, end, replacement) in replacements {
        let text = match replacement {
            Replacement::Slot(slot) => match &array_name {
                Some(name) => format!("{}[{}]", name, slot),
                None => continue,
            },
            Replacement::Split(split) => split,
        };
        // Padding keeps the replacement from fusing with neighbouring tokens.
        edits.push(Edit {
            start,
            end,
            text: format!(" {} ", text),
        });
    }

    if !prelude.is_empty() {
        let at = prelude_offset(program);
        edits.push(Edit {
            start: at,
            end: at,
            text: format!("\n{}", prelude),
        });
    }

    Ok(apply_edits(source, edits))
}

/// Position right after the hashbang and the directive prologue.
fn prelude_offset(program: &Program<'_>) -> u32 {
    let hashbang_end = program.hashbang.as_ref().map_or(0, |h| h.span.end);
    let directives_end = program.directives.last().map_or(0, |d| d.span.end);
    hashbang_end.max(directives_end)
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    // Back to front so earlier offsets stay valid.
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut output = source.to_string();
    for edit in edits {
        output.replace_range(edit.start as usize..edit.end as usize, &edit.text);
    }
    output
}

fn array_declaration(
    name: &str,
    entries: &[String],
    encoding: StringArrayEncoding,
) -> Result<String, ObfuscateError> {
    let items = entries
        .iter()
        .map(|value| match encoding {
            StringArrayEncoding::None => js_string(value),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("var {}=[{}];\n", name, items.join(",")))
}

/// `"abcdefgh"` with chunk length 3 becomes `("abc"+"def"+"gh")`.
fn split_literal(value: &str, chunk_length: usize) -> Result<String, ObfuscateError> {
    let chars: Vec<char> = value.chars().collect();
    let parts = chars
        .chunks(chunk_length)
        .map(|chunk| js_string(&chunk.iter().collect::<String>()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({})", parts.join("+")))
}

fn js_string(value: &str) -> Result<String, ObfuscateError> {
    serde_json::to_string(value).map_err(|e| ObfuscateError::Emit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::obfuscator::options::IdentifierNamesGenerator;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn rewrite(source: &str, options: &ObfuscatorOptions) -> String {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
        assert!(parsed.errors.is_empty());
        let mut names = NameGenerator::new(IdentifierNamesGenerator::Hexadecimal);
        rewrite_strings(source, &parsed.program, options, &mut names).unwrap()
    }

    fn every_string() -> ObfuscatorOptions {
        ObfuscatorOptions {
            string_array_threshold: 1.0,
            ..ObfuscatorOptions::standard()
        }
    }

    #[test]
    fn literals_move_into_a_shared_array() {
        let out = rewrite("const a = \"x\"; const b = \"y\"; const c = \"x\";", &every_string());

        assert!(out.contains("=[\"x\",\"y\"];"), "{out}");
        assert_eq!(out.matches("\"x\"").count(), 1, "{out}");
        assert!(out.contains("[0]") && out.contains("[1]"), "{out}");
    }

    #[test]
    fn keys_directives_and_specifiers_stay_literal() {
        let source = "\"use strict\";\nimport x from \"./dep.js\";\nconst o = { \"key\": \"value\" };\nexport * from \"./other.js\";";
        let out = rewrite(source, &every_string());

        assert!(out.starts_with("\"use strict\";\n"), "{out}");
        assert!(out.contains("from \"./dep.js\""));
        assert!(out.contains("from \"./other.js\""));
        assert!(out.contains("{ \"key\":"));
        assert!(!out.contains("\"key\": \"value\""));
    }

    #[test]
    fn zero_threshold_leaves_source_untouched() {
        let source = "const greeting = \"hello\";";
        let options = ObfuscatorOptions {
            string_array_threshold: 0.0,
            ..ObfuscatorOptions::standard()
        };
        assert_eq!(rewrite(source, &options), source);
    }

    #[test]
    fn long_literals_are_split_when_not_extracted() {
        let options = ObfuscatorOptions {
            string_array: false,
            split_strings: true,
            split_strings_chunk_length: 3,
            ..ObfuscatorOptions::standard()
        };
        let out = rewrite("log(\"abcdefgh\", \"ab\");", &options);
        assert!(out.contains("(\"abc\"+\"def\"+\"gh\")"), "{out}");
        assert!(out.contains("\"ab\")"));
    }

    #[test]
    fn lone_surrogate_literals_stay_in_place() {
        let source = "var s = \"\\uD800\"; var t = \"ok\";";
        let out = rewrite(source, &every_string());

        assert!(out.contains("var s = \"\\uD800\";"), "{out}");
        assert!(out.contains("=[\"ok\"];"), "{out}");
    }

    #[test]
    fn console_guard_is_inserted_after_prologue() {
        let options = ObfuscatorOptions {
            string_array: false,
            disable_console_output: true,
            ..ObfuscatorOptions::standard()
        };
        let out = rewrite("\"use strict\";\nconsole.log(1);", &options);
        assert!(out.starts_with("\"use strict\";\n(function(){"), "{out}");
    }

    #[test]
    fn split_literal_respects_characters_not_bytes() {
        assert_eq!(split_literal("ééé", 2).unwrap(), "(\"éé\"+\"é\")");
    }
}
