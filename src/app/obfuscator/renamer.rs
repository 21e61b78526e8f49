use oxc_semantic::Scoping;

use super::names::NameGenerator;
use super::options::ObfuscatorOptions;

/// Gives every eligible binding a generated name and returns how many were renamed.
///
/// Root-scope bindings are only touched with `renameGlobals`. A direct `eval`
/// anywhere in the program disables renaming, since evaluated code may refer
/// to locals by their original names.
pub fn rename_symbols(
    scoping: &mut Scoping,
    options: &ObfuscatorOptions,
    names: &mut NameGenerator,
) -> usize {
    let unresolved: Vec<String> = scoping
        .root_unresolved_references()
        .keys()
        .map(|name| name.to_string())
        .collect();
    if unresolved.iter().any(|name| name == "eval") {
        log::debug!("Program calls eval, identifiers keep their names");
        return 0;
    }

    names.reserve_all(unresolved);
    names.reserve_all(
        scoping
            .symbol_ids()
            .map(|id| scoping.symbol_name(id).to_string())
            .collect::<Vec<_>>(),
    );

    let root = scoping.root_scope_id();
    let targets: Vec<_> = scoping
        .symbol_ids()
        .filter(|&id| options.rename_globals || scoping.symbol_scope_id(id) != root)
        .collect();

    for &id in &targets {
        let name = names.next_name();
        scoping.set_symbol_name(id, name.as_str().into());
    }

    targets.len()
}
