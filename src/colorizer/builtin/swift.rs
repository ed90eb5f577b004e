//! Swift and JSON language definition

use crate::colorizer::language::LanguageDefinition;

/// Create the Swift/JSON definition (double quotes only)
pub fn swift_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["swift", "json"]);
    lang.add_extension("swift");
    lang.add_extension("json");

    lang.add_line_comment("//");
    lang.add_block_comment("/*", "*/");
    lang.add_symmetric_quote("\"");

    lang
}
