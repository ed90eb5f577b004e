//! PHP language definition

use crate::colorizer::language::LanguageDefinition;

/// Create the PHP definition
pub fn php_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["php"]);
    lang.add_extension("php");

    lang.add_line_comment("//");
    lang.add_line_comment("#");
    lang.add_block_comment("/*", "*/");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
