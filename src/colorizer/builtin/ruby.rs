//! Ruby language definition

use crate::colorizer::language::LanguageDefinition;

/// Create the Ruby definition
pub fn ruby_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["ruby"]);
    lang.add_extension("rb");

    lang.add_line_comment("#");
    lang.add_block_comment("=begin", "=end");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
