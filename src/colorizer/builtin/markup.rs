//! HTML and CSS language definitions

use crate::colorizer::language::LanguageDefinition;

/// Create the HTML definition
pub fn html_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["html"]);
    lang.add_extension("html");
    lang.add_extension("htm");

    lang.add_block_comment("<!--", "-->");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}

/// Create the CSS definition
pub fn css_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["css"]);
    lang.add_extension("css");

    lang.add_block_comment("/*", "*/");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
