//! Python and R language definitions

use crate::colorizer::language::LanguageDefinition;

/// Create the Python definition
pub fn python_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["python"]);
    lang.add_extension("py");
    lang.add_extension("pyw");

    lang.add_line_comment("#");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}

/// Create the R definition
pub fn r_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["r"]);
    lang.add_extension("r");

    lang.add_line_comment("#");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
