//! JavaScript and TypeScript language definition

use crate::colorizer::language::LanguageDefinition;

/// Create the JavaScript/TypeScript definition
pub fn javascript_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["javascript", "typescript"]);
    for ext in ["js", "mjs", "cjs", "jsx", "ts", "tsx"] {
        lang.add_extension(ext);
    }

    lang.add_line_comment("//");
    lang.add_block_comment("/*", "*/");
    // Template literals first so a backtick string can hold quotes
    lang.add_symmetric_quote("`");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
