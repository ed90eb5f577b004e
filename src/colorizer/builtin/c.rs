//! C-family language definition (C, C++, C#, Java)

use crate::colorizer::language::LanguageDefinition;

/// Create the C-family definition
pub fn c_language() -> LanguageDefinition {
    let mut lang = LanguageDefinition::new(&["c", "cpp", "csharp", "java"]);
    for ext in ["c", "h", "cpp", "hpp", "cc", "cxx", "cs", "java"] {
        lang.add_extension(ext);
    }

    lang.add_line_comment("//");
    lang.add_block_comment("/*", "*/");
    lang.add_symmetric_quote("\"");
    lang.add_symmetric_quote("'");

    lang
}
