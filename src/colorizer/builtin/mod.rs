//! Built-in language token tables

mod c;
mod javascript;
mod markup;
mod php;
mod python;
mod ruby;
mod swift;

use super::language::LanguageDefinition;

/// Get all built-in language definitions
pub fn all_languages() -> Vec<LanguageDefinition> {
    vec![
        c::c_language(),
        javascript::javascript_language(),
        python::python_language(),
        python::r_language(),
        ruby::ruby_language(),
        php::php_language(),
        swift::swift_language(),
        markup::html_language(),
        markup::css_language(),
    ]
}

/// Find the built-in definition for a language id
#[cfg(test)]
pub fn find(language_id: &str) -> Option<LanguageDefinition> {
    all_languages().into_iter().find(|lang| lang.handles(language_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<String> = all_languages().into_iter().flat_map(|lang| lang.ids).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_find() {
        let ts = find("typescript").unwrap();
        assert_eq!(ts.quotes.len(), 3);
        assert_eq!(ts.quotes[0].0, "`");

        let ruby = find("ruby").unwrap();
        assert_eq!(ruby.block_comments[0], ("=begin".to_string(), "=end".to_string()));

        let php = find("php").unwrap();
        assert_eq!(php.line_comments, vec!["//", "#"]);

        assert!(find("html").unwrap().line_comments.is_empty());
        assert!(find("plaintext").is_none());
    }
}
