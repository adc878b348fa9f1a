use itertools::{EitherOrBoth, Itertools};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Checks whether `language` matches the basic language range `range` (RFC 4647).
///
/// The range `*` matches any non-empty tag. The empty range only matches the empty tag, i.e.
/// literals without a language. Otherwise every subtag of the range must match the corresponding
/// subtag of the language, ignoring case.
pub fn lang_matches(language: &str, range: &str) -> bool {
    match range {
        "*" => !language.is_empty(),
        "" => language.is_empty(),
        range => !language.is_empty()
            && range
                .split('-')
                .zip_longest(language.split('-'))
                .all(|parts| match parts {
                    EitherOrBoth::Both(range_subtag, language_subtag) => {
                        range_subtag.eq_ignore_ascii_case(language_subtag)
                    }
                    EitherOrBoth::Left(_) => false,
                    EitherOrBoth::Right(_) => true,
                }),
    }
}

/// Checks whether `range` is a valid basic language range.
pub fn is_valid_language_range(range: &str) -> bool {
    range.is_empty() || range == "*" || rdf_algebra_model::is_valid_language_tag(range)
}

/// Compiles a SPARQL regular expression with the given flags.
///
/// Supported flags are `s`, `m`, `i`, `x`, and `q`. Returns [None] for invalid patterns or flags.
pub fn compile_pattern(pattern: &str, flags: Option<&str>) -> Option<Regex> {
    const REGEX_SIZE_LIMIT: usize = 1_000_000;

    let mut pattern = Cow::Borrowed(pattern);
    let flags = flags.unwrap_or_default();
    if flags.contains('q') {
        pattern = regex::escape(&pattern).into();
    }
    let mut regex_builder = RegexBuilder::new(&pattern);
    regex_builder.size_limit(REGEX_SIZE_LIMIT);
    for flag in flags.chars() {
        match flag {
            's' => {
                regex_builder.dot_matches_new_line(true);
            }
            'm' => {
                regex_builder.multi_line(true);
            }
            'i' => {
                regex_builder.case_insensitive(true);
            }
            'x' => {
                regex_builder.ignore_whitespace(true);
            }
            'q' => (),
            _ => return None,
        }
    }
    regex_builder.build().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_matches_subtags() {
        assert!(lang_matches("en-us", "en"));
        assert!(lang_matches("en-US", "EN-us"));
        assert!(!lang_matches("en", "en-us"));
        assert!(!lang_matches("english", "en"));
        assert!(lang_matches("de", "*"));
        assert!(!lang_matches("", "*"));
        assert!(lang_matches("", ""));
        assert!(!lang_matches("fr", ""));
    }

    #[test]
    fn regex_flags() {
        let regex = compile_pattern("^a.b$", Some("si")).unwrap();
        assert!(regex.is_match("A\nB"));
        assert!(compile_pattern("a.b", Some("q")).unwrap().is_match("xa.b"));
        assert!(!compile_pattern("a.b", Some("q")).unwrap().is_match("axb"));
        assert!(compile_pattern("a", Some("z")).is_none());
        assert!(compile_pattern("(", None).is_none());
    }
}
