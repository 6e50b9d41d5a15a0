//! Turns a raw text blob (typed, pasted or extracted from a document) into
//! candidate names.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static INVISIBLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{200B}-\x{200D}\x{FEFF}]").expect("valid invisible regex"));
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"、|，|,|\t").expect("valid delimiter regex"));
static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid line regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{4E00}-\x{9FA5}a-zA-Z\s]+$").expect("valid name regex"));

/// True if the token can be a name: ideographs, ASCII letters and
/// whitespace only, and not empty.
pub fn is_valid_name(token: &str) -> bool {
    NAME_RE.is_match(token)
}

/// Extracts the names found in `raw_text`, in source order.
///
/// Delimiters are newlines, commas (ASCII and full-width), the ideographic
/// comma and tabs. Tokens that are not names (numbers, punctuation, empty
/// lines) are dropped. Duplicates are kept.
pub fn extract_names(raw_text: &str) -> Vec<String> {
    let visible = INVISIBLE_RE.replace_all(raw_text, "");
    let one_per_line = DELIMITER_RE.replace_all(&visible, "\n");
    let mut res: Vec<String> = Vec::new();
    for token in LINE_RE.split(&one_per_line) {
        let name = token.trim();
        if is_valid_name(name) {
            res.push(name.to_string());
        } else if !name.is_empty() {
            debug!("extract_names: dropping token {:?}", name);
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_are_normalized() {
        assert_eq!(
            extract_names("王小明,李四\t陳小華"),
            vec!["王小明", "李四", "陳小華"]
        );
        assert_eq!(
            extract_names("王小明，李四、陳小華\r\n張三"),
            vec!["王小明", "李四", "陳小華", "張三"]
        );
    }

    #[test]
    fn numbers_are_dropped() {
        assert_eq!(extract_names("123\n王五"), vec!["王五"]);
        assert_eq!(extract_names("王五1\n1號"), Vec::<String>::new());
    }

    #[test]
    fn invisible_characters_are_removed() {
        assert_eq!(
            extract_names("\u{FEFF}王五\u{200B}\n李\u{200D}四"),
            vec!["王五", "李四"]
        );
    }

    #[test]
    fn blank_and_punctuation_lines_are_dropped() {
        assert_eq!(
            extract_names("\n\n  \n---\n。\n張三\n"),
            vec!["張三"]
        );
        assert!(extract_names("").is_empty());
    }

    #[test]
    fn latin_names_and_inner_spaces_are_kept() {
        assert_eq!(
            extract_names("  Amy Chen  ,Bob\nO'Neil"),
            vec!["Amy Chen", "Bob"]
        );
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        assert_eq!(extract_names("李四\n張三\n李四"), vec!["李四", "張三", "李四"]);
    }

    #[test]
    fn validity() {
        assert!(is_valid_name("王小明"));
        assert!(is_valid_name("Amy Chen"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("王-小明"));
        assert!(!is_valid_name("42"));
    }
}
