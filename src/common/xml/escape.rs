use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Built once, shared across threads
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'", "\r"])
        .expect("Failed to build XML escaper")
});

// `\r` as a character reference so parsers don't fold it into `\n`
const XML_ESCAPES: &[&str] = &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;", "&#13;"];

/// Whether `c` is a control character XML 1.0 does not allow in a document.
///
/// Tab, line feed and carriage return are allowed.
#[inline]
pub fn is_restricted_char(c: char) -> bool {
    c < ' ' && !matches!(c, '\t' | '\n' | '\r')
}

/// Escape XML special characters.
///
/// Control characters XML 1.0 cannot carry are dropped.
///
/// # Examples
///
/// ```
/// use deckwright::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("line\u{b}break"), "linebreak");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let text: Cow<'_, str> = if s.chars().any(is_restricted_char) {
        Cow::Owned(s.chars().filter(|c| !is_restricted_char(*c)).collect())
    } else {
        Cow::Borrowed(s)
    };
    XML_ESCAPER.replace_all(&text, XML_ESCAPES)
}

/// Append the text of the general entity reference `&name;`.
///
/// Resolves the predefined entities and numeric character references;
/// anything else is kept as written.
pub fn push_entity(text: &mut String, name: &str) {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };
    match resolved {
        Some(c) => text.push(c),
        None => {
            text.push('&');
            text.push_str(name);
            text.push(';');
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_xml("Quarterly revenue"), "Quarterly revenue");
    }

    #[test]
    fn test_carriage_return_becomes_reference() {
        assert_eq!(escape_xml("Q1\r\nreview"), "Q1&#13;\nreview");
    }

    #[test]
    fn test_restricted_controls_dropped() {
        assert_eq!(escape_xml("a\u{0}b\u{8}c\u{c}d\u{1f}e\tf"), "abcde\tf");
        assert!(is_restricted_char('\u{b}'));
        assert!(!is_restricted_char('\n'));
        assert!(!is_restricted_char('\r'));
        assert!(!is_restricted_char(' '));
    }

    #[test]
    fn test_entities_resolve() {
        let mut text = String::new();
        push_entity(&mut text, "#8226");
        push_entity(&mut text, "#x41");
        push_entity(&mut text, "#13");
        push_entity(&mut text, "amp");
        push_entity(&mut text, "nbsp");
        assert_eq!(text, "\u{2022}A\r&&nbsp;");
    }
}
