//! Text format for sectioned key/value files
//!
//! ```text
//! [SectionName]
//! key1="string value"
//! key2=123.45
//! [OtherSection]
//! key3="x"
//! ```
//!
//! [`parse`] and [`serialize`] are pure; the store decides when to call them.
//!
//! The format has no escaping. A value containing `"`, `[...]` or a line
//! break, or a key containing `=`, does not survive a write/read cycle
//! unchanged. A line break inside a value splits it across lines, so the text
//! after it is read back as headers and pairs of its own.

use std::fmt::Write;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Entry;

fn section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(.*)\]").expect("section pattern is valid"))
}

fn quoted_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(.*)=("(.*)")"#).expect("quoted pattern is valid"))
}

fn plain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(.*)=(.*)").expect("plain pattern is valid"))
}

/// Parses file contents into entries, in file order
///
/// A `[name]` anywhere in a line switches the current section. A repeated
/// section/key keeps the position of its first occurrence and the value of
/// its last. Lines that match nothing are skipped.
pub fn parse(text: &str) -> Vec<Entry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut entries: Vec<Entry> = Vec::new();
    let mut current_section = String::new();

    for line in text.lines() {
        if let Some(caps) = section_pattern().captures(line) {
            current_section = caps[1].to_string();
            continue;
        }

        let Some((key, value)) = split_key_value(line) else {
            continue;
        };

        let entry = Entry::new(&current_section, key, value);
        match entries
            .iter()
            .position(|e| e.matches(entry.section(), entry.key()))
        {
            Some(pos) => entries[pos] = entry,
            None => entries.push(entry),
        }
    }

    entries
}

/// Splits a `key="value"` or `key=value` line, preferring the quoted form
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    if let Some(caps) = quoted_pattern().captures(line) {
        return Some((caps.get(1)?.as_str(), caps.get(3)?.as_str()));
    }

    let caps = plain_pattern().captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Serializes entries back into file contents
///
/// A section header is written whenever the section differs from the previous
/// entry's. Numeric values are written bare, everything else is quoted.
pub fn serialize(entries: &[Entry]) -> String {
    let mut out = String::new();
    let mut last_section = "";

    for entry in entries {
        // Writing into a String cannot fail
        if entry.section() != last_section {
            let _ = writeln!(out, "[{}]", entry.section());
        }

        if entry.is_number() {
            let _ = writeln!(out, "{}={}", entry.key(), entry.value());
        } else {
            let _ = writeln!(out, "{}=\"{}\"", entry.key(), entry.value());
        }

        last_section = entry.section();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Value;

    fn triples(entries: &[Entry]) -> Vec<(String, String, String)> {
        entries
            .iter()
            .map(|e| {
                (
                    e.section().to_string(),
                    e.key().to_string(),
                    e.value().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn parse_basic() {
        let text = "[SectionName]\nkey1=\"string value\"\nkey2=123.45\n[OtherSection]\nkey4=\"x\"\n";
        let entries = parse(text);

        assert_eq!(
            triples(&entries),
            vec![
                ("SectionName".into(), "key1".into(), "string value".into()),
                ("SectionName".into(), "key2".into(), "123.45".into()),
                ("OtherSection".into(), "key4".into(), "x".into()),
            ]
        );
        assert!(entries[1].is_number());
        assert!(!entries[0].is_number());
    }

    #[test]
    fn parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn quoted_form_wins() {
        let entries = parse("[S]\nk=\"a=b\"\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key(), "k");
        assert_eq!(entries[0].value(), &Value::from("a=b"));
    }

    #[test]
    fn unquoted_value_kept_as_is() {
        let entries = parse("[S]\nk = some text \n");
        assert_eq!(entries[0].key(), "k");
        assert_eq!(entries[0].value(), &Value::from(" some text "));
    }

    #[test]
    fn plain_key_runs_to_last_equals() {
        let entries = parse("[S]\na=b=c\n");
        assert_eq!(entries[0].key(), "a=b");
        assert_eq!(entries[0].value(), &Value::from("c"));
    }

    #[test]
    fn section_names_are_trimmed() {
        let entries = parse("[  Padded  ]\n  key  =1\n");
        assert_eq!(entries[0].section(), "Padded");
        assert_eq!(entries[0].key(), "key");
    }

    #[test]
    fn duplicate_keeps_first_position_last_value() {
        let entries = parse("[S]\na=1\nb=2\na=3\n");
        assert_eq!(
            triples(&entries),
            vec![
                ("S".into(), "a".into(), "3".into()),
                ("S".into(), "b".into(), "2".into()),
            ]
        );
    }

    #[test]
    fn duplicate_detection_ignores_padding() {
        let entries = parse("[S]\na=1\n a =2\n[ S ]\na=3\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value(), &Value::from("3"));
    }

    #[test]
    fn same_key_in_different_sections() {
        let entries = parse("[A]\nk=1\n[B]\nk=2\n");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn keys_before_any_section_use_empty_section() {
        let entries = parse("top=\"level\"\n[S]\nk=1\n");
        assert_eq!(entries[0].section(), "");
        assert_eq!(entries[0].key(), "top");
    }

    #[test]
    fn non_matching_lines_ignored() {
        let entries = parse("garbage\n; comment\n[S]\nnot a pair\nk=1\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key(), "k");
    }

    #[test]
    fn bracket_anywhere_switches_section() {
        let entries = parse("[S]\nk=\"[x]\"\nj=1\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section(), "x");
        assert_eq!(entries[0].key(), "j");
    }

    #[test]
    fn byte_order_mark_skipped() {
        let entries = parse("\u{feff}[S]\nk=1\n");
        assert_eq!(entries[0].section(), "S");
    }

    #[test]
    fn crlf_line_endings() {
        let entries = parse("[S]\r\nk=\"v\"\r\nn=2\r\n");
        assert_eq!(entries[0].value(), &Value::from("v"));
        assert_eq!(entries[1].value(), &Value::from("2"));
    }

    #[test]
    fn serialize_groups_consecutive_sections() {
        let entries = vec![
            Entry::new("S", "K", "hello"),
            Entry::new("S", "N", 3.14),
            Entry::new("T", "X", "x"),
        ];

        assert_eq!(
            serialize(&entries),
            "[S]\nK=\"hello\"\nN=3.14\n[T]\nX=\"x\"\n"
        );
    }

    #[test]
    fn serialize_repeats_header_for_split_section() {
        let entries = vec![
            Entry::new("A", "x", 1),
            Entry::new("B", "y", 2),
            Entry::new("A", "z", 3),
        ];

        assert_eq!(serialize(&entries), "[A]\nx=1\n[B]\ny=2\n[A]\nz=3\n");
    }

    #[test]
    fn serialize_numeric_text_unquoted() {
        let entries = vec![Entry::new("S", "n", "42"), Entry::new("S", "e", "")];
        assert_eq!(serialize(&entries), "[S]\nn=42\ne=\"\"\n");
    }

    #[test]
    fn serialize_unnamed_section_has_no_header() {
        let entries = vec![Entry::new("", "top", "v"), Entry::new("S", "k", 1)];
        assert_eq!(serialize(&entries), "top=\"v\"\n[S]\nk=1\n");
    }

    #[test]
    fn serialize_then_parse_restores_entries() {
        let entries = vec![
            Entry::new("A", "x", "one two"),
            Entry::new("B", "y", 2.5),
            Entry::new("A", "z", "-7"),
        ];

        let reparsed = parse(&serialize(&entries));
        assert_eq!(triples(&reparsed), triples(&entries));
    }

    #[test]
    fn embedded_quote_is_lossy() {
        let entries = vec![Entry::new("S", "k", "say \"hi\" now")];
        let reparsed = parse(&serialize(&entries));
        assert_eq!(reparsed[0].key(), "k");
        assert_eq!(reparsed[0].value(), &Value::from("say \"hi\" now"));

        let entries = vec![Entry::new("S", "k", "a\"=\"b")];
        let reparsed = parse(&serialize(&entries));
        assert_ne!(triples(&reparsed), triples(&entries));
    }

    #[test]
    fn line_break_in_value_is_lossy() {
        let entries = vec![Entry::new("S", "k", "line1\n[Evil]\nx=1")];
        let reparsed = parse(&serialize(&entries));

        assert_eq!(
            triples(&reparsed),
            vec![
                ("S".to_string(), "k".to_string(), "\"line1".to_string()),
                ("Evil".to_string(), "x".to_string(), "1\"".to_string()),
            ]
        );
    }
}
