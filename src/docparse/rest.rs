//! Sphinx reST style: `:param name:` field lists

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::text::join_description;

const PARAMETER_FIELDS: &[&str] = &["param", "parameter", "arg", "argument"];

fn field_pattern() -> &'static Regex {
    static FIELD: OnceLock<Regex> = OnceLock::new();
    FIELD.get_or_init(|| {
        Regex::new(r"^:(\w+)(?:\s+([^:]*?))?\s*:\s*(.*)$").expect("rest field pattern is valid")
    })
}

/// Parameter name of a `:param [type] name:` field, `None` for any other field.
fn parameter_field(line: &str) -> Option<(String, String)> {
    let caps = field_pattern().captures(line.trim())?;
    if !PARAMETER_FIELDS.contains(&&caps[1]) {
        return None;
    }
    let name = caps.get(2)?.as_str().split_whitespace().last()?;
    let rest = caps.get(3).map_or("", |m| m.as_str());
    Some((name.to_string(), rest.to_string()))
}

fn is_field(line: &str) -> bool {
    field_pattern().is_match(line.trim())
}

pub(super) fn detect(lines: &[&str]) -> bool {
    lines.iter().any(|line| parameter_field(line).is_some())
}

pub(super) fn section_start(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| is_field(line))
}

pub(super) fn parse(lines: &[&str]) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in lines {
        if is_field(line) {
            flush(current.take(), &mut out);
            current = parameter_field(line).map(|(name, first)| (name, vec![first]));
        } else if let Some((_, parts)) = current.as_mut() {
            parts.push(line.to_string());
        }
    }
    flush(current, &mut out);

    out
}

fn flush(entry: Option<(String, Vec<String>)>, out: &mut HashMap<String, String>) {
    if let Some((name, parts)) = entry {
        let description = join_description(parts.iter().map(String::as_str));
        if !description.is_empty() {
            out.insert(name, description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(doc: &str) -> Vec<&str> {
        doc.lines().collect()
    }

    #[test]
    fn test_detect_param_fields() {
        assert!(detect(&lines("Doc.\n\n:param x: y")));
        assert!(detect(&lines("Doc.\n\n:param int x: y")));
        assert!(!detect(&lines("Doc.\n\n:returns: nothing")));
        assert!(!detect(&lines("Doc.\n\nArgs:\n    x: y")));
    }

    #[test]
    fn test_parse_simple_fields() {
        let doc = "Echo.\n\n:param content: The text.\n:param channel: Target channel.";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["content"], "The text.");
        assert_eq!(parsed["channel"], "Target channel.");
    }

    #[test]
    fn test_parse_typed_param_and_type_fields() {
        let doc = "Meow.\n\n:param int sicko: i'm ok girl\n:type sicko: int\n:param extra: yeet\n:type extra: hikari.User\n:returns: nothing";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["sicko"], "i'm ok girl");
        assert_eq!(parsed["extra"], "yeet");
    }

    #[test]
    fn test_parse_multi_line_and_next_line_descriptions() {
        let doc = "Meow.\n\n:param sick: i'm ok girl\n    meow meow\n:param respect:\n    I'm literally just writing\n    random words.\n:raises RuntimeError: VooDoo";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed["sick"], "i'm ok girl meow meow");
        assert_eq!(parsed["respect"], "I'm literally just writing random words.");
        assert!(!parsed.contains_key("RuntimeError"));
    }

    #[test]
    fn test_duplicate_param_last_wins() {
        let parsed = parse(&lines(":param x: first\n:param x: second"));
        assert_eq!(parsed["x"], "second");
    }

    #[test]
    fn test_section_start_is_first_field() {
        assert_eq!(section_start(&lines("Doc.\nmore\n:param x: y")), Some(2));
        assert_eq!(section_start(&lines("Doc with: colon")), None);
    }
}
