//! NumPy style: underlined `Parameters` titles with `name : type` entries

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::text::{indent_of, is_blank, join_description};

const PARAMETER_TITLES: &[&str] = &["parameters", "other parameters"];

fn entry_pattern() -> &'static Regex {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    ENTRY.get_or_init(|| {
        Regex::new(r"^\*{0,2}(\w+)(?:\s*:.*)?$").expect("numpy entry pattern is valid")
    })
}

fn is_dash_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

/// A title is any non-blank line directly underlined by dashes.
fn is_title(lines: &[&str], index: usize) -> bool {
    !is_blank(lines[index]) && !is_dash_line(lines[index]) && lines.get(index + 1).is_some_and(|next| is_dash_line(next))
}

/// Parameter titles need an underline at least as long as the title itself.
fn is_parameter_title(lines: &[&str], index: usize) -> bool {
    if !is_title(lines, index) {
        return false;
    }
    let title = lines[index].trim();
    if !PARAMETER_TITLES.contains(&title.to_lowercase().as_str()) {
        return false;
    }
    lines[index + 1].trim().chars().count() >= title.chars().count()
}

pub(super) fn detect(lines: &[&str]) -> bool {
    (0..lines.len()).any(|index| is_parameter_title(lines, index))
}

pub(super) fn section_start(lines: &[&str]) -> Option<usize> {
    (0..lines.len()).find(|&index| is_title(lines, index))
}

pub(super) fn parse(lines: &[&str]) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut index = 0;

    while index < lines.len() {
        if !is_parameter_title(lines, index) {
            index += 1;
            continue;
        }

        let title_indent = indent_of(lines[index]);
        let mut current: Option<(String, Vec<&str>)> = None;
        index += 2;

        while index < lines.len() {
            let line = lines[index];
            if is_blank(line) {
                index += 1;
                continue;
            }
            let indent = indent_of(line);
            if indent <= title_indent && (is_dash_line(line) || is_title(lines, index)) {
                break;
            }
            // dividers inside a description are not text
            if is_dash_line(line) {
                index += 1;
                continue;
            }

            if indent <= title_indent {
                flush(current.take(), &mut out);
                current = entry_pattern()
                    .captures(line.trim())
                    .map(|caps| (caps[1].to_string(), Vec::new()));
            } else if let Some((_, parts)) = current.as_mut() {
                parts.push(line);
            }
            index += 1;
        }

        flush(current, &mut out);
    }

    out
}

fn flush(entry: Option<(String, Vec<&str>)>, out: &mut HashMap<String, String>) {
    if let Some((name, parts)) = entry {
        let description = join_description(parts);
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
    fn test_detect_requires_underline() {
        assert!(detect(&lines("Doc.\n\nParameters\n----------\nx : int\n    y")));
        assert!(detect(&lines("Doc.\n\nOther Parameters\n----------------\nx\n    y")));
        assert!(!detect(&lines("Doc.\n\nParameters\nx : int\n    y")));
        assert!(!detect(&lines("Doc.\n\nArgs:\n    x: y")));
    }

    #[test]
    fn test_short_underline_is_not_a_section() {
        let doc = lines("Doc.\n\nParameters\n-----\nx : int\n    y");
        assert!(!detect(&doc));
        assert!(parse(&doc).is_empty());
    }

    #[test]
    fn test_parse_entries_with_types() {
        let doc = "Meow.\n\nParameters\n----------\nsicko : int\n    i'm ok girl\nextra: hikari.User\n    yeet\necho\n    go to work";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["sicko"], "i'm ok girl");
        assert_eq!(parsed["extra"], "yeet");
        assert_eq!(parsed["echo"], "go to work");
    }

    #[test]
    fn test_parse_multi_line_descriptions() {
        let doc = "Meow.\n\nParameters\n----------\nsick : int\n    i'm ok girl\n    meow meow\n\n    echo echo\nstuff : str\n    go to work";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed["sick"], "i'm ok girl meow meow echo echo");
        assert_eq!(parsed["stuff"], "go to work");
    }

    #[test]
    fn test_section_ends_at_next_title() {
        let doc = "Meow.\n\nParameters\n----------\nbeep : int\n    im\nReturns\n-------\nint\n    Semantics.";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["beep"], "im");
    }

    #[test]
    fn test_parameters_and_other_parameters() {
        let doc = "Meow.\n\nParameters\n----------\nbeep : int\n    im\n\nOther Parameters\n----------------\nsheep : str\n    a beep\n\nRaises\n------\nRuntimeError\n    VooDoo";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["beep"], "im");
        assert_eq!(parsed["sheep"], "a beep");
    }

    #[test]
    fn test_indented_divider_does_not_end_section() {
        let doc = "Meow.\n\nParameters\n----------\nbeep : int\n    first part\n    ----\n    second part\nsheep : str\n    a beep";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["beep"], "first part second part");
        assert_eq!(parsed["sheep"], "a beep");
    }

    #[test]
    fn test_duplicate_param_last_wins() {
        let doc = "Meow.\n\nParameters\n----------\nx : int\n    first\nx : str\n    second";
        let parsed = parse(&lines(doc));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["x"], "second");
    }

    #[test]
    fn test_section_start_finds_first_title() {
        assert_eq!(section_start(&lines("Doc.\n\nReturns\n-------")), Some(2));
        assert_eq!(section_start(&lines("Doc.\nMore doc.")), None);
    }
}
