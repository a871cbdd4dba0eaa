//! Google style: `Args:` sections with `name (type): description` entries

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::text::{indent_of, is_blank, join_description};

/// Headers that open a parameter section
const PARAMETER_HEADERS: &[&str] = &[
    "args",
    "arguments",
    "parameters",
    "params",
    "other parameters",
    "keyword args",
    "keyword arguments",
];

/// Other headers that end the summary block
const OTHER_HEADERS: &[&str] = &[
    "attributes",
    "example",
    "examples",
    "note",
    "notes",
    "raises",
    "references",
    "return",
    "returns",
    "see also",
    "todo",
    "warning",
    "warnings",
    "yield",
    "yields",
];

fn entry_pattern() -> &'static Regex {
    static ENTRY: OnceLock<Regex> = OnceLock::new();
    ENTRY.get_or_init(|| {
        Regex::new(r"^\*{0,2}(\w+)\s*(?:\(.*?\))?\s*:\s*(.*)$").expect("google entry pattern is valid")
    })
}

fn header_name(line: &str) -> Option<String> {
    let name = line.trim().strip_suffix(':')?.trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

fn is_parameter_header(line: &str) -> bool {
    header_name(line).is_some_and(|name| PARAMETER_HEADERS.contains(&name.as_str()))
}

fn is_section_header(line: &str) -> bool {
    header_name(line).is_some_and(|name| {
        PARAMETER_HEADERS.contains(&name.as_str()) || OTHER_HEADERS.contains(&name.as_str())
    })
}

pub(super) fn detect(lines: &[&str]) -> bool {
    lines.iter().any(|line| is_parameter_header(line))
}

pub(super) fn section_start(lines: &[&str]) -> Option<usize> {
    lines.iter().position(|line| is_section_header(line))
}

struct Entry<'a> {
    name: String,
    parts: Vec<&'a str>,
}

fn flush(entry: Option<Entry<'_>>, out: &mut HashMap<String, String>) {
    if let Some(entry) = entry {
        let description = join_description(entry.parts);
        if !description.is_empty() {
            out.insert(entry.name, description);
        }
    }
}

pub(super) fn parse(lines: &[&str]) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut index = 0;

    while index < lines.len() {
        if !is_parameter_header(lines[index]) {
            index += 1;
            continue;
        }

        let header_indent = indent_of(lines[index]);
        let mut entry_indent: Option<usize> = None;
        let mut current: Option<Entry> = None;
        index += 1;

        while index < lines.len() {
            let line = lines[index];
            if is_blank(line) {
                index += 1;
                continue;
            }

            let indent = indent_of(line);
            if indent <= header_indent {
                break;
            }

            let entry_level = *entry_indent.get_or_insert(indent);
            if indent <= entry_level {
                flush(current.take(), &mut out);
                current = entry_pattern().captures(line.trim()).map(|caps| Entry {
                    name: caps[1].to_string(),
                    parts: vec![caps.get(2).map_or("", |m| m.as_str())],
                });
            } else if let Some(entry) = current.as_mut() {
                entry.parts.push(line);
            }
            index += 1;
        }

        flush(current, &mut out);
    }

    out
}
