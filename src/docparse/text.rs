//! Line helpers shared by the style parsers

const TAB_WIDTH: usize = 8;

/// Normalise a raw docstring before parsing.
///
/// Tabs are expanded, the first line is stripped, the common indentation of
/// the remaining lines is removed, and leading/trailing blank lines are
/// dropped.
pub fn clean_docstring(raw: &str) -> String {
    let expanded: Vec<String> = raw.lines().map(expand_tabs).collect();
    if expanded.is_empty() {
        return String::new();
    }

    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| indent_of(line))
        .min()
        .unwrap_or(0);

    let mut lines: Vec<&str> = Vec::with_capacity(expanded.len());
    lines.push(expanded[0].trim());
    for line in expanded.iter().skip(1) {
        if is_blank(line) {
            lines.push("");
        } else {
            // margin is a char count, so cut on a char boundary
            let cut = line
                .char_indices()
                .nth(margin)
                .map(|(index, _)| index)
                .unwrap_or(line.len());
            lines.push(line[cut..].trim_end());
        }
    }

    let start = lines.iter().position(|line| !is_blank(line));
    let end = lines.iter().rposition(|line| !is_blank(line));
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - (column % TAB_WIDTH);
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub(crate) fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Join description fragments with single spaces, trimming each line.
pub(crate) fn join_description<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First paragraph of the docstring, cut short at `section_start`.
pub(crate) fn summary(lines: &[&str], section_start: Option<usize>) -> String {
    let limit = section_start.unwrap_or(lines.len()).min(lines.len());
    join_description(
        lines[..limit]
            .iter()
            .copied()
            .take_while(|line| !is_blank(line)),
    )
}

/// Every non-blank line before `section_start`, joined with spaces.
pub(crate) fn leading_text(lines: &[&str], section_start: Option<usize>) -> String {
    let limit = section_start.unwrap_or(lines.len()).min(lines.len());
    join_description(lines[..limit].iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_docstring_removes_common_margin() {
        let raw = "Summary line.\n\n        Args:\n            user: The user.\n        ";
        assert_eq!(clean_docstring(raw), "Summary line.\n\nArgs:\n    user: The user.");
    }

    #[test]
    fn test_clean_docstring_drops_leading_blank_lines() {
        let raw = "\n\n    Body only.\n    Second line.\n";
        assert_eq!(clean_docstring(raw), "Body only.\nSecond line.");
    }

    #[test]
    fn test_clean_docstring_empty() {
        assert_eq!(clean_docstring(""), "");
        assert_eq!(clean_docstring("   \n\t\n"), "");
    }

    #[test]
    fn test_clean_docstring_expands_tabs() {
        let raw = "Title.\n\tindented";
        assert_eq!(clean_docstring(raw), "Title.\nindented");
    }

    #[test]
    fn test_join_description_collapses_lines() {
        let joined = join_description(["  first ", "", "second", "   "]);
        assert_eq!(joined, "first second");
    }

    #[test]
    fn test_summary_stops_at_blank_line() {
        let lines = ["Ban a user", "from the guild.", "", "More text."];
        assert_eq!(summary(&lines, None), "Ban a user from the guild.");
    }

    #[test]
    fn test_leading_text_spans_paragraphs() {
        let lines = ["Echo text.", "", "Repeats it back.", "", ":param content: The text."];
        assert_eq!(leading_text(&lines, Some(4)), "Echo text. Repeats it back.");
        assert_eq!(leading_text(&lines, Some(0)), "");
    }

    #[test]
    fn test_summary_stops_at_section() {
        let lines = ["Short.", "Parameters", "----------"];
        assert_eq!(summary(&lines, Some(1)), "Short.");
        assert_eq!(summary(&lines, Some(0)), "");
    }
}
