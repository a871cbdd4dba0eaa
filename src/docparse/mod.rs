//! # Docstring Description Extractor
//!
//! Pulls the summary and per-parameter descriptions out of a handler
//! docstring written in Google, NumPy or Sphinx reST style.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Style auto-detection and `Other Parameters` sections
//! - 0.1.0: Initial Google and reST support

mod google;
mod numpy;
mod rest;
pub mod text;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::error::DocError;

pub use text::clean_docstring;

/// Docstring flavours understood by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocStyle {
    Google,
    Numpy,
    Rest,
}

impl DocStyle {
    /// Detection order used when no style is given. First match wins.
    pub const DETECTION_ORDER: [DocStyle; 3] = [DocStyle::Google, DocStyle::Numpy, DocStyle::Rest];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocStyle::Google => "google",
            DocStyle::Numpy => "numpy",
            DocStyle::Rest => "rest",
        }
    }

    /// Detect the style of an already cleaned docstring.
    pub fn detect(lines: &[&str]) -> Option<DocStyle> {
        Self::DETECTION_ORDER
            .into_iter()
            .find(|style| style.matches(lines))
    }

    fn matches(&self, lines: &[&str]) -> bool {
        match self {
            DocStyle::Google => google::detect(lines),
            DocStyle::Numpy => numpy::detect(lines),
            DocStyle::Rest => rest::detect(lines),
        }
    }

    fn section_start(&self, lines: &[&str]) -> Option<usize> {
        match self {
            DocStyle::Google => google::section_start(lines),
            DocStyle::Numpy => numpy::section_start(lines),
            DocStyle::Rest => rest::section_start(lines),
        }
    }

    fn parse_parameters(&self, lines: &[&str]) -> HashMap<String, String> {
        match self {
            DocStyle::Google => google::parse(lines),
            DocStyle::Numpy => numpy::parse(lines),
            DocStyle::Rest => rest::parse(lines),
        }
    }
}

impl fmt::Display for DocStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocStyle {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(DocStyle::Google),
            "numpy" => Ok(DocStyle::Numpy),
            "rest" | "rst" | "sphinx" | "restructuredtext" => Ok(DocStyle::Rest),
            _ => Err(DocError::UnsupportedStyle(s.to_string())),
        }
    }
}

/// Summary and parameter descriptions of one docstring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub summary: String,
    pub parameters: HashMap<String, String>,
}

impl ParsedDoc {
    pub fn description_of(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// Extract the summary and parameter descriptions from `docstring`.
///
/// With `style` set to `None` the style is auto-detected in
/// [`DocStyle::DETECTION_ORDER`]; an undetectable docstring yields only a
/// summary. Empty input gives an empty result.
pub fn extract(docstring: &str, style: Option<DocStyle>) -> ParsedDoc {
    let cleaned = clean_docstring(docstring);
    if cleaned.is_empty() {
        return ParsedDoc::default();
    }

    let lines: Vec<&str> = cleaned.lines().collect();
    let style = style.or_else(|| DocStyle::detect(&lines));

    match style {
        Some(style) => {
            let section_start = style.section_start(&lines);
            // reST prose runs up to the first field, across paragraphs
            let summary = match style {
                DocStyle::Rest => text::leading_text(&lines, section_start),
                DocStyle::Google | DocStyle::Numpy => text::summary(&lines, section_start),
            };
            ParsedDoc {
                summary,
                parameters: style.parse_parameters(&lines),
            }
        }
        None => ParsedDoc {
            summary: text::summary(&lines, None),
            parameters: HashMap::new(),
        },
    }
}

/// Like [`extract`] but with the style given as a config/user tag.
pub fn extract_with_style_name(docstring: &str, style: Option<&str>) -> Result<ParsedDoc, DocError> {
    let style = style.map(DocStyle::from_str).transpose()?;
    Ok(extract(docstring, style))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAN_DOC: &str = "Ban a user.\n\n    Args:\n        user: The user to ban.\n        reason: Why.\n    ";

    #[test]
    fn test_google_example() {
        let parsed = extract(BAN_DOC, Some(DocStyle::Google));
        assert_eq!(parsed.summary, "Ban a user.");
        assert_eq!(parsed.parameters.len(), 2);
        assert_eq!(parsed.description_of("user"), Some("The user to ban."));
        assert_eq!(parsed.description_of("reason"), Some("Why."));
    }

    #[test]
    fn test_sphinx_example() {
        let doc = "Echo.\n\n:param content: The text.\n:param channel: Target channel.";
        let parsed = extract_with_style_name(doc, Some("sphinx")).unwrap();
        assert_eq!(parsed.summary, "Echo.");
        assert_eq!(parsed.description_of("content"), Some("The text."));
        assert_eq!(parsed.description_of("channel"), Some("Target channel."));
    }

    #[test]
    fn test_numpy_example() {
        let doc = "Purge messages.\n\n    Parameters\n    ----------\n    count : int\n        How many messages\n        to remove.\n    ";
        let parsed = extract(doc, Some(DocStyle::Numpy));
        assert_eq!(parsed.summary, "Purge messages.");
        assert_eq!(parsed.description_of("count"), Some("How many messages to remove."));
    }

    #[test]
    fn test_sphinx_summary_keeps_every_paragraph_before_fields() {
        let doc = "Echo text.\n\nRepeats it back.\n\n:param content: The text.";
        let parsed = extract(doc, Some(DocStyle::Rest));
        assert_eq!(parsed.summary, "Echo text. Repeats it back.");
        assert_eq!(parsed.description_of("content"), Some("The text."));
        assert_eq!(extract(doc, None), parsed);
    }

    #[test]
    fn test_google_summary_is_first_paragraph_only() {
        let doc = "Ban a user.\n\nLonger prose.\n\nArgs:\n    user: Who.";
        assert_eq!(extract(doc, Some(DocStyle::Google)).summary, "Ban a user.");
    }

    #[test]
    fn test_google_type_with_parenthesised_description() {
        let doc = "Ban.\n\nArgs:\n    user (Member): The user (or role): banned now.";
        let parsed = extract(doc, Some(DocStyle::Google));
        assert_eq!(parsed.description_of("user"), Some("The user (or role): banned now."));
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = extract_with_style_name("Doc.", Some("klingon")).unwrap_err();
        assert!(matches!(err, DocError::UnsupportedStyle(ref tag) if tag == "klingon"));
        assert_eq!(err.to_string(), "Unsupported docstring style 'klingon'");
    }

    #[test]
    fn test_empty_docstring() {
        assert_eq!(extract("", None), ParsedDoc::default());
        assert_eq!(extract("  \n  ", Some(DocStyle::Google)), ParsedDoc::default());
    }

    #[test]
    fn test_extract_is_idempotent() {
        assert_eq!(extract(BAN_DOC, None), extract(BAN_DOC, None));
    }

    #[test]
    fn test_auto_detect_matches_explicit_google() {
        assert_eq!(extract(BAN_DOC, None), extract(BAN_DOC, Some(DocStyle::Google)));
    }

    #[test]
    fn test_auto_detect_order() {
        let lines = ["Doc.", "", "Args:", "    x: y", ":param z: w"];
        assert_eq!(DocStyle::detect(&lines), Some(DocStyle::Google));
        let lines = ["Doc.", "", ":param z: w"];
        assert_eq!(DocStyle::detect(&lines), Some(DocStyle::Rest));
        assert_eq!(DocStyle::detect(&["Just prose."]), None);
    }

    #[test]
    fn test_undetected_style_keeps_summary() {
        let parsed = extract("Say hello\nto everyone.\n\nNothing else here.", None);
        assert_eq!(parsed.summary, "Say hello to everyone.");
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn test_summary_cut_at_squashed_section() {
        let parsed = extract("Kick a user.\nArgs:\n    user: Who.", None);
        assert_eq!(parsed.summary, "Kick a user.");
        assert_eq!(parsed.description_of("user"), Some("Who."));
    }

    #[test]
    fn test_style_names_round_trip() {
        for style in DocStyle::DETECTION_ORDER {
            assert_eq!(style.to_string().parse::<DocStyle>().unwrap(), style);
        }
        assert_eq!("  NumPy ".parse::<DocStyle>().unwrap(), DocStyle::Numpy);
    }
}
