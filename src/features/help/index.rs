//! Help index: categorised pages of command summaries

use serenity::builder::CreateEmbed;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

use crate::commands::metadata::CallbackMetadata;
use crate::core::embeds::{coloured_embed, PASS_COLOUR};
use crate::docparse::clean_docstring;

pub const HELP_EMBED_TITLE: &str = "Command descriptions";

/// Hex chars of the digest kept in the hash; custom ids are capped at 100 chars.
const HASH_LENGTH: usize = 16;

/// One command as seen by the help listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSource {
    pub name: String,
    /// Full description: the help override or the normalised docstring
    pub description: String,
    pub category: String,
    pub hidden: bool,
    pub overridden: bool,
}

impl HelpSource {
    pub fn from_metadata(meta: &CallbackMetadata, default_category: &str) -> Self {
        let override_text = meta
            .help
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let description = match override_text {
            Some(text) => text.to_string(),
            None => clean_docstring(meta.docstring.as_deref().unwrap_or_default()),
        };

        Self {
            name: meta.command_name().to_string(),
            description,
            category: meta
                .help
                .category
                .clone()
                .unwrap_or_else(|| default_category.to_string()),
            hidden: meta.help.hidden,
            overridden: override_text.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpPage {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct HelpIndex {
    pages: Vec<HelpPage>,
    descriptions: HashMap<String, String>,
    hash: String,
}

fn normalise_name(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

impl HelpIndex {
    pub fn build(sources: &[HelpSource], page_size: usize, include_undocumented: bool) -> Self {
        let page_size = page_size.max(1);
        let mut categories: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
        let mut descriptions = HashMap::new();

        for source in sources {
            if source.hidden || (!include_undocumented && !source.overridden) {
                continue;
            }
            if source.description.trim().is_empty() {
                continue;
            }

            let summary = source.description.lines().next().unwrap_or_default();
            categories
                .entry(source.category.as_str())
                .or_default()
                .push((source.name.as_str(), summary));
            descriptions.insert(normalise_name(&source.name), source.description.clone());
        }

        let mut pages = Vec::new();
        for (category, commands) in &categories {
            for chunk in commands.chunks(page_size) {
                let description = chunk
                    .iter()
                    .map(|(name, summary)| format!("{name}: {summary}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                pages.push(HelpPage {
                    title: format!("{category} commands"),
                    description,
                });
            }
        }

        let hash = content_hash(&descriptions);
        Self {
            pages,
            descriptions,
            hash,
        }
    }

    pub fn pages(&self) -> &[HelpPage] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&HelpPage> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Changes whenever any listed command or description changes
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Full description of a command, matched case-insensitively.
    pub fn find_command(&self, name: &str) -> Option<&str> {
        self.descriptions.get(&normalise_name(name)).map(String::as_str)
    }

    /// Embed for the zero-based page `index`
    pub fn page_embed(&self, index: usize) -> Option<CreateEmbed> {
        let page = self.page(index)?;
        let footer = format!("Help page {}/{}", index + 1, self.page_count());
        Some(coloured_embed(
            HELP_EMBED_TITLE,
            &format!("**{}**\n{}", page.title, page.description),
            PASS_COLOUR,
            Some(&footer),
        ))
    }
}

fn content_hash(descriptions: &HashMap<String, String>) -> String {
    let mut items: Vec<String> = descriptions
        .iter()
        .map(|(name, description)| format!("{name}:{description}"))
        .collect();
    items.sort();

    let mut hasher = Sha256::new();
    hasher.update(items.join(",").as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("sha256-{}", &digest[..HASH_LENGTH])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, description: &str, category: &str) -> HelpSource {
        HelpSource {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            hidden: false,
            overridden: false,
        }
    }

    #[test]
    fn test_from_metadata_prefers_override() {
        let meta = CallbackMetadata::new("ban")
            .doc("Ban a user.\n\nArgs:\n    user: Who.")
            .with_help("Ban someone for good.")
            .category("moderation");
        let source = HelpSource::from_metadata(&meta, "general");
        assert_eq!(source.description, "Ban someone for good.");
        assert_eq!(source.category, "moderation");
        assert!(source.overridden);

        let source = HelpSource::from_metadata(&CallbackMetadata::new("ping").doc("Pong."), "utility");
        assert_eq!(source.description, "Pong.");
        assert_eq!(source.category, "utility");
        assert!(!source.overridden);
    }

    #[test]
    fn test_pages_grouped_and_sorted_by_category() {
        let sources = vec![
            source("ping", "Check latency.\nMore text.", "utility"),
            source("ban", "Ban a user.", "moderation"),
            source("echo", "Repeat text.", "utility"),
        ];
        let index = HelpIndex::build(&sources, 10, true);

        assert_eq!(index.page_count(), 2);
        assert_eq!(index.pages()[0].title, "moderation commands");
        assert_eq!(index.pages()[0].description, "ban: Ban a user.");
        assert_eq!(index.pages()[1].title, "utility commands");
        assert_eq!(index.pages()[1].description, "ping: Check latency.\necho: Repeat text.");
    }

    #[test]
    fn test_page_size_splits_category() {
        let sources: Vec<HelpSource> = (0..5)
            .map(|i| source(&format!("cmd{i}"), "Does things.", "general"))
            .collect();
        let index = HelpIndex::build(&sources, 2, true);
        assert_eq!(index.page_count(), 3);
        assert!(index.pages().iter().all(|p| p.title == "general commands"));
    }

    #[test]
    fn test_hidden_and_empty_are_skipped() {
        let mut hidden = source("eval", "Run code.", "owner");
        hidden.hidden = true;
        let sources = vec![hidden, source("blank", "  ", "general"), source("ping", "Pong.", "general")];
        let index = HelpIndex::build(&sources, 10, true);

        assert_eq!(index.page_count(), 1);
        assert!(index.find_command("eval").is_none());
        assert!(index.find_command("blank").is_none());
    }

    #[test]
    fn test_exclude_undocumented() {
        let mut documented = source("ban", "Ban a user.", "moderation");
        documented.overridden = true;
        let sources = vec![documented, source("ping", "Pong.", "general")];
        let index = HelpIndex::build(&sources, 10, false);

        assert_eq!(index.page_count(), 1);
        assert!(index.find_command("ping").is_none());
    }

    #[test]
    fn test_find_command_normalises_name() {
        let index = HelpIndex::build(&[source("ping", "Pong.\n\nFull text.", "general")], 10, true);
        assert_eq!(index.find_command("  PING "), Some("Pong.\n\nFull text."));
        assert_eq!(index.find_command("pong"), None);
    }

    #[test]
    fn test_hash_tracks_content() {
        let first = HelpIndex::build(&[source("ping", "Pong.", "general")], 10, true);
        let same = HelpIndex::build(&[source("ping", "Pong.", "other")], 10, true);
        let changed = HelpIndex::build(&[source("ping", "Pong!", "general")], 10, true);

        assert!(first.hash().starts_with("sha256-"));
        assert_eq!(first.hash().len(), "sha256-".len() + 16);
        assert_eq!(first.hash(), same.hash());
        assert_ne!(first.hash(), changed.hash());
    }

    #[test]
    fn test_hash_is_lowercase_hex_of_sorted_pairs() {
        let index = HelpIndex::build(&[source("ping", "Pong.", "general")], 10, true);
        assert_eq!(index.hash(), "sha256-c75e2ad951a731ce");
    }

    #[test]
    fn test_page_embed_footer() {
        let index = HelpIndex::build(&[source("ping", "Pong.", "general")], 10, true);
        let embed = index.page_embed(0).unwrap();
        assert_eq!(embed.0.get("title").and_then(|v| v.as_str()), Some(HELP_EMBED_TITLE));
        assert_eq!(embed.0["footer"]["text"].as_str(), Some("Help page 1/1"));
        assert!(index.page_embed(1).is_none());
    }
}
