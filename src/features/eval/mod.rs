//! # Eval Feature
//!
//! Owner only code evaluation: code block extraction, output rendering and
//! a short lived store for the "to file" button.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0
//! - **Toggleable**: true

pub mod executor;

pub use executor::EvalExecutor;

use dashmap::DashMap;
use regex::Regex;
use serenity::builder::CreateEmbed;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::core::chunk_text;
use crate::core::embeds::{coloured_embed, FAIL_COLOUR, PASS_COLOUR};

/// Custom id prefix of the "to file" button
pub const FILE_BUTTON_PREFIX: &str = "tc_file";
pub const FILE_EMOJI: &str = "🗃️";

/// Characters per rendered page, fence included
const PAGE_LIMIT: usize = 2034;
const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";

const FILE_TTL: Duration = Duration::from_secs(15 * 60);

fn code_block_pattern() -> &'static Regex {
    static CODE_BLOCK: OnceLock<Regex> = OnceLock::new();
    CODE_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)```(?:\w*\n)?(.*?)\n*```").expect("code block pattern is valid")
    })
}

/// Strip a surrounding code block (language tag optional); bare code is returned trimmed.
pub fn extract_code(content: &str) -> String {
    match code_block_pattern().captures(content) {
        Some(caps) => caps[1].to_string(),
        None => content.trim().to_string(),
    }
}

/// Captured result of one eval run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvalOutput {
    pub stdout: String,
    pub stderr: String,
    pub exec_time_ms: u64,
    pub failed: bool,
}

impl EvalOutput {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (name, stream) in [("stdout", &self.stdout), ("stderr", &self.stderr)] {
            lines.push(format!("- /dev/{name}:"));
            lines.extend(stream.lines().map(String::from));
        }
        lines
    }

    /// Output split into fenced pages that fit an embed.
    pub fn render_pages(&self) -> Vec<String> {
        let body_limit = PAGE_LIMIT - FENCE_OPEN.len() - FENCE_CLOSE.len();
        chunk_text(&self.lines().join("\n"), body_limit)
            .into_iter()
            .map(|page| format!("{FENCE_OPEN}{page}{FENCE_CLOSE}"))
            .collect()
    }

    pub fn colour(&self) -> u32 {
        if self.failed {
            FAIL_COLOUR
        } else {
            PASS_COLOUR
        }
    }

    pub fn footer(&self) -> String {
        format!("Time taken: {} ms", self.exec_time_ms)
    }

    pub fn page_embed(&self, index: usize, page: &str) -> CreateEmbed {
        coloured_embed(
            &format!("Eval page {}", index + 1),
            page,
            self.colour(),
            Some(&self.footer()),
        )
    }

    pub fn files(&self) -> Vec<EvalFile> {
        vec![
            EvalFile {
                name: "stdout.txt".to_string(),
                data: self.stdout.as_bytes().to_vec(),
            },
            EvalFile {
                name: "stderr.txt".to_string(),
                data: self.stderr.as_bytes().to_vec(),
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// Output files waiting for their "to file" button, dropped after 15 minutes
#[derive(Clone, Default)]
pub struct FileStore {
    entries: Arc<DashMap<String, (Instant, Vec<EvalFile>)>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `files` and return the id to put in the button.
    pub fn insert(&self, files: Vec<EvalFile>) -> String {
        self.purge_expired();
        let id = Uuid::new_v4().simple().to_string();
        self.entries.insert(id.clone(), (Instant::now(), files));
        id
    }

    /// Take the files for `id`. Each id can be redeemed once.
    pub fn take(&self, id: &str) -> Option<Vec<EvalFile>> {
        let (_, (stored_at, files)) = self.entries.remove(id)?;
        (stored_at.elapsed() < FILE_TTL).then_some(files)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn purge_expired(&self) {
        self.entries.retain(|_, (stored_at, _)| stored_at.elapsed() < FILE_TTL);
    }
}

pub fn file_button_id(id: &str) -> String {
    format!("{FILE_BUTTON_PREFIX}:{id}")
}
