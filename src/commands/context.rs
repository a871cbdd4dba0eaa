//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Help index, eval executor and owner list
//! - 1.0.0: Initial implementation with core shared state

use std::collections::HashSet;
use std::sync::Arc;

use crate::features::eval::{EvalExecutor, FileStore};
use crate::features::help::HelpIndex;

/// State shared by every handler and the component router
#[derive(Clone)]
pub struct CommandContext {
    pub help_index: Arc<HelpIndex>,
    pub eval_executor: EvalExecutor,
    pub file_store: FileStore,
    pub owner_ids: Arc<HashSet<u64>>,
    pub start_time: std::time::Instant,
}

impl CommandContext {
    pub fn new(help_index: HelpIndex, eval_executor: EvalExecutor, owner_ids: HashSet<u64>) -> Self {
        Self {
            help_index: Arc::new(help_index),
            eval_executor,
            file_store: FileStore::new(),
            owner_ids: Arc::new(owner_ids),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_ids.contains(&user_id)
    }

    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EvalConfig;

    #[test]
    fn test_is_owner() {
        let ctx = CommandContext::new(
            HelpIndex::default(),
            EvalExecutor::new(&EvalConfig::default()),
            HashSet::from([1, 2]),
        );
        assert!(ctx.is_owner(1));
        assert!(!ctx.is_owner(3));
    }
}
