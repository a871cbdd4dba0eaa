//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: HelpHandler and EvalHandler, descriptions from docstrings
//! - 1.0.0: Initial extraction of utility commands

pub mod eval;
pub mod help;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;
use crate::core::config::ComponentsConfig;

/// Create all command handlers enabled in `config`
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers(config: &ComponentsConfig) -> Vec<Arc<dyn SlashCommandHandler>> {
    let mut handlers: Vec<Arc<dyn SlashCommandHandler>> = vec![Arc::new(utility::UtilityHandler)];
    if config.help.enabled {
        handlers.push(Arc::new(help::HelpHandler));
    }
    if config.eval.enabled {
        handlers.push(Arc::new(eval::EvalHandler));
    }
    handlers
}
