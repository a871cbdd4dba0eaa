//! # Features
//!
//! Pre-built components layered on the command builder.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

pub mod buttons;
pub mod eval;
pub mod help;

pub use buttons::{can_delete, delete_row, make_delete_id, parse_owner_ids, DELETE_CUSTOM_ID};
pub use eval::{extract_code, EvalExecutor, EvalFile, EvalOutput, FileStore};
pub use help::{HelpIndex, HelpPage, HelpSource};
