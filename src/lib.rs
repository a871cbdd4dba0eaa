// Core layer - shared types and configuration
pub mod core;

// Docstring parsing
pub mod docparse;

// Features layer - help pages, eval and the delete button
pub mod features;

// Component and modal routing
pub mod message_components;

// Application layer
pub mod commands;

pub use core::{ComponentsConfig, Config, DocError};
pub use docparse::{extract, DocStyle, ParsedDoc};

pub use commands::{CallbackMetadata, CommandRegistry, DocumentedCommand, SlashCommandGroup};
pub use features::{HelpIndex, HelpSource};
