//! Callback metadata handed to the command builder
//!
//! Handlers describe their callbacks explicitly: name, docstring, declared
//! parameters in order, help overrides and slash settings.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;

/// A declared callback parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: CommandOptionType,
    pub required: bool,
}

/// Help listing overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpMeta {
    /// Replaces the docstring summary in the help listing
    pub description: Option<String>,
    /// Replaces the handler's category
    pub category: Option<String>,
    pub hidden: bool,
}

/// How the callback is declared as a slash command
#[derive(Debug, Clone, PartialEq)]
pub struct SlashSettings {
    /// Overrides the callback name
    pub name: Option<String>,
    pub default_member_permissions: Option<Permissions>,
    pub dm_enabled: Option<bool>,
    pub is_global: bool,
    /// Place required options before optional ones
    pub sort_options: bool,
}

impl Default for SlashSettings {
    fn default() -> Self {
        Self {
            name: None,
            default_member_permissions: None,
            dm_enabled: None,
            is_global: true,
            sort_options: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallbackMetadata {
    pub name: String,
    pub docstring: Option<String>,
    pub params: Vec<ParamSpec>,
    pub help: HelpMeta,
    pub settings: SlashSettings,
}

impl CallbackMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            params: Vec::new(),
            help: HelpMeta::default(),
            settings: SlashSettings::default(),
        }
    }

    pub fn doc(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, kind: CommandOptionType) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    pub fn optional_param(mut self, name: impl Into<String>, kind: CommandOptionType) -> Self {
        self.params.push(ParamSpec {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    /// Override the description shown by the help command
    pub fn with_help(mut self, description: impl Into<String>) -> Self {
        self.help.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.help.category = Some(category.into());
        self
    }

    pub fn hide_from_help(mut self) -> Self {
        self.help.hidden = true;
        self
    }

    pub fn slash_settings(mut self, settings: SlashSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn guild_only(mut self) -> Self {
        self.settings.is_global = false;
        self
    }

    pub fn default_member_permissions(mut self, permissions: Permissions) -> Self {
        self.settings.default_member_permissions = Some(permissions);
        self
    }

    /// Name the command is registered under
    pub fn command_name(&self) -> &str {
        self.settings.name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let meta = CallbackMetadata::new("ban")
            .doc("Ban a user.")
            .param("user", CommandOptionType::User)
            .optional_param("reason", CommandOptionType::String)
            .category("moderation")
            .hide_from_help();

        assert_eq!(meta.command_name(), "ban");
        assert_eq!(meta.params.len(), 2);
        assert!(meta.params[0].required);
        assert!(!meta.params[1].required);
        assert_eq!(meta.help.category.as_deref(), Some("moderation"));
        assert!(meta.help.hidden);
        assert!(meta.settings.is_global);
    }

    #[test]
    fn test_name_override() {
        let meta = CallbackMetadata::new("ban_user").slash_settings(SlashSettings {
            name: Some("ban".to_string()),
            ..Default::default()
        });
        assert_eq!(meta.command_name(), "ban");
    }
}
