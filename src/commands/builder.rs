//! # Docstring Command Builder
//!
//! Turns [`CallbackMetadata`] into serenity command builders, taking the
//! command description from the first docstring line and option
//! descriptions from the parameter section.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Slash command groups
//! - 1.0.0: Command and option descriptions from docstrings

use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;

use super::metadata::CallbackMetadata;
use crate::core::error::DocError;
use crate::core::COMMAND_DESCRIPTION_LIMIT;
use crate::docparse::{self, clean_docstring, DocStyle};

const NAME_LIMIT: usize = 32;

/// Check a command or option name against Discord's naming rules.
pub fn validate_name(name: &str) -> Result<(), DocError> {
    let invalid = |reason: &'static str| DocError::InvalidName {
        name: name.to_string(),
        reason,
    };

    let length = name.chars().count();
    if length == 0 || length > NAME_LIMIT {
        return Err(invalid("must be between 1 and 32 characters"));
    }
    if name.chars().any(char::is_uppercase) {
        return Err(invalid("must be lowercase"));
    }
    if !name.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(invalid("may only contain letters, digits, '-' or '_'"));
    }
    Ok(())
}

fn validate_description(field: &str, description: &str) -> Result<(), DocError> {
    let length = description.chars().count();
    if length > COMMAND_DESCRIPTION_LIMIT {
        return Err(DocError::DescriptionTooLong {
            field: field.to_string(),
            length,
            max: COMMAND_DESCRIPTION_LIMIT,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentedOption {
    pub name: String,
    pub description: String,
    pub kind: CommandOptionType,
    pub required: bool,
}

impl DocumentedOption {
    pub fn build(&self) -> CreateApplicationCommandOption {
        let mut option = CreateApplicationCommandOption::default();
        option
            .name(&self.name)
            .description(&self.description)
            .kind(self.kind)
            .required(self.required);
        option
    }
}

/// A slash command whose descriptions come from a docstring
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentedCommand {
    pub name: String,
    pub description: String,
    /// Normalised docstring the command was built from
    pub docstring: String,
    pub options: Vec<DocumentedOption>,
    pub default_member_permissions: Option<Permissions>,
    pub dm_enabled: Option<bool>,
    pub is_global: bool,
    pub sort_options: bool,
}

impl DocumentedCommand {
    /// Name and description from the callback, options without descriptions yet.
    pub fn from_callback(meta: &CallbackMetadata) -> Result<Self, DocError> {
        let name = meta.command_name().to_string();
        validate_name(&name)?;

        let docstring = clean_docstring(meta.docstring.as_deref().unwrap_or_default());
        let description = docstring
            .lines()
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        if description.is_empty() {
            return Err(DocError::MissingDocstring { command: name });
        }
        validate_description(&name, &description)?;

        let options = meta
            .params
            .iter()
            .map(|param| {
                validate_name(&param.name)?;
                Ok(DocumentedOption {
                    name: param.name.clone(),
                    description: String::new(),
                    kind: param.kind,
                    required: param.required,
                })
            })
            .collect::<Result<Vec<_>, DocError>>()?;

        Ok(Self {
            name,
            description,
            docstring,
            options,
            default_member_permissions: meta.settings.default_member_permissions,
            dm_enabled: meta.settings.dm_enabled,
            is_global: meta.settings.is_global,
            sort_options: meta.settings.sort_options,
        })
    }

    /// Fill option descriptions from the docstring's parameter section.
    ///
    /// Documented names that aren't declared options are ignored.
    pub fn with_annotated_args(mut self, style: Option<DocStyle>) -> Result<Self, DocError> {
        let parsed = docparse::extract(&self.docstring, style);

        for option in &mut self.options {
            let description = parsed.description_of(&option.name).ok_or_else(|| {
                DocError::MissingOptionDescription {
                    command: self.name.clone(),
                    option: option.name.clone(),
                }
            })?;
            validate_description(&format!("{}.{}", self.name, option.name), description)?;
            option.description = description.to_string();
        }

        Ok(self)
    }

    /// Options in registration order: required ones first when sorting is on.
    pub fn ordered_options(&self) -> Vec<&DocumentedOption> {
        let mut options: Vec<&DocumentedOption> = self.options.iter().collect();
        if self.sort_options {
            options.sort_by_key(|option| !option.required);
        }
        options
    }

    pub fn build(&self) -> CreateApplicationCommand {
        let mut command = CreateApplicationCommand::default();
        command.name(&self.name).description(&self.description);
        for option in self.ordered_options() {
            command.add_option(option.build());
        }
        if let Some(permissions) = self.default_member_permissions {
            command.default_member_permissions(permissions);
        }
        if let Some(dm_enabled) = self.dm_enabled {
            command.dm_permission(dm_enabled);
        }
        command
    }

    /// Render as a sub command option of a [`SlashCommandGroup`].
    pub fn as_sub_command(&self) -> CreateApplicationCommandOption {
        let mut sub_command = CreateApplicationCommandOption::default();
        sub_command
            .name(&self.name)
            .description(&self.description)
            .kind(CommandOptionType::SubCommand);
        for option in self.ordered_options() {
            sub_command.add_sub_option(option.build());
        }
        sub_command
    }
}

/// A top level command made of documented sub commands
#[derive(Debug, Clone, PartialEq)]
pub struct SlashCommandGroup {
    pub name: String,
    pub description: String,
    pub sub_commands: Vec<DocumentedCommand>,
    pub default_member_permissions: Option<Permissions>,
    pub is_global: bool,
}

impl SlashCommandGroup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, DocError> {
        let name = name.into();
        let description = description.into();
        validate_name(&name)?;
        validate_description(&name, &description)?;
        Ok(Self {
            name,
            description,
            sub_commands: Vec::new(),
            default_member_permissions: None,
            is_global: true,
        })
    }

    pub fn add_sub_command(&mut self, command: DocumentedCommand) -> &mut Self {
        self.sub_commands.push(command);
        self
    }

    pub fn with_sub_command(mut self, command: DocumentedCommand) -> Self {
        self.sub_commands.push(command);
        self
    }

    pub fn build(&self) -> CreateApplicationCommand {
        let mut command = CreateApplicationCommand::default();
        command.name(&self.name).description(&self.description);
        for sub_command in &self.sub_commands {
            command.add_option(sub_command.as_sub_command());
        }
        if let Some(permissions) = self.default_member_permissions {
            command.default_member_permissions(permissions);
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::metadata::SlashSettings;
    use serde_json::json;

    const BAN_DOC: &str = "Ban a user.

        Args:
            user: The user to ban.
            reason: Why.
            extra: Not a declared option.
        ";

    fn ban_meta() -> CallbackMetadata {
        CallbackMetadata::new("ban")
            .doc(BAN_DOC)
            .optional_param("reason", CommandOptionType::String)
            .param("user", CommandOptionType::User)
    }

    fn option_names(command: &CreateApplicationCommand) -> Vec<String> {
        command
            .0
            .get("options")
            .and_then(|v| v.as_array())
            .map(|options| {
                options
                    .iter()
                    .filter_map(|o| o.get("name").and_then(|n| n.as_str()).map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_from_callback_uses_first_doc_line() {
        let command = DocumentedCommand::from_callback(&ban_meta()).unwrap();
        assert_eq!(command.name, "ban");
        assert_eq!(command.description, "Ban a user.");
        assert_eq!(command.options.len(), 2);
        assert!(command.options.iter().all(|o| o.description.is_empty()));
    }

    #[test]
    fn test_missing_docstring() {
        let err = DocumentedCommand::from_callback(&CallbackMetadata::new("ping")).unwrap_err();
        assert_eq!(err, DocError::MissingDocstring { command: "ping".to_string() });

        let err = DocumentedCommand::from_callback(&CallbackMetadata::new("ping").doc("   \n  ")).unwrap_err();
        assert!(matches!(err, DocError::MissingDocstring { .. }));
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_name("ping").is_ok());
        assert!(validate_name("set-user_2").is_ok());
        assert!(matches!(validate_name(""), Err(DocError::InvalidName { .. })));
        assert!(matches!(validate_name(&"a".repeat(33)), Err(DocError::InvalidName { .. })));
        assert!(matches!(
            validate_name("Ping"),
            Err(DocError::InvalidName { reason: "must be lowercase", .. })
        ));
        assert!(matches!(validate_name("with space"), Err(DocError::InvalidName { .. })));
    }

    #[test]
    fn test_description_too_long() {
        let meta = CallbackMetadata::new("long").doc("x".repeat(101));
        let err = DocumentedCommand::from_callback(&meta).unwrap_err();
        assert!(matches!(err, DocError::DescriptionTooLong { length: 101, max: 100, .. }));

        let meta = CallbackMetadata::new("fits").doc("x".repeat(100));
        assert!(DocumentedCommand::from_callback(&meta).is_ok());
    }

    #[test]
    fn test_with_annotated_args_fills_descriptions() {
        let command = DocumentedCommand::from_callback(&ban_meta())
            .and_then(|c| c.with_annotated_args(Some(DocStyle::Google)))
            .unwrap();
        let user = command.options.iter().find(|o| o.name == "user").unwrap();
        let reason = command.options.iter().find(|o| o.name == "reason").unwrap();
        assert_eq!(user.description, "The user to ban.");
        assert_eq!(reason.description, "Why.");
        assert!(!command.options.iter().any(|o| o.name == "extra"));
    }

    #[test]
    fn test_with_annotated_args_auto_detects() {
        let meta = CallbackMetadata::new("echo")
            .doc("Echo.\n\n:param content: The text.")
            .param("content", CommandOptionType::String);
        let command = DocumentedCommand::from_callback(&meta)
            .and_then(|c| c.with_annotated_args(None))
            .unwrap();
        assert_eq!(command.options[0].description, "The text.");
    }

    #[test]
    fn test_missing_option_description() {
        let meta = CallbackMetadata::new("ban")
            .doc("Ban a user.\n\nArgs:\n    user: Who.")
            .param("user", CommandOptionType::User)
            .param("days", CommandOptionType::Integer);
        let err = DocumentedCommand::from_callback(&meta)
            .and_then(|c| c.with_annotated_args(None))
            .unwrap_err();
        assert_eq!(
            err,
            DocError::MissingOptionDescription {
                command: "ban".to_string(),
                option: "days".to_string()
            }
        );
    }

    #[test]
    fn test_build_sorts_required_options_first() {
        let command = DocumentedCommand::from_callback(&ban_meta())
            .and_then(|c| c.with_annotated_args(None))
            .unwrap()
            .build();
        assert_eq!(command.0.get("name").unwrap().as_str().unwrap(), "ban");
        assert_eq!(command.0.get("description").unwrap().as_str().unwrap(), "Ban a user.");
        assert_eq!(option_names(&command), vec!["user", "reason"]);
    }

    #[test]
    fn test_build_keeps_order_without_sorting() {
        let meta = ban_meta().slash_settings(SlashSettings {
            sort_options: false,
            dm_enabled: Some(false),
            ..Default::default()
        });
        let command = DocumentedCommand::from_callback(&meta)
            .and_then(|c| c.with_annotated_args(None))
            .unwrap()
            .build();
        assert_eq!(option_names(&command), vec!["reason", "user"]);
        assert_eq!(command.0.get("dm_permission"), Some(&json!(false)));
    }

    #[test]
    fn test_group_builds_sub_commands() {
        let ban = DocumentedCommand::from_callback(&ban_meta())
            .and_then(|c| c.with_annotated_args(None))
            .unwrap();
        let group = SlashCommandGroup::new("mod", "Moderation commands")
            .unwrap()
            .with_sub_command(ban);
        let command = group.build();

        assert_eq!(option_names(&command), vec!["ban"]);
        let sub = &command.0.get("options").unwrap().as_array().unwrap()[0];
        assert_eq!(sub.get("type"), Some(&json!(1)));
        assert_eq!(sub.get("options").and_then(|v| v.as_array()).map(Vec::len), Some(2));
    }

    #[test]
    fn test_group_name_validated() {
        assert!(SlashCommandGroup::new("Mod", "Moderation").is_err());
    }
}
