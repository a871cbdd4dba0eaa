//! Pagination state carried in help button custom ids

use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::channel::ReactionType;

use crate::core::error::InteractionError;
use crate::features::buttons::add_delete_button;

pub const HELP_BUTTON_PREFIX: &str = "tc_help";
pub const PAGE_MODAL_PREFIX: &str = "tc_help_page";
pub const PAGE_INPUT_ID: &str = "page_number";

const HASH_KEY: &str = "h";
const PAGE_KEY: &str = "p";
const AUTHOR_KEY: &str = "a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpAction {
    First,
    Previous,
    Next,
    Last,
    Select,
}

impl HelpAction {
    const ALL: [HelpAction; 5] = [
        HelpAction::First,
        HelpAction::Previous,
        HelpAction::Next,
        HelpAction::Last,
        HelpAction::Select,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpAction::First => "first",
            HelpAction::Previous => "prev",
            HelpAction::Next => "next",
            HelpAction::Last => "last",
            HelpAction::Select => "select",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }

    fn emoji(&self) -> &'static str {
        match self {
            HelpAction::First => "⏮️",
            HelpAction::Previous => "◀️",
            HelpAction::Next => "▶️",
            HelpAction::Last => "⏭️",
            HelpAction::Select => "🔢",
        }
    }
}

/// State of one help message: index hash, zero-based page and the invoking user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpState {
    pub hash: String,
    pub page: usize,
    pub author: u64,
}

impl HelpState {
    pub fn encode(&self) -> String {
        format!(
            "{HASH_KEY}={}&{PAGE_KEY}={}&{AUTHOR_KEY}={}",
            self.hash, self.page, self.author
        )
    }

    pub fn decode(value: &str) -> Option<Self> {
        let mut hash = None;
        let mut page = None;
        let mut author = None;
        for (key, value) in value.split('&').filter_map(|pair| pair.split_once('=')) {
            match key {
                HASH_KEY => hash = Some(value.to_string()),
                PAGE_KEY => page = value.parse().ok(),
                AUTHOR_KEY => author = value.parse().ok(),
                _ => {}
            }
        }
        Some(Self {
            hash: hash?,
            page: page?,
            author: author?,
        })
    }

    pub fn button_id(&self, action: HelpAction) -> String {
        format!("{HELP_BUTTON_PREFIX}:{}:{}", action.as_str(), self.encode())
    }

    pub fn modal_id(&self) -> String {
        format!("{PAGE_MODAL_PREFIX}:{}", self.encode())
    }

    /// Check that `user` owns this message and it was built from `current_hash`.
    pub fn verify(&self, user: u64, current_hash: &str) -> Result<(), InteractionError> {
        if self.author != user {
            return Err(InteractionError::NotAuthor);
        }
        if self.hash != current_hash {
            return Err(InteractionError::OutOfDate);
        }
        Ok(())
    }
}

/// Split `tc_help:<action>:<state>` into its parts.
pub fn parse_button_id(custom_id: &str) -> Option<(HelpAction, HelpState)> {
    let rest = custom_id.strip_prefix(HELP_BUTTON_PREFIX)?.strip_prefix(':')?;
    let (action, state) = rest.split_once(':')?;
    Some((HelpAction::parse(action)?, HelpState::decode(state)?))
}

pub fn parse_modal_id(custom_id: &str) -> Option<HelpState> {
    let state = custom_id.strip_prefix(PAGE_MODAL_PREFIX)?.strip_prefix(':')?;
    HelpState::decode(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show this zero-based page
    Show(usize),
    /// Already at the edge, acknowledge without changes
    Noop,
    /// Ask for a page number
    OpenModal,
}

/// Work out where a button press leads.
pub fn navigate(
    action: HelpAction,
    state: &HelpState,
    user: u64,
    current_hash: &str,
    page_count: usize,
) -> Result<Navigation, InteractionError> {
    state.verify(user, current_hash)?;
    let last = page_count.saturating_sub(1);

    Ok(match action {
        HelpAction::First => Navigation::Show(0),
        HelpAction::Previous if state.page == 0 => Navigation::Noop,
        HelpAction::Previous => Navigation::Show(state.page - 1),
        HelpAction::Next if state.page >= last => Navigation::Noop,
        HelpAction::Next => Navigation::Show(state.page + 1),
        HelpAction::Last => Navigation::Show(last),
        HelpAction::Select => Navigation::OpenModal,
    })
}

/// Parse a 1-based page number typed into the modal into a zero-based index.
pub fn select_page(input: &str, page_count: usize) -> Result<usize, InteractionError> {
    let number: i64 = input
        .trim()
        .parse()
        .map_err(|_| InteractionError::InvalidNumber)?;
    if number < 1 || number as usize > page_count {
        return Err(InteractionError::PageNotFound);
    }
    Ok(number as usize - 1)
}

/// Navigation row for a help page: first, previous, delete, next, last and select.
pub fn navigation_rows(state: &HelpState) -> CreateComponents {
    let mut components = CreateComponents::default();
    components.create_action_row(|row| {
        for action in [HelpAction::First, HelpAction::Previous] {
            row.create_button(|button| {
                button
                    .custom_id(state.button_id(action))
                    .style(ButtonStyle::Secondary)
                    .emoji(ReactionType::Unicode(action.emoji().to_string()))
            });
        }
        add_delete_button(row, state.author, &[]);
        for action in [HelpAction::Next, HelpAction::Last] {
            row.create_button(|button| {
                button
                    .custom_id(state.button_id(action))
                    .style(ButtonStyle::Secondary)
                    .emoji(ReactionType::Unicode(action.emoji().to_string()))
            });
        }
        row
    });
    components.create_action_row(|row| {
        row.create_button(|button| {
            button
                .custom_id(state.button_id(HelpAction::Select))
                .style(ButtonStyle::Secondary)
                .emoji(ReactionType::Unicode(HelpAction::Select.emoji().to_string()))
        })
    });
    components
}
