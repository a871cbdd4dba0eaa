//! Embed builders shared by the bundled commands
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use crate::core::truncate_for_embed;
use serenity::builder::CreateEmbed;

/// Success colour (eval passed, help pages)
pub const PASS_COLOUR: u32 = 0x43B581;
/// Failure colour
pub const FAIL_COLOUR: u32 = 0xF04747;

/// Build an embed with a title, colour, truncated description and optional footer.
pub fn coloured_embed(title: &str, text: &str, colour: u32, footer: Option<&str>) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title(title);
    embed.color(colour);
    embed.description(truncate_for_embed(text));
    if let Some(footer) = footer {
        embed.footer(|f| f.text(footer));
    }
    embed
}
