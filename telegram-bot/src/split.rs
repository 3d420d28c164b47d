//! Splitting long replies into Telegram-sized messages.

use crate::core::{Bot, Message, Result};

/// Telegram's per-message text limit, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Splits `text` into consecutive pieces of at most `limit` chars. Concatenating the pieces gives
/// back `text`. Empty text yields no pieces; a zero limit is treated as one.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Replies with `text`, split at [`MAX_MESSAGE_CHARS`], in order. Stops at the first send failure.
pub async fn send_chunked(bot: &dyn Bot, message: &Message, text: &str) -> Result<()> {
    for chunk in split_message(text, MAX_MESSAGE_CHARS) {
        bot.reply_to(message, &chunk).await?;
    }
    Ok(())
}
