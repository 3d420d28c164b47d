//! Pure functions deciding whether a message is addressed to the bot, and extracting the text
//! meant for it.
//!
//! A message is addressed to the bot when it replies to the bot, @mentions the bot's username,
//! or starts with one of the configured trigger phrases (`"бот, ..."`). Used by the group-chat
//! gate and by the chat handler to strip the address before querying the model.

use crate::Message;

fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offsets in `lower` of every `needle` not followed by a username character,
/// so `@family_bot` does not match inside `@family_bot2`.
fn mention_offsets<'a>(lower: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    lower.match_indices(needle).map(|(idx, _)| idx).filter(move |idx| {
        !lower[idx + needle.len()..]
            .chars()
            .next()
            .is_some_and(is_username_char)
    })
}

/// Returns true if `text` contains a @mention of the given bot username (case-insensitive).
pub fn is_bot_mentioned(text: &str, bot_username: &str) -> bool {
    let needle = format!("@{}", bot_username.to_lowercase());
    let lower = text.to_lowercase();
    let found = mention_offsets(&lower, &needle).next().is_some();
    found
}

/// Removes every @mention of the bot from `text` and trims the result.
pub fn strip_mention(text: &str, bot_username: &str) -> String {
    let needle = format!("@{}", bot_username.to_lowercase());
    let lower = text.to_lowercase();
    // Lowercasing can change byte lengths, so fall back to a case-sensitive replace when it does.
    if lower.len() != text.len() {
        return text.replace(&format!("@{}", bot_username), "").trim().to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = 0;
    for idx in mention_offsets(&lower, &needle) {
        out.push_str(&text[rest..idx]);
        rest = idx + needle.len();
    }
    out.push_str(&text[rest..]);
    out.trim().to_string()
}

/// Case-insensitive `strip_prefix` that compares chars, not bytes.
fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut chars = text.char_indices();
    for pc in prefix.chars() {
        match chars.next() {
            Some((_, tc)) if tc.to_lowercase().eq(pc.to_lowercase()) => {}
            _ => return None,
        }
    }
    let idx = chars.next().map(|(i, _)| i).unwrap_or(text.len());
    Some(&text[idx..])
}

/// If `text` starts with one of `triggers` as a whole word, returns the remainder with leading
/// separators (spaces, commas, colons) removed.
pub fn strip_trigger<'a>(text: &'a str, triggers: &[String]) -> Option<&'a str> {
    let text = text.trim_start();
    triggers
        .iter()
        .filter(|t| !t.trim().is_empty())
        .find_map(|t| {
            let rest = strip_prefix_ci(text, t.trim())?;
            match rest.chars().next() {
                Some(c) if c.is_alphanumeric() => None,
                _ => Some(rest.trim_start_matches(|c: char| c.is_whitespace() || ",:;!.-".contains(c))),
            }
        })
}

/// True when the message replies to this bot. Without a known username any bot author counts.
pub fn is_reply_to_bot(message: &Message, bot_username: Option<&str>) -> bool {
    if message.reply_to_message_id.is_none() || !message.reply_to_message_from_bot {
        return false;
    }
    match (bot_username, message.reply_to_username.as_deref()) {
        (Some(me), Some(author)) => me.eq_ignore_ascii_case(author),
        _ => true,
    }
}

/// Reply-to-bot, @mention, or leading trigger phrase.
pub fn is_addressed_to_bot(message: &Message, bot_username: Option<&str>, triggers: &[String]) -> bool {
    if is_reply_to_bot(message, bot_username) {
        return true;
    }
    if let Some(username) = bot_username {
        if is_bot_mentioned(&message.content, username) {
            return true;
        }
    }
    strip_trigger(&message.content, triggers).is_some()
}

/// The text meant for the bot: leading trigger phrase and @mentions removed, trimmed.
pub fn extract_question(text: &str, bot_username: Option<&str>, triggers: &[String]) -> String {
    let without_trigger = strip_trigger(text, triggers).unwrap_or(text);
    match bot_username {
        Some(username) => strip_mention(without_trigger, username),
        None => without_trigger.trim().to_string(),
    }
}
