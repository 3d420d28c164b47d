//! Outcome of one handler for one message.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not mine; the next handler gets the message.
    Continue,
    /// Drop the message silently (gated group chatter, commands for other bots).
    Stop,
    /// The handler already replied with this text; the chain ends.
    Reply(String),
}
