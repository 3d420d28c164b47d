//! [`Handler`] trait and the conversions from transport types into core types.

use async_trait::async_trait;

use super::{message::Message, response::HandlerResponse, user::User};
use crate::core::error::Result;

/// Implemented by wrappers around a transport's user type (see `TelegramUserWrapper`).
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Implemented by wrappers around a transport's message type (see `TelegramMessageWrapper`).
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// One link of a [`crate::HandlerChain`].
///
/// `before` runs for every handler first; any `false` drops the message. `handle` then runs in
/// order until one handler returns `Stop` or `Reply`. `after` runs for every handler in reverse
/// order with that final response. A handler that answers sends the reply itself and returns
/// `Reply(text)`.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn before(&self, _message: &Message) -> Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        Ok(())
    }
}
