//! # Handler chain
//!
//! Runs a sequence of handlers for one inbound message. All `before` hooks run in order (any
//! `false` stops the chain); then `handle` runs handler by handler until one returns `Stop` or
//! `Reply`; then all `after` hooks run in reverse with the final response.
//!
//! Handler order is classification order: the first handler that recognises a message owns it.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn short_name(handler: &dyn Handler) -> &'static str {
    let full = std::any::type_name_of_val(handler);
    full.rsplit("::").next().unwrap_or(full)
}

fn response_kind(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Continue => "Continue",
        HandlerResponse::Stop => "Stop",
        HandlerResponse::Reply(_) => "Reply",
    }
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; it runs after all handlers added before it.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the three phases and returns the response that ended the handle phase
    /// (`Continue` when no handler claimed the message).
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, handlers = self.handlers.len(), "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                info!(handler = short_name(h.as_ref()), "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for h in &self.handlers {
            let name = short_name(h.as_ref());
            let response = h.handle(message).await?;
            debug!(handler = name, response = ?response, "handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        handler = name,
                        response_type = response_kind(&response),
                        "step: handler claimed message"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        info!(
            message_id = %message.id,
            response_type = response_kind(&final_response),
            "step: handler_chain finished"
        );
        Ok(final_response)
    }
}
