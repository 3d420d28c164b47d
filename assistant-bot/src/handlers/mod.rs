//! Handlers of the assistant chain, in the order [`crate::build_handler_chain`] installs them:
//! commands, the group trigger gate, exchange rate, weather, then free-form chat.

pub mod chat;
pub mod commands;
pub mod exchange_rate;
pub mod trigger_gate;
pub mod weather;

pub use chat::{ChatHandler, EMPTY_INPUT_TEXT, TOO_LONG_TEXT};
pub use commands::{
    about_text, Command, CommandHandler, CLEARED_TEXT, HELP_TEXT, START_TEXT, UNKNOWN_COMMAND_TEXT,
};
pub use exchange_rate::{ExchangeRateHandler, EXCHANGE_RATE_PATTERN};
pub use trigger_gate::TriggerGateHandler;
pub use weather::{WeatherHandler, WEATHER_PATTERN};
