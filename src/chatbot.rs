//! Telegram front end: admission, commands, relaying and replies.

mod admission;
mod commands;
mod conversation;
#[cfg(test)]
mod fixtures;
mod handler;
mod response;

pub use commands::Command;
pub use handler::handle_message;
