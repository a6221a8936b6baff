pub mod bot;
pub mod chatbot;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod types;

pub use bot::run;
