pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod error;
pub mod logging;
pub mod notify;
pub mod output;
