pub mod command;
pub mod config;
pub mod edit_log;
pub mod logging;
pub mod render;
pub mod repl;
pub mod session;
