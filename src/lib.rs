pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod scanner;
pub mod store;
pub mod watch;
