pub mod app;
pub mod chat;
pub mod cli;
pub mod error;
pub mod models;
pub mod server;

pub use error::{Error, Result};
