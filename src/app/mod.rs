pub mod config;
pub mod state;

pub use config::{AppConfig, ProviderConfig, ServerConfig};
pub use state::AppState;
