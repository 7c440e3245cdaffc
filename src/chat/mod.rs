pub mod prompts;
pub mod service;
pub mod types;

pub use prompts::SystemPromptConfig;
pub use service::{ChatService, PromptPolicy};
pub use types::{ChatError, ChatMessage, ChatRequest, ChatResponse, ChatRole};
