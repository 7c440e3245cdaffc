pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{
    Candidate, Completion, CompletionRequest, Message, MessageRole, ModelProvider, ProviderError,
};
