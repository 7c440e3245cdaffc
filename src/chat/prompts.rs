use crate::app::config::AppConfig;

/// Static inputs to the system prompt template, held immutable for the
/// lifetime of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPromptConfig {
    pub project_name: String,
    pub project_description: String,
    pub base_prompt: String,
    pub max_attempts: u32,
}

impl SystemPromptConfig {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            project_name: config.project_name.clone(),
            project_description: config.project_description.clone(),
            base_prompt: config.base_system_prompt.clone(),
            max_attempts: config.max_iterations,
        }
    }

    /// Render the instruction message prepended to every conversation.
    pub fn render(&self) -> String {
        format!(
            "{base_prompt}\n\n\
             You are the assistant for {project_name}: {project_description}\n\
             Ground your answers in the conversation provided. Make at most \
             {max_attempts} attempts to resolve the user's question; if you are \
             still unsure after that, say so plainly instead of guessing.",
            base_prompt = self.base_prompt,
            project_name = self.project_name,
            project_description = self.project_description,
            max_attempts = self.max_attempts,
        )
    }
}
