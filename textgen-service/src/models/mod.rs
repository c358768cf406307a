pub mod content;
pub mod prompts;

pub use content::{ContentRequest, ContentType, GenerateTextParams, GenerateTextResponse, WordCount};
pub use prompts::build_prompt;
