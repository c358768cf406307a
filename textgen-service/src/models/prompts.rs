//! Prompt templates, one per content type.

use super::content::{ContentRequest, ContentType, WordCount};

/// Build the user message for a resolved request.
pub fn build_prompt(request: &ContentRequest) -> String {
    let count = request.word_count;

    match request.content_type {
        ContentType::Vocabulary => vocabulary_prompt(count),
        ContentType::Gk => general_knowledge_prompt(count),
        ContentType::Custom if !request.user_prompt.is_empty() => {
            custom_prompt(&request.user_prompt, count)
        }
        ContentType::Custom => generic_content_prompt(count),
        ContentType::Story => story_prompt(count),
    }
}

fn vocabulary_prompt(count: WordCount) -> String {
    format!(
        "Generate a vocabulary list with exactly {count} words in the following format: \
         \"word1 : definition. \n word2 : definition.\" and so on.\n\
         Choose words from IELTS Vocabulary. Provide clear, simple definitions. \
         Provide plain text only."
    )
}

fn general_knowledge_prompt(count: WordCount) -> String {
    format!(
        "Write a short, informative passage about general knowledge with exactly {count} words.\n\
         Include interesting facts about history, science, geography, or current affairs. \
         Each fact start in a new line.\n\
         The content should be educational, factually very accurate, and written in clear, \
         simple language. Provide plain text only."
    )
}

fn custom_prompt(user_prompt: &str, count: WordCount) -> String {
    format!(
        "Create text based on the following prompt: \"{user_prompt}\".\n\
         The text should be approximately {count} words long and use clear, straightforward \
         language. Provide plain text only."
    )
}

fn generic_content_prompt(count: WordCount) -> String {
    format!(
        "Write engaging content that's exactly {count} words long in clear and simple language. \
         Write each sample/example in new line. Provide plain text only."
    )
}

fn story_prompt(count: WordCount) -> String {
    format!(
        "Write a short, engaging story with exactly {count} words.\n\
         The story should captivate the reader with a compelling narrative, interesting \
         characters, and a touch of intrigue or emotion.\n\
         Use vivid language and create a sense of wonder or suspense. The story should have a \
         clear beginning, middle, and end.\n\
         Focus on creating an interesting and memorable experience for the reader. Write in \
         clear and simple language. Provide plain text only."
    )
}
