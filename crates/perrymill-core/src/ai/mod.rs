mod narrator;
mod openai;

pub use narrator::{build_prompt, Narrative, NarrativeProvider, NarrativeUsage, PROMPT_ENTRY_LIMIT};
pub use openai::OpenAiNarrator;
