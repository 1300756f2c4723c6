mod composer;
mod research;

pub use composer::PostComposer;
pub use research::{WebAgent, DEFAULT_SYSTEM_PROMPT, SEARCH_TOOL_NAME};
