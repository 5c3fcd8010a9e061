pub mod output;
pub mod prompt;

pub use output::{
    format_tool_list, render_tool_result, summarize_description, tool_entry,
};
pub use prompt::{Prompter, TerminalPrompter};
