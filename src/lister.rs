use colored::*;
use std::io::Write;

use crate::error::Result;
use crate::mcp::ToolSession;
use crate::ui::format_tool_list;

/// Print the server's tools. The list is fetched fresh on every call.
pub async fn list_tools(session: &mut dyn ToolSession, out: &mut dyn Write) -> Result<()> {
    let tools = session.list_tools().await?;
    tracing::debug!(count = tools.len(), "tools listed");

    if tools.is_empty() {
        writeln!(out, "{}", "No tools available.".yellow())?;
        return Ok(());
    }

    writeln!(out, "{}", "Available tools:".cyan().bold())?;
    for line in format_tool_list(&tools) {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
