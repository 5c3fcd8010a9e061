use colored::*;
use std::io::Write;

use crate::error::{ProbeError, Result};
use crate::lister::list_tools;
use crate::mcp::ToolSession;
use crate::tester::ToolTester;
use crate::ui::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ListTools,
    TestTool,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::ListTools, MenuAction::TestTool, MenuAction::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ListTools => "List available tools",
            MenuAction::TestTool => "Test a tool",
            MenuAction::Exit => "Exit",
        }
    }
}

/// Run the menu until the operator chooses Exit. Returns instead of exiting
/// the process so the caller can close the session on every path.
pub async fn run_menu(
    session: &mut dyn ToolSession,
    tester: &mut ToolTester,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let labels: Vec<String> = MenuAction::ALL
        .iter()
        .map(|action| action.label().to_string())
        .collect();

    loop {
        let choice = prompter.select("What would you like to do?", &labels)?;
        let action = MenuAction::ALL
            .get(choice)
            .copied()
            .ok_or_else(|| ProbeError::Prompt(format!("Invalid menu selection: {}", choice)))?;

        match action {
            MenuAction::ListTools => list_tools(session, out).await?,
            MenuAction::TestTool => tester.run(session, prompter, out).await?,
            MenuAction::Exit => {
                writeln!(out, "{}", "Goodbye!".green())?;
                return Ok(());
            }
        }

        writeln!(out)?;
    }
}
