//! Process execution for built tool commands.

use std::io;
use std::process::{Command, Output, Stdio};

use super::types::{CommandError, CommandResult, ToolCommand};

/// Stderr lines kept in a failure message.
const ERROR_TAIL_LINES: usize = 20;

/// Run to completion, capturing stdout and stderr.
pub(crate) fn run_captured(cmd: &ToolCommand) -> io::Result<Output> {
    Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .output()
}

/// Run to completion; a non-zero exit becomes [`CommandError::Failed`]
/// carrying the tail of stderr.
pub(crate) fn run_checked(cmd: &ToolCommand) -> CommandResult<()> {
    let tool = cmd.tool_name();
    tracing::debug!("$ {}", cmd);

    let output = run_captured(cmd).map_err(|e| CommandError::Spawn {
        tool: tool.clone(),
        source: e,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in stderr.lines() {
        tracing::trace!("[{}] {}", tool, line);
    }

    if !output.status.success() {
        let exit_code = output.status.code().unwrap_or(-1);
        tracing::error!("{} exited with code {}", tool, exit_code);
        return Err(CommandError::Failed {
            tool,
            exit_code,
            message: tail(&stderr, ERROR_TAIL_LINES),
        });
    }

    Ok(())
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
