//! Command-line layer: argument parsing, command dispatch and reporting.

mod args;
mod commands;
mod context;
mod exit_status;
mod report;

use anyhow::Result;

pub use args::{Arguments, CheckCommand, Command, CommonArgs, MissingCommand, UnusedCommand};
pub use commands::{CommandResult, CommandSummary};
pub use exit_status::ExitStatus;

use commands::{check::check, init::init, missing::missing, unused::unused};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    let result = match command {
        Command::Missing(cmd) => missing(cmd)?,
        Command::Unused(cmd) => unused(cmd)?,
        Command::Check(cmd) => check(cmd)?,
        Command::Init => init()?,
    };
    report::print(&result);

    Ok(ExitStatus::from_result(&result))
}
