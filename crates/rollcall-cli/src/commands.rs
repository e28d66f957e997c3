use anyhow::Result;
use rollcall_engine::Command;
use rollcall_runtime::resolve_workspace_path;

use super::args::{ClassCommand, Cli, Commands, ConfigCommand, StudentCommand, TimerCommand};
use super::handlers;
use crate::logging;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_workspace_path(cli.data_dir.as_deref())?;
    let format = cli.format;

    let Some(command) = cli.command else {
        logging::init_stderr(cli.log_level)?;
        return handlers::show::handle(&data_dir, format);
    };

    // The popup owns the terminal, so its logs go to a file.
    if matches!(command, Commands::Tui) {
        logging::init_file(cli.log_level, &data_dir)?;
    } else {
        logging::init_stderr(cli.log_level)?;
    }

    match command {
        Commands::Class { command } => match command {
            ClassCommand::Add { name } => {
                handlers::command::handle(&data_dir, Command::AddClass { name }, format)
            }
            ClassCommand::Rename { from, to } => {
                handlers::command::handle(&data_dir, Command::RenameClass { from, to }, format)
            }
            ClassCommand::Delete { name } => {
                handlers::command::handle(&data_dir, Command::DeleteClass { name }, format)
            }
            ClassCommand::List => handlers::class_list::handle(&data_dir, format),
        },

        Commands::Student { command } => {
            let command = match command {
                StudentCommand::Add { class, student } => Command::AddStudent { class, student },
                StudentCommand::Remove { class, student } => {
                    Command::RemoveStudent { class, student }
                }
            };
            handlers::command::handle(&data_dir, command, format)
        }

        Commands::Timer { command } => {
            let command = match command {
                TimerCommand::Start { class, student } => Command::StartTimer { class, student },
                TimerCommand::Stop { class, student } => Command::StopTimer { class, student },
                TimerCommand::Toggle { class, student } => Command::ToggleTimer { class, student },
                TimerCommand::StartAll { class } => Command::StartAll { class },
                TimerCommand::StopAll { class } => Command::StopAll { class },
            };
            handlers::command::handle(&data_dir, command, format)
        }

        Commands::Show => handlers::show::handle(&data_dir, format),

        Commands::Export { output_dir, stdout } => {
            handlers::export::handle(&data_dir, output_dir.as_deref(), stdout, format)
        }

        Commands::Tui => handlers::tui::handle(&data_dir),

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&data_dir, format),
            ConfigCommand::Init => handlers::config::init(&data_dir, format),
        },
    }
}
