use clap::{Parser, Subcommand};

use crate::types::{LogLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Track student attendance time per class and export it as CSV", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Data directory (defaults to $ROLLCALL_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, rename, delete and list classes
    Class {
        #[command(subcommand)]
        command: ClassCommand,
    },

    /// Add or remove students in a class
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Start and stop attendance timers
    Timer {
        #[command(subcommand)]
        command: TimerCommand,
    },

    /// Show every class with its students and tracked time
    Show,

    /// Export completed sessions as attendance_YYYY-MM-DD.csv
    Export {
        /// Directory to write the report into (overrides export_dir)
        #[arg(long)]
        output_dir: Option<String>,

        /// Print the CSV instead of writing a file
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,
    },

    /// Open the interactive popup
    Tui,

    /// Inspect or create config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ClassCommand {
    Add {
        name: String,
    },
    Rename {
        from: String,
        to: String,
    },
    Delete {
        name: String,
    },
    List,
}

#[derive(Subcommand)]
pub enum StudentCommand {
    Add {
        class: String,
        student: String,
    },
    Remove {
        class: String,
        student: String,
    },
}

#[derive(Subcommand)]
pub enum TimerCommand {
    Start {
        class: String,
        student: String,
    },
    Stop {
        class: String,
        student: String,
    },
    /// Stop the timer if it is running, start it otherwise
    Toggle {
        class: String,
        student: String,
    },
    /// Start every stopped timer in the class
    StartAll {
        class: String,
    },
    /// Stop every running timer in the class
    StopAll {
        class: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    /// Write the default config.toml if none exists
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rollcall",
            "timer",
            "start-all",
            "Math",
            "--format",
            "json",
            "--data-dir",
            "/tmp/rc",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/rc"));
        assert!(matches!(
            cli.command,
            Some(Commands::Timer {
                command: TimerCommand::StartAll { .. }
            })
        ));
    }

    #[test]
    fn test_export_stdout_conflicts_with_output_dir() {
        let result = Cli::try_parse_from([
            "rollcall",
            "export",
            "--stdout",
            "--output-dir",
            "out",
        ]);
        assert!(result.is_err());
    }
}
