// Engine module - state transitions, duration math and export
// This layer sits between the stored records (types) and the runtime/CLI

pub mod clock;
pub mod command;
pub mod duration;
mod error;
pub mod export;
pub mod roster;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, Dispatcher, Outcome, RenderScope};
pub use duration::{elapsed_ms, format_duration, session_minutes, total_duration};
pub use error::{Error, Result};
pub use export::{CSV_HEADER, CsvReport, build_report, export_file_name, write_csv};
pub use roster::{Change, MalformedSession, RenamePolicy, Roster, Skip};
