pub mod config;
pub mod export;
pub mod outcome;
pub mod roster;

pub use config::present_config;
pub use export::present_export;
pub use outcome::{describe_command, present_outcome, present_status};
pub use roster::{present_class_list, present_roster, present_student_row};
