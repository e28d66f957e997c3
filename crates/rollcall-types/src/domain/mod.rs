pub mod record;
pub mod timestamp;

pub use record::*;
pub use timestamp::*;
