pub mod count;
pub mod session;

pub use count::{AtBatOutcome, Count};
pub use session::{SessionState, Sign, HISTORY_CAPACITY};
