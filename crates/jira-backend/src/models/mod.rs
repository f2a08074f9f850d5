pub mod issue;
pub mod worklog;

pub use issue::*;
pub use worklog::*;
