pub mod tickets;
pub mod workspace;
pub mod worklog;
