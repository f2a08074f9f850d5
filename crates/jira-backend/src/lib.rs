pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;


pub use client::JiraClient;
pub use error::{JiraError, Result};
pub use models::*;

// Re-export panel-core types for convenience
pub use panel_core::{PanelError, TicketSource};
