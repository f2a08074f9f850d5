pub mod controller;
pub mod cookies;
pub mod error;
pub mod html;
pub mod models;
pub mod resolver;
pub mod status;
pub mod traits;
pub mod view;

pub use controller::{
    fetch_assigned_tickets, init_from_reply, load_panel, submit_worklog, InitOutcome,
    WorklogRegistry, ASSIGNED_JQL, PAGE_SIZE,
};
pub use cookies::{cookie_header, CookieJarFile, MemoryCookieStore};
pub use error::{PanelError, Result};
pub use models::*;
pub use resolver::{
    ResolverHandle, ResolverRequest, ResolverResponse, WorkspaceResolver, JIRA_COOKIE_DOMAIN,
};
pub use status::{classify_status, StatusCategory};
pub use traits::{CookieStore, TicketSource};
pub use view::{render_tickets, PanelContent, PanelView, TicketRow, ViewAllLink};
