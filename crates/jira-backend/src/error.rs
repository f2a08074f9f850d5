use panel_core::PanelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, JiraError>;

impl From<JiraError> for PanelError {
    fn from(err: JiraError) -> Self {
        match err {
            // Body decoding failures surface through ureq
            JiraError::Http(ureq::Error::Json(e)) => PanelError::Parse(e.to_string()),
            JiraError::Http(e) => PanelError::Http(e.to_string()),
            JiraError::Unauthorized => PanelError::Unauthorized,
            JiraError::Api { status, message } => PanelError::Api { status, message },
        }
    }
}
