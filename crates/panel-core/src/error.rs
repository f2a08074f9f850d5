use thiserror::Error;

/// Common errors for ticket sources and cookie stores
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cookie store error: {0}")]
    CookieStore(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PanelError {
    /// HTTP status code carried by this error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            PanelError::Unauthorized => Some(401),
            PanelError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_http_answers_only() {
        assert_eq!(PanelError::Unauthorized.status(), Some(401));
        assert_eq!(
            PanelError::Api {
                status: 503,
                message: "Service Unavailable".to_string()
            }
            .status(),
            Some(503)
        );
        assert_eq!(PanelError::Http("connection refused".into()).status(), None);
        assert_eq!(PanelError::Parse("eof".into()).status(), None);
    }
}
