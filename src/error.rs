use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    /// Reading or writing a persisted collection document failed
    Storage { path: String, source: std::io::Error },

    /// JSON serialization of a collection failed
    Serialize { context: String, source: serde_json::Error },

    /// Referenced page does not exist
    PageNotFound(String),

    /// Referenced locator does not exist on the page
    LocatorNotFound { page_id: String, locator_id: String },

    /// Referenced test data entry does not exist
    TestDataNotFound(String),

    /// Referenced test case does not exist
    TestCaseNotFound(String),

    /// User-entered field failed validation
    InvalidInput(String),

    /// Generative backend request failed (transport-level)
    AiBackend(String),

    /// Generative backend returned a response the flow could not use
    AiResponse { flow: String, message: String },
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::Storage { path, source } => {
                write!(f, "Storage error at '{}': {}", path, source)
            }
            StudioError::Serialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            StudioError::PageNotFound(id) => {
                write!(f, "Page '{}' not found", id)
            }
            StudioError::LocatorNotFound { page_id, locator_id } => {
                write!(f, "Locator '{}' not found on page '{}'", locator_id, page_id)
            }
            StudioError::TestDataNotFound(id) => {
                write!(f, "Test data entry '{}' not found", id)
            }
            StudioError::TestCaseNotFound(id) => {
                write!(f, "Test case '{}' not found", id)
            }
            StudioError::InvalidInput(msg) => {
                write!(f, "Invalid input: {}", msg)
            }
            StudioError::AiBackend(msg) => {
                write!(f, "Model request failed: {}", msg)
            }
            StudioError::AiResponse { flow, message } => {
                write!(f, "Model response unusable ({}): {}", flow, message)
            }
        }
    }
}

impl std::error::Error for StudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StudioError::Storage { source, .. } => Some(source),
            StudioError::Serialize { source, .. } => Some(source),
            _ => None,
        }
    }
}
