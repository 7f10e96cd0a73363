use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,    // connection refused, DNS, reset, timeout
    Status,       // non-2xx answer
    Conflict,     // HTTP 409 on upload
    InvalidInput, // rejected before any request
    Other,        // decode / local IO
}

/// Classify an error into the user-facing taxonomy
pub fn classify(error: &ApiError) -> ErrorKind {
    match error {
        ApiError::Transport(_) => ErrorKind::Transport,
        ApiError::Status { .. } => ErrorKind::Status,
        ApiError::Conflict => ErrorKind::Conflict,
        ApiError::InvalidInput(_) => ErrorKind::InvalidInput,
        ApiError::Decode(_) | ApiError::Io(_) => ErrorKind::Other,
    }
}

/// Raw error details for the alert body
pub fn format_error_message(error: &(dyn std::error::Error + 'static)) -> String {
    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    // If no reqwest error found, walk the chain to get the deepest (root cause) error
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// Alert text for a failed action: one headline plus the raw cause.
///
/// Network and status failures collapse into the same headline; invalid
/// input is shown as-is.
pub fn user_message(headline: &str, error: &ApiError) -> String {
    match classify(error) {
        ErrorKind::InvalidInput => error.to_string(),
        _ => format!("{}\n\n{}", headline, format_error_message(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn status_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify(&status_error()), ErrorKind::Status);
    }

    #[test]
    fn test_classify_conflict() {
        assert_eq!(classify(&ApiError::Conflict), ErrorKind::Conflict);
    }

    #[test]
    fn test_classify_invalid_input() {
        let err = ApiError::InvalidInput("Enter text to translate.".to_string());
        assert_eq!(classify(&err), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_classify_io_is_other() {
        let err = ApiError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(classify(&err), ErrorKind::Other);
    }

    #[test]
    fn test_format_shows_root_cause() {
        let err = ApiError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        assert_eq!(format_error_message(&err), "no such file");
    }

    #[test]
    fn test_user_message_has_headline_and_detail() {
        let msg = user_message("Failed to select dictionary", &status_error());
        assert!(msg.starts_with("Failed to select dictionary"));
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_user_message_invalid_input_is_verbatim() {
        let err = ApiError::InvalidInput("Enter text to translate.".to_string());
        assert_eq!(user_message("ignored", &err), "Enter text to translate.");
    }
}
