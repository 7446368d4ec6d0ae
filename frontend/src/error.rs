use thiserror::Error;

/// Reasons a page behaviour refuses to bind to the document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("browser window is not available")]
    NoWindow,
    #[error("document is not available")]
    NoDocument,
    #[error("required element `{0}` not found")]
    MissingElement(String),
    #[error("element `{0}` is not an HTML element")]
    NotHtml(String),
    #[error("failed to register `{event}` listener")]
    Listener { event: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_element() {
        let err = SetupError::MissingElement("#productStickyCTA".into());
        assert_eq!(err.to_string(), "required element `#productStickyCTA` not found");
        assert_eq!(
            SetupError::Listener { event: "scroll" }.to_string(),
            "failed to register `scroll` listener"
        );
    }
}
