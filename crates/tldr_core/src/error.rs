use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The inference service answered with an explicit `error` field.
    /// The message is kept exactly as the service sent it.
    #[error("{0}")]
    Remote(String),

    /// The inference service answered with a body we cannot interpret.
    #[error("{0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Precondition(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Coarse classification used by front-ends to pick a status or exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Remote,
    MalformedResponse,
    Transport,
    Precondition,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Remote(_) => ErrorKind::Remote,
            Error::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Error::Http(_) => ErrorKind::Transport,
            Error::Precondition(_) => ErrorKind::Precondition,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_is_verbatim() {
        let err = Error::Remote("Model facebook/bart-large-cnn is currently loading".to_string());
        assert_eq!(err.to_string(), "Model facebook/bart-large-cnn is currently loading");
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::MalformedResponse("Unexpected response from Hugging Face API".into()).kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(Error::Precondition("too short".into()).kind(), ErrorKind::Precondition);
        assert_eq!(Error::Config("bad".into()).kind(), ErrorKind::Other);

        let url_err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(url_err.kind(), ErrorKind::Other);
    }
}
