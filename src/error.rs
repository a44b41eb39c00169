use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Remote,
    Clipboard,
}

#[derive(Error, Debug)]
pub enum WizardError {
    /// Detected locally; no remote call was made.
    #[error("{0}")]
    Validation(String),

    /// Non-success response. `message` is the server's own text, or the
    /// operation's fallback when the body carried none.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("백엔드 서버에 연결할 수 없습니다: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("응답 형식이 올바르지 않습니다: {0}")]
    Schema(String),

    #[error("{0}")]
    Clipboard(String),
}

impl WizardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Server { .. } | Self::Transport(_) | Self::Schema(_) => ErrorKind::Remote,
            Self::Clipboard(_) => ErrorKind::Clipboard,
        }
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(e: serde_json::Error) -> Self {
        Self::Schema(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_verbatim() {
        let err = WizardError::Server {
            status: 400,
            message: "쿼리가 너무 짧습니다".to_string(),
        };
        assert_eq!(err.to_string(), "쿼리가 너무 짧습니다");
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[test]
    fn shape_mismatch_is_remote_kind() {
        let parse = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = WizardError::from(parse);
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(err.to_string().starts_with("응답 형식이 올바르지 않습니다"));
    }
}
