use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PtpError {
    #[error("container too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
}
