// src/error.rs

use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserMsgKind {
    Success,
    Warn,
    Error,
    Info,
}

#[derive(Clone, Debug)]
pub struct UserMsg {
    pub kind: UserMsgKind,
    pub short: &'static str,
    pub detail: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    // --------------------------------------------------
    // generic / plumbing
    // --------------------------------------------------
    Io(std::io::Error),
    StateLockPoisoned,

    // --------------------------------------------------
    // state store (key-value persistence)
    // --------------------------------------------------
    InvalidStateKey,
    StoreReadFailed(String),
    StoreWriteFailed(String),
    StoreRemoveFailed(String),

    // --------------------------------------------------
    // persisted snapshot
    // --------------------------------------------------
    SnapshotEncodeFailed(String),
    SnapshotDecodeFailed(String),
}

impl AppError {
    pub fn user_msg(&self) -> UserMsg {
        use AppError::*;

        let kind = UserMsgKind::Error;
        let detail = Some(self.to_string());

        let short: &'static str = match self {
            Io(_) => "File operation failed.",
            StateLockPoisoned => "Internal state lock failed.",

            InvalidStateKey => "Invalid saved-state key.",
            StoreReadFailed(_) => "Failed to read saved form state.",
            StoreWriteFailed(_) => "Failed to save form state.",
            StoreRemoveFailed(_) => "Failed to remove saved form state.",

            SnapshotEncodeFailed(_) => "Failed to serialize form state.",
            SnapshotDecodeFailed(_) => "Saved form state is corrupted.",
        };

        UserMsg {
            kind,
            short,
            detail,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AppError::*;

        match self {
            Io(e) => write!(f, "io error: {e}"),
            StateLockPoisoned => write!(f, "state lock poisoned"),

            InvalidStateKey => write!(f, "invalid state key"),
            StoreReadFailed(s) => write!(f, "state store read failed: {s}"),
            StoreWriteFailed(s) => write!(f, "state store write failed: {s}"),
            StoreRemoveFailed(s) => write!(f, "state store remove failed: {s}"),

            SnapshotEncodeFailed(s) => write!(f, "snapshot encode failed: {s}"),
            SnapshotDecodeFailed(s) => write!(f, "snapshot decode failed: {s}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
