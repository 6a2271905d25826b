//! Raw status words, their classification, and the error surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw status word carried by every remote reply.
///
/// `0` is success; failures are negative. The named constants below are the
/// codes this adapter interprets; anything else translates to
/// [`ErrorCode::Unexpected`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub i32);

impl Status {
    pub const OK: Status = Status(0);

    /// The peer closed or reset the socket mid-request.
    pub const CONNECTION_RESET: Status = Status(-15);
    /// The driver's I/O timeout fired before a reply arrived.
    pub const TIMED_OUT: Status = Status(-13);
    /// No session is currently established.
    pub const NOT_CONNECTED: Status = Status(-79);

    /// Cursor iteration ran past the last document.
    pub const END_OF_CURSOR: Status = Status(-29);

    /// The named database scope does not exist.
    pub const SCOPE_MISSING: Status = Status(-34);
    /// The named collection does not exist.
    pub const COLLECTION_MISSING: Status = Status(-23);
    /// The named index does not exist.
    pub const INDEX_MISSING: Status = Status(-47);
    /// An index with the same name and definition already exists.
    pub const INDEX_REDEFINED: Status = Status(-247);
    /// A unique index rejected the document.
    pub const DUPLICATE_KEY: Status = Status(-38);
    pub const PERMISSION_DENIED: Status = Status(-6);
    pub const STORAGE_FULL: Status = Status(-11);
    pub const TRANSACTION_CONFLICT: Status = Status(-190);

    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a [`Status`] must be handled. Every status word maps to exactly one
/// class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// Success, passed through untouched.
    Ok,
    /// The connection itself is unusable; reconnect-and-retry territory.
    Network,
    /// Clean cursor exhaustion. A terminator, not a fault.
    EndOfData,
    /// The request was semantically rejected.
    Domain(ErrorCode),
}

/// Classify a raw status word.
pub fn classify(status: Status) -> Class {
    match status {
        Status::OK => Class::Ok,
        Status::CONNECTION_RESET | Status::TIMED_OUT | Status::NOT_CONNECTED => Class::Network,
        Status::END_OF_CURSOR => Class::EndOfData,
        Status::SCOPE_MISSING => Class::Domain(ErrorCode::ScopeNotFound),
        Status::COLLECTION_MISSING => Class::Domain(ErrorCode::CollectionNotFound),
        Status::INDEX_MISSING => Class::Domain(ErrorCode::IndexNotFound),
        Status::INDEX_REDEFINED => Class::Domain(ErrorCode::IndexConflict),
        Status::DUPLICATE_KEY => Class::Domain(ErrorCode::DuplicateKey),
        Status::PERMISSION_DENIED => Class::Domain(ErrorCode::PermissionDenied),
        Status::STORAGE_FULL => Class::Domain(ErrorCode::StorageFull),
        Status::TRANSACTION_CONFLICT => Class::Domain(ErrorCode::TransactionConflict),
        _ => Class::Domain(ErrorCode::Unexpected),
    }
}

/// Stable outcome space surfaced to callers.
///
/// Callers branch on these, never on raw status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Reconnection failed, was forbidden by an open transaction, or the
    /// retry budget ran out.
    NetworkUnavailable,
    ScopeNotFound,
    CollectionNotFound,
    IndexNotFound,
    /// An index operation hit a conflicting definition that its own
    /// normalization did not cover.
    IndexConflict,
    DuplicateKey,
    PermissionDenied,
    StorageFull,
    TransactionConflict,
    /// A status this adapter has no specific mapping for.
    Unexpected,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NetworkUnavailable => "network unavailable",
            Self::ScopeNotFound => "database scope not found",
            Self::CollectionNotFound => "collection not found",
            Self::IndexNotFound => "index not found",
            Self::IndexConflict => "conflicting index definition",
            Self::DuplicateKey => "duplicate key",
            Self::PermissionDenied => "permission denied",
            Self::StorageFull => "storage full",
            Self::TransactionConflict => "transaction conflict",
            Self::Unexpected => "unexpected server status",
        };
        f.write_str(name)
    }
}

/// Error surface of every public operation. Nothing in this crate panics or
/// unwinds across its boundary.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed or missing caller input, detected before any remote call.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A remote failure translated into the stable code space.
    #[error("{code} (status {status})")]
    Domain { code: ErrorCode, status: Status },
}

impl Error {
    /// Translate a raw failure status into the surfaced error.
    ///
    /// Network-classified statuses arrive here only once the retry policy
    /// has given up on them.
    pub(crate) fn from_status(status: Status) -> Self {
        let code = match classify(status) {
            Class::Network => ErrorCode::NetworkUnavailable,
            Class::Domain(code) => code,
            // Success and end-of-cursor are intercepted at the call sites.
            Class::Ok | Class::EndOfData => ErrorCode::Unexpected,
        };
        Error::Domain { code, status }
    }
}
