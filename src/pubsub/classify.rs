//! Mapping of Pub/Sub service errors to outcome codes.
//!
//! The codes follow HTTP semantics so the host pipeline can route failures
//! uniformly: 429, 503 and 504 are worth retrying, 400, 403, 404 and 409 are not.

use tonic::{Code, Status};

/// Outcome code for a service error kind. Unmapped kinds yield 400.
pub fn status_code(code: Code) -> u16 {
    match code {
        Code::Cancelled => 499,
        Code::Unknown
        | Code::InvalidArgument
        | Code::FailedPrecondition
        | Code::Aborted
        | Code::OutOfRange
        | Code::Unimplemented
        | Code::DataLoss => 400,
        Code::DeadlineExceeded => 504,
        Code::NotFound => 404,
        Code::AlreadyExists => 409,
        Code::PermissionDenied => 403,
        Code::ResourceExhausted => 429,
        Code::Internal => 500,
        Code::Unavailable => 503,
        Code::Unauthenticated => 401,
        _ => 400,
    }
}

/// Outcome code for a failed service call.
pub fn classify(status: &Status) -> u16 {
    status_code(status.code())
}
