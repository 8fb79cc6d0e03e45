//! Tests for the service error classification table.

use pubsub_destination::pubsub::{classify, status_code};
use tonic::{Code, Status};

const TABLE: &[(Code, u16)] = &[
    (Code::Cancelled, 499),
    (Code::Unknown, 400),
    (Code::InvalidArgument, 400),
    (Code::FailedPrecondition, 400),
    (Code::Aborted, 400),
    (Code::OutOfRange, 400),
    (Code::Unimplemented, 400),
    (Code::DataLoss, 400),
    (Code::DeadlineExceeded, 504),
    (Code::NotFound, 404),
    (Code::AlreadyExists, 409),
    (Code::PermissionDenied, 403),
    (Code::ResourceExhausted, 429),
    (Code::Internal, 500),
    (Code::Unavailable, 503),
    (Code::Unauthenticated, 401),
];

#[test]
fn test_every_service_error_kind_matches_table() {
    for (code, expected) in TABLE {
        assert_eq!(status_code(*code), *expected, "code {:?}", code);
        assert_eq!(classify(&Status::new(*code, "detail")), *expected);
    }
}

#[test]
fn test_unmapped_kinds_default_to_400() {
    assert_eq!(status_code(Code::Ok), 400);
    for raw in [-1, 17, 99, i32::MAX] {
        assert_eq!(status_code(Code::from_i32(raw)), 400);
    }
}

#[test]
fn test_classification_is_total_and_stable() {
    for raw in 0..=16 {
        let code = Code::from_i32(raw);
        let first = status_code(code);
        assert!([400, 401, 403, 404, 409, 429, 499, 500, 503, 504].contains(&first));
        assert_eq!(status_code(code), first);
    }
}
