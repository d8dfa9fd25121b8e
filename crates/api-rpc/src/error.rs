//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use featureboard_core::error::AppError;
use featureboard_core::ErrorKind;
use jsonrpsee::types::ErrorObjectOwned;

/// RPC Error Codes (thousands digit + HTTP-like status)
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const SELF_VOTE: i32 = 4001;
    pub const NOT_FOUND: i32 = 4004;
    pub const DUPLICATE: i32 = 4009;
    pub const DUPLICATE_VOTE: i32 = 4010;
    pub const CONFLICT: i32 = 4011;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    let code = match err.kind() {
        ErrorKind::Validation => code::VALIDATION_ERROR,
        ErrorKind::SelfVote => code::SELF_VOTE,
        ErrorKind::NotFound => code::NOT_FOUND,
        ErrorKind::Duplicate => code::DUPLICATE,
        ErrorKind::DuplicateVote => code::DUPLICATE_VOTE,
        ErrorKind::Conflict => code::CONFLICT,
        ErrorKind::Internal => code::INTERNAL_ERROR,
    };

    // Store internals stay in the server log
    let message = match err.kind() {
        ErrorKind::Internal => "Internal error".to_string(),
        _ => err.to_string(),
    };

    ErrorObjectOwned::owned(code, message, None::<()>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use featureboard_core::domain::DomainError;
    use uuid::Uuid;

    #[test]
    fn test_codes_follow_kinds() {
        let (voter, feature) = (Uuid::new_v4(), Uuid::new_v4());
        let cases = [
            (AppError::Duplicate("x".into()), code::DUPLICATE),
            (AppError::NotFound("x".into()), code::NOT_FOUND),
            (DomainError::SelfVote { voter, feature }.into(), code::SELF_VOTE),
            (
                DomainError::DuplicateVote { voter, feature }.into(),
                code::DUPLICATE_VOTE,
            ),
            (DomainError::Validation("x".into()).into(), code::VALIDATION_ERROR),
            (AppError::Conflict("x".into()), code::CONFLICT),
            (AppError::Internal("x".into()), code::INTERNAL_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(to_rpc_error(err).code(), expected);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = to_rpc_error(AppError::Internal("disk I/O error at /var/db".into()));
        assert_eq!(err.message(), "Internal error");
    }
}
