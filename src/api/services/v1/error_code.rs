//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::UtmError;

/// API 错误码枚举
///
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 维度管理错误
/// - 3000-3099: URL 生成错误
/// - 5000-5099: 存储错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    DimensionAlreadyExists = 2000,
    DimensionNotFound = 2001,
    CannotRemoveDefault = 2002,
    DimensionInUse = 2003,

    UrlRequired = 3000,
    SourceRequired = 3001,
    InvalidUrl = 3002,
    UnknownSource = 3003,

    DatabaseError = 5000,
}

impl From<&UtmError> for ErrorCode {
    fn from(err: &UtmError) -> Self {
        match err {
            UtmError::MissingBaseUrl => ErrorCode::UrlRequired,
            UtmError::MissingSource => ErrorCode::SourceRequired,
            UtmError::InvalidUrl(_) => ErrorCode::InvalidUrl,
            UtmError::Validation(_) => ErrorCode::BadRequest,
            UtmError::DuplicateName(_) => ErrorCode::DimensionAlreadyExists,
            UtmError::NotFound(_) => ErrorCode::DimensionNotFound,
            UtmError::CannotRemoveDefault(_) => ErrorCode::CannotRemoveDefault,
            UtmError::InUse(_) => ErrorCode::DimensionInUse,
            UtmError::UnknownSource(_) => ErrorCode::UnknownSource,
            UtmError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            UtmError::DatabaseConfig(_) | UtmError::DatabaseOperation(_) => {
                ErrorCode::DatabaseError
            }
            UtmError::Webhook(_)
            | UtmError::FileOperation(_)
            | UtmError::Serialization(_)
            | UtmError::Config(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::CannotRemoveDefault).unwrap();
        assert_eq!(json, "2002");
    }

    #[test]
    fn test_from_utm_error() {
        assert_eq!(
            ErrorCode::from(&UtmError::duplicate_name("google")),
            ErrorCode::DimensionAlreadyExists
        );
        assert_eq!(ErrorCode::from(&UtmError::MissingSource), ErrorCode::SourceRequired);
        assert_eq!(
            ErrorCode::from(&UtmError::database_connection("down")),
            ErrorCode::ServiceUnavailable
        );
    }
}
