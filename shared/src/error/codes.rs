//! Unified error codes for the document shop
//!
//! This module defines all error codes used by the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Catalog errors
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (login/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Admin account used without the explicit admin flag
    AdminConfirmationRequired = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found (or not owned by the caller)
    OrderNotFound = 4001,
    /// Order has already been approved
    OrderAlreadyApproved = 4002,
    /// Order has not been reported as paid yet
    OrderNotReported = 4003,
    /// Activation code does not match any of the caller's orders
    ActivationCodeInvalid = 4010,
    /// Activation code has already been redeemed
    ActivationCodeUsed = 4011,
    /// Order has not been approved
    OrderNotApproved = 4012,

    // ==================== 6xxx: Catalog ====================
    /// Item not found
    ItemNotFound = 6001,
    /// Item price is not a positive amount
    ItemInvalidPrice = 6002,
    /// No file provided in upload
    NoFileProvided = 6504,
    /// Uploaded file too large
    FileTooLarge = 6501,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Email is already registered
    EmailExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Data file could not be read or written
    PersistenceFailed = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check whether this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            // Auth
            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid login or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AdminConfirmationRequired => {
                "Admin accounts must sign in with the admin option selected"
            }

            // Permission
            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin only",

            // Order
            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyApproved => "Order has already been approved",
            Self::OrderNotReported => "Order payment has not been reported",
            Self::ActivationCodeInvalid => "Invalid activation code",
            Self::ActivationCodeUsed => "Activation code has already been used",
            Self::OrderNotApproved => "Order has not been approved yet",

            // Catalog
            Self::ItemNotFound => "Document not found",
            Self::ItemInvalidPrice => "Price must be a positive amount",
            Self::NoFileProvided => "Missing file",
            Self::FileTooLarge => "File too large",
            Self::FileStorageFailed => "Failed to store file",

            // User
            Self::UserNotFound => "User not found",
            Self::EmailExists => "Email already registered",

            // System
            Self::InternalError => "Internal server error",
            Self::PersistenceFailed => "Failed to persist data",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1010 => Ok(ErrorCode::AdminConfirmationRequired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyApproved),
            4003 => Ok(ErrorCode::OrderNotReported),
            4010 => Ok(ErrorCode::ActivationCodeInvalid),
            4011 => Ok(ErrorCode::ActivationCodeUsed),
            4012 => Ok(ErrorCode::OrderNotApproved),

            // Catalog
            6001 => Ok(ErrorCode::ItemNotFound),
            6002 => Ok(ErrorCode::ItemInvalidPrice),
            6501 => Ok(ErrorCode::FileTooLarge),
            6504 => Ok(ErrorCode::NoFileProvided),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8002 => Ok(ErrorCode::EmailExists),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::PersistenceFailed),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::AdminConfirmationRequired.code(), 1010);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);

        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::ActivationCodeInvalid.code(), 4010);
        assert_eq!(ErrorCode::ActivationCodeUsed.code(), 4011);
        assert_eq!(ErrorCode::OrderNotApproved.code(), 4012);

        assert_eq!(ErrorCode::ItemNotFound.code(), 6001);
        assert_eq!(ErrorCode::EmailExists.code(), 8002);
        assert_eq!(ErrorCode::PersistenceFailed.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4011), Ok(ErrorCode::ActivationCodeUsed));
        assert_eq!(ErrorCode::try_from(9002), Ok(ErrorCode::PersistenceFailed));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(9999), Err(InvalidErrorCode(9999)));
        assert_eq!(ErrorCode::try_from(6), Err(InvalidErrorCode(6)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::OrderNotApproved).unwrap();
        assert_eq!(json, "4012");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("1010").unwrap();
        assert_eq!(code, ErrorCode::AdminConfirmationRequired);

        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::EmailExists), "8002");
        assert_eq!(
            format!("{}", InvalidErrorCode(77)),
            "invalid error code: 77"
        );
    }
}
