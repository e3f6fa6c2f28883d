//! AWS error classification and handling
//!
//! Provides typed errors for EC2/STS operations using the `.code()` method
//! from the SDK's error metadata instead of string matching on Debug output.

use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// AWS error categories for sweep decisions
#[derive(Debug, Error)]
pub enum AwsError {
    /// Resource was not found (already deleted, or gateway already detached)
    #[error("{message}")]
    NotFound { code: String, message: String },

    /// Resource still has dependent objects attached
    #[error("{message}")]
    DependencyViolation { message: String },

    /// Rate limit exceeded
    #[error("{message}")]
    Throttled { message: String },

    /// Credentials lack permission for the call
    #[error("{message}")]
    Unauthorized { code: String, message: String },

    /// Region is not enabled for the account
    #[error("{message}")]
    OptInRequired { message: String },

    /// Response was missing a field the caller depends on
    #[error("Response is missing {0}")]
    MissingField(&'static str),

    /// Generic AWS SDK error with code and message
    #[error("{message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AwsError::NotFound { .. })
    }

    /// The provider's error code, if one was returned
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsError::NotFound { code, .. } | AwsError::Unauthorized { code, .. } => Some(code),
            AwsError::DependencyViolation { .. } => Some("DependencyViolation"),
            AwsError::Throttled { .. } => Some("RequestLimitExceeded"),
            AwsError::OptInRequired { .. } => Some("OptInRequired"),
            AwsError::MissingField(_) => None,
            AwsError::Sdk { code, .. } => code.as_deref(),
        }
    }

    /// Human-readable message, as printed on the line output
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        self.code().and_then(suggestion_for_code)
    }
}

impl<E, R> From<SdkError<E, R>> for AwsError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(err: SdkError<E, R>) -> Self {
        let meta = ProvideErrorMetadata::meta(&err);
        let message = match meta.message() {
            Some(m) => m.to_string(),
            None => DisplayErrorContext(&err).to_string(),
        };
        classify_aws_error(meta.code(), Some(&message))
    }
}

/// Known EC2 error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidNetworkAclID.NotFound",
    "InvalidGroup.NotFound",
    "InvalidGroupId.NotFound",
    "Gateway.NotAttached",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Known AWS error codes for missing permissions or bad credentials
const UNAUTHORIZED_CODES: &[&str] = &[
    "UnauthorizedOperation",
    "AuthFailure",
    "AccessDenied",
    "InvalidClientTokenId",
    "ExpiredToken",
];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => AwsError::NotFound {
            code: c.to_string(),
            message,
        },
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled { message },
        Some(c) if UNAUTHORIZED_CODES.contains(&c) => AwsError::Unauthorized {
            code: c.to_string(),
            message,
        },
        Some("DependencyViolation") => AwsError::DependencyViolation { message },
        Some("OptInRequired") => AwsError::OptInRequired { message },
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "DependencyViolation",
        "Another resource still references this one; it is removed with the VPC or must be deleted by hand.",
    ),
    (
        "UnauthorizedOperation",
        "The profile needs ec2:Describe* and ec2:Delete* permissions.",
    ),
    ("AuthFailure", "Check the credentials stored for this profile."),
    ("AccessDenied", "Check the IAM policy attached to this profile."),
    (
        "InvalidClientTokenId",
        "Check the credentials stored for this profile.",
    ),
    ("ExpiredToken", "Refresh the session credentials for this profile."),
    (
        "OptInRequired",
        "The region is not enabled for this account.",
    ),
    (
        "RequestLimitExceeded",
        "AWS API rate limit hit. Re-run the sweep later.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<&'static str> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
}
