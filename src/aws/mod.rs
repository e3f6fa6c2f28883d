//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: default VPC discovery and teardown
//! - STS: account ID lookup

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;

pub use account::{AccountId, get_current_account_id};
pub use context::{AwsContext, FromAwsContext};
pub use ec2::{Ec2Client, Ec2Operations, Ec2Provider};
pub use error::{AwsError, classify_aws_error};
