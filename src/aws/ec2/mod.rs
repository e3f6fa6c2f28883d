//! EC2 client for default VPC discovery and teardown

mod network;
mod operations;
mod region;
mod security;
mod types;

pub use operations::{Ec2Operations, Ec2Provider};
pub use types::{DEFAULT_SECURITY_GROUP_NAME, NetworkAcl, RouteTable, SecurityGroup};

#[cfg(test)]
pub use operations::MockEc2Operations;

use crate::aws::context::{AwsContext, FromAwsContext};
use aws_sdk_ec2::{Client, types::Filter};

/// EC2 client scoped to a single region
pub struct Ec2Client {
    pub(crate) client: Client,
    region: String,
}

impl Ec2Client {
    /// Region this client sends requests to
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl FromAwsContext for Ec2Client {
    /// Create an EC2 client from a pre-loaded AWS context
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
            region: ctx.region().to_string(),
        }
    }
}

/// Filter matching resources that belong to `vpc_id`
pub(crate) fn vpc_filter(vpc_id: &str) -> Filter {
    Filter::builder().name("vpc-id").values(vpc_id).build()
}
