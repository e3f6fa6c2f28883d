//! Region enumeration and account attributes

use super::Ec2Client;
use crate::aws::error::AwsError;
use aws_sdk_ec2::types::AccountAttributeName;
use tracing::debug;

/// Value of the `default-vpc` attribute when the region has no default VPC
pub const NO_DEFAULT_VPC: &str = "none";

impl Ec2Client {
    /// List the names of all regions enabled for the account
    pub async fn describe_regions(&self) -> Result<Vec<String>, AwsError> {
        let response = self.client.describe_regions().send().await?;

        let regions: Vec<String> = response
            .regions()
            .iter()
            .filter_map(|r| r.region_name())
            .map(str::to_string)
            .collect();

        debug!(count = regions.len(), "Described regions");
        Ok(regions)
    }

    /// Read the account's `default-vpc` attribute for this region
    ///
    /// Returns `None` when the attribute is the `"none"` sentinel.
    pub async fn default_vpc_id(&self) -> Result<Option<String>, AwsError> {
        let response = self
            .client
            .describe_account_attributes()
            .attribute_names(AccountAttributeName::DefaultVpc)
            .send()
            .await?;

        let value = response
            .account_attributes()
            .first()
            .and_then(|attr| attr.attribute_values().first())
            .and_then(|v| v.attribute_value())
            .ok_or(AwsError::MissingField("default-vpc attribute value"))?;

        debug!(region = %self.region(), default_vpc = %value, "Read default-vpc attribute");

        Ok(parse_default_vpc(value))
    }
}

/// Map the raw attribute value to a VPC id
fn parse_default_vpc(value: &str) -> Option<String> {
    if value == NO_DEFAULT_VPC || value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
