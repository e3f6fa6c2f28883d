//! Network ACL and security group management

use super::types::{NetworkAcl, SecurityGroup};
use super::{Ec2Client, vpc_filter};
use crate::aws::error::AwsError;
use tracing::{debug, info};

impl Ec2Client {
    /// List network ACLs in a VPC, flagging the default ACL
    pub async fn list_network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>, AwsError> {
        let response = self
            .client
            .describe_network_acls()
            .filters(vpc_filter(vpc_id))
            .send()
            .await?;

        let acls: Vec<NetworkAcl> = response
            .network_acls()
            .iter()
            .filter_map(|acl| {
                let id = acl.network_acl_id()?;
                Some(NetworkAcl::new(id, acl.is_default().unwrap_or(false)))
            })
            .collect();

        debug!(vpc_id = %vpc_id, count = acls.len(), "Described network ACLs");
        Ok(acls)
    }

    pub async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_network_acl()
            .network_acl_id(network_acl_id)
            .send()
            .await?;

        info!(network_acl_id = %network_acl_id, "Network ACL deleted");
        Ok(())
    }

    /// List security groups in a VPC
    pub async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, AwsError> {
        let response = self
            .client
            .describe_security_groups()
            .filters(vpc_filter(vpc_id))
            .send()
            .await?;

        let groups: Vec<SecurityGroup> = response
            .security_groups()
            .iter()
            .filter_map(|sg| {
                let id = sg.group_id()?;
                Some(SecurityGroup::new(id, sg.group_name().unwrap_or_default()))
            })
            .collect();

        debug!(vpc_id = %vpc_id, count = groups.len(), "Described security groups");
        Ok(groups)
    }

    /// Delete a security group
    ///
    /// No retry on DependencyViolation: the caller records the failure and
    /// moves on to the next group.
    pub async fn delete_security_group(&self, security_group_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_security_group()
            .group_id(security_group_id)
            .send()
            .await?;

        info!(sg_id = %security_group_id, "Security group deleted");
        Ok(())
    }
}
