//! EC2 operations trait for testing

use super::Ec2Client;
use super::types::{NetworkAcl, RouteTable, SecurityGroup};
use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::AwsError;

/// Trait for the EC2 calls the sweep makes, so it can be mocked in tests.
///
/// Every method is scoped to the region the implementation is bound to.
/// List methods return ids (or small records when the sweep needs a flag);
/// mutating methods return `()`.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// List the names of all regions enabled for the account
    async fn describe_regions(&self) -> Result<Vec<String>, AwsError>;

    /// Default VPC id for this region, `None` if the region has none
    async fn default_vpc_id(&self) -> Result<Option<String>, AwsError>;

    async fn list_network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>, AwsError>;

    async fn list_internet_gateways(&self, vpc_id: &str) -> Result<Vec<String>, AwsError>;

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), AwsError>;

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError>;

    async fn list_subnets(&self, vpc_id: &str) -> Result<Vec<String>, AwsError>;

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError>;

    async fn list_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, AwsError>;

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError>;

    async fn list_network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>, AwsError>;

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError>;

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, AwsError>;

    async fn delete_security_group(&self, security_group_id: &str) -> Result<(), AwsError>;

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError>;
}

impl Ec2Operations for Ec2Client {
    async fn describe_regions(&self) -> Result<Vec<String>, AwsError> {
        Ec2Client::describe_regions(self).await
    }

    async fn default_vpc_id(&self) -> Result<Option<String>, AwsError> {
        Ec2Client::default_vpc_id(self).await
    }

    async fn list_network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::list_network_interfaces(self, vpc_id).await
    }

    async fn list_internet_gateways(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::list_internet_gateways(self, vpc_id).await
    }

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), AwsError> {
        Ec2Client::detach_internet_gateway(self, internet_gateway_id, vpc_id).await
    }

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_internet_gateway(self, internet_gateway_id).await
    }

    async fn list_subnets(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        Ec2Client::list_subnets(self, vpc_id).await
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_subnet(self, subnet_id).await
    }

    async fn list_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, AwsError> {
        Ec2Client::list_route_tables(self, vpc_id).await
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_route_table(self, route_table_id).await
    }

    async fn list_network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>, AwsError> {
        Ec2Client::list_network_acls(self, vpc_id).await
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_network_acl(self, network_acl_id).await
    }

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, AwsError> {
        Ec2Client::list_security_groups(self, vpc_id).await
    }

    async fn delete_security_group(&self, security_group_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_security_group(self, security_group_id).await
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError> {
        Ec2Client::delete_vpc(self, vpc_id).await
    }
}

/// Source of region-scoped EC2 clients.
///
/// The sweep asks for a fresh client per region; implementations decide how
/// credentials are shared between them.
pub trait Ec2Provider {
    type Client: Ec2Operations;

    fn client_for(&self, region: &str) -> Self::Client;
}

impl Ec2Provider for AwsContext {
    type Client = Ec2Client;

    fn client_for(&self, region: &str) -> Ec2Client {
        Ec2Client::from_context(&self.with_region(region))
    }
}
