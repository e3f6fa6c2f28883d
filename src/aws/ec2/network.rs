//! VPC networking resources: interfaces, gateways, subnets, route tables

use super::types::RouteTable;
use super::{Ec2Client, vpc_filter};
use crate::aws::error::AwsError;
use aws_sdk_ec2::types::Filter;
use tracing::{debug, info};

impl Ec2Client {
    /// List network interfaces in a VPC
    pub async fn list_network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_network_interfaces()
            .filters(vpc_filter(vpc_id))
            .send()
            .await?;

        Ok(response
            .network_interfaces()
            .iter()
            .filter_map(|eni| eni.network_interface_id())
            .map(str::to_string)
            .collect())
    }

    /// List internet gateways attached to a VPC
    pub async fn list_internet_gateways(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_internet_gateways()
            .filters(
                Filter::builder()
                    .name("attachment.vpc-id")
                    .values(vpc_id)
                    .build(),
            )
            .send()
            .await?;

        Ok(response
            .internet_gateways()
            .iter()
            .filter_map(|igw| igw.internet_gateway_id())
            .map(str::to_string)
            .collect())
    }

    /// Detach an internet gateway from a VPC
    pub async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), AwsError> {
        self.client
            .detach_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await?;

        info!(igw_id = %internet_gateway_id, vpc_id = %vpc_id, "Internet gateway detached");
        Ok(())
    }

    /// Delete a detached internet gateway
    pub async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .send()
            .await?;

        info!(igw_id = %internet_gateway_id, "Internet gateway deleted");
        Ok(())
    }

    /// List subnets in a VPC
    pub async fn list_subnets(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        let response = self
            .client
            .describe_subnets()
            .filters(vpc_filter(vpc_id))
            .send()
            .await?;

        Ok(response
            .subnets()
            .iter()
            .filter_map(|s| s.subnet_id())
            .map(str::to_string)
            .collect())
    }

    pub async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_subnet()
            .subnet_id(subnet_id)
            .send()
            .await?;

        info!(subnet_id = %subnet_id, "Subnet deleted");
        Ok(())
    }

    /// List route tables in a VPC, flagging the main table
    pub async fn list_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, AwsError> {
        let response = self
            .client
            .describe_route_tables()
            .filters(vpc_filter(vpc_id))
            .send()
            .await?;

        let tables: Vec<RouteTable> = response
            .route_tables()
            .iter()
            .filter_map(|rt| {
                let id = rt.route_table_id()?;
                let main = rt.associations().iter().any(|a| a.main() == Some(true));
                Some(RouteTable::new(id, main))
            })
            .collect();

        debug!(vpc_id = %vpc_id, count = tables.len(), "Described route tables");
        Ok(tables)
    }

    pub async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError> {
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await?;

        info!(route_table_id = %route_table_id, "Route table deleted");
        Ok(())
    }

    /// Delete the VPC itself; its main route table, default ACL and default
    /// security group go with it
    pub async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError> {
        self.client.delete_vpc().vpc_id(vpc_id).send().await?;

        info!(vpc_id = %vpc_id, region = %self.region(), "VPC deleted");
        Ok(())
    }
}
