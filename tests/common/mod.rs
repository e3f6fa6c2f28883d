//! Shared test utilities for integration tests
//!
//! An in-memory EC2 account that records every call made against it, so
//! tests can assert on call order and on the absence of mutating calls.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use vpc_reaper::aws::ec2::{NetworkAcl, RouteTable, SecurityGroup};
use vpc_reaper::aws::{AwsError, Ec2Operations, Ec2Provider, classify_aws_error};
use vpc_reaper::config::SweepConfig;
use vpc_reaper::output::Console;

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub region: String,
    pub op: &'static str,
    pub id: Option<String>,
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        self.op.starts_with("delete_") || self.op.starts_with("detach_")
    }
}

/// Contents of one region
#[derive(Debug, Clone, Default)]
pub struct FakeRegion {
    pub default_vpc: Option<String>,
    pub interfaces: Vec<String>,
    pub gateways: Vec<String>,
    pub subnets: Vec<String>,
    pub route_tables: Vec<RouteTable>,
    pub network_acls: Vec<NetworkAcl>,
    pub security_groups: Vec<SecurityGroup>,
    /// Reading the default-vpc attribute fails
    pub fail_default_vpc: bool,
    /// Resource ids whose delete is rejected
    pub reject_delete: HashSet<String>,
}

impl FakeRegion {
    /// A region whose default VPC has only the provider-created defaults
    pub fn with_default_vpc(vpc_id: &str) -> Self {
        Self {
            default_vpc: Some(vpc_id.to_string()),
            route_tables: vec![RouteTable::new("rtb-main", true)],
            network_acls: vec![NetworkAcl::new("acl-default", true)],
            security_groups: vec![SecurityGroup::new("sg-default", "default")],
            ..Default::default()
        }
    }

    pub fn without_default_vpc() -> Self {
        Self::default()
    }
}

/// An account made of fake regions, listed in insertion order
#[derive(Clone, Default)]
pub struct FakeAccount {
    order: Vec<String>,
    regions: HashMap<String, Arc<FakeRegion>>,
    fail_region_listing: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeAccount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(mut self, name: &str, region: FakeRegion) -> Self {
        self.order.push(name.to_string());
        self.regions.insert(name.to_string(), Arc::new(region));
        self
    }

    pub fn failing_region_listing(mut self) -> Self {
        self.fail_region_listing = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Mutating calls as `op id` strings, in call order
    pub fn mutation_log(&self) -> Vec<String> {
        self.mutations()
            .into_iter()
            .map(|c| format!("{} {}", c.op, c.id.unwrap_or_default()))
            .collect()
    }
}

impl Ec2Provider for FakeAccount {
    type Client = FakeEc2;

    fn client_for(&self, region: &str) -> FakeEc2 {
        FakeEc2 {
            region: region.to_string(),
            state: self.regions.get(region).cloned().unwrap_or_default(),
            account: self.clone(),
        }
    }
}

/// Region-scoped client into a [`FakeAccount`]
pub struct FakeEc2 {
    region: String,
    state: Arc<FakeRegion>,
    account: FakeAccount,
}

impl FakeEc2 {
    fn record(&self, op: &'static str, id: Option<&str>) {
        self.account.calls.lock().unwrap().push(Call {
            region: self.region.clone(),
            op,
            id: id.map(str::to_string),
        });
    }

    fn mutate(&self, op: &'static str, id: &str) -> Result<(), AwsError> {
        self.record(op, Some(id));
        if self.state.reject_delete.contains(id) {
            return Err(classify_aws_error(
                Some("DependencyViolation"),
                Some(&format!("'{id}' has dependencies and cannot be deleted.")),
            ));
        }
        Ok(())
    }
}

impl Ec2Operations for FakeEc2 {
    async fn describe_regions(&self) -> Result<Vec<String>, AwsError> {
        self.record("describe_regions", None);
        if self.account.fail_region_listing {
            return Err(classify_aws_error(
                Some("UnauthorizedOperation"),
                Some("You are not authorized to perform this operation."),
            ));
        }
        Ok(self.account.order.clone())
    }

    async fn default_vpc_id(&self) -> Result<Option<String>, AwsError> {
        self.record("default_vpc_id", None);
        if self.state.fail_default_vpc {
            return Err(classify_aws_error(
                Some("AuthFailure"),
                Some("AWS was not able to validate the provided access credentials"),
            ));
        }
        Ok(self.state.default_vpc.clone())
    }

    async fn list_network_interfaces(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        self.record("list_network_interfaces", Some(vpc_id));
        Ok(self.state.interfaces.clone())
    }

    async fn list_internet_gateways(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        self.record("list_internet_gateways", Some(vpc_id));
        Ok(self.state.gateways.clone())
    }

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        _vpc_id: &str,
    ) -> Result<(), AwsError> {
        self.mutate("detach_internet_gateway", internet_gateway_id)
    }

    async fn delete_internet_gateway(&self, internet_gateway_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_internet_gateway", internet_gateway_id)
    }

    async fn list_subnets(&self, vpc_id: &str) -> Result<Vec<String>, AwsError> {
        self.record("list_subnets", Some(vpc_id));
        Ok(self.state.subnets.clone())
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_subnet", subnet_id)
    }

    async fn list_route_tables(&self, vpc_id: &str) -> Result<Vec<RouteTable>, AwsError> {
        self.record("list_route_tables", Some(vpc_id));
        Ok(self.state.route_tables.clone())
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_route_table", route_table_id)
    }

    async fn list_network_acls(&self, vpc_id: &str) -> Result<Vec<NetworkAcl>, AwsError> {
        self.record("list_network_acls", Some(vpc_id));
        Ok(self.state.network_acls.clone())
    }

    async fn delete_network_acl(&self, network_acl_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_network_acl", network_acl_id)
    }

    async fn list_security_groups(&self, vpc_id: &str) -> Result<Vec<SecurityGroup>, AwsError> {
        self.record("list_security_groups", Some(vpc_id));
        Ok(self.state.security_groups.clone())
    }

    async fn delete_security_group(&self, security_group_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_security_group", security_group_id)
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), AwsError> {
        self.mutate("delete_vpc", vpc_id)
    }
}

/// Run a sweep against `account`, returning the report and the printed lines
pub async fn sweep(
    account: &FakeAccount,
    config: &SweepConfig,
) -> (anyhow::Result<vpc_reaper::sweep::RunReport>, Vec<String>) {
    let mut console = Console::new(Vec::new(), config);
    let result = vpc_reaper::sweep::run_sweep(account, config, &mut console).await;
    let text = String::from_utf8(console.into_inner()).expect("output is UTF-8");
    (result, text.lines().map(str::to_string).collect())
}
