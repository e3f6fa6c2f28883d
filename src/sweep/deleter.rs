//! Generic list-filter-delete step
//!
//! One [`sweep_kind`] serves all six resource kinds. The kind selects the
//! list call, the protected-instance predicate, the delete call and whether
//! a detach comes first.

use super::report::{Action, ActionOutcome, ActionRecord};
use super::resource_kind::ResourceKind;
use crate::aws::ec2::{Ec2Operations, NetworkAcl, RouteTable, SecurityGroup};
use crate::aws::error::AwsError;
use crate::config::SweepConfig;
use crate::output::Console;
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Why a resource is left for the VPC delete to remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    MainRouteTable,
    DefaultNetworkAcl,
    DefaultSecurityGroup,
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protection::MainRouteTable => "main route table",
            Protection::DefaultNetworkAcl => "default network ACL",
            Protection::DefaultSecurityGroup => "default security group",
        })
    }
}

/// A resource found in the VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpcResource {
    pub kind: ResourceKind,
    pub id: String,
    pub protection: Option<Protection>,
}

impl VpcResource {
    pub fn unprotected(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            protection: None,
        }
    }
}

impl From<RouteTable> for VpcResource {
    fn from(rt: RouteTable) -> Self {
        Self {
            kind: ResourceKind::RouteTable,
            protection: rt.main.then_some(Protection::MainRouteTable),
            id: rt.route_table_id,
        }
    }
}

impl From<NetworkAcl> for VpcResource {
    fn from(acl: NetworkAcl) -> Self {
        Self {
            kind: ResourceKind::NetworkAcl,
            protection: acl.is_default.then_some(Protection::DefaultNetworkAcl),
            id: acl.network_acl_id,
        }
    }
}

impl From<SecurityGroup> for VpcResource {
    fn from(sg: SecurityGroup) -> Self {
        Self {
            kind: ResourceKind::SecurityGroup,
            protection: sg.is_default().then_some(Protection::DefaultSecurityGroup),
            id: sg.group_id,
        }
    }
}

/// List every resource of `kind` in the VPC
///
/// Gateways are matched by attachment, everything else by `vpc-id`. The VPC
/// kind lists the VPC itself.
pub async fn list_resources<E: Ec2Operations>(
    ec2: &E,
    kind: ResourceKind,
    vpc_id: &str,
) -> Result<Vec<VpcResource>, AwsError> {
    let unprotected = |ids: Vec<String>| -> Vec<VpcResource> {
        ids.into_iter()
            .map(|id| VpcResource::unprotected(kind, id))
            .collect()
    };

    let resources = match kind {
        ResourceKind::InternetGateway => unprotected(ec2.list_internet_gateways(vpc_id).await?),
        ResourceKind::Subnet => unprotected(ec2.list_subnets(vpc_id).await?),
        ResourceKind::RouteTable => ec2
            .list_route_tables(vpc_id)
            .await?
            .into_iter()
            .map(VpcResource::from)
            .collect(),
        ResourceKind::NetworkAcl => ec2
            .list_network_acls(vpc_id)
            .await?
            .into_iter()
            .map(VpcResource::from)
            .collect(),
        ResourceKind::SecurityGroup => ec2
            .list_security_groups(vpc_id)
            .await?
            .into_iter()
            .map(VpcResource::from)
            .collect(),
        ResourceKind::Vpc => vec![VpcResource::unprotected(kind, vpc_id)],
    };

    Ok(resources)
}

/// Detach a resource from the VPC (only gateways need it)
async fn detach_resource<E: Ec2Operations>(
    ec2: &E,
    kind: ResourceKind,
    resource_id: &str,
    vpc_id: &str,
) -> Result<(), AwsError> {
    match kind {
        ResourceKind::InternetGateway => ec2.detach_internet_gateway(resource_id, vpc_id).await,
        _ => Ok(()),
    }
}

async fn delete_resource<E: Ec2Operations>(
    ec2: &E,
    kind: ResourceKind,
    resource_id: &str,
) -> Result<(), AwsError> {
    match kind {
        ResourceKind::InternetGateway => ec2.delete_internet_gateway(resource_id).await,
        ResourceKind::Subnet => ec2.delete_subnet(resource_id).await,
        ResourceKind::RouteTable => ec2.delete_route_table(resource_id).await,
        ResourceKind::NetworkAcl => ec2.delete_network_acl(resource_id).await,
        ResourceKind::SecurityGroup => ec2.delete_security_group(resource_id).await,
        ResourceKind::Vpc => ec2.delete_vpc(resource_id).await,
    }
}

/// The actions that change the account
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Detach,
    Delete,
}

impl Mutation {
    fn action(self) -> Action {
        match self {
            Mutation::Detach => Action::Detach,
            Mutation::Delete => Action::Delete,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Mutation::Detach => "Detaching",
            Mutation::Delete => "Deleting",
        }
    }
}

/// Run one mutating action, or announce it in dry-run
async fn apply<E: Ec2Operations, W: Write>(
    ec2: &E,
    resource: &VpcResource,
    mutation: Mutation,
    vpc_id: &str,
    config: &SweepConfig,
    console: &mut Console<W>,
) -> ActionRecord {
    console.line(format!("  {} {} {}", mutation.verb(), resource.kind, resource.id));
    let record =
        |outcome| ActionRecord::new(resource.kind, &resource.id, mutation.action(), outcome);

    if config.dry_run {
        return record(ActionOutcome::DryRun);
    }

    let result = match mutation {
        Mutation::Detach => detach_resource(ec2, resource.kind, &resource.id, vpc_id).await,
        Mutation::Delete => delete_resource(ec2, resource.kind, &resource.id).await,
    };

    let outcome = match result {
        Ok(()) => ActionOutcome::Completed,
        Err(e) if e.is_not_found() => {
            debug!(kind = %resource.kind, resource_id = %resource.id, error = %e, "Already gone");
            console.line(format!("  {} {} is already gone", resource.kind, resource.id));
            ActionOutcome::AlreadyGone
        }
        Err(e) => {
            warn!(
                kind = %resource.kind,
                resource_id = %resource.id,
                ?mutation,
                error = %e,
                "Action failed"
            );
            console.line(e.message());
            if let Some(hint) = e.suggestion() {
                console.line(format!("  Hint: {hint}"));
            }
            ActionOutcome::Failed(e.message())
        }
    };
    record(outcome)
}

/// List, filter and delete every resource of one kind in the VPC
///
/// Errors never abort the loop: a failed listing yields a single failed
/// record, and each failed detach or delete is recorded before moving on.
pub async fn sweep_kind<E: Ec2Operations, W: Write>(
    ec2: &E,
    kind: ResourceKind,
    vpc_id: &str,
    config: &SweepConfig,
    console: &mut Console<W>,
) -> Vec<ActionRecord> {
    console.follow(config);
    let resources = match list_resources(ec2, kind, vpc_id).await {
        Ok(resources) => resources,
        Err(e) => {
            warn!(kind = %kind, vpc_id = %vpc_id, error = %e, "Listing failed");
            console.line(e.message());
            return vec![ActionRecord::list_failed(kind, e.message())];
        }
    };
    debug!(kind = %kind, vpc_id = %vpc_id, count = resources.len(), "Listed resources");

    let mut records = Vec::with_capacity(resources.len());
    for resource in &resources {
        if let Some(protection) = resource.protection {
            console.line(format!("  Keeping {} ({protection})", resource.id));
            records.push(ActionRecord::new(
                kind,
                &resource.id,
                Action::Delete,
                ActionOutcome::Protected,
            ));
            continue;
        }

        if kind.requires_detach() {
            records.push(apply(ec2, resource, Mutation::Detach, vpc_id, config, console).await);
        }
        records.push(apply(ec2, resource, Mutation::Delete, vpc_id, config, console).await);
    }

    records
}
