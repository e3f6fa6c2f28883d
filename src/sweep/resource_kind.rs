//! VPC resource kinds and deletion ordering
//!
//! EC2 refuses to delete a VPC (or detach its gateway) while dependents are
//! still attached, so kinds are always swept in [`ResourceKind::DELETION_ORDER`].

use std::fmt;

/// Kinds of resource removed from a default VPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Internet gateway (must be detached before it can be deleted)
    InternetGateway,
    Subnet,
    /// Route table (the main table goes with the VPC)
    RouteTable,
    /// Network ACL (the default ACL goes with the VPC)
    NetworkAcl,
    /// Security group (the `default` group goes with the VPC)
    SecurityGroup,
    /// The VPC itself, always last
    Vpc,
}

impl ResourceKind {
    /// Every kind, in the order the sweep deletes them
    pub const DELETION_ORDER: [ResourceKind; 6] = [
        ResourceKind::InternetGateway,
        ResourceKind::Subnet,
        ResourceKind::RouteTable,
        ResourceKind::NetworkAcl,
        ResourceKind::SecurityGroup,
        ResourceKind::Vpc,
    ];

    /// Get deletion priority (lower number = delete first)
    pub fn deletion_priority(self) -> u8 {
        match self {
            ResourceKind::InternetGateway => 0,
            ResourceKind::Subnet => 1,
            ResourceKind::RouteTable => 2,
            ResourceKind::NetworkAcl => 3,
            ResourceKind::SecurityGroup => 4,
            ResourceKind::Vpc => 5,
        }
    }

    /// Whether each instance must be detached from the VPC before deletion
    pub fn requires_detach(self) -> bool {
        matches!(self, ResourceKind::InternetGateway)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::InternetGateway => "internet gateway",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route table",
            ResourceKind::NetworkAcl => "network ACL",
            ResourceKind::SecurityGroup => "security group",
            ResourceKind::Vpc => "VPC",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
