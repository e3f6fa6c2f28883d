//! EC2 resource records
//!
//! Plain snapshots of the fields the sweep needs, decoupled from the SDK
//! types so they can be built by hand in tests.

/// Route table in a VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub route_table_id: String,
    /// True if any association marks this as the VPC's main table
    pub main: bool,
}

impl RouteTable {
    pub fn new(route_table_id: impl Into<String>, main: bool) -> Self {
        Self {
            route_table_id: route_table_id.into(),
            main,
        }
    }
}

/// Network ACL in a VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAcl {
    pub network_acl_id: String,
    pub is_default: bool,
}

impl NetworkAcl {
    pub fn new(network_acl_id: impl Into<String>, is_default: bool) -> Self {
        Self {
            network_acl_id: network_acl_id.into(),
            is_default,
        }
    }
}

/// Name AWS gives every VPC's built-in security group
pub const DEFAULT_SECURITY_GROUP_NAME: &str = "default";

/// Security group in a VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
}

impl SecurityGroup {
    pub fn new(group_id: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: group_name.into(),
        }
    }

    /// The VPC's built-in group, which cannot be deleted on its own
    pub fn is_default(&self) -> bool {
        self.group_name == DEFAULT_SECURITY_GROUP_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_security_group_is_matched_by_name() {
        assert!(SecurityGroup::new("sg-1", "default").is_default());
        assert!(!SecurityGroup::new("sg-2", "web").is_default());
        assert!(!SecurityGroup::new("sg-3", "Default").is_default());
    }
}
