//! Outcome records for a sweep
//!
//! Every list, detach and delete produces an [`ActionRecord`]; records are
//! grouped per region and per run so failures can be counted and asserted on.

use super::resource_kind::ResourceKind;
use crate::output::Console;
use std::io::Write;

/// What was attempted against a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Detach,
    Delete,
}

/// Result of a single action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The call succeeded
    Completed,
    /// Dry-run: the call was not issued
    DryRun,
    /// Protected instance (main table, default ACL, default group), left alone
    Protected,
    /// The provider reported the resource as already gone
    AlreadyGone,
    /// The provider rejected the call
    Failed(String),
}

impl ActionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ActionOutcome::Failed(_))
    }
}

/// One action against one resource (or one listing of a kind)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub kind: ResourceKind,
    /// `None` for list actions
    pub resource_id: Option<String>,
    pub action: Action,
    pub outcome: ActionOutcome,
}

impl ActionRecord {
    pub fn new(
        kind: ResourceKind,
        resource_id: impl Into<String>,
        action: Action,
        outcome: ActionOutcome,
    ) -> Self {
        Self {
            kind,
            resource_id: Some(resource_id.into()),
            action,
            outcome,
        }
    }

    pub fn list_failed(kind: ResourceKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            resource_id: None,
            action: Action::List,
            outcome: ActionOutcome::Failed(message.into()),
        }
    }
}

/// How a region was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionStatus {
    /// The `default-vpc` attribute was `none`
    NoDefaultVpc,
    /// Network interfaces exist in the default VPC
    InUse { vpc_id: String, interfaces: usize },
    /// The network interface check itself failed
    GuardFailed { vpc_id: String, message: String },
    /// All six deleters ran
    Swept { vpc_id: String },
}

/// Everything that happened in one region
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub region: String,
    pub status: RegionStatus,
    pub actions: Vec<ActionRecord>,
}

impl RegionReport {
    pub fn new(region: impl Into<String>, status: RegionStatus) -> Self {
        Self {
            region: region.into(),
            status,
            actions: Vec::new(),
        }
    }

    pub fn is_swept(&self) -> bool {
        matches!(self.status, RegionStatus::Swept { .. })
    }

    /// True when the VPC delete completed (or would have, in dry-run)
    pub fn vpc_removed(&self) -> bool {
        self.actions.iter().any(|a| {
            a.kind == ResourceKind::Vpc
                && a.action == Action::Delete
                && matches!(a.outcome, ActionOutcome::Completed | ActionOutcome::DryRun)
        })
    }

    pub fn count(&self, predicate: impl Fn(&ActionOutcome) -> bool) -> usize {
        self.actions.iter().filter(|a| predicate(&a.outcome)).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(|a| a.outcome.is_failure())
    }
}

/// Everything that happened in one run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub dry_run: bool,
    /// Set when the region listing failed and nothing was scanned
    pub region_error: Option<String>,
    pub regions: Vec<RegionReport>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            region_error: None,
            regions: Vec::new(),
        }
    }

    pub fn regions_swept(&self) -> usize {
        self.regions.iter().filter(|r| r.is_swept()).count()
    }

    pub fn count(&self, predicate: impl Fn(&ActionOutcome) -> bool + Copy) -> usize {
        self.regions.iter().map(|r| r.count(predicate)).sum()
    }

    pub fn failed(&self) -> usize {
        self.count(ActionOutcome::is_failure)
    }

    /// Print the closing summary block
    pub fn print_summary<W: Write>(&self, console: &mut Console<W>) {
        let skipped = |f: fn(&RegionStatus) -> bool| {
            self.regions.iter().filter(|r| f(&r.status)).count()
        };

        console.line("=== Summary ===");
        if let Some(message) = &self.region_error {
            console.line(format!("Region listing failed: {message}"));
        }
        console.line(format!("Regions scanned:     {}", self.regions.len()));
        console.line(format!("Regions swept:       {}", self.regions_swept()));
        console.line(format!(
            "No default VPC:      {}",
            skipped(|s: &RegionStatus| matches!(s, RegionStatus::NoDefaultVpc))
        ));
        console.line(format!(
            "In use (skipped):    {}",
            skipped(|s: &RegionStatus| matches!(s, RegionStatus::InUse { .. }))
        ));
        console.line(format!(
            "Check failed:        {}",
            skipped(|s: &RegionStatus| matches!(s, RegionStatus::GuardFailed { .. }))
        ));
        let done_label = if self.dry_run { "Would run:" } else { "Completed:" };
        console.line(format!(
            "{done_label:<20} {}",
            self.count(|o| matches!(o, ActionOutcome::Completed | ActionOutcome::DryRun))
        ));
        console.line(format!(
            "Already gone:        {}",
            self.count(|o| matches!(o, ActionOutcome::AlreadyGone))
        ));
        console.line(format!(
            "Protected:           {}",
            self.count(|o| matches!(o, ActionOutcome::Protected))
        ));
        console.line(format!("Failed:              {}", self.failed()));

        for region in &self.regions {
            for failure in region.failures() {
                if let ActionOutcome::Failed(message) = &failure.outcome {
                    console.line(format!(
                        "  {} {} {}: {message}",
                        region.region,
                        failure.kind,
                        failure.resource_id.as_deref().unwrap_or("(list)"),
                    ));
                }
            }
        }
    }
}
