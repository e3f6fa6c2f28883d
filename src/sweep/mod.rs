//! Default VPC sweep
//!
//! Region by region: resolve the default VPC, skip the region if it has none
//! or if any network interface lives in it, then run the six deleters in
//! [`ResourceKind::DELETION_ORDER`]. Nothing is rolled back.

mod deleter;
mod report;
mod resource_kind;

pub use deleter::{Protection, VpcResource, list_resources, sweep_kind};
pub use report::{Action, ActionOutcome, ActionRecord, RegionReport, RegionStatus, RunReport};
pub use resource_kind::ResourceKind;

use crate::aws::ec2::{Ec2Operations, Ec2Provider};
use crate::config::SweepConfig;
use crate::output::Console;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info, warn};

/// Sweep a single region with a client bound to it
///
/// Returns an error only when the `default-vpc` attribute cannot be read,
/// which aborts the whole run.
pub async fn sweep_region<E: Ec2Operations, W: Write>(
    ec2: &E,
    region: &str,
    config: &SweepConfig,
    console: &mut Console<W>,
) -> Result<RegionReport> {
    console.follow(config);
    console.line(format!("Scanning Region: {region}"));

    let vpc_id = match ec2.default_vpc_id().await {
        Ok(Some(vpc_id)) => vpc_id,
        Ok(None) => {
            console.line(format!("VPC (default) was not found in the {region} region."));
            return Ok(RegionReport::new(region, RegionStatus::NoDefaultVpc));
        }
        Err(e) => {
            console.line(e.message());
            return Err(e)
                .with_context(|| format!("Failed to read the default-vpc attribute in {region}"));
        }
    };
    debug!(region = %region, vpc_id = %vpc_id, "Found default VPC");
    console.line(format!("Removing VPC: {vpc_id}"));

    // Most workloads attach an ENI, so any interface means the VPC is in use
    let interfaces = match ec2.list_network_interfaces(&vpc_id).await {
        Ok(interfaces) => interfaces,
        Err(e) => {
            warn!(region = %region, vpc_id = %vpc_id, error = %e, "Network interface check failed");
            console.line(e.message());
            return Ok(RegionReport::new(
                region,
                RegionStatus::GuardFailed {
                    vpc_id,
                    message: e.message(),
                },
            ));
        }
    };
    if !interfaces.is_empty() {
        info!(region = %region, vpc_id = %vpc_id, count = interfaces.len(), "VPC in use, skipping");
        console.line(format!("VPC {vpc_id} has existing resources in the {region} region."));
        return Ok(RegionReport::new(
            region,
            RegionStatus::InUse {
                vpc_id,
                interfaces: interfaces.len(),
            },
        ));
    }

    let mut report = RegionReport::new(
        region,
        RegionStatus::Swept {
            vpc_id: vpc_id.clone(),
        },
    );
    for kind in ResourceKind::DELETION_ORDER {
        let records = sweep_kind(ec2, kind, &vpc_id, config, console).await;
        report.actions.extend(records);
    }

    if report.vpc_removed() {
        console.line(format!("VPC {vpc_id} has been deleted from the {region} region."));
    }

    Ok(report)
}

/// Sweep every selected region of the account
///
/// Region listing failures are reported and yield an empty run; a failure to
/// read a region's `default-vpc` attribute aborts the run.
pub async fn run_sweep<P: Ec2Provider, W: Write>(
    provider: &P,
    config: &SweepConfig,
    console: &mut Console<W>,
) -> Result<RunReport> {
    console.follow(config);
    let mut report = RunReport::new(config.dry_run);

    let bootstrap = provider.client_for(&config.bootstrap_region);
    let regions = match bootstrap.describe_regions().await {
        Ok(regions) => regions,
        Err(e) => {
            warn!(region = %config.bootstrap_region, error = %e, "Failed to list regions");
            console.line(e.message());
            report.region_error = Some(e.message());
            Vec::new()
        }
    };

    for wanted in &config.regions {
        if report.region_error.is_none() && !regions.contains(wanted) {
            warn!(region = %wanted, "Requested region is not enabled");
            console.line(format!("Region {wanted} is not enabled for this account, ignoring."));
        }
    }

    if config.dry_run {
        console.line("Not actually deleting anything");
    }

    for region in regions.iter().filter(|r| config.includes_region(r)) {
        let ec2 = provider.client_for(region);
        let region_report = sweep_region(&ec2, region, config, console).await?;
        report.regions.push(region_report);
    }

    info!(
        regions = report.regions.len(),
        swept = report.regions_swept(),
        failed = report.failed(),
        "Sweep finished"
    );

    Ok(report)
}
