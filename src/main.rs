//! vpc-reaper: remove the default VPC from every region of an AWS account
//!
//! Dry-run by default. Regions whose default VPC has network interfaces are
//! never touched.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use vpc_reaper::aws::{AwsContext, get_current_account_id};
use vpc_reaper::config::{DEFAULT_BOOTSTRAP_REGION, SweepConfig, parse_dry_run};
use vpc_reaper::output::Console;
use vpc_reaper::sweep;

const USAGE_EXAMPLES: &str = "\
Examples:
  vpc-reaper development          # dry-run (default)
  vpc-reaper development True     # dry-run
  vpc-reaper development False    # actually delete";

#[derive(Parser, Debug)]
#[command(name = "vpc-reaper")]
#[command(about = "Remove the default VPC and its dependents from every AWS region")]
#[command(version)]
#[command(after_help = USAGE_EXAMPLES)]
struct Args {
    /// AWS profile to load credentials from
    profile: String,

    /// "true" to only print what would be deleted, "false" to delete
    #[arg(value_parser = parse_dry_run, default_value = "true", action = clap::ArgAction::Set)]
    dryrun: bool,

    /// Only sweep this region (repeatable)
    #[arg(long = "region", value_name = "REGION")]
    regions: Vec<String>,

    /// Region used to list the account's regions
    #[arg(long, default_value = DEFAULT_BOOTSTRAP_REGION)]
    bootstrap_region: String,

    /// Log AWS calls and decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for SweepConfig {
    fn from(args: &Args) -> Self {
        Self {
            dry_run: args.dryrun,
            bootstrap_region: args.bootstrap_region.clone(),
            regions: args.regions.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(hint) = e
        .chain()
        .find_map(|c| c.downcast_ref::<vpc_reaper::aws::AwsError>())
        .and_then(|aws| aws.suggestion())
    {
        let _ = writeln!(stderr, "  \x1b[36mHint:\x1b[0m {hint}");
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "{level},aws_config=warn,aws_smithy_runtime=warn,aws_sdk_ec2=warn,aws_sdk_sts=warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = SweepConfig::from(&args);
    info!(
        profile = %args.profile,
        dry_run = config.dry_run,
        regions = ?config.regions,
        "Starting sweep"
    );

    let aws = AwsContext::with_profile(&config.bootstrap_region, Some(&args.profile)).await;
    let account = get_current_account_id(&aws).await?;

    let mut console = Console::stdout(&config);
    console.line(format!("Using account {account} (profile {})", args.profile));

    let report = sweep::run_sweep(&aws, &config, &mut console).await?;
    report.print_summary(&mut console);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_dryrun_means_dry_run() {
        let args = Args::try_parse_from(["vpc-reaper", "dev"]).unwrap();
        assert_eq!(args.profile, "dev");
        assert!(args.dryrun);
        assert!(SweepConfig::from(&args).dry_run);
    }

    #[test]
    fn dryrun_false_is_case_insensitive() {
        let args = Args::try_parse_from(["vpc-reaper", "dev", "False"]).unwrap();
        assert!(!args.dryrun);

        let args = Args::try_parse_from(["vpc-reaper", "dev", "TRUE"]).unwrap();
        assert!(args.dryrun);
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        assert!(Args::try_parse_from(["vpc-reaper"]).is_err());
        assert!(Args::try_parse_from(["vpc-reaper", "dev", "true", "x"]).is_err());
    }

    #[test]
    fn unrecognised_dryrun_value_is_rejected() {
        assert!(Args::try_parse_from(["vpc-reaper", "dev", "yes"]).is_err());
    }

    #[test]
    fn region_flags_reach_the_config() {
        let args = Args::try_parse_from([
            "vpc-reaper",
            "dev",
            "false",
            "--region",
            "eu-west-1",
            "--region",
            "us-east-2",
            "--bootstrap-region",
            "eu-central-1",
        ])
        .unwrap();

        let config = SweepConfig::from(&args);
        assert!(!config.dry_run);
        assert_eq!(config.regions, vec!["eu-west-1", "us-east-2"]);
        assert_eq!(config.bootstrap_region, "eu-central-1");
        assert_eq!(args.bootstrap_region, "eu-central-1");
    }
}
