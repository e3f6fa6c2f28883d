//! Live AWS tests - actually call AWS APIs, always in dry-run mode
//!
//! These tests are marked `#[ignore]` and only run with:
//! ```text
//! AWS_PROFILE=your_profile cargo test --test aws_integration -- --ignored
//! ```

use vpc_reaper::aws::{AwsContext, Ec2Client, FromAwsContext, get_current_account_id};
use vpc_reaper::config::SweepConfig;
use vpc_reaper::output::Console;
use vpc_reaper::sweep::{self, ActionOutcome};

/// Get the AWS region for tests.
///
/// Checks AWS_REGION, then AWS_DEFAULT_REGION, then falls back to us-east-2.
fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-2".to_string())
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_account_identity() {
    let ctx = AwsContext::new(&get_test_region()).await;
    let account = get_current_account_id(&ctx)
        .await
        .expect("AWS credentials required - set AWS_PROFILE or AWS_ACCESS_KEY_ID");
    assert_eq!(account.as_str().len(), 12, "account id: {account}");
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_describe_regions_includes_test_region() {
    let region = get_test_region();
    let ctx = AwsContext::new(&region).await;
    let ec2 = Ec2Client::from_context(&ctx);

    let regions = ec2.describe_regions().await.expect("Should list regions");
    assert!(regions.contains(&region), "{region} not in {regions:?}");
}

#[tokio::test]
#[ignore = "requires AWS credentials"]
async fn test_dry_run_sweep_of_one_region() {
    let region = get_test_region();
    let ctx = AwsContext::new(&region).await;
    let config = SweepConfig {
        bootstrap_region: region.clone(),
        ..SweepConfig::new(true)
    }
    .with_regions([region.clone()]);

    let mut console = Console::new(Vec::new(), &config);
    let report = sweep::run_sweep(&ctx, &config, &mut console)
        .await
        .expect("Dry-run sweep should succeed");

    assert_eq!(report.regions.len(), 1);
    assert!(
        report.regions[0]
            .actions
            .iter()
            .all(|a| !matches!(a.outcome, ActionOutcome::Completed)),
        "dry-run must not complete any mutation"
    );

    let text = String::from_utf8(console.into_inner()).unwrap();
    assert!(text.lines().all(|l| l.starts_with("(Dry-run)")));
}
