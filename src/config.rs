//! Configuration for a sweep run

/// Region used to enumerate the account's regions
pub const DEFAULT_BOOTSTRAP_REGION: &str = "us-east-1";

/// Settings threaded through every step of a sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Print intended mutations without performing them
    pub dry_run: bool,
    /// Region the region listing is requested from
    pub bootstrap_region: String,
    /// Only sweep these regions; empty means every enabled region
    pub regions: Vec<String>,
}

impl SweepConfig {
    /// Config that sweeps every region, in the given mode
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Restrict the sweep to the named regions
    pub fn with_regions(mut self, regions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `region` is selected by the region filter
    pub fn includes_region(&self, region: &str) -> bool {
        self.regions.is_empty() || self.regions.iter().any(|r| r == region)
    }
}

impl Default for SweepConfig {
    /// Dry-run across every region
    fn default() -> Self {
        Self {
            dry_run: true,
            bootstrap_region: DEFAULT_BOOTSTRAP_REGION.to_string(),
            regions: Vec::new(),
        }
    }
}

/// Parse the dry-run argument: case-insensitive `true` or `false`
pub fn parse_dry_run(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("expected 'true' or 'false', got '{value}'")),
    }
}
