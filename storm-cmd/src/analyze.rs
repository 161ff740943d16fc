//! Fetch a classification from the analysis server.

use clap::Args;
use log::info;
use storm_core::analysis::{AnalysisParams, AnalysisRequest, AnalysisResponse, ANALYSIS_PATH};
use storm_core::TimelineError;

/// Classification thresholds; defaults match [`AnalysisParams::default`].
#[derive(Args, Debug, Clone)]
pub struct ParamArgs {
    /// Daily depth (mm) at or below which a day counts as dry
    #[arg(long, default_value_t = 0.2)]
    pub dry_day_tolerance: f64,

    #[arg(long, default_value_t = 4)]
    pub preceding_dry_days: u32,

    #[arg(long, default_value_t = 6)]
    pub consecutive_zero_threshold: u32,

    /// Minimum gap between events, in minutes
    #[arg(long, default_value_t = 360)]
    pub inter_event_gap: u32,

    /// Required event depth (mm)
    #[arg(long, default_value_t = 5.0)]
    pub required_depth: f64,

    /// Required intensity (mm/hr)
    #[arg(long, default_value_t = 2.0)]
    pub required_intensity: f64,

    /// Minutes the required intensity must be sustained
    #[arg(long, default_value_t = 60)]
    pub required_intensity_duration: u32,

    #[arg(long, default_value_t = 80.0)]
    pub partial_event_percent: f64,

    #[arg(long)]
    pub check_consecutive_intensity: bool,
}

impl From<ParamArgs> for AnalysisParams {
    fn from(args: ParamArgs) -> Self {
        AnalysisParams {
            dry_day_tolerance: args.dry_day_tolerance,
            preceding_dry_days: args.preceding_dry_days,
            consecutive_zero_threshold: args.consecutive_zero_threshold,
            inter_event_gap: args.inter_event_gap,
            required_depth: args.required_depth,
            required_intensity: args.required_intensity,
            required_intensity_duration: args.required_intensity_duration,
            partial_event_percent: args.partial_event_percent,
            check_consecutive_intensity: args.check_consecutive_intensity,
        }
    }
}

/// POST an [`AnalysisRequest`] to `{server}/storm-analysis` and write the
/// response JSON to `output`.
///
/// The body is decoded before writing, so a saved file is always readable
/// by the export subcommands.
pub async fn run_analyze(
    server: &str,
    dataset_ids: Vec<i64>,
    params: AnalysisParams,
    output: &str,
) -> anyhow::Result<()> {
    let url = format!("{}{}", server.trim_end_matches('/'), ANALYSIS_PATH);
    let request = AnalysisRequest {
        dataset_ids,
        params,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;

    info!(
        "Requesting classification of {} datasets from {}",
        request.dataset_ids.len(),
        url
    );
    let response = client.post(&url).json(&request).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(TimelineError::HttpStatus {
            status: status.as_u16(),
            message: body,
        }
        .into());
    }

    let analysis = AnalysisResponse::from_json(&body)?;
    std::fs::write(output, serde_json::to_string_pretty(&analysis)?)?;
    info!(
        "Saved {} events and {} dry days to {}",
        analysis.events.len(),
        analysis.dry_days.len(),
        output
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        params: ParamArgs,
    }

    #[test]
    fn test_param_defaults_match_analysis_params() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(AnalysisParams::from(cli.params), AnalysisParams::default());
    }

    #[test]
    fn test_param_flags_override_defaults() {
        let cli = TestCli::parse_from([
            "test",
            "--required-depth",
            "12.5",
            "--inter-event-gap",
            "120",
            "--check-consecutive-intensity",
        ]);
        let params = AnalysisParams::from(cli.params);
        assert_eq!(params.required_depth, 12.5);
        assert_eq!(params.inter_event_gap, 120);
        assert!(params.check_consecutive_intensity);
        assert_eq!(params.preceding_dry_days, 4);
    }
}
