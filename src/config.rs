/// Configuration resolution module
///
/// This module handles:
/// - Building a ReportRequest from CLI arguments
/// - Parsing selections ("All", a single value, or a subset)
/// - Resolving the dataset path
/// - Building ReportOptions
use crate::cli::{self, CliArgs};
use crate::render::RenderOptions;
use crate::report::{ReportOptions, ReportRequest};
use crate::types::Selection;
use log::debug;
use std::env;
use std::path::PathBuf;

/// Build a complete ReportRequest from CLI arguments
///
/// This resolves the selections upfront, so the report builder receives
/// an immutable, validated request.
pub fn build_report_request(args: &CliArgs) -> Result<ReportRequest, String> {
    let country = parse_selection(args.country.as_deref()).map_err(|e| format!("Invalid --country: {}", e))?;
    let device = parse_selection(args.device.as_deref()).map_err(|e| format!("Invalid --device: {}", e))?;

    debug!("Resolved selections: country={:?} device={:?}", country, device);

    Ok(ReportRequest::new(country, device))
}

/// Build report options from CLI arguments
pub fn build_report_options(args: &CliArgs) -> ReportOptions {
    ReportOptions {
        include_zero_bug_testers: args.include_zero_bug_testers(),
        render: RenderOptions { line_break: args.line_break.clone() },
    }
}

/// Turn raw flag values into a Selection
///
/// An absent flag or the lone keyword "All" selects everything. A flag
/// given with no usable value is an error. One value is a scalar
/// selection; several values are a subset in the given order.
pub fn parse_selection(values: Option<&[String]>) -> Result<Selection, String> {
    let Some(values) = values else {
        return Ok(Selection::All);
    };
    match values {
        [] => Err("No values given".to_string()),
        [single] => Ok(Selection::from(single.as_str())),
        many => {
            if many.iter().any(|v| v == Selection::ALL_KEYWORD) {
                return Err(format!("\"{}\" cannot be combined with other values", Selection::ALL_KEYWORD));
            }
            Selection::subset(many.iter().cloned()).ok_or_else(|| "No values given".to_string())
        }
    }
}

/// Resolve the dataset path: --data, then $BUG_MATCH_DATA, then the default location
pub fn resolve_data_path(args: &CliArgs) -> Result<PathBuf, String> {
    let path = if let Some(ref path) = args.data {
        debug!("Using dataset from --data: {:?}", path);
        path.clone()
    } else if let Ok(env_path) = env::var(cli::DATA_ENV_VAR) {
        debug!("Using dataset from ${}: {}", cli::DATA_ENV_VAR, env_path);
        PathBuf::from(env_path)
    } else {
        cli::default_data_path()
    };

    if !path.exists() {
        return Err(format!(
            "Dataset not found at {}. Pass --data <PATH> or set ${}",
            path.display(),
            cli::DATA_ENV_VAR
        ));
    }

    Ok(path)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
