use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the dataset file when `--data` is not given
pub const DATA_ENV_VAR: &str = "BUG_MATCH_DATA";

/// Get the default dataset location for bug-match
/// Uses platform-specific data directories:
/// - Linux: ~/.local/share/bug-match/dataset.toml
/// - macOS: ~/Library/Application Support/bug-match/dataset.toml
/// - Windows: %APPDATA%/bug-match/dataset.toml
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("bug-match"))
        .unwrap_or_else(|| PathBuf::from(".bug-match"))
        .join("dataset.toml")
}

#[derive(Parser, Debug, Clone)]
#[command(name = "bug-match")]
#[command(about = "Find the testers who filed bugs for given countries and devices")]
#[command(version)]
pub struct CliArgs {
    /// Dataset file (TOML with [[testers]], [[devices]] and [[bugs]] tables)
    /// Falls back to $BUG_MATCH_DATA, then the platform data directory
    #[arg(long, short = 'd', value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Tester countries to search ("All" for every country)
    /// Can specify multiple: --country US JP, or --country US,JP
    #[arg(long, short = 'c', value_name = "COUNTRY", num_args = 1.., value_delimiter = ',')]
    pub country: Option<Vec<String>>,

    /// Devices to search ("All" for every device)
    /// Descriptions may contain spaces: --device "iPhone 5" "Galaxy S4"
    #[arg(long, short = 'D', value_name = "DEVICE", num_args = 1.., value_delimiter = ',')]
    pub device: Option<Vec<String>>,

    /// Only list testers that filed at least one matching bug
    #[arg(long)]
    pub no_zero_bug_testers: bool,

    /// Line break token placed in the report body
    #[arg(long, default_value = "<br>")]
    pub line_break: String,

    /// Also write the report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Also write the report as Markdown to this path
    #[arg(long, value_name = "PATH")]
    pub markdown: Option<PathBuf>,

    /// List every country and device in the dataset and exit
    #[arg(long)]
    pub list_values: bool,

    /// Override console width (default: auto-detect)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Disable colored headers
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse().trimmed()
    }

    /// Trim whatever the comma split left around each value
    ///
    /// Values that are empty after trimming are dropped, but a flag that was
    /// given stays `Some`, so `validate` can reject it.
    pub fn trimmed(mut self) -> Self {
        self.country = self.country.map(trim_values);
        self.device = self.device.map(trim_values);
        self
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        for (flag, values) in [("--country", &self.country), ("--device", &self.device)] {
            let Some(values) = values else { continue };
            if values.is_empty() {
                return Err(format!("{} was given without a value", flag));
            }
            if values.len() > 1 && values.iter().any(|v| v == "All") {
                return Err(format!("{} cannot combine \"All\" with specific values", flag));
            }
        }

        if self.console_width == Some(0) {
            return Err("--console-width must be greater than zero".to_string());
        }

        if self.list_values && (self.json.is_some() || self.markdown.is_some()) {
            return Err("--list-values cannot be combined with --json or --markdown".to_string());
        }

        Ok(())
    }

    /// Should the report list testers with no matching bugs?
    pub fn include_zero_bug_testers(&self) -> bool {
        !self.no_zero_bug_testers
    }
}

fn trim_values(values: Vec<String>) -> Vec<String> {
    values.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            data: None,
            country: None,
            device: None,
            no_zero_bug_testers: false,
            line_break: "<br>".to_string(),
            json: None,
            markdown: None,
            list_values: false,
            console_width: None,
            no_color: false,
        }
    }

    #[test]
    fn test_validate_default_args_succeeds() {
        assert!(base_args().validate().is_ok());
    }

    #[test]
    fn test_validate_all_mixed_with_values_fails() {
        let args = CliArgs { country: Some(vec!["All".to_string(), "US".to_string()]), ..base_args() };
        let err = args.validate().unwrap_err();
        assert!(err.contains("--country"), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_zero_console_width_fails() {
        let args = CliArgs { console_width: Some(0), ..base_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_list_values_with_export_fails() {
        let args = CliArgs { list_values: true, json: Some(PathBuf::from("out.json")), ..base_args() };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_device_names_with_spaces() {
        let args = CliArgs::try_parse_from(["bug-match", "--device", "iPhone 5", "Galaxy S4", "--country", "US,JP"])
            .expect("Should parse")
            .trimmed();
        assert_eq!(args.device, Some(vec!["iPhone 5".to_string(), "Galaxy S4".to_string()]));
        assert_eq!(args.country, Some(vec!["US".to_string(), "JP".to_string()]));
    }

    #[test]
    fn test_parse_trims_around_commas() {
        let args = CliArgs::try_parse_from(["bug-match", "--country", " US , JP "]).expect("Should parse").trimmed();
        assert_eq!(args.country, Some(vec!["US".to_string(), "JP".to_string()]));
        assert_eq!(args.device, None);
    }

    #[test]
    fn test_empty_country_is_rejected() {
        let args = CliArgs::try_parse_from(["bug-match", "--country", "", "--device", "iPhone 5"])
            .expect("Should parse")
            .trimmed();
        assert_eq!(args.country, Some(vec![]));

        let err = args.validate().unwrap_err();
        assert!(err.contains("--country"), "unexpected error: {}", err);
    }

    #[test]
    fn test_bare_commas_for_device_are_rejected() {
        let args = CliArgs::try_parse_from(["bug-match", "--device", ","]).expect("Should parse").trimmed();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_absent_flags_validate() {
        let args = CliArgs::try_parse_from(["bug-match"]).expect("Should parse").trimmed();
        assert_eq!(args.country, None);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_default_data_path_file_name() {
        let path = default_data_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("dataset.toml"));
    }
}
