use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, ENV_PREFIX, FORMAT_TEXT, MAX_WORKERS,
};
use crate::writers::OutputFormat;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Run configuration.
///
/// Layered lowest to highest: built-in defaults, an optional config file,
/// `BRC_*` environment variables, then command-line overrides.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    pub input_path: PathBuf,

    pub output_path: PathBuf,

    #[validate(range(min = 1, max = MAX_WORKERS))]
    pub worker_count: usize,

    pub use_mmap: bool,

    pub format: String,
}

/// Values given on the command line; `None` keeps the lower layers' value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub worker_count: Option<usize>,
    pub use_mmap: bool,
    pub format: Option<String>,
}

impl Settings {
    pub fn load(config_file: Option<&Path>, overrides: SettingsOverrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("input_path", DEFAULT_INPUT_PATH)?
            .set_default("output_path", DEFAULT_OUTPUT_PATH)?
            .set_default(
                "worker_count",
                num_cpus::get().min(MAX_WORKERS) as i64,
            )?
            .set_default("use_mmap", false)?
            .set_default("format", FORMAT_TEXT)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let mut settings: Settings = builder.build()?.try_deserialize()?;
        settings.apply(overrides);
        settings.validate()?;
        settings.output_format()?;

        Ok(settings)
    }

    fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(input_path) = overrides.input_path {
            self.input_path = input_path;
        }
        if let Some(output_path) = overrides.output_path {
            self.output_path = output_path;
        }
        if let Some(worker_count) = overrides.worker_count {
            self.worker_count = worker_count;
        }
        if overrides.use_mmap {
            self.use_mmap = true;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None, SettingsOverrides::default()).unwrap();

        assert_eq!(settings.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(settings.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(settings.worker_count >= 1);
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = SettingsOverrides {
            input_path: Some(PathBuf::from("in.txt")),
            output_path: Some(PathBuf::from("out.json")),
            worker_count: Some(3),
            use_mmap: true,
            format: Some("json".to_string()),
        };
        let settings = Settings::load(None, overrides).unwrap();

        assert_eq!(settings.input_path, PathBuf::from("in.txt"));
        assert_eq!(settings.output_path, PathBuf::from("out.json"));
        assert_eq!(settings.worker_count, 3);
        assert!(settings.use_mmap);
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_config_file_layer() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "worker_count = 5\nformat = \"csv\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path()), SettingsOverrides::default()).unwrap();
        assert_eq!(settings.worker_count, 5);
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Csv);

        let overridden = Settings::load(
            Some(file.path()),
            SettingsOverrides {
                worker_count: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(overridden.worker_count, 2);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let overrides = SettingsOverrides {
            worker_count: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Settings::load(None, overrides),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let overrides = SettingsOverrides {
            format: Some("parquet".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Settings::load(None, overrides),
            Err(ProcessingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Settings::load(
            Some(Path::new("/nonexistent/settings.toml")),
            SettingsOverrides::default(),
        );
        assert!(matches!(result, Err(ProcessingError::ConfigSource(_))));
    }

    #[test]
    fn test_worker_count_upper_bound() {
        let at_limit = SettingsOverrides {
            worker_count: Some(MAX_WORKERS),
            ..Default::default()
        };
        assert_eq!(Settings::load(None, at_limit).unwrap().worker_count, MAX_WORKERS);

        let over_limit = SettingsOverrides {
            worker_count: Some(MAX_WORKERS + 1),
            ..Default::default()
        };
        assert!(matches!(
            Settings::load(None, over_limit),
            Err(ProcessingError::Validation(_))
        ));
    }
}
