use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileDensityConfig {
    pub on_uniform: Option<String>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileComConfig {
    pub trajectory: Option<PathBuf>,
    pub topology: Option<PathBuf>,
    pub index: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub scale: Option<f64>,
    pub reference_frame: Option<usize>,
    pub align: Option<bool>,
}

/// Contents of a `--config` TOML file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub density: Option<FileDensityConfig>,
    pub com: Option<FileComConfig>,
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::file(path, e))
    }

    /// Loads the file if one was given, otherwise starts empty.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Applies `-S KEY=VALUE` overrides on top of the file contents.
    pub fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "density.on-uniform" => {
                    self.density.get_or_insert_with(Default::default).on_uniform =
                        Some(value.to_string());
                }
                "density.output" => {
                    self.density.get_or_insert_with(Default::default).output =
                        Some(PathBuf::from(value));
                }
                "com.trajectory" => {
                    self.com.get_or_insert_with(Default::default).trajectory =
                        Some(PathBuf::from(value));
                }
                "com.topology" => {
                    self.com.get_or_insert_with(Default::default).topology =
                        Some(PathBuf::from(value));
                }
                "com.index" => {
                    self.com.get_or_insert_with(Default::default).index =
                        Some(PathBuf::from(value));
                }
                "com.output" => {
                    self.com.get_or_insert_with(Default::default).output =
                        Some(PathBuf::from(value));
                }
                "com.scale" => {
                    self.com.get_or_insert_with(Default::default).scale =
                        Some(parse_value(key, value, "float")?);
                }
                "com.reference-frame" => {
                    self.com.get_or_insert_with(Default::default).reference_frame =
                        Some(parse_value(key, value, "integer")?);
                }
                "com.align" => {
                    self.com.get_or_insert_with(Default::default).align =
                        Some(parse_value(key, value, "boolean")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_kebab_case_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            [density]
            on-uniform = "midpoint"
            output = "scored.pdb"

            [com]
            trajectory = "run/md.xtc"
            scale = 1.0
            reference-frame = 5
            align = false
            "#,
        )
        .unwrap();

        let density = config.density.unwrap();
        assert_eq!(density.on_uniform.as_deref(), Some("midpoint"));
        assert_eq!(density.output, Some(PathBuf::from("scored.pdb")));

        let com = config.com.unwrap();
        assert_eq!(com.trajectory, Some(PathBuf::from("run/md.xtc")));
        assert_eq!(com.topology, None);
        assert_eq!(com.scale, Some(1.0));
        assert_eq!(com.reference_frame, Some(5));
        assert_eq!(com.align, Some(false));
    }

    #[test]
    fn unknown_keys_are_rejected_with_path_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[density]\nstep = 2.0\n").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));
    }

    #[test]
    fn unreadable_config_file_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = FileConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));
    }

    #[test]
    fn missing_config_path_loads_empty_config() {
        assert_eq!(FileConfig::load(None).unwrap(), FileConfig::default());
    }

    #[test]
    fn set_values_create_sections_on_demand() {
        let mut config = FileConfig::default();
        config
            .apply_set_values(&[
                "com.scale=2.5".to_string(),
                "com.align=false".to_string(),
                "density.output=out.pdb".to_string(),
            ])
            .unwrap();

        let com = config.com.unwrap();
        assert_eq!(com.scale, Some(2.5));
        assert_eq!(com.align, Some(false));
        assert_eq!(
            config.density.unwrap().output,
            Some(PathBuf::from("out.pdb"))
        );
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut config = FileConfig::default();
        for bad in ["com.scale", "com.scale=ten", "com.frames=3", "com.align=maybe"] {
            assert!(
                matches!(
                    config.apply_set_values(&[bad.to_string()]),
                    Err(CliError::Config(_))
                ),
                "'{}' was accepted",
                bad
            );
        }
    }
}
