use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quality::QualityThresholds;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub quality: QualityThresholds,
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Load a TOML config. A missing file, or no path at all, yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Config::from_toml(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = Config::from_toml("[quality]\nmax_roll_degrees = 5.0\n").unwrap();
        assert_eq!(cfg.quality.max_roll_degrees, 5.0);
        assert_eq!(cfg.quality.yaw_range, (0.85, 1.15));
        assert_eq!(cfg.quality.min_ipd_pixels, 120.0);
    }

    #[test]
    fn yaw_range_as_array() {
        let cfg = Config::from_toml("[quality]\nyaw_range = [0.9, 1.1]\n").unwrap();
        assert_eq!(cfg.quality.yaw_range, (0.9, 1.1));
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = load_config(Some(Path::new("/nonexistent/face-harmony.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[quality]\nmin_ipd_pixels = 80.0").unwrap();
        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.quality.min_ipd_pixels, 80.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::from_toml("[quality]\nmax_roll_degrees = \"steep\"\n").is_err());
    }
}
