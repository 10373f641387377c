use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::parser::NULL_DEVICE;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub null_device: String,
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: ": ".to_string(),
            null_device: NULL_DEVICE.to_string(),
            log: "warn".to_string(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            src.push_str(&line?);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    /// Parses `key=value` lines. Values are taken verbatim after the first `=`
    /// so a prompt may keep trailing spaces.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: no '=' found: {}",
                    lineno + 1,
                    line
                )));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "null_device" => config.null_device = value.trim().to_string(),
                "log" => config.log = value.trim().to_string(),
                other => {
                    return Err(ConfigError::Parse(format!(
                        "line {}: unknown key: {}",
                        lineno + 1,
                        other
                    )));
                }
            }
        }

        if config.null_device.is_empty() {
            return Err(ConfigError::Parse("null_device must not be empty".to_string()));
        }
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
