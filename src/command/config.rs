use serde::Deserialize;

use std::fmt::{Display, Error, Formatter};
use std::fs;
use std::path::Path;

/// Defaults read from a YAML file with `--config`. Flags on the command line
/// still win over anything set here.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub bus: Option<u32>,
    pub address: Option<u16>,
}

#[derive(Debug, PartialEq)]
pub struct ConfigError(String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl FileConfig {
    pub fn parse(contents: &str) -> Result<FileConfig, ConfigError> {
        serde_yaml::from_str(contents).map_err(|err| ConfigError(format!("Invalid config: {}", err)))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<FileConfig, ConfigError> {
        let path = path.as_ref();
        debug!(target: "config", "Loading {}", path.display());

        let contents = fs::read_to_string(path).map_err(|err| {
            ConfigError(format!("Couldn't read {}: {}", path.display(), err))
        })?;

        FileConfig::parse(&contents)
    }
}
