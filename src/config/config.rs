use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::TableStyle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Field delimiter for reading and writing record files
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Table borders: "ascii" or "utf8"
    pub table_style: TableStyle,

    /// Print "N rows" under the table
    pub show_row_count: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a timestamped file instead of stderr
    pub write_file: bool,

    /// Log directory, defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            table_style: TableStyle::Ascii,
            show_row_count: true,
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults when
    /// no file exists there
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        config.delimiter_byte()?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("passport-cli").join("config.toml"))
    }

    /// Write the commented default config to `path`, creating parent directories
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, Self::create_default_with_comments())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// The configured delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        parse_delimiter(self.data.delimiter)
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# passport-cli configuration file
# Location: ~/.config/passport-cli/config.toml (Linux)
#           ~/Library/Application Support/passport-cli/config.toml (macOS)
#           %APPDATA%\passport-cli\config.toml (Windows)

[data]
# Field delimiter used when reading and writing record files.
# Must be a single ASCII character; quoting is not supported.
delimiter = ","

[display]
# Table borders: "ascii" or "utf8"
table_style = "ascii"

# Print the number of rows under the table
show_row_count = true

[logging]
# Write logs to a timestamped file instead of stderr
write_file = false

# Directory for log files (defaults to the platform data directory)
# directory = "/tmp/passport-cli"
"#
        .to_string()
    }
}

/// Validate a delimiter character and narrow it to a byte
pub fn parse_delimiter(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("Delimiter {:?} is not an ASCII character", delimiter);
    }
    if matches!(delimiter, '\n' | '\r') {
        bail!("Delimiter cannot be a line break");
    }
    Ok(delimiter as u8)
}
