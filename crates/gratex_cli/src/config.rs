use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Defaults applied when `payload` flags are omitted. Lives in
/// `gratex.toml` next to the working directory; a missing file simply means
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// "2d" or "3d".
    pub default_mode: String,
    /// One of 1, 2, 3, 4, 6, 8.
    pub default_label_size: u8,
    /// Between -3 and 3.
    pub default_zoom: i8,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_mode: "2d".to_owned(),
            default_label_size: 4,
            default_zoom: 0,
        }
    }
}

impl CliConfig {
    pub const FILE_NAME: &'static str = "gratex.toml";

    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => println!("Error parsing config file: {}. Using defaults.", e),
                },
                Err(e) => println!("Error reading config file: {}. Using defaults.", e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut file = fs::File::create(Self::FILE_NAME)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}
