use crate::utils::get_config_dir;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, read_to_string, write};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WallpaperConfig {
    /// Image list from the last successful apply, left to right.
    #[serde(default)]
    pub images: Vec<PathBuf>,
    #[serde(default = "default_notify")]
    pub notify: bool,
}

fn default_notify() -> bool {
    true
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            notify: default_notify(),
        }
    }
}

impl WallpaperConfig {
    pub fn load_or_default() -> Result<Self> {
        let config_dir = get_config_dir()?;

        create_dir_all(&config_dir)?;
        let config_path = config_dir.join(PathBuf::from("config.json"));

        if config_path.exists() {
            let content = read_to_string(&config_path)?;
            let config: Self =
                serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = get_config_dir()?;

        create_dir_all(&config_dir)?;
        let config_path = config_dir.join(PathBuf::from("config.json"));
        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        write(&config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: WallpaperConfig = serde_json::from_str("{}").unwrap();
        assert!(config.images.is_empty());
        assert!(config.notify);
    }

    #[test]
    fn round_trips_image_list() {
        let config = WallpaperConfig {
            images: vec![PathBuf::from("/tmp/left.png"), PathBuf::from("/tmp/right.png")],
            notify: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WallpaperConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.images, config.images);
        assert!(!parsed.notify);
    }
}
