use crate::{Error, Result};
use std::fs::create_dir;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Checks that the external tools the apply step shells out to are present.
pub fn validate_dependencies() -> Result<()> {
    for command in ["gsettings", "xrandr"] {
        if !command_exists(command) {
            return Err(Error::DesktopEnv(format!(
                "Required command '{}' not found in PATH",
                command
            )));
        }
    }
    Ok(())
}

/// Well-known location of the composed background, overwritten on every run.
pub fn background_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::DesktopEnv("Could not find home directory".to_string()))?;
    Ok(home
        .join(".cinnamon")
        .join("backgrounds")
        .join("multiMonitorBackground.jpg"))
}

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map(|dir| dir.join(PathBuf::from("multimon-wallpaper")))
        .ok_or_else(|| Error::DesktopEnv(
            "Could not find config directory. Please set HOME or XDG_CONFIG_HOME environment variable.".to_string()
        ))?;

    if !config_dir.exists() {
        create_dir(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn send_notification(title: &str, message: &str, image: Option<&Path>) -> Result<()> {
    let mut notification = notify_rust::Notification::new();
    notification.summary(title).body(message);

    if let Some(image_path) = image {
        notification.image_path(image_path.to_string_lossy().as_ref());
    }

    notification
        .show()
        .map_err(|e| Error::DesktopEnv(e.to_string()))?;
    Ok(())
}
