use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

pub mod cinnamon;
pub mod gnome;

/// One desktop session's gsettings profile for spanned backgrounds.
pub trait BackgroundSetter {
    fn schema(&self) -> &'static str;
    fn picture_option(&self) -> &'static str;

    fn apply(&self, path: &Path) -> Result<()> {
        let uri = format!("file://{}", path.display());
        gsettings_set(self.schema(), "picture-uri", &uri)?;
        gsettings_set(self.schema(), "picture-options", self.picture_option())?;
        Ok(())
    }
}

/// Picks the profile for the current session from `XDG_CURRENT_DESKTOP`.
/// Unrecognized sessions get the Cinnamon profile.
pub fn get_background_setter() -> Box<dyn BackgroundSetter> {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP")
        .unwrap_or_default()
        .to_lowercase();

    if desktop.contains("cinnamon") {
        Box::new(cinnamon::CinnamonSetter::new())
    } else if desktop.contains("gnome") || desktop.contains("ubuntu") {
        Box::new(gnome::GnomeSetter::new())
    } else {
        log::debug!(
            "Unrecognized desktop {:?}, using the Cinnamon settings schema",
            desktop
        );
        Box::new(cinnamon::CinnamonSetter::new())
    }
}

pub(crate) fn gsettings_set(schema: &str, key: &str, value: &str) -> Result<()> {
    let output = Command::new("gsettings")
        .args(["set", schema, key, value])
        .output()?;

    if !output.status.success() {
        return Err(Error::DesktopEnv(format!(
            "gsettings set {} {} failed: {}",
            schema,
            key,
            String::from_utf8_lossy(&output.stderr)
        )));
    }
    Ok(())
}
