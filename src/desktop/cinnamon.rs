use super::{BackgroundSetter, gsettings_set};
use crate::Result;
use std::path::Path;

pub struct CinnamonSetter;

impl CinnamonSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CinnamonSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundSetter for CinnamonSetter {
    fn schema(&self) -> &'static str {
        "org.cinnamon.desktop.background"
    }

    fn picture_option(&self) -> &'static str {
        "spanned"
    }

    fn apply(&self, path: &Path) -> Result<()> {
        let uri = format!("file://{}", path.display());
        gsettings_set(self.schema(), "picture-uri", &uri)?;
        gsettings_set(self.schema(), "picture-options", self.picture_option())?;

        // Cinnamon only reloads the image when the uri changes; clear and
        // set it again so an overwritten file shows up immediately.
        gsettings_set(self.schema(), "picture-uri", "''")?;
        gsettings_set(self.schema(), "picture-uri", &uri)?;
        Ok(())
    }
}
