use super::BackgroundSetter;

pub struct GnomeSetter;

impl GnomeSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GnomeSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundSetter for GnomeSetter {
    fn schema(&self) -> &'static str {
        "org.gnome.desktop.background"
    }

    // GNOME does not reliably support 'spanned', 'zoom' is the closest fit.
    fn picture_option(&self) -> &'static str {
        "zoom"
    }
}
