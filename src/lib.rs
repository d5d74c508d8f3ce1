pub mod compositor;
pub mod config;
pub mod desktop;
pub mod monitor;
pub mod utils;

pub use compositor::composite;
pub use config::WallpaperConfig;
pub use desktop::BackgroundSetter;
pub use monitor::Monitor;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Desktop environment error: {0}")]
    DesktopEnv(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
