use crate::monitor::Monitor;
use crate::{Error, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use log::{debug, warn};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const JPEG_QUALITY: u8 = 95;

/// Bounding box of all monitor rectangles, i.e. the size of the composed
/// background image.
pub fn canvas_size(monitors: &[Monitor]) -> (u32, u32) {
    let width = monitors.iter().map(|m| m.offset_x + m.width).max();
    let height = monitors.iter().map(|m| m.offset_y + m.height).max();
    (width.unwrap_or(0), height.unwrap_or(0))
}

/// Composites the given source images onto a single canvas spanning all
/// monitors and writes it as a JPEG to `output_path`, returning that path.
///
/// Monitors are painted in the supplied order; monitor `i` receives image
/// `i % images.len()`, so too few images wrap around and surplus images are
/// dropped. The previous file at `output_path` is only replaced once the new
/// image has been fully encoded.
pub fn composite(images: &[PathBuf], monitors: &[Monitor], output_path: &Path) -> Result<PathBuf> {
    if images.is_empty() {
        return Err(Error::Config(
            "at least one image is required to composite a background".to_string(),
        ));
    }

    if images.len() > monitors.len() {
        warn!(
            "{} images for {} monitors, the extra images are ignored",
            images.len(),
            monitors.len()
        );
    } else if images.len() < monitors.len() {
        warn!(
            "{} images for {} monitors, images will repeat across monitors",
            images.len(),
            monitors.len()
        );
    }

    let sources = load_sources(images, monitors.len())?;
    let canvas = compose(&sources, monitors);
    write_jpeg(&canvas, output_path)?;

    debug!("Saved background image to {}", output_path.display());
    Ok(output_path.to_path_buf())
}

/// Decodes the source images that will actually be used, in order. With more
/// images than monitors the surplus is never opened.
fn load_sources(images: &[PathBuf], monitor_count: usize) -> Result<Vec<RgbImage>> {
    let used = images.len().min(monitor_count.max(1));
    images[..used]
        .iter()
        .map(|path| {
            image::open(path)
                .map(|img| img.to_rgb8())
                .map_err(|source| Error::Decode {
                    path: path.clone(),
                    source,
                })
        })
        .collect()
}

/// Pure compositing step: black canvas sized to the monitor bounding box,
/// with each source fit-and-centered into its monitor rectangle.
///
/// `sources` must be non-empty; `composite` guarantees this.
pub fn compose(sources: &[RgbImage], monitors: &[Monitor]) -> RgbImage {
    let (total_width, total_height) = canvas_size(monitors);
    let mut canvas = RgbImage::from_pixel(total_width, total_height, Rgb([0, 0, 0]));

    for (i, monitor) in monitors.iter().enumerate() {
        let source = &sources[i % sources.len()];
        let (fit_width, fit_height) =
            fit_dimensions(source.width(), source.height(), monitor.width, monitor.height);
        let resized = imageops::resize(source, fit_width, fit_height, FilterType::Lanczos3);

        debug!(
            "Monitor {} ({}): {}x{} image fit to {}x{} at offset ({}, {})",
            i,
            monitor.name,
            source.width(),
            source.height(),
            fit_width,
            fit_height,
            monitor.offset_x,
            monitor.offset_y
        );

        // Letterbox within the monitor rectangle, then overwrite that whole
        // rectangle on the canvas. Later monitors win on overlap.
        let mut tile = RgbImage::from_pixel(monitor.width, monitor.height, Rgb([0, 0, 0]));
        let paste_x = (monitor.width - fit_width) / 2;
        let paste_y = (monitor.height - fit_height) / 2;
        imageops::replace(&mut tile, &resized, i64::from(paste_x), i64::from(paste_y));
        imageops::replace(
            &mut canvas,
            &tile,
            i64::from(monitor.offset_x),
            i64::from(monitor.offset_y),
        );
    }

    canvas
}

/// Largest size within `bound_width` x `bound_height` that keeps the source
/// aspect ratio. May undershoot the box on one axis, never exceeds either.
fn fit_dimensions(width: u32, height: u32, bound_width: u32, bound_height: u32) -> (u32, u32) {
    let wratio = f64::from(bound_width) / f64::from(width);
    let hratio = f64::from(bound_height) / f64::from(height);
    let ratio = wratio.min(hratio);

    let fit_width = ((f64::from(width) * ratio).round() as u32).clamp(1, bound_width);
    let fit_height = ((f64::from(height) * ratio).round() as u32).clamp(1, bound_height);
    (fit_width, fit_height)
}

fn write_jpeg(canvas: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Encode to a sibling temp file and rename, so a failed encode never
    // leaves a half-written file at the final path.
    let tmp_path = output_path.with_extension("jpg.tmp");
    if let Err(err) = encode_jpeg(canvas, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    fs::rename(&tmp_path, output_path)?;
    Ok(())
}

fn encode_jpeg(canvas: &RgbImage, path: &Path) -> Result<()> {
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    canvas.write_with_encoder(encoder)?;
    writer
        .into_inner()
        .map_err(|err| Error::Io(err.into_error()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(name: &str, width: u32, height: u32, offset_x: u32, offset_y: u32) -> Monitor {
        Monitor {
            name: name.to_string(),
            width,
            height,
            offset_x,
            offset_y,
        }
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn canvas_spans_monitor_bounding_box() {
        let monitors = vec![
            monitor("DP-1", 1920, 1080, 0, 0),
            monitor("DP-2", 1280, 1024, 1920, 0),
        ];
        assert_eq!(canvas_size(&monitors), (3200, 1080));

        let canvas = compose(&[solid(4, 4, [255, 255, 255])], &monitors);
        assert_eq!((canvas.width(), canvas.height()), (3200, 1080));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        assert_eq!(fit_dimensions(4000, 2000, 1920, 1080), (1920, 960));
        assert_eq!(fit_dimensions(1000, 2000, 1920, 1080), (540, 1080));
        // Smaller sources grow to fill the box.
        assert_eq!(fit_dimensions(960, 540, 1920, 1080), (1920, 1080));
    }

    #[test]
    fn wide_image_is_letterboxed_vertically() {
        let monitors = vec![monitor("DP-1", 1920, 1080, 0, 0)];
        let canvas = compose(&[solid(400, 200, [250, 0, 0])], &monitors);

        // 2:1 source in a 16:9 box leaves 60px black bars top and bottom.
        assert_eq!(*canvas.get_pixel(960, 30), Rgb([0, 0, 0]));
        assert_eq!(*canvas.get_pixel(960, 1050), Rgb([0, 0, 0]));
        let center = canvas.get_pixel(960, 540);
        assert!(center.0[0] > 200 && center.0[1] < 30 && center.0[2] < 30);
    }

    #[test]
    fn single_image_wraps_over_all_monitors() {
        let monitors = vec![
            monitor("a", 100, 100, 0, 0),
            monitor("b", 100, 100, 100, 0),
            monitor("c", 100, 100, 200, 0),
        ];
        let canvas = compose(&[solid(50, 50, [0, 240, 0])], &monitors);
        for x in [50, 150, 250] {
            let pixel = canvas.get_pixel(x, 50);
            assert!(pixel.0[1] > 200, "monitor at x={} not painted", x);
        }
    }

    #[test]
    fn gap_between_monitors_stays_black() {
        let monitors = vec![
            monitor("a", 100, 100, 0, 0),
            monitor("b", 100, 100, 300, 0),
        ];
        let canvas = compose(&[solid(100, 100, [255, 255, 255])], &monitors);
        assert_eq!(*canvas.get_pixel(200, 50), Rgb([0, 0, 0]));
    }

    #[test]
    fn composite_rejects_empty_image_list() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bg.jpg");
        let monitors = vec![monitor("a", 100, 100, 0, 0)];
        let result = composite(&[], &monitors, &out);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn surplus_images_are_never_opened() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.png");
        solid(50, 50, [10, 20, 30]).save(&first).unwrap();
        solid(50, 50, [30, 20, 10]).save(&second).unwrap();

        let images = vec![first, second, dir.path().join("missing.png")];
        let monitors = vec![
            monitor("a", 100, 100, 0, 0),
            monitor("b", 100, 100, 100, 0),
        ];
        let out = dir.path().join("bg.jpg");
        composite(&images, &monitors, &out).expect("third image must be dropped unopened");
        assert!(out.exists());
    }

    #[test]
    fn decode_failure_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        solid(50, 50, [1, 2, 3]).save(&good).unwrap();

        let out = dir.path().join("bg.jpg");
        fs::write(&out, b"previous background").unwrap();

        let images = vec![good, dir.path().join("missing.png")];
        let monitors = vec![
            monitor("a", 100, 100, 0, 0),
            monitor("b", 100, 100, 100, 0),
        ];
        let result = composite(&images, &monitors, &out);
        assert!(matches!(result, Err(Error::Decode { .. })));
        assert_eq!(fs::read(&out).unwrap(), b"previous background");
    }

    #[test]
    fn composite_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.png");
        let img = RgbImage::from_fn(64, 48, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
        img.save(&source).unwrap();

        let monitors = vec![monitor("a", 200, 150, 0, 0)];
        let first = dir.path().join("first.jpg");
        let second = dir.path().join("second.jpg");
        composite(std::slice::from_ref(&source), &monitors, &first).unwrap();
        composite(std::slice::from_ref(&source), &monitors, &second).unwrap();
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn creates_missing_output_directories() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src.png");
        solid(10, 10, [200, 100, 50]).save(&source).unwrap();

        let out = dir.path().join("nested/backgrounds/bg.jpg");
        let monitors = vec![monitor("a", 100, 100, 0, 0)];
        composite(std::slice::from_ref(&source), &monitors, &out).unwrap();
        assert!(out.exists());
    }
}
