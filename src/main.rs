use clap::Parser;
use std::path::PathBuf;

use multimon_wallpaper::{
    WallpaperConfig,
    compositor::{canvas_size, composite},
    desktop::get_background_setter,
    monitor::detect_monitors,
    utils::{background_path, send_notification, validate_dependencies},
};

#[derive(Parser)]
#[command(name = "multimon-wallpaper")]
#[command(
    version,
    about = "Composites one wallpaper per monitor into a single spanned desktop background."
)]
struct Args {
    #[arg(
        help = "Image files, one per monitor from left to right (fewer images wrap around)"
    )]
    images: Vec<PathBuf>,

    #[arg(
        short,
        long,
        help = "Write the composed background to this path instead of the default"
    )]
    output: Option<PathBuf>,
    #[arg(short, long, help = "Compose the background but do not apply it")]
    no_apply: bool,
    #[arg(
        short,
        long,
        help = "Reuse the image list from the config file (images given on the command line take precedence)"
    )]
    use_config: bool,
    #[arg(short, long, help = "List detected monitors and exit")]
    list_monitors: bool,
    #[arg(long, help = "Skip the desktop notification after applying")]
    no_notify: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = WallpaperConfig::load_or_default()?;

    if args.list_monitors {
        for monitor in detect_monitors()? {
            println!(
                "{}: {}x{} at ({}, {})",
                monitor.name, monitor.width, monitor.height, monitor.offset_x, monitor.offset_y
            );
        }
        return Ok(());
    }

    let images = if args.images.is_empty() {
        config.images.clone()
    } else {
        args.images.clone()
    };
    if images.is_empty() {
        anyhow::bail!(
            "No images given. Pass at least one image file, or --use-config after a successful run."
        );
    }

    if !args.no_apply {
        validate_dependencies()?;
    }

    let monitors = detect_monitors()?;
    let output_path = match args.output {
        Some(path) => path,
        None => background_path()?,
    };

    let written = composite(&images, &monitors, &output_path)?;
    let (total_width, total_height) = canvas_size(&monitors);
    println!(
        "Composed {}x{} background for {} monitor(s): {}",
        total_width,
        total_height,
        monitors.len(),
        written.display()
    );

    if !args.no_apply {
        let setter = get_background_setter();
        let notify = !args.no_notify && config.notify;

        match setter.apply(&written) {
            Ok(()) => {
                println!("Background applied. Give the desktop a moment to pick it up.");
                if notify {
                    let _ = send_notification(
                        "Multi-Monitor Wallpaper",
                        "Background applied successfully",
                        Some(&written),
                    );
                }
            }
            Err(e) => {
                // The composed file stays in place so the user can retry.
                if notify {
                    let _ = send_notification(
                        "Multi-Monitor Wallpaper",
                        &format!("Failed to apply background: {}", e),
                        None,
                    );
                }
                return Err(e.into());
            }
        }
    }

    if !args.use_config {
        config.images = images;
        config.notify = !args.no_notify;
        config.save()?;
    }

    Ok(())
}
