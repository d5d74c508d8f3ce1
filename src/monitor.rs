use crate::Result;
use log::{debug, info, warn};
use std::process::Command;

/// One display's usable rectangle in virtual-desktop coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl Monitor {
    /// Synthesized single-screen descriptor used when detection yields nothing.
    pub fn fallback() -> Self {
        Self {
            name: "default".to_string(),
            width: 1920,
            height: 1080,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

/// Runs `xrandr --query` and parses its output into monitor descriptors.
pub fn detect_monitors() -> Result<Vec<Monitor>> {
    let output = Command::new("xrandr").arg("--query").output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_monitors(&stdout))
}

/// Parses xrandr-style layout text into monitor descriptors, sorted by
/// ascending x offset (stable, so ties keep scan order).
///
/// Malformed connected lines are skipped with a warning, never an error.
/// If nothing parses, a single 1920x1080 fallback monitor is returned.
pub fn parse_monitors(layout: &str) -> Vec<Monitor> {
    let mut monitors: Vec<Monitor> = layout
        .lines()
        .filter(|line| line.contains(" connected"))
        .filter_map(|line| {
            let monitor = parse_connected_line(line);
            if monitor.is_none() {
                warn!("Skipping unparseable monitor line: {:?}", line);
            }
            monitor
        })
        .collect();

    if monitors.is_empty() {
        info!("No monitors detected, falling back to a single 1920x1080 screen");
        monitors.push(Monitor::fallback());
    }

    monitors.sort_by_key(|m| m.offset_x);

    for monitor in &monitors {
        debug!(
            "Detected monitor {}: {}x{} at ({}, {})",
            monitor.name, monitor.width, monitor.height, monitor.offset_x, monitor.offset_y
        );
    }

    monitors
}

fn parse_connected_line(line: &str) -> Option<Monitor> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let name = (*tokens.first()?).to_string();

    // The primary marker shifts the geometry token by one, drop it first.
    tokens.retain(|t| *t != "primary");
    let geometry = tokens.get(2)?;

    let (width, height, offset_x, offset_y) = parse_geometry(geometry)?;
    Some(Monitor {
        name,
        width,
        height,
        offset_x,
        offset_y,
    })
}

/// Splits a `WIDTHxHEIGHT+X+Y` token into its four fields.
fn parse_geometry(token: &str) -> Option<(u32, u32, u32, u32)> {
    let mut parts = token.split('+');
    let size = parts.next()?;
    let offset_x = parts.next()?.parse().ok()?;
    let offset_y = parts.next()?.parse().ok()?;

    let (width, height) = size.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?, offset_x, offset_y))
}
