//! Example: Drive a wave gauge the way a 0-100 slider would.
//!
//! Sweeps the progress up and back down, labels the gauge with the integer
//! progress and writes one PNG every few frames.
//!
//! Run with:
//!     cargo run --example slider_demo -- [output_dir] [config.json]

use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;
use wave_gauge::{render_png, Color, WaveGauge, WaveGaugeConfig};

const FPS: u32 = 60;
const SIZE: u32 = 240;
const BORDER_WIDTH: u32 = 10;
const BORDER_COLOR: Color = Color::from_argb(0x44FF_FFFF);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "wave_frames".to_string()));
    let config = match args.next() {
        Some(path) => WaveGaugeConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path))?,
        None => WaveGaugeConfig::default(),
    };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let mut gauge = WaveGauge::new(config);
    gauge.set_border(BORDER_WIDTH, BORDER_COLOR);
    gauge.on_size_changed(SIZE, SIZE);

    // Slider positions the "user" drags through, one stop per second.
    let stops = [0u32, 25, 60, 100, 40, 80];
    let frame_delta = Duration::from_secs(1) / FPS;
    let mut written = 0usize;

    log::info!(
        "Rendering {} slider stops at {}x{} into {}",
        stops.len(),
        SIZE,
        SIZE,
        output_dir.display()
    );

    for (stop_idx, &progress) in stops.iter().enumerate() {
        gauge.set_text(Some(progress.to_string()));
        gauge.set_progress_value(progress as f32 / 100.0);

        for frame_idx in 0..FPS {
            gauge.tick(frame_delta);
            if !gauge.take_redraw_request() || frame_idx % 10 != 0 {
                continue;
            }

            let path = output_dir.join(format!("frame_{:02}_{:02}.png", stop_idx, frame_idx));
            render_png(&gauge, &path).with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }

        log::info!(
            "Slider at {:>3}: water level {:.3}",
            progress,
            gauge.water_level_ratio()
        );
    }

    println!("\nDone! Wrote {} frames to {}", written, output_dir.display());
    Ok(())
}
