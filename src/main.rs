//! # photon-core
//!
//! A Monte Carlo path tracer with BVH-accelerated ray/surface intersection,
//! physically based materials, and thin-lens depth of field with
//! motion-blur time sampling.
//!
//! ## Architecture
//!
//! - **Geometry**: Sphere, MovingSphere, axis-aligned rectangles, Cuboid —
//!   BVH-accelerated with randomized per-node axis selection
//! - **Materials**: Lambertian, Metal, Dielectric, GlossyCoated, DiffuseLight
//! - **Camera**: thin-lens model with configurable depth of field and a
//!   shutter interval for motion blur
//! - **Output**: a canonical PPM (P3) sink, with an optional terminal
//!   preview
//!
//! This binary is an illustrative demo over the `photon_core` library's
//! rendering core; the scene presets and CLI surface are not part of the
//! library's stable contract.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use clap::Parser;
use crossterm::style::{self, Stylize};
use log::error;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use photon_core::presets::ScenePreset;
use photon_core::{Camera, Framebuffer, PathTracer, PixelSink, PpmWriter, RenderError};

/// photon-core — render scenes with a Monte Carlo path tracer
#[derive(Parser, Debug)]
#[command(
    name = "photon-core",
    version,
    about = "A Monte Carlo path tracer core, rendered to a PPM file and optionally previewed in the terminal",
    after_help = "EXAMPLES:\n  \
                  photon-core --scene showcase --output showcase.ppm\n  \
                  photon-core --scene lit-box --spp 200 --bounces 20 --preview halfblock\n  \
                  photon-core --scene motion-blur --width 480 --preview ascii"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// Output PPM path
    #[arg(short, long, default_value = "render.ppm")]
    output: String,

    /// Image width in pixels (height is derived from the scene's aspect ratio)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Samples per pixel — higher values reduce noise at the cost of render time
    #[arg(long)]
    spp: Option<u32>,

    /// Maximum ray bounce depth
    #[arg(long)]
    bounces: Option<u32>,

    /// Deterministic RNG seed — reproduces an identical image across runs and thread counts
    #[arg(long)]
    seed: Option<u64>,

    /// Preview the rendered image in the terminal after writing the PPM file
    #[arg(long, value_enum)]
    preview: Option<PreviewMode>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PreviewMode {
    /// Full-block characters with 24-bit true color
    Truecolor,
    /// Half-block characters (▀) — 2 vertical pixels per cell
    Halfblock,
    /// ASCII grayscale density ramp
    Ascii,
}

fn display_framebuffer(fb: &Framebuffer, mode: PreviewMode) {
    use std::io::{self, BufWriter, Write};
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match mode {
        PreviewMode::Truecolor => {
            for y in 0..fb.height {
                for x in 0..fb.width {
                    let (r, g, b) = fb.pixels[(y * fb.width + x) as usize].to_rgb8();
                    let _ = write!(out, "{}", "█".with(style::Color::Rgb { r, g, b }));
                }
                let _ = writeln!(out);
            }
        }
        PreviewMode::Halfblock => {
            let rows = fb.height / 2;
            for row in 0..rows {
                for x in 0..fb.width {
                    let (tr, tg, tb) = fb.pixels[((row * 2) * fb.width + x) as usize].to_rgb8();
                    let (br, bg, bb) = fb.pixels[((row * 2 + 1) * fb.width + x) as usize].to_rgb8();
                    let _ = write!(
                        out,
                        "{}",
                        "▀".with(style::Color::Rgb { r: tr, g: tg, b: tb }).on(style::Color::Rgb { r: br, g: bg, b: bb })
                    );
                }
                let _ = writeln!(out);
            }
        }
        PreviewMode::Ascii => {
            const RAMP: &[u8] = b" .:-=+*#%@";
            for y in 0..fb.height {
                for x in 0..fb.width {
                    let c = fb.pixels[(y * fb.width + x) as usize];
                    let lum = 0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z;
                    let idx = (lum.clamp(0.0, 0.999) * RAMP.len() as f64) as usize;
                    let _ = write!(out, "{}", RAMP[idx] as char);
                }
                let _ = writeln!(out);
            }
        }
    }
    let _ = out.flush();
}

fn run() -> Result<(), RenderError> {
    env_logger::init();
    let cli = Cli::parse();

    let description = cli.scene.build();
    let mut render_config = description.render_config;
    if let Some(width) = cli.width {
        render_config.image_width = width;
    }
    if let Some(spp) = cli.spp {
        render_config.samples_per_pixel = spp;
    }
    if let Some(bounces) = cli.bounces {
        render_config.max_depth = bounces;
    }
    if cli.seed.is_some() {
        render_config.random_seed = cli.seed;
    }

    eprintln!("scene: {}", description.name);
    eprintln!(
        "resolution: {}x{} @ {} spp, max_depth {}",
        render_config.image_width,
        render_config.image_height(),
        render_config.samples_per_pixel,
        render_config.max_depth
    );

    let camera = Camera::new(&description.camera_config)?;
    let mut bvh_rng = match render_config.random_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let bvh = description.scene.into_bvh(description.camera_config.time0, description.camera_config.time1, &mut bvh_rng)?;

    let tracer = PathTracer { world: &bvh, camera: &camera, config: &render_config };

    let cancel: Option<&std::sync::Arc<AtomicBool>> = None;
    let progress = None;

    let start = Instant::now();
    let framebuffer = tracer.render(cancel, progress)?;
    let elapsed = start.elapsed();

    let mut sink = PpmWriter::create(&cli.output, framebuffer.width, framebuffer.height)?;
    sink.write_framebuffer(&framebuffer)?;

    let total_rays = render_config.image_width as u64 * render_config.image_height() as u64 * render_config.samples_per_pixel as u64;
    eprintln!(
        "wrote {} in {:.2}s ({:.2} Mrays/s)",
        cli.output,
        elapsed.as_secs_f64(),
        total_rays as f64 / elapsed.as_secs_f64() / 1e6
    );

    if let Some(mode) = cli.preview {
        display_framebuffer(&framebuffer, mode);
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
