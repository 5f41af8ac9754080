use std::io::{self, Write};

use crate::error::RenderError;
use crate::integrator::Framebuffer;

/// Destination for a rendered image, written one pixel at a time in
/// scanline order (top row first, left to right).
pub trait PixelSink {
    fn write_pixel(&mut self, r: u8, g: u8, b: u8) -> Result<(), RenderError>;

    /// Drains a whole framebuffer through `write_pixel`, top row first.
    fn write_framebuffer(&mut self, framebuffer: &Framebuffer) -> Result<(), RenderError> {
        for row in 0..framebuffer.height {
            for col in 0..framebuffer.width {
                let (r, g, b) = framebuffer.pixels[(row * framebuffer.width + col) as usize].to_rgb8();
                self.write_pixel(r, g, b)?;
            }
        }
        Ok(())
    }
}

/// Writes the canonical PPM P3 (ASCII) format: a header followed by one
/// space-separated decimal triple per pixel, one pixel per line.
pub struct PpmWriter<W: Write> {
    out: W,
    header_written: bool,
    width: u32,
    height: u32,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(out: W, width: u32, height: u32) -> Self {
        Self { out, header_written: false, width, height }
    }

    fn ensure_header(&mut self) -> Result<(), RenderError> {
        if !self.header_written {
            write!(self.out, "P3\n{} {}\n255\n", self.width, self.height)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl PpmWriter<io::BufWriter<std::fs::File>> {
    pub fn create(path: &str, width: u32, height: u32) -> Result<Self, RenderError> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(io::BufWriter::new(file), width, height))
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn write_pixel(&mut self, r: u8, g: u8, b: u8) -> Result<(), RenderError> {
        self.ensure_header()?;
        writeln!(self.out, "{r} {g} {b}")?;
        Ok(())
    }
}

/// Collects pixels in memory instead of writing them out — useful for
/// tests and for callers who want the raw RGB stream without a file.
pub struct InMemorySink {
    pub pixels: Vec<(u8, u8, u8)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self { pixels: Vec::new() }
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelSink for InMemorySink {
    fn write_pixel(&mut self, r: u8, g: u8, b: u8) -> Result<(), RenderError> {
        self.pixels.push((r, g, b));
        Ok(())
    }
}
