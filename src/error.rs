use thiserror::Error;

/// The structured error taxonomy surfaced by the core. Numerical edge cases
/// inside the radiance estimator (degenerate scatter directions, grazing
/// dielectrics, zero-discriminant spheres) are never represented here — they
/// are handled locally and always produce a well-defined ray or miss.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Raised at camera or render-config construction: zero/negative fov,
    /// zero/negative focus distance, non-positive image dimensions,
    /// `samples_per_pixel == 0`, `max_depth == 0`.
    #[error("configuration error: {what}")]
    Configuration { what: String },

    /// Raised during BVH construction when a surface at `index` in the
    /// input sequence returns `None` from `bounding_box`.
    #[error("surface at index {index} has no bounding box")]
    Geometry { index: usize },

    /// A pixel sink write failed mid-render.
    #[error("pixel sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The caller requested cancellation; any partial framebuffer is
    /// returned to the caller's discretion.
    #[error("render cancelled")]
    Cancelled,
}

impl RenderError {
    pub fn configuration(what: impl Into<String>) -> Self {
        RenderError::Configuration { what: what.into() }
    }
}
