use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("nothing to render: {0}")]
    EmptySeries(String),

    #[error("canvas {width}x{height} is too small for the chart layout")]
    CanvasTooSmall { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl From<RenderError> for wellpulse_core::Error {
    fn from(err: RenderError) -> Self {
        wellpulse_core::Error::Render(err.to_string())
    }
}
