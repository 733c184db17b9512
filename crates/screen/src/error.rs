use thiserror::Error;

/// Failures surfaced when persisting a rendered frame.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}
