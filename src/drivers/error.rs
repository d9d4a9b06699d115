use thiserror::Error;
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("serial read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line pattern must have exactly one capture group, found {0}")]
    PatternGroups(usize),
    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("failed to install Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for AcquireError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        AcquireError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for AcquireError {
    fn from(value: image::ImageError) -> Self {
        AcquireError::Plot(value.to_string())
    }
}
