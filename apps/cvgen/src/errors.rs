use std::path::PathBuf;

use thiserror::Error;

/// Generator-level error type.
/// Everything except the photo fallback propagates to `main` through this.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Content document error: {0}")]
    Content(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("SVG error: {0}")]
    Svg(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CvError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CvError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the underlying cause is a file that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CvError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err = CvError::io(
            "resources/me.jpg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("resources/me.jpg"));
    }

    #[test]
    fn test_other_errors_are_not_not_found() {
        let err = CvError::Layout("too tall".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Layout error: too tall");
    }
}
