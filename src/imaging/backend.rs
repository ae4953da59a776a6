//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the five operations the collage
//! pipeline needs: identify, resize, square, compose and frame.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use a recording mock.

use super::params::{FrameParams, GridParams, ResampleParams, SquareParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<Dimensions> for (u32, u32) {
    fn from(d: Dimensions) -> Self {
        (d.width, d.height)
    }
}

/// Trait for image processing backends.
///
/// Every operation reads its source from disk and writes a new JPEG; no
/// decoded image outlives a single call.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where the format allows.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize to exact dimensions and re-encode as opaque RGB.
    fn resize(&self, params: &ResampleParams) -> Result<(), BackendError>;

    /// Fit into a square and pad the rest with white.
    fn square(&self, params: &SquareParams) -> Result<(), BackendError>;

    /// Paste tiles onto a white canvas.
    fn compose(&self, params: &GridParams) -> Result<(), BackendError>;

    /// Resize, then add a uniform white frame.
    fn frame(&self, params: &FrameParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    ///
    /// `identify` answers from a per-path table, falling back to the output
    /// size of any operation that already "wrote" that path, so chained
    /// stages see consistent dimensions.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Mutex<HashMap<PathBuf, Dimensions>>,
        pub fail_on: Mutex<Option<PathBuf>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            quality: u32,
        },
        Square {
            source: String,
            output: String,
            fit: (u32, u32),
            size: u32,
        },
        Compose {
            output: String,
            canvas: (u32, u32),
            tiles: Vec<(String, u32, u32)>,
        },
        Frame {
            source: String,
            output: String,
            width: u32,
            height: u32,
            border: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<(&str, u32, u32)>) -> Self {
            let backend = Self::new();
            {
                let mut table = backend.dimensions.lock().unwrap();
                for (path, width, height) in dims {
                    table.insert(PathBuf::from(path), Dimensions { width, height });
                }
            }
            backend
        }

        /// Make the operation reading or writing `path` fail with a decode error.
        pub fn failing_on(self, path: &str) -> Self {
            *self.fail_on.lock().unwrap() = Some(PathBuf::from(path));
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record_output(&self, path: &Path, width: u32, height: u32) {
            self.dimensions
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), Dimensions { width, height });
        }

        fn check_failure(&self, path: &Path) -> Result<(), BackendError> {
            if self.fail_on.lock().unwrap().as_deref() == Some(path) {
                return Err(BackendError::Decode {
                    path: path.to_path_buf(),
                    message: "mock failure".to_string(),
                });
            }
            Ok(())
        }
    }

    fn lossy(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(lossy(path)));
            self.check_failure(path)?;

            self.dimensions
                .lock()
                .unwrap()
                .get(path)
                .copied()
                .ok_or_else(|| BackendError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn resize(&self, params: &ResampleParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: lossy(&params.source),
                output: lossy(&params.output),
                width: params.width,
                height: params.height,
                quality: params.quality.value(),
            });
            self.check_failure(&params.source)?;
            self.record_output(&params.output, params.width, params.height);
            Ok(())
        }

        fn square(&self, params: &SquareParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Square {
                source: lossy(&params.source),
                output: lossy(&params.output),
                fit: (params.fit_width, params.fit_height),
                size: params.size,
            });
            self.check_failure(&params.source)?;
            self.record_output(&params.output, params.size, params.size);
            Ok(())
        }

        fn compose(&self, params: &GridParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Compose {
                output: lossy(&params.output),
                canvas: (params.canvas_width, params.canvas_height),
                tiles: params
                    .tiles
                    .iter()
                    .map(|t| (lossy(&t.source), t.x, t.y))
                    .collect(),
            });
            self.record_output(&params.output, params.canvas_width, params.canvas_height);
            Ok(())
        }

        fn frame(&self, params: &FrameParams) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Frame {
                source: lossy(&params.source),
                output: lossy(&params.output),
                width: params.width,
                height: params.height,
                border: params.border,
            });
            self.record_output(
                &params.output,
                params.width + 2 * params.border,
                params.height + 2 * params.border,
            );
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![("/test/image.jpg", 800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/test/image.jpg"));
    }

    #[test]
    fn mock_identify_sees_previous_outputs() {
        let backend = MockBackend::new();
        backend
            .resize(&ResampleParams {
                source: "/source.jpg".into(),
                output: "/resampled.jpg".into(),
                width: 400,
                height: 300,
                quality: Quality::new(95),
            })
            .unwrap();

        let dims = backend.identify(Path::new("/resampled.jpg")).unwrap();
        assert_eq!((dims.width, dims.height), (400, 300));
    }

    #[test]
    fn mock_failure_is_a_decode_error() {
        let backend = MockBackend::with_dimensions(vec![("/bad.jpg", 10, 10)]).failing_on("/bad.jpg");
        let err = backend.identify(Path::new("/bad.jpg")).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }
}
