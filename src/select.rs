//! Choosing the images and the export directory.
//!
//! The pipeline never talks to a UI directly. A [`Selector`] hands it a list
//! of files and a directory; [`PresetSelector`] answers from command-line
//! arguments and, with the `dialogs` feature, [`DialogSelector`] opens native
//! pickers.
//!
//! [`validate_selection`] runs before any file is written, so a rejected
//! selection leaves the export directory untouched.

use crate::imaging::supported_input_extensions;
use crate::types::ImageSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No images selected")]
    NoImages,
    #[error("Too many images selected: {count} (at most {max})")]
    TooManyImages { count: usize, max: usize },
    #[error("Export directory does not exist or is not a directory: {0}")]
    ExportDirMissing(PathBuf),
    #[error("Selection cancelled")]
    Cancelled,
}

/// Source of the file list and export directory for one run.
pub trait Selector {
    /// Images to lay out, in grid order. Empty means the user chose nothing.
    fn select_files(&self) -> Vec<PathBuf>;

    /// Directory for every written file. `None` means the user cancelled.
    fn select_directory(&self) -> Option<PathBuf>;
}

/// Selector with answers fixed up front, e.g. from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct PresetSelector {
    pub files: Vec<PathBuf>,
    pub directory: Option<PathBuf>,
}

impl PresetSelector {
    pub fn new(files: Vec<PathBuf>, directory: Option<PathBuf>) -> Self {
        Self { files, directory }
    }
}

impl Selector for PresetSelector {
    fn select_files(&self) -> Vec<PathBuf> {
        self.files.clone()
    }

    fn select_directory(&self) -> Option<PathBuf> {
        self.directory.clone()
    }
}

/// Native file and folder pickers.
#[cfg(feature = "dialogs")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogSelector;

#[cfg(feature = "dialogs")]
impl Selector for DialogSelector {
    fn select_files(&self) -> Vec<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select images")
            .add_filter("Images", supported_input_extensions())
            .pick_files()
            .unwrap_or_default()
    }

    fn select_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Select export directory")
            .pick_folder()
    }
}

/// Blocking error box for a rejected selection.
#[cfg(feature = "dialogs")]
pub fn show_error_dialog(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

/// Blocking info box naming the finished collage.
#[cfg(feature = "dialogs")]
pub fn show_info_dialog(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title("Collage created")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Expand command-line inputs into an ordered file list.
///
/// Files are kept as given, in order. A directory is replaced by the image
/// files directly inside it, sorted by name. Non-image files inside a
/// directory are skipped; explicitly named files are never filtered, so an
/// unreadable one fails loudly during the run.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let entry = entry.map_err(std::io::Error::other)?;
                // `Path::is_file` follows symlinks; a dangling link is skipped
                if entry.path().is_file() && has_supported_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Check the file count against `max_images`.
pub fn validate_selection(files: Vec<PathBuf>, max_images: usize) -> Result<ImageSet, SelectionError> {
    if files.is_empty() {
        return Err(SelectionError::NoImages);
    }
    if files.len() > max_images {
        return Err(SelectionError::TooManyImages {
            count: files.len(),
            max: max_images,
        });
    }
    Ok(ImageSet::new(files))
}

/// Check that the export directory exists and is a directory.
pub fn validate_export_dir(dir: &Path) -> Result<(), SelectionError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(SelectionError::ExportDirMissing(dir.to_path_buf()))
    }
}

/// Ask the selector for files, then for a directory, validating each answer.
///
/// Files are validated before the directory is asked for, so an oversized
/// selection is rejected without a second prompt.
pub fn select(
    selector: &impl Selector,
    max_images: usize,
) -> Result<(ImageSet, PathBuf), SelectionError> {
    let files = selector.select_files();
    if files.is_empty() {
        return Err(SelectionError::Cancelled);
    }
    let images = validate_selection(files, max_images)?;
    let dir = selector
        .select_directory()
        .ok_or(SelectionError::Cancelled)?;
    validate_export_dir(&dir)?;
    Ok((images, dir))
}
