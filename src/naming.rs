//! Output file naming.
//!
//! Every file a run writes lands in the export directory and starts with the
//! run prefix:
//!
//! - `{prefix}_resampled_{basename}`: long-edge resample of one input
//! - `{prefix}_bordered_{basename}`: the same image on a white square
//! - `{prefix}_collage.jpg`: the grid composite
//! - `{prefix}_collage_resampled_with_border.jpg`: the framed final image
//!
//! Per-image names keep the input's basename, extension included, even
//! though the content is always JPEG. Two inputs with the same basename in
//! different directories therefore map to the same output name; the later
//! one wins.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Prefix used when the user leaves the prefix blank.
pub const DEFAULT_PREFIX: &str = "output";

const RESAMPLED_TAG: &str = "resampled";
const BORDERED_TAG: &str = "bordered";
const COLLAGE_SUFFIX: &str = "collage.jpg";
const FINAL_SUFFIX: &str = "collage_resampled_with_border.jpg";

/// Trim the user's prefix, falling back to `default` when nothing is left.
///
/// - `"  trip "` → `"trip"`
/// - `"   "` → `default`
pub fn normalize_prefix(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn stage_name(prefix: &str, tag: &str, source: &Path) -> OsString {
    let mut name = OsString::from(format!("{prefix}_{tag}_"));
    match source.file_name() {
        Some(base) => name.push(base),
        None => name.push("image"),
    }
    name
}

/// `{dir}/{prefix}_resampled_{basename}`
pub fn resampled_path(dir: &Path, prefix: &str, source: &Path) -> PathBuf {
    dir.join(stage_name(prefix, RESAMPLED_TAG, source))
}

/// `{dir}/{prefix}_bordered_{basename}`
pub fn bordered_path(dir: &Path, prefix: &str, source: &Path) -> PathBuf {
    dir.join(stage_name(prefix, BORDERED_TAG, source))
}

/// `{dir}/{prefix}_collage.jpg`
pub fn collage_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(format!("{prefix}_{COLLAGE_SUFFIX}"))
}

/// `{dir}/{prefix}_collage_resampled_with_border.jpg`
pub fn final_path(dir: &Path, prefix: &str) -> PathBuf {
    dir.join(format!("{prefix}_{FINAL_SUFFIX}"))
}
