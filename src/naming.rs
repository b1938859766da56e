//! Output naming and file classification.
//!
//! The decrypted file keeps the container's base name with the container suffix
//! removed, and gains the extension stored in the header unless it already ends
//! with it:
//!
//! | input | stored extension | output |
//! |---|---|---|
//! | `movie.mp4.enc` | `.mp4` | `movie.mp4` |
//! | `clip.enc` | `.mov` | `clip.mov` |

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::{CONTAINER_SUFFIX, MEDIA_EXTENSIONS};
use crate::error::MediacryptError;
use crate::utils::strip_suffix_ignore_ascii_case;

/// Derive the plaintext file name for `input` given the header's `extension`.
///
/// `suffix` is stripped case-insensitively when present.
///
/// # Errors
///
/// [`MediacryptError::Format`] if `input` has no file name, if the stored
/// extension contains a path separator or NUL, or if the result is empty, `.`
/// or `..`. Any of these would put the output outside a plain file in the
/// output directory.
pub fn output_file_name(
    input: &Path,
    extension: &str,
    suffix: &str,
) -> Result<String, MediacryptError> {
    if extension.contains(['/', '\\', '\0']) {
        return Err(MediacryptError::Format(format!(
            "stored extension {extension:?} is not a plain file extension"
        )));
    }

    let base = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            MediacryptError::Format(format!("{} has no file name", input.display()))
        })?;

    let stem = strip_suffix_ignore_ascii_case(&base, suffix).unwrap_or(&base);

    let name = if stem.ends_with(extension) {
        stem.to_owned()
    } else {
        format!("{stem}{extension}")
    };

    // These resolve to the output directory itself or its parent.
    if matches!(name.as_str(), "" | "." | "..") {
        return Err(MediacryptError::Format(format!(
            "{} with extension {extension:?} has no usable output name",
            input.display()
        )));
    }
    Ok(name)
}

/// Resolve the output path inside `output_dir` and create its parent directories.
pub fn prepare_output_path(
    output_dir: &Path,
    input: &Path,
    extension: &str,
    suffix: &str,
) -> Result<PathBuf, MediacryptError> {
    let output = output_dir.join(output_file_name(input, extension, suffix)?);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(output)
}

/// `true` if the file name of `path` ends with `suffix` (ASCII case-insensitive).
#[must_use]
pub fn is_container(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| strip_suffix_ignore_ascii_case(&name.to_string_lossy(), suffix).is_some())
        .unwrap_or(false)
}

/// `true` for files the player accepts: plain media or a container.
#[must_use]
pub fn is_supported_media(path: &Path) -> bool {
    if is_container(path, CONTAINER_SUFFIX) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MEDIA_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn name(input: &str, ext: &str) -> String {
        output_file_name(Path::new(input), ext, CONTAINER_SUFFIX).unwrap()
    }

    #[test]
    fn keeps_name_that_already_has_extension() {
        assert_eq!(name("movie.mp4.enc", ".mp4"), "movie.mp4");
    }

    #[test]
    fn appends_missing_extension() {
        assert_eq!(name("clip.enc", ".mov"), "clip.mov");
    }

    #[test]
    fn suffix_match_is_case_insensitive() {
        assert_eq!(name("/media/in/Song.ENC", ".mp3"), "Song.mp3");
    }

    #[test]
    fn name_without_suffix_still_gets_extension() {
        assert_eq!(name("raw_container", ".mkv"), "raw_container.mkv");
    }

    #[test]
    fn empty_extension_leaves_stem() {
        assert_eq!(name("notes.enc", ""), "notes");
    }

    #[test]
    fn separator_in_extension_is_rejected() {
        let err = output_file_name(Path::new("a.enc"), "/../../etc", CONTAINER_SUFFIX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn dot_names_are_rejected() {
        for (input, ext) in [(".enc", ".."), (".enc", "."), (".enc", ""), ("..enc", ".")] {
            let err = output_file_name(Path::new(input), ext, CONTAINER_SUFFIX).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{input} + {ext:?}");
        }
        // A leading dot alone is an ordinary hidden file name.
        assert_eq!(name(".enc", ".mp4"), ".mp4");
    }

    #[test]
    fn classifies_media_files() {
        assert!(is_supported_media(Path::new("a.MP4")));
        assert!(is_supported_media(Path::new("a.wav")));
        assert!(is_supported_media(Path::new("a.mp4.enc")));
        assert!(!is_supported_media(Path::new("a.txt")));
        assert!(!is_supported_media(Path::new("noext")));
    }

    #[test]
    fn container_detection() {
        assert!(is_container(Path::new("x.Enc"), ".enc"));
        assert!(!is_container(Path::new("x.mp4"), ".enc"));
    }
}
