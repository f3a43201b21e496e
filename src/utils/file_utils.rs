use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants;

/// Regular files in `dir`, sorted by name. Subdirectories are left out.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files.sort();
    Ok(files)
}

pub fn has_allowed_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    let ext = ext.to_ascii_lowercase();
    allowed
        .iter()
        .any(|allowed_ext| *allowed_ext == ext.as_str())
}

pub fn is_image_file(path: &Path) -> bool {
    has_allowed_extension(path, constants::IMAGE_EXTENSIONS)
}

/// `<output_dir>/<input stem>.html`
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_else(|| input.as_os_str());
    let mut path = output_dir.join(stem);
    path.set_extension(constants::OUTPUT_EXTENSION);
    path
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        assert!(is_image_file(Path::new("a/cat.PNG")));
        assert!(is_image_file(Path::new("dog.jpeg")));
        assert!(is_image_file(Path::new("anim.gif")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_output_path_replaces_extension() {
        let out = output_path_for(Path::new("Input Images/my.photo.jpg"), Path::new("Ascii Art"));
        assert_eq!(out, Path::new("Ascii Art/my.photo.html"));
    }
}
