use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const MEDIA_EXTENSIONS: &[&str] = &[
    ".mkv", ".mp4", ".m4v", ".mov", ".avi", ".webm", ".ts", ".m2ts",
];

/// Expands directory arguments into the media files below them.
///
/// File arguments are passed through untouched whatever their extension, and
/// paths that do not exist are kept so that the run can report them.
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if input.is_dir() {
            let mut found = find_media_files(input);
            debug!(
                "Found {} media file(s) in {}",
                found.len(),
                input.display()
            );
            expanded.append(&mut found);
        } else {
            expanded.push(input.to_path_buf());
        }
    }

    expanded
}

pub fn find_media_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut media_files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_media_file(p))
        .collect();

    media_files.sort();
    media_files
}

pub fn is_media_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    if let Some(extension) = path.extension() {
        if let Some(ext_str) = extension.to_str() {
            let ext_lower = format!(".{}", ext_str.to_lowercase());
            return MEDIA_EXTENSIONS.contains(&ext_lower.as_str());
        }
    }

    false
}

/// Shortens a long path for display, keeping its tail.
pub fn truncate_path_display(path: &str, max_chars: usize) -> String {
    let char_count = path.chars().count();
    if char_count <= max_chars {
        return path.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let tail: String = path.chars().skip(char_count - keep).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_is_media_file() {
        assert!(is_media_file("movie.mkv"));
        assert!(is_media_file("movie.MP4"));
        assert!(is_media_file("disc/BDMV/STREAM/00001.m2ts"));
        assert!(!is_media_file("cover.jpg"));
        assert!(!is_media_file("movie"));
    }

    #[test]
    fn test_expand_inputs_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Season 01");
        fs::create_dir(&nested).unwrap();
        File::create(dir.path().join("b.mkv")).unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(nested.join("e01.mkv")).unwrap();

        let expanded = expand_inputs(&[dir.path()]);
        assert_eq!(
            expanded,
            vec![
                dir.path().join("Season 01").join("e01.mkv"),
                dir.path().join("a.mp4"),
                dir.path().join("b.mkv"),
            ]
        );
    }

    #[test]
    fn test_expand_inputs_keeps_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sample = dir.path().join("sample.bin");
        File::create(&sample).unwrap();
        let missing = dir.path().join("missing.mkv");

        let expanded = expand_inputs(&[sample.clone(), missing.clone()]);
        assert_eq!(expanded, vec![sample, missing]);
    }

    #[test]
    fn test_truncate_path_display() {
        assert_eq!(truncate_path_display("/media/a.mkv", 100), "/media/a.mkv");

        let long = format!("/media/{}.mkv", "x".repeat(120));
        let shown = truncate_path_display(&long, 100);
        assert_eq!(shown.chars().count(), 100);
        assert!(shown.starts_with("..."));
        assert!(shown.ends_with("xxx.mkv"));
    }
}
