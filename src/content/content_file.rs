use std::fs;
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::content::{ContentError, ContentResult};

const CONTENT_EXTENSION: &str = ".md";

/// One markdown file of the content store, read in full.
pub struct ContentFile {
    /// Slug derived from the file name, before any frontmatter override.
    pub file_slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: PathBuf) -> ContentResult<ContentFile> {
        let file_slug = Self::slug_from_path(&file_path).unwrap_or_default();
        debug!("Reading content file {}", file_path.display());

        let raw_content = fs::read_to_string(&file_path).map_err(|source| ContentError::Read {
            path: file_path.clone(),
            source,
        })?;

        Ok(ContentFile {
            file_slug,
            file_path,
            raw_content,
        })
    }

    /// `zero-downtime.md` -> `zero-downtime`
    pub fn slug_from_path(path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        let slug = file_name.strip_suffix(CONTENT_EXTENSION)?;
        if slug.is_empty() {
            None
        } else {
            Some(slug.to_string())
        }
    }
}

/// Lists the `.md` files directly inside `root_dir`, sorted by file name.
/// An unreadable directory is fatal; unreadable entries are skipped.
pub fn retrieve_files(root_dir: &Path) -> ContentResult<Vec<PathBuf>> {
    let entries = fs::read_dir(root_dir).map_err(|source| ContentError::Directory {
        dir: root_dir.to_path_buf(),
        source,
    })?;

    let mut files = vec![];
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }
        let path = entry.path();
        if ContentFile::slug_from_path(&path).is_some() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_path() {
        let slug = ContentFile::slug_from_path(Path::new("content/blog/zero-downtime.md"));
        assert_eq!(slug.as_deref(), Some("zero-downtime"));

        assert!(ContentFile::slug_from_path(Path::new("content/blog/notes.txt")).is_none());
        assert!(ContentFile::slug_from_path(Path::new("content/blog/.md")).is_none());
    }

    #[test]
    fn test_retrieve_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-post.md"), "b").unwrap();
        fs::write(dir.path().join("a-post.md"), "a").unwrap();
        fs::write(dir.path().join("draft.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let files = retrieve_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a-post.md", "b-post.md"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let res = retrieve_files(&missing);
        assert!(matches!(res, Err(ContentError::Directory { .. })));
    }
}
