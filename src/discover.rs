//! Input discovery and output paths.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions picked up when walking a directory.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["sh", "bash", "zsh"];

/// Upper bound on files processed in one run.
pub const MAX_FILES: usize = 1000;

/// A script to document, plus the directory it was found under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Walk root for files found by directory traversal.
    pub base: Option<PathBuf>,
}

impl SourceFile {
    /// Directory of the file relative to its walk root. Empty for files
    /// named directly.
    pub fn relative_dir(&self) -> PathBuf {
        let Some(ref base) = self.base else {
            return PathBuf::new();
        };
        self.path
            .strip_prefix(base)
            .ok()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// `<doc_path>/<relative dir>/<stem>.<extension>`
    pub fn output_path(&self, doc_path: &Path, extension: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index".to_string());
        doc_path
            .join(self.relative_dir())
            .join(format!("{}.{}", stem, extension))
    }
}

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

/// Expand files, directories and glob patterns into a sorted, de-duplicated
/// list capped at [`MAX_FILES`].
pub fn collect_inputs(patterns: &[String], follow_symlinks: bool) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(SourceFile {
                path: path.to_path_buf(),
                base: None,
            });
            continue;
        }
        if path.is_dir() {
            walk_dir(path, follow_symlinks, &mut files);
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            if is_literal(pattern) {
                // Kept so the failure to open it is reported per file.
                files.push(SourceFile {
                    path: path.to_path_buf(),
                    base: None,
                });
                continue;
            }
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches.into_iter().map(|path| SourceFile { path, base: None }));
    }

    files.sort();
    files.dedup_by(|a, b| a.path == b.path);
    if files.len() > MAX_FILES {
        warn!(found = files.len(), max = MAX_FILES, "too many input files; truncating");
        files.truncate(MAX_FILES);
    }
    Ok(files)
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '['])
}

fn walk_dir(root: &Path, follow_symlinks: bool, out: &mut Vec<SourceFile>) {
    for entry in WalkDir::new(root).follow_links(follow_symlinks) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            debug!(path = %entry.path().display(), "discovered");
            out.push(SourceFile {
                path: entry.into_path(),
                base: Some(root.to_path_buf()),
            });
        }
    }
}

/// True if the file starts with the ELF magic number.
pub fn is_elf(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut magic))
        .map(|_| &magic == b"\x7fELF")
        .unwrap_or(false)
}
