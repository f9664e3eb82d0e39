use std::fs;
use std::path::{Path, PathBuf};

/// Directory names never descended into: version control metadata,
/// generated site output, caches, and vendored dependencies.
const EXCLUDE_DIRS: &[&str] = &[".git", "_site", ".jekyll-cache", "node_modules"];

/// File extensions that count as markdown documents.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Check if a directory name is in the excluded set.
fn is_excluded_dir(name: &str) -> bool {
    EXCLUDE_DIRS.contains(&name)
}

/// Check if a path has a markdown extension.
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MARKDOWN_EXTENSIONS.contains(&e))
}

/// Find all markdown document paths under the root.
///
/// Covers both extensions at any depth, which subsumes the conventional
/// `_posts/` content directory. Results are sorted so processing order is
/// deterministic. Traversal is read-only; unreadable directories are skipped.
pub fn find_documents(root: &Path) -> Result<Vec<PathBuf>, String> {
    if !root.is_dir() {
        return Err(format!("not a directory: {}", root.display()));
    }

    let mut documents = Vec::new();
    find_documents_recursive(root, &mut documents);
    documents.sort();
    Ok(documents)
}

/// Recursively collect markdown files, skipping excluded directories.
fn find_documents_recursive(dir: &Path, documents: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(_) => continue,
            };

            if file_type.is_dir() {
                let name = entry.file_name();
                if is_excluded_dir(&name.to_string_lossy()) {
                    continue;
                }
                find_documents_recursive(&path, documents);
            } else if file_type.is_file() && is_markdown_file(&path) {
                documents.push(path);
            }
            // Symlinks and other non-regular entries are skipped.
        }
    }
}
