use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use crate::discover;
use crate::document::{self, FrontMatter};
use crate::normalize::{self, TAGS_KEY};
use crate::output::{self, OutputFormat};

/// Effective run mode, resolved once at startup and passed explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Apply,
}

impl Mode {
    /// Apply only when explicitly requested; anything else is a dry run,
    /// whether or not --dry-run was stated.
    pub fn resolve(apply: bool, dry_run: bool) -> Mode {
        match (apply, dry_run) {
            (true, _) => Mode::Apply,
            (false, _) => Mode::DryRun,
        }
    }
}

/// A pending rewrite: produced only when normalization altered the tag list.
#[derive(Debug)]
pub struct ChangeRecord {
    pub path: PathBuf,
    pub new_content: String,
    pub original_content: String,
}

#[derive(Serialize)]
struct ReportEntry {
    path: String,
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Sibling path holding the pre-change content: original path + ".bak".
fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".bak");
    PathBuf::from(os)
}

/// Process a single document, returning a change record if its tag list
/// needs rewriting.
///
/// Every per-file failure degrades to None: unreadable files, missing or
/// malformed front matter, and absent or non-list tag fields all leave the
/// document untouched and out of the change set.
pub fn process_file(path: &Path) -> Option<ChangeRecord> {
    let text = document::read_text(path).ok()?;

    let FrontMatter::Parsed { mut metadata, body } = document::parse_front_matter(&text) else {
        return None;
    };

    let tags = match metadata.get(TAGS_KEY) {
        Some(Value::Sequence(tags)) => tags,
        _ => return None,
    };

    let (new_tags, changed) = normalize::normalize_tags(tags);
    if !changed {
        return None;
    }

    // Replacing an existing key keeps its position in the mapping.
    metadata.insert(Value::from(TAGS_KEY), Value::Sequence(new_tags));

    let new_content = document::rebuild(&metadata, &body).ok()?;

    Some(ChangeRecord {
        path: path.to_path_buf(),
        new_content,
        original_content: text,
    })
}

/// Write one change: backup first, then overwrite. Returns the backup path.
fn write_change(record: &ChangeRecord) -> Result<PathBuf, String> {
    let backup = backup_path(&record.path);
    fs::write(&backup, &record.original_content)
        .map_err(|e| format!("writing backup {}: {}", backup.display(), e))?;
    fs::write(&record.path, &record.new_content)
        .map_err(|e| format!("writing {}: {}", record.path.display(), e))?;
    Ok(backup)
}

fn rel_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Run the full pipeline: discover, parse, normalize, then report or apply.
pub fn run(root: &Path, mode: Mode, format: OutputFormat) -> Result<(), String> {
    let files = discover::find_documents(root)?;

    let mut changes = Vec::new();
    for file in &files {
        if let Some(record) = process_file(file) {
            changes.push(record);
        }
    }

    if changes.is_empty() {
        match format {
            OutputFormat::Json => println!("[]"),
            _ => println!("No tag variants found."),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => run_json(root, mode, &changes),
        _ => run_text(root, mode, &changes, format.is_colored()),
    }
}

fn run_text(root: &Path, mode: Mode, changes: &[ChangeRecord], colored: bool) -> Result<(), String> {
    for record in changes {
        let rel = rel_display(root, &record.path);
        println!("will update: {}", output::style_path(&rel, colored));
    }

    if mode == Mode::DryRun {
        println!(
            "\nDry run: {} file(s) would be updated. Run with --apply to write changes.",
            changes.len()
        );
        return Ok(());
    }

    let mut updated = 0;
    let mut errors = 0;

    for record in changes {
        let rel = rel_display(root, &record.path);
        match write_change(record) {
            Ok(backup) => {
                updated += 1;
                println!("updated {} (backup: {})", rel, rel_display(root, &backup));
            }
            Err(e) => {
                errors += 1;
                eprintln!("{}", output::style_error(&e, colored));
            }
        }
    }

    let mut parts = vec![format!("{} updated", updated)];
    if errors > 0 {
        parts.push(
            output::style_error(&format!("{} errors", errors), colored).to_string(),
        );
    }
    println!("\n{}", parts.join(", "));

    if errors > 0 {
        return Err(format!("{} file(s) failed to write", errors));
    }
    Ok(())
}

fn run_json(root: &Path, mode: Mode, changes: &[ChangeRecord]) -> Result<(), String> {
    let mut entries = Vec::with_capacity(changes.len());
    let mut errors = 0;

    for record in changes {
        let rel = rel_display(root, &record.path);
        let entry = match mode {
            Mode::DryRun => ReportEntry {
                path: rel,
                action: "pending",
                backup: None,
                error: None,
            },
            Mode::Apply => match write_change(record) {
                Ok(backup) => ReportEntry {
                    path: rel,
                    action: "updated",
                    backup: Some(rel_display(root, &backup)),
                    error: None,
                },
                Err(e) => {
                    errors += 1;
                    ReportEntry {
                        path: rel,
                        action: "failed",
                        backup: None,
                        error: Some(e),
                    }
                }
            },
        };
        entries.push(entry);
    }

    let report = serde_json::to_string_pretty(&entries)
        .map_err(|e| format!("serializing report: {}", e))?;
    println!("{}", report);

    if errors > 0 {
        return Err(format!("{} file(s) failed to write", errors));
    }
    Ok(())
}
