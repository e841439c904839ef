//! Zip archive implementation of the `SourceArchiver` port.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path};

use anyhow::{Context, Result};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::application::ports::{ArchiveSummary, SourceArchiver};
use crate::infra::fs::sha256_file;

/// Deflate at maximum compression.
const COMPRESSION_LEVEL: i64 = 9;

/// Writes the contents of a directory to a zip file.
///
/// Entries are stored relative to the directory root, in file-name order,
/// so the directory itself is not a path component inside the archive.
pub struct ZipArchiver;

impl SourceArchiver for ZipArchiver {
    async fn archive(&self, source_dir: &Path, dest: &Path) -> Result<ArchiveSummary> {
        let src = source_dir.to_path_buf();
        let dst = dest.to_path_buf();
        tokio::task::spawn_blocking(move || write_zip(&src, &dst))
            .await
            .context("spawn_blocking for archive")?
    }
}

/// Synchronous archive writer used by `ZipArchiver`.
///
/// # Errors
///
/// Returns an error if the source directory is missing or unreadable, or the
/// destination cannot be written. A partially written archive is left as is.
pub fn write_zip(source_dir: &Path, dest: &Path) -> Result<ArchiveSummary> {
    anyhow::ensure!(
        source_dir.is_dir(),
        "source directory {} does not exist",
        source_dir.display()
    );

    let file = File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    let mut files = 0usize;
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("walking {}", source_dir.display()))?;
        let rel = entry
            .path()
            .strip_prefix(source_dir)
            .with_context(|| format!("relativizing {}", entry.path().display()))?;
        let name = entry_name(rel);

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)
                .with_context(|| format!("adding directory {}", rel.display()))?;
        } else if entry.file_type().is_file() {
            zip.start_file(name, options)
                .with_context(|| format!("adding file {}", rel.display()))?;
            let mut input = File::open(entry.path())
                .with_context(|| format!("opening {}", entry.path().display()))?;
            std::io::copy(&mut input, &mut zip)
                .with_context(|| format!("compressing {}", entry.path().display()))?;
            files += 1;
        }
    }

    let mut out = zip.finish().context("finalizing archive")?;
    out.flush().context("flushing archive")?;
    drop(out);

    let bytes = std::fs::metadata(dest)
        .with_context(|| format!("reading metadata of {}", dest.display()))?
        .len();
    let sha256 = sha256_file(dest)?;
    tracing::debug!(path = %dest.display(), files, bytes, %sha256, "archive written");

    Ok(ArchiveSummary {
        path: dest.to_path_buf(),
        files,
        bytes,
        sha256,
    })
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
