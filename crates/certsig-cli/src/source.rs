//! Reading certificate documents from disk or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Read a document from `path`, or from stdin when `path` is `-`.
///
/// Documents larger than `max_bytes` are refused before parsing.
pub fn read_document(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        return read_limited(std::io::stdin().lock(), max_bytes, "<stdin>");
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open document: {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("failed to stat document: {}", path.display()))?
        .len();
    if len > max_bytes {
        bail!(
            "document {} is {len} bytes, limit is {max_bytes}",
            path.display()
        );
    }
    read_limited(file, max_bytes, &path.display().to_string())
}

fn read_limited(reader: impl Read, max_bytes: u64, name: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .with_context(|| format!("failed to read document: {name}"))?;
    if buf.len() as u64 > max_bytes {
        bail!("document {name} exceeds the {max_bytes}-byte limit");
    }
    tracing::debug!(document = name, bytes = buf.len(), "document read");
    Ok(buf)
}
