use anyhow::Result;
use std::fs;
use std::path::Path;

/// Reads a text file and splits it into retrieval chunks: one chunk per
/// non-empty line, surrounding whitespace trimmed, original order kept.
pub fn load_chunks(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect())
}
