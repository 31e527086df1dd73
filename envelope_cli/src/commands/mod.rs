pub mod inspect;
pub mod paginate;
pub mod reply;

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a whole input file into memory.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
