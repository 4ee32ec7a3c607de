pub mod extract;
pub mod grade;
pub mod init;
pub mod insights;
pub mod prompt;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a whole input file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
