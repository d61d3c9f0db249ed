use std::{fmt, io, path::PathBuf};

use mmu::MmuError;

#[derive(Debug)]
pub enum VmmgrError {
    Io { path: PathBuf, source: io::Error },
    InvalidAddress { line: usize, text: String },
    AllocationFailure,
    NoAddresses,
    Mmu(MmuError),
    Output(io::Error),
}

impl fmt::Display for VmmgrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmmgrError::Io { path, source } => {
                write!(f, "Failed to read file '{}': {}", path.display(), source)
            }
            VmmgrError::InvalidAddress { line, text } => {
                write!(f, "Invalid address on line {}: '{}'", line, text)
            }
            VmmgrError::AllocationFailure => f.write_str("Failed to grow the address buffer"),
            VmmgrError::NoAddresses => {
                f.write_str("You need at least one address to process")
            }
            VmmgrError::Mmu(e) => write!(f, "Translation failed: {}", e),
            VmmgrError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for VmmgrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VmmgrError::Io { source, .. } => Some(source),
            VmmgrError::Mmu(e) => Some(e),
            VmmgrError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MmuError> for VmmgrError {
    fn from(e: MmuError) -> Self {
        VmmgrError::Mmu(e)
    }
}

impl From<io::Error> for VmmgrError {
    fn from(e: io::Error) -> Self {
        VmmgrError::Output(e)
    }
}
