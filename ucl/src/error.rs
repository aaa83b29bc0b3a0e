// error.rs - Library error type
//
// The binary wraps these in anyhow; library callers can match on them.

use crate::driver::Summary;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The disassembler could not be spawned (usually not on PATH)
    #[error("disassembler `{program}` not found")]
    ToolNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The disassembler ran but exited unsuccessfully
    #[error("`{program}` failed on {} ({status}): {stderr}", path.display())]
    ToolFailed {
        program: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ELF file {}", path.display())]
    Elf {
        path: PathBuf,
        #[source]
        source: goblin::error::Error,
    },

    #[error("{} is not a RISC-V binary (e_machine=0x{machine:x})", path.display())]
    NotRiscv { path: PathBuf, machine: u16 },

    /// Some binaries failed in a keep-going run
    #[error("{} of {} binaries failed", summary.failed.len(), summary.total())]
    Batch { summary: Summary },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
