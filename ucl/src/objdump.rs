// objdump.rs - Disassembly extraction
//
// Runs the external objdump once per pass and hands its stdout to the
// parsers. The `Disassembler` trait lets the pipeline run on canned text.

use crate::elf::{DATA_SECTION, TEXT_SECTION};
use crate::error::{Error, Result};
use log::debug;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_OBJDUMP: &str = "riscv64-unknown-elf-objdump";

/// Source of the two textual passes over a binary
pub trait Disassembler {
    /// Instruction listing of the code section (`objdump -d`)
    fn disassemble_instructions(&self, path: &Path) -> Result<String>;

    /// Hex dump of the initialized-data section (`objdump -s`)
    fn disassemble_data(&self, path: &Path) -> Result<String>;
}

/// GNU objdump found on PATH (or at an explicit location)
#[derive(Debug, Clone)]
pub struct Objdump {
    pub program: String,
}

impl Default for Objdump {
    fn default() -> Self {
        Self::new(DEFAULT_OBJDUMP)
    }
}

impl Objdump {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, mode: &str, section: &str, path: &Path) -> Result<String> {
        debug!("{} {} -j {} {}", self.program, mode, section, path.display());

        let output = Command::new(&self.program)
            .args([mode, "-j", section])
            .arg(path)
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => Error::ToolNotFound {
                    program: self.program.clone(),
                    source,
                },
                _ => Error::io(path, source),
            })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Disassembler for Objdump {
    fn disassemble_instructions(&self, path: &Path) -> Result<String> {
        self.run("-d", TEXT_SECTION, path)
    }

    fn disassemble_data(&self, path: &Path) -> Result<String> {
        self.run("-s", DATA_SECTION, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        let objdump = Objdump::new("riscv2ucl-no-such-objdump");
        let err = objdump
            .disassemble_instructions(Path::new("rv32ui-p-add"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ToolNotFound { ref program, .. } if program == "riscv2ucl-no-such-objdump"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        // `false` ignores its arguments and exits 1
        let objdump = Objdump::new("false");
        let err = objdump.disassemble_data(Path::new("rv32ui-p-add")).unwrap_err();
        match err {
            Error::ToolFailed { status, path, .. } => {
                assert!(!status.success());
                assert_eq!(path, Path::new("rv32ui-p-add"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        // `echo` prints its arguments, which shows the command line we build
        let objdump = Objdump::new("echo");
        let out = objdump
            .disassemble_instructions(Path::new("rv32ui-p-add"))
            .unwrap();
        assert_eq!(out.trim(), "-d -j .text.init rv32ui-p-add");

        let out = objdump.disassemble_data(Path::new("rv32ui-p-add")).unwrap();
        assert_eq!(out.trim(), "-s -j .data rv32ui-p-add");
    }
}
