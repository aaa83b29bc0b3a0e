// driver.rs - Batch processing of a riscv-tests build directory
//
// Finds the extension-less test binaries, runs the generation pipeline on
// each one in turn and writes the modules to the output directory.

use crate::elf;
use crate::error::{Error, Result};
use crate::objdump::Disassembler;
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// Batch configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for test binaries
    pub input_dir: PathBuf,
    /// Directory the `.ucl` files are written to
    pub output_dir: PathBuf,
    /// File name prefix selecting the binaries
    pub prefix: String,
    /// Explicit binaries; skips directory discovery when non-empty
    pub files: Vec<PathBuf>,
    /// Continue with the next binary after a failure
    pub keep_going: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("riscv-tests"),
            output_dir: PathBuf::from("autogen-riscv-tests"),
            prefix: "rv32ui-p-".to_string(),
            files: Vec::new(),
            keep_going: false,
        }
    }
}

/// Outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Modules written
    pub written: Vec<PathBuf>,
    /// Binaries that failed; each failure is logged as it happens
    pub failed: Vec<PathBuf>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Binaries in `dir` whose name starts with `prefix` and has no extension
pub fn discover(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.starts_with(prefix) || name.contains('.') {
            continue;
        }
        if entry.path().is_dir() {
            continue;
        }
        found.push(entry.path());
    }

    found.sort();
    Ok(found)
}

/// Inspect, translate and write one binary
pub fn process<D: Disassembler + ?Sized>(
    path: &Path,
    output_dir: &Path,
    disassembler: &D,
) -> Result<PathBuf> {
    info!("parsing file: {}", path.display());

    let info = elf::inspect(path)?;
    debug!(
        "  entry 0x{:x}, {}-bit, {} sections, .data {}",
        info.entry,
        if info.is_64 { 64 } else { 32 },
        info.sections.len(),
        if info.has_data() { "present" } else { "absent" }
    );

    let module = crate::generate(path, disassembler)?;
    module.write_to(output_dir)
}

/// Run the batch described by `config`
pub fn run<D: Disassembler + ?Sized>(config: &Config, disassembler: &D) -> Result<Summary> {
    let binaries = if config.files.is_empty() {
        discover(&config.input_dir, &config.prefix)?
    } else {
        config.files.clone()
    };
    debug!("{} binaries to process", binaries.len());

    let mut summary = Summary::default();
    for path in binaries {
        match process(&path, &config.output_dir, disassembler) {
            Ok(written) => summary.written.push(written),
            Err(e) if config.keep_going => {
                error!("{}: {}", path.display(), e);
                summary.failed.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    if !summary.failed.is_empty() {
        return Err(Error::Batch { summary });
    }
    Ok(summary)
}
