// riscv2ucl - UCLID5 models from riscv-tests binaries
//
// Generates one verification module per compiled riscv-tests program.
//
// Usage:
//   riscv2ucl
//   riscv2ucl -i riscv-tests -o autogen-riscv-tests -p rv32ui-p-
//   riscv2ucl riscv-tests/rv32ui-p-add --objdump riscv32-unknown-elf-objdump

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;
use riscv2ucl::{driver, Config, Objdump};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riscv2ucl")]
#[command(about = "Generate UCLID5 verification modules from riscv-tests binaries")]
#[command(version)]
struct Args {
    /// Test binaries to translate (default: scan --input-dir)
    files: Vec<PathBuf>,

    /// Directory holding the compiled tests
    #[arg(short, long, default_value = "riscv-tests")]
    input_dir: PathBuf,

    /// Directory the generated modules are written to
    #[arg(short, long, default_value = "autogen-riscv-tests")]
    output_dir: PathBuf,

    /// Only binaries whose name starts with this prefix
    #[arg(short, long, default_value = "rv32ui-p-")]
    prefix: String,

    /// Disassembler to run
    #[arg(long, default_value = riscv2ucl::objdump::DEFAULT_OBJDUMP)]
    objdump: String,

    /// Keep going after a binary fails
    #[arg(short, long)]
    keep_going: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn config(&self) -> Config {
        Config {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            prefix: self.prefix.clone(),
            files: self.files.clone(),
            keep_going: self.keep_going,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str(args.log_level())
        .context("Invalid log specification")?
        .log_to_stderr()
        .start()
        .context("Failed to start logger")?;

    let config = args.config();
    let objdump = Objdump::new(args.objdump.as_str());

    let summary = driver::run(&config, &objdump).with_context(|| {
        format!(
            "Failed to generate models into {}",
            config.output_dir.display()
        )
    })?;

    log::info!(
        "Wrote {} modules to {}",
        summary.written.len(),
        config.output_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["riscv2ucl"]).unwrap();
        let config = args.config();
        let default = Config::default();

        assert_eq!(config.input_dir, default.input_dir);
        assert_eq!(config.output_dir, default.output_dir);
        assert_eq!(config.prefix, default.prefix);
        assert!(config.files.is_empty());
        assert!(!config.keep_going);
        assert_eq!(args.objdump, "riscv64-unknown-elf-objdump");
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "riscv2ucl",
            "-vv",
            "-k",
            "--objdump",
            "llvm-objdump",
            "riscv-tests/rv32ui-p-add",
        ])
        .unwrap();

        assert_eq!(args.log_level(), "debug");
        assert!(args.config().keep_going);
        assert_eq!(args.objdump, "llvm-objdump");
        assert_eq!(args.files, vec![PathBuf::from("riscv-tests/rv32ui-p-add")]);
    }
}
