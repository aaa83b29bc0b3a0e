// ucl.rs - UCLID5 module generation
//
// The generated `main` module instantiates the `cpu` model over an `imem`
// initialized by the collected assumptions, steps it, checks that the test
// terminates through ECALL with a0 == 0, and runs BMC for as many steps as
// there are instructions.

use crate::error::{Error, Result};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

pub const OUTPUT_EXTENSION: &str = "ucl";

const INIT_INDENT: &str = "        ";

/// A generated verification module
#[derive(Debug, Clone)]
pub struct UclModule {
    /// Binary the module was generated from
    pub source: String,
    /// Tool named in the header comment
    pub generator: String,
    /// BMC bound
    pub instruction_count: usize,
    /// Body of the `init` block, in order
    pub init: Vec<String>,
}

impl UclModule {
    pub fn new(source: impl Into<String>, instruction_count: usize, init: Vec<String>) -> Self {
        Self {
            source: source.into(),
            generator: generator_name(),
            instruction_count,
            init,
        }
    }

    /// Write `<dir>/<basename of source>.ucl`, creating `dir` if needed
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let path = output_path(dir, Path::new(&self.source));
        std::fs::write(&path, self.to_string()).map_err(|e| Error::io(&path, e))?;
        info!("wrote {}", path.display());
        Ok(path)
    }
}

pub fn generator_name() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// `<dir>/<file name of input>.ucl`
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    dir.join(name)
}

impl fmt::Display for UclModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// AUTOGENERATED FROM {} BY {}", self.source, self.generator)?;
        writeln!(f, "module main {{")?;
        writeln!(f, "    type * = common.*;")?;
        writeln!(f, "    define * = common.*;")?;
        writeln!(f, "    type * = instructions.*;")?;
        writeln!(f, "    const * = cpu.*;")?;
        writeln!(f)?;
        writeln!(f, "    var imem : mem_t;")?;
        writeln!(f)?;
        writeln!(f, "    instance cpu_0 : cpu (imem : (imem));")?;
        writeln!(f)?;

        writeln!(f, "    init {{")?;
        for line in &self.init {
            writeln!(f, "{}{}", INIT_INDENT, line)?;
        }
        writeln!(f, "    }}")?;
        writeln!(f)?;

        writeln!(f, "    next {{")?;
        writeln!(f, "        next (cpu_0);")?;
        writeln!(f, "        if (cpu_0.exception.cause != X_NONE) {{")?;
        writeln!(f, "            // All tests are ended with an ECALL invocation")?;
        writeln!(f, "            assert (cpu_0.exception.cause == X_ECALL);")?;
        writeln!(f, "            assert (cpu_0.regfile[registers.a0] == 0bv32);")?;
        writeln!(f, "        }}")?;
        writeln!(f, "    }}")?;
        writeln!(f)?;

        writeln!(
            f,
            "    property[LTL] eventually_exits: G(F(cpu_0.exception.cause == X_ECALL));"
        )?;
        writeln!(f)?;

        writeln!(f, "    control {{")?;
        writeln!(f, "        vobj = bmc({});", self.instruction_count)?;
        writeln!(f, "        check;")?;
        writeln!(f, "        print_results;")?;
        writeln!(
            f,
            "        vobj.print_cex(cpu_0.pc, cpu_0.exception, cpu_0.regfile);"
        )?;
        writeln!(f, "    }}")?;
        write!(f, "}}")
    }
}
