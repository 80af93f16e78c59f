//! Vyper toolchain invocation.
//!
//! Locates the `vyper` executable, probes its version once at startup, and
//! turns each compile into one CLI invocation per requested artifact
//! format. The toolchain holds no per-call state, so a single instance can
//! be shared across worker slots.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::compiler::{Artifacts, Compiler, OutputSelector};
use crate::diagnostics;
use crate::error::{Error, Result};

/// Production [`Compiler`] implementation backed by the `vyper` CLI.
#[derive(Debug)]
pub struct VyperToolchain {
    /// Path to the vyper executable.
    vyper_path: PathBuf,

    /// Version string reported by `vyper --version`.
    version: String,
}

impl VyperToolchain {
    /// Locate `vyper` on PATH and probe its version.
    pub fn new() -> Result<Self> {
        let path = which::which("vyper")
            .map_err(|_| Error::Toolchain("vyper not found in PATH".to_string()))?;
        Self::with_path(path)
    }

    /// Use an explicit vyper executable instead of a PATH lookup.
    ///
    /// Fails fast when the executable is missing or does not answer a
    /// version probe.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        let vyper_path = path.into();
        let version = Self::query_version(&vyper_path)?;
        tracing::debug!("using vyper {} at {}", version, vyper_path.display());
        Ok(Self {
            vyper_path,
            version,
        })
    }

    fn query_version(vyper: &Path) -> Result<String> {
        let output = Command::new(vyper)
            .arg("--version")
            .output()
            .map_err(|e| Error::Toolchain(format!("failed to run {}: {}", vyper.display(), e)))?;

        if !output.status.success() {
            return Err(Error::Toolchain(format!(
                "{} --version exited with {}",
                vyper.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run one `vyper -f <format>` invocation and return its stdout.
    fn run_format(&self, source_file: &Path, selector: OutputSelector) -> Result<String> {
        let output = Command::new(&self.vyper_path)
            .arg("-f")
            .arg(selector.format_flag())
            .arg(source_file)
            .output()?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout)
                .trim_end()
                .to_string());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        match diagnostics::classify_stderr(&stderr) {
            Some(failure) => Err(Error::Failure(failure)),
            None => Err(Error::Toolchain(format!(
                "vyper exited with {}: {}",
                output.status,
                stderr.trim()
            ))),
        }
    }
}

impl Compiler for VyperToolchain {
    fn version(&self) -> &str {
        &self.version
    }

    fn compile(&self, source: &str, selectors: &[OutputSelector]) -> Result<Artifacts> {
        // vyper reads contracts from files, not stdin.
        let source_file = tempfile::Builder::new()
            .prefix("vyperd")
            .suffix(".vy")
            .tempfile()?;
        std::fs::write(source_file.path(), source)?;

        tracing::debug!("compiling {} bytes of source", source.len());

        let mut artifacts = Artifacts::default();
        for &selector in selectors {
            let out = self.run_format(source_file.path(), selector)?;
            match selector {
                OutputSelector::Abi => {
                    artifacts.abi = serde_json::from_str(&out).map_err(|e| Error::Output {
                        artifact: "abi",
                        message: e.to_string(),
                    })?;
                }
                OutputSelector::Bytecode => artifacts.bytecode = out,
                OutputSelector::BytecodeRuntime => artifacts.bytecode_runtime = out,
                OutputSelector::Ir => artifacts.ir = out,
                OutputSelector::MethodIdentifiers => {
                    artifacts.method_identifiers =
                        serde_json::from_str(&out).map_err(|e| Error::Output {
                            artifact: "method_identifiers",
                            message: e.to_string(),
                        })?;
                }
            }
        }

        Ok(artifacts)
    }
}
