//! Compiler toolchain boundary for the vyperd compile service.
//!
//! This crate provides:
//! - The [`Compiler`] trait — the seam between the service and the Vyper
//!   toolchain, with its artifact and failure types
//! - Classification of toolchain diagnostics into the three failure kinds
//! - [`VyperToolchain`], the production implementation backed by the
//!   `vyper` executable

pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod toolchain;

pub use compiler::{Artifacts, Compiler, OutputSelector};
pub use error::{CompileFailure, Error, Result};
pub use toolchain::VyperToolchain;
