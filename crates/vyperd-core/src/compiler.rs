//! The compiler invoker contract.
//!
//! The service treats the toolchain as an opaque collaborator: one
//! operation that either produces the requested artifacts or reports a
//! classified failure. [`crate::VyperToolchain`] is the production
//! implementation; tests substitute their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Artifact kinds a compile invocation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputSelector {
    Abi,
    Bytecode,
    BytecodeRuntime,
    Ir,
    MethodIdentifiers,
}

impl OutputSelector {
    /// Every artifact kind, in wire order. The service requests this same
    /// fixed set for every compile.
    pub const ALL: [OutputSelector; 5] = [
        OutputSelector::Abi,
        OutputSelector::Bytecode,
        OutputSelector::BytecodeRuntime,
        OutputSelector::Ir,
        OutputSelector::MethodIdentifiers,
    ];

    /// Value passed to `vyper -f`.
    pub fn format_flag(self) -> &'static str {
        match self {
            OutputSelector::Abi => "abi",
            OutputSelector::Bytecode => "bytecode",
            OutputSelector::BytecodeRuntime => "bytecode_runtime",
            OutputSelector::Ir => "ir",
            OutputSelector::MethodIdentifiers => "method_identifiers",
        }
    }
}

/// Compiled outputs for one source unit.
///
/// Produced once per successful compile, immutable afterward, scoped to a
/// single response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    /// Interface descriptor (JSON array).
    pub abi: Value,

    /// Deployment bytecode, hex-encoded.
    pub bytecode: String,

    /// Deployed (runtime) bytecode, hex-encoded.
    pub bytecode_runtime: String,

    /// Intermediate representation in its textual form.
    pub ir: String,

    /// Function-selector table, name to selector hex.
    pub method_identifiers: Value,
}

/// The compiler toolchain seam.
///
/// Implementations must be reentrant: the service invokes [`compile`]
/// concurrently from multiple worker slots with no shared compiler state
/// across invocations.
///
/// [`compile`]: Compiler::compile
pub trait Compiler: Send + Sync {
    /// Toolchain version string, as reported by the compiler itself.
    fn version(&self) -> &str;

    /// Compile `source`, producing the artifacts named by `selectors`.
    ///
    /// Classified failures surface as [`crate::Error::Failure`]; any other
    /// error variant is an infrastructure fault.
    fn compile(&self, source: &str, selectors: &[OutputSelector]) -> Result<Artifacts>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selectors_have_distinct_flags() {
        let flags: Vec<&str> = OutputSelector::ALL.iter().map(|s| s.format_flag()).collect();
        assert_eq!(
            flags,
            vec!["abi", "bytecode", "bytecode_runtime", "ir", "method_identifiers"]
        );
    }

    #[test]
    fn artifacts_serialize_with_wire_keys() {
        let artifacts = Artifacts {
            abi: serde_json::json!([]),
            bytecode: "0x6003".to_string(),
            bytecode_runtime: "0x6003".to_string(),
            ir: "(seq)".to_string(),
            method_identifiers: serde_json::json!({}),
        };

        let value = serde_json::to_value(&artifacts).unwrap();
        for key in ["abi", "bytecode", "bytecode_runtime", "ir", "method_identifiers"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
