//! Classification of vyper diagnostics into failure kinds.
//!
//! The vyper CLI reports failures as text on stderr, ending in a line of
//! the form `vyper.exceptions.<Kind>: line L:C <message>`. Tokenizer-level
//! errors from very old toolchains surface as a bare Python `SyntaxError`
//! instead. Message text is forwarded verbatim; only the exception class
//! and the `line L:C` position are interpreted.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CompileFailure;

static VYPER_EXCEPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"vyper\.exceptions\.(\w+):\s*(.*)").expect("static pattern"));

static PY_SYNTAX_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^SyntaxError:\s*(.*)").expect("static pattern"));

static POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"line\s+(\d+)(?::(\d+))?").expect("static pattern"));

/// Classify a failed invocation's stderr into a [`CompileFailure`].
///
/// Returns `None` when stderr carries no recognizable diagnostic, in which
/// case the caller must report an infrastructure error instead.
pub fn classify_stderr(stderr: &str) -> Option<CompileFailure> {
    if let Some(caps) = VYPER_EXCEPTION.captures(stderr) {
        let kind = caps.get(1).map_or("", |m| m.as_str());
        let message = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
        let (line, column) = parse_position(&message);

        return Some(match kind {
            "VersionException" => CompileFailure::Version { message, line },
            "SyntaxException" => CompileFailure::Syntax {
                message,
                line,
                column,
            },
            _ => CompileFailure::Semantic {
                message,
                line,
                column,
            },
        });
    }

    if let Some(caps) = PY_SYNTAX_ERROR.captures(stderr) {
        let message = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        let (line, column) = parse_position(&message);
        return Some(CompileFailure::Syntax {
            message,
            line,
            column,
        });
    }

    None
}

/// Extract a `line L:C` (or `line L`) position from diagnostic text.
///
/// Positions are toolchain-defined and forwarded without renumbering;
/// a missing position reads as 0.
fn parse_position(message: &str) -> (usize, usize) {
    POSITION
        .captures(message)
        .map(|caps| {
            let line = caps
                .get(1)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            let column = caps
                .get(2)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            (line, column)
        })
        .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_semantic_error() {
        let stderr = "Error compiling: contract.vy\n\
                      vyper.exceptions.StructureException: line 2:0 Invalid top-level statement";

        let failure = classify_stderr(stderr).unwrap();
        assert_eq!(
            failure,
            CompileFailure::Semantic {
                message: "line 2:0 Invalid top-level statement".to_string(),
                line: 2,
                column: 0,
            }
        );
    }

    #[test]
    fn classifies_syntax_error() {
        let stderr = "vyper.exceptions.SyntaxException: line 3:8 unexpected token";

        let failure = classify_stderr(stderr).unwrap();
        assert_eq!(
            failure,
            CompileFailure::Syntax {
                message: "line 3:8 unexpected token".to_string(),
                line: 3,
                column: 8,
            }
        );
    }

    #[test]
    fn classifies_version_error() {
        let stderr = "vyper.exceptions.VersionException: \
                      line 1:0 Version specification \"^0.2.0\" is not compatible with compiler version \"0.4.0\"";

        match classify_stderr(stderr).unwrap() {
            CompileFailure::Version { message, line } => {
                assert!(message.contains("not compatible"));
                assert_eq!(line, 1);
            }
            other => panic!("expected version failure, got {other:?}"),
        }
    }

    #[test]
    fn classifies_native_syntax_error() {
        let stderr = "SyntaxError: invalid syntax (<unknown>, line 4)";

        let failure = classify_stderr(stderr).unwrap();
        assert_eq!(
            failure,
            CompileFailure::Syntax {
                message: "invalid syntax (<unknown>, line 4)".to_string(),
                line: 4,
                column: 0,
            }
        );
    }

    #[test]
    fn unclassified_stderr_yields_none() {
        assert!(classify_stderr("Traceback (most recent call last):\nValueError: boom").is_none());
        assert!(classify_stderr("").is_none());
    }

    #[test]
    fn missing_position_reads_as_zero() {
        let stderr = "vyper.exceptions.CompilerPanic: unreachable code reached";

        match classify_stderr(stderr).unwrap() {
            CompileFailure::Semantic { line, column, .. } => {
                assert_eq!((line, column), (0, 0));
            }
            other => panic!("expected semantic failure, got {other:?}"),
        }
    }
}
