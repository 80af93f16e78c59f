//! Wire protocol for the compile service.
//!
//! Defines the request body, the uniform diagnostic shape every classified
//! failure maps into, and the success/failure response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vyperd_core::{Artifacts, CompileFailure};

/// Message for a missing or falsy `code` key.
pub const MISSING_CODE: &str = "No \"code\" key supplied";

/// Message for a `code` value that is present but not a string.
pub const NON_STRING_CODE: &str = "\"code\" must be a non-empty string";

/// Body of a `POST /compile` request.
///
/// `code` is kept as a raw JSON value so validation can distinguish a
/// missing key from a falsy or mistyped one.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileRequest {
    pub code: Option<Value>,
}

impl CompileRequest {
    /// Extract the source text, or the failure response for invalid input.
    ///
    /// Checks run in order, first failure wins: a missing or falsy `code`
    /// (null, false, 0, empty string/array/object) is reported before a
    /// present but non-string one.
    pub fn into_source(self) -> Result<String, CompileResponse> {
        match self.code {
            None => Err(CompileResponse::rejected(MISSING_CODE)),
            Some(value) if is_falsy(&value) => Err(CompileResponse::rejected(MISSING_CODE)),
            Some(Value::String(source)) => Ok(source),
            Some(_) => Err(CompileResponse::rejected(NON_STRING_CODE)),
        }
    }
}

/// JSON truthiness, matching the `if not code` check clients rely on.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// The uniform error shape for classified compile failures.
///
/// This three-field shape is the contract client code depends on; every
/// failure kind maps into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<CompileFailure> for Diagnostic {
    /// Classify a toolchain failure into the wire shape.
    ///
    /// Version failures never report a column, so it is pinned to 0; the
    /// other kinds forward the toolchain's position untouched. Message
    /// text is never rewritten.
    fn from(failure: CompileFailure) -> Self {
        match failure {
            CompileFailure::Version { message, line } => Diagnostic {
                message,
                line,
                column: 0,
            },
            CompileFailure::Semantic {
                message,
                line,
                column,
            } => Diagnostic {
                message,
                line,
                column,
            },
            CompileFailure::Syntax {
                message,
                line,
                column,
            } => Diagnostic {
                message,
                line,
                column,
            },
        }
    }
}

/// Response envelope for `POST /compile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompileResponse {
    /// Compilation succeeded; all requested artifacts inline.
    Success {
        #[serde(flatten)]
        artifacts: Artifacts,
    },

    /// Compilation or validation failed.
    ///
    /// Input validation failures carry no position; classified compiler
    /// failures always carry both fields.
    Failed {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        line: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        column: Option<usize>,
    },
}

impl CompileResponse {
    /// Success payload wrapping the compiler's artifacts.
    pub fn success(artifacts: Artifacts) -> Self {
        Self::Success { artifacts }
    }

    /// Failure payload for client input rejected before compilation.
    pub fn rejected(message: &str) -> Self {
        Self::Failed {
            message: message.to_string(),
            line: None,
            column: None,
        }
    }

    /// Failure payload for a classified compiler failure.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Self::Failed {
            message: diagnostic.message,
            line: Some(diagnostic.line),
            column: Some(diagnostic.column),
        }
    }

    /// HTTP status paired with this payload.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Failed { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for CompileResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> CompileRequest {
        serde_json::from_value(body).unwrap()
    }

    fn assert_rejected(response: CompileResponse, expected: &str) {
        match response {
            CompileResponse::Failed {
                message,
                line,
                column,
            } => {
                assert_eq!(message, expected);
                assert_eq!(line, None);
                assert_eq!(column, None);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_code_is_rejected() {
        for body in [json!({}), json!({ "code": null })] {
            let rejected = request(body).into_source().unwrap_err();
            assert_rejected(rejected, MISSING_CODE);
        }
    }

    #[test]
    fn falsy_code_is_rejected_before_the_type_check() {
        for code in [json!(""), json!(0), json!(false), json!([]), json!({})] {
            let rejected = request(json!({ "code": code })).into_source().unwrap_err();
            assert_rejected(rejected, MISSING_CODE);
        }
    }

    #[test]
    fn non_string_code_is_rejected() {
        for code in [json!(42), json!([1, 2]), json!({ "x": 1 }), json!(true)] {
            let rejected = request(json!({ "code": code })).into_source().unwrap_err();
            assert_rejected(rejected, NON_STRING_CODE);
        }
    }

    #[test]
    fn string_code_passes_validation() {
        let source = request(json!({ "code": "x: uint256" }))
            .into_source()
            .unwrap();
        assert_eq!(source, "x: uint256");
    }

    #[test]
    fn version_failure_classifies_with_zero_column() {
        let diagnostic = Diagnostic::from(CompileFailure::Version {
            message: "bad pragma".to_string(),
            line: 1,
        });
        assert_eq!(
            diagnostic,
            Diagnostic {
                message: "bad pragma".to_string(),
                line: 1,
                column: 0,
            }
        );
    }

    #[test]
    fn semantic_and_syntax_failures_forward_positions() {
        let semantic = Diagnostic::from(CompileFailure::Semantic {
            message: "type mismatch".to_string(),
            line: 7,
            column: 4,
        });
        assert_eq!((semantic.line, semantic.column), (7, 4));

        let syntax = Diagnostic::from(CompileFailure::Syntax {
            message: "unexpected token".to_string(),
            line: 3,
            column: 8,
        });
        assert_eq!((syntax.line, syntax.column), (3, 8));
    }

    #[test]
    fn success_serializes_flat_with_status() {
        let response = CompileResponse::success(Artifacts {
            abi: json!([]),
            bytecode: "0x6003".to_string(),
            bytecode_runtime: "0x6003".to_string(),
            ir: "(seq)".to_string(),
            method_identifiers: json!({}),
        });
        assert_eq!(response.status_code(), StatusCode::OK);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["bytecode"], "0x6003");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn rejected_serializes_without_position() {
        let response = CompileResponse::rejected(MISSING_CODE);
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["message"], MISSING_CODE);
        assert!(value.get("line").is_none());
        assert!(value.get("column").is_none());
    }

    #[test]
    fn failed_serializes_all_three_fields() {
        let response = CompileResponse::failed(Diagnostic {
            message: "unexpected token".to_string(),
            line: 3,
            column: 8,
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["line"], 3);
        assert_eq!(value["column"], 8);
        assert!(value.get("bytecode").is_none());
    }
}
