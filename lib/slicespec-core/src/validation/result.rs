use serde_json::{Map, Value};

/// The seven ordered validation checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationPhase {
    /// `openapi`, `info` and `paths` are present.
    #[display("file structure")]
    FileStructure = 1,
    /// Every path item has an operation with responses.
    #[display("operation integrity")]
    OperationIntegrity = 2,
    /// Every response is an object with a description.
    #[display("response integrity")]
    ResponseIntegrity = 3,
    /// Every component `$ref` resolves inside the document.
    #[display("reference resolution")]
    ReferenceResolution = 4,
    /// All referenced components are included.
    #[display("component completeness")]
    ComponentCompleteness = 5,
    /// The slice matches the source document.
    #[display("payload equivalence")]
    PayloadEquivalence = 6,
    /// The `openapi` version is a supported `3.0.x` / `3.1.x`.
    #[display("version validation")]
    VersionValidation = 7,
}

impl ValidationPhase {
    /// All phases in execution order.
    pub const ALL: [Self; 7] = [
        Self::FileStructure,
        Self::OperationIntegrity,
        Self::ResponseIntegrity,
        Self::ReferenceResolution,
        Self::ComponentCompleteness,
        Self::PayloadEquivalence,
        Self::VersionValidation,
    ];

    /// The phase number, from 1 to 7.
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Outcome of one validation phase.
///
/// Messages are technical (they name the offending `$ref`, path or field);
/// turning them into end-user wording is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// The phase that produced this result.
    pub phase: ValidationPhase,
    /// Whether the phase passed.
    pub passed: bool,
    /// Diagnostic message, set on failure.
    pub error_message: Option<String>,
    /// Structured diagnostic detail.
    pub details: Map<String, Value>,
}

impl ValidationResult {
    pub(crate) fn pass(phase: ValidationPhase) -> Self {
        Self {
            phase,
            passed: true,
            error_message: None,
            details: Map::new(),
        }
    }

    pub(crate) fn fail(phase: ValidationPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            passed: false,
            error_message: Some(message.into()),
            details: Map::new(),
        }
    }

    pub(crate) fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}
