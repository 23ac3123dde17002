//! Error types.
//!
//! - `ModelError` is returned by the pure model code (`models`, `math`).
//! - `AppError` is what the shell (CLI/TUI/IO) propagates up to `main`, carrying
//!   the process exit code alongside a printable message.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures raised while evaluating the Ishibashi–Zhang model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A caller-supplied input is outside the model's domain
    /// (e.g. `PI < 0`, `σm <= 0`, or a non-finite value).
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A strain sample or intermediate result left the real, finite domain.
    NumericDomain { context: String },
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        ModelError::InvalidInput { field, value, reason }
    }

    pub(crate) fn domain(context: impl Into<String>) -> Self {
        ModelError::NumericDomain {
            context: context.into(),
        }
    }

    /// Exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            ModelError::InvalidInput { .. } => 2,
            ModelError::NumericDomain { .. } => 4,
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidInput { field, value, reason } => {
                write!(f, "Invalid input: {field}={value} ({reason}).")
            }
            ModelError::NumericDomain { context } => write!(f, "Numeric domain error: {context}."),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_maps_to_exit_codes() {
        let invalid: AppError = ModelError::invalid("pi", -1.0, "must be >= 0").into();
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(invalid.to_string(), "Invalid input: pi=-1 (must be >= 0).");

        let domain: AppError = ModelError::domain("strain=0 must be > 0").into();
        assert_eq!(domain.exit_code(), 4);
        assert!(domain.to_string().contains("strain=0"));
    }
}
