//! Uniform call results

use std::fmt::Display;

use serde::Serialize;

/// Result shape returned by every fallible storefront call.
///
/// Exactly one of `data` and `error` is set, matching `success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome<T> {
    /// Whether the call succeeded.
    pub success: bool,

    /// Payload of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Message of a failed call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Convert back into a `Result`, with the failure message as the error.
    ///
    /// # Errors
    ///
    /// Returns the failure message when the call did not succeed.
    pub fn into_result(self) -> Result<T, String> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(self.error.unwrap_or_default()),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn failure_serializes_without_data() -> TestResult {
        let outcome = Outcome::<()>::failure("boom");

        assert_eq!(
            serde_json::to_value(&outcome)?,
            serde_json::json!({ "success": false, "error": "boom" })
        );

        Ok(())
    }

    #[test]
    fn converts_from_result() {
        let ok: Outcome<u8> = Ok::<u8, String>(7).into();
        let err: Outcome<u8> = Err::<u8, String>("nope".to_string()).into();

        assert_eq!(ok.into_result(), Ok(7));
        assert_eq!(err.error(), Some("nope"));
        assert_eq!(err.into_result(), Err("nope".to_string()));
    }
}
