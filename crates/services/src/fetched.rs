use crate::error::ApiError;

/// Result of an optional fetch that must never fail the page.
///
/// `Absent` means the backend answered "nothing here" (404); `Errored` keeps
/// the message of any other failure for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Present(T),
    Absent,
    Errored(String),
}

impl<T> Fetched<T> {
    /// Classify an optional call. Failures are logged, never surfaced.
    #[must_use]
    pub fn from_result(what: &'static str, result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Fetched::Present(value),
            Err(err) if err.is_not_found() => {
                tracing::debug!(what, "optional data not available");
                Fetched::Absent
            }
            Err(err) => {
                tracing::debug!(what, error = %err, "optional fetch failed");
                Fetched::Errored(err.user_message())
            }
        }
    }

    #[must_use]
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Fetched::Present(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Present(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Fetched::Present(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn not_found_is_absent() {
        let fetched: Fetched<u32> = Fetched::from_result(
            "recommendation",
            Err(ApiError::status(StatusCode::NOT_FOUND, "No recommendations")),
        );
        assert_eq!(fetched, Fetched::Absent);
        assert!(fetched.as_option().is_none());
    }

    #[test]
    fn other_failures_are_errored() {
        let fetched: Fetched<u32> = Fetched::from_result(
            "agent status",
            Err(ApiError::status(StatusCode::UNAUTHORIZED, "Not logged in")),
        );
        assert_eq!(fetched, Fetched::Errored("Not logged in".into()));
    }

    #[test]
    fn success_is_present() {
        let fetched = Fetched::from_result("tips", Ok::<_, ApiError>(5));
        assert!(fetched.is_present());
        assert_eq!(fetched.into_option(), Some(5));
    }
}
