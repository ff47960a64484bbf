/// Lifecycle of a single fetched resource.
///
/// One value per call site; there is no global cache. The error arm carries
/// a display string rather than the full error so the state stays `Clone`
/// regardless of `T`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Success(T),
    /// The last request failed.
    Error(String),
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    /// The successful value, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Success(data) => Some(data),
            _ => None,
        }
    }

    /// The error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            ResourceState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Fold a `Result` into the corresponding terminal state.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ResourceState::Success(data),
            Err(e) => ResourceState::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        let state: ResourceState<i64> = ResourceState::default();
        assert_eq!(state, ResourceState::Idle);
        assert!(!state.is_loading());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn accessors_match_the_arm() {
        let success = ResourceState::Success(7);
        assert_eq!(success.data(), Some(&7));

        let failure: ResourceState<i64> = ResourceState::Error("boom".into());
        assert_eq!(failure.error(), Some("boom"));
        assert!(!failure.is_loading());
    }

    #[test]
    fn from_result_folds_both_arms() {
        let ok: Result<i64, std::io::Error> = Ok(3);
        assert_eq!(ResourceState::from_result(ok), ResourceState::Success(3));

        let err: Result<i64, String> = Err("nope".to_string());
        assert_eq!(
            ResourceState::from_result(err),
            ResourceState::Error("nope".to_string())
        );
    }
}
