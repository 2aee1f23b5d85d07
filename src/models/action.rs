//! Activation request and response models.

use serde::Serialize;
use std::fmt;

/// Requested activation pattern. Created per request, discarded after the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Lock,
    Unlock,
    Engine,
}

impl Action {
    /// Rate-limit bucket this action is counted against.
    pub fn route_group(self) -> RouteGroup {
        match self {
            Action::Lock | Action::Unlock => RouteGroup::Doors,
            Action::Engine => RouteGroup::Engine,
        }
    }

    /// Status text returned on success.
    pub fn status_message(self) -> &'static str {
        match self {
            Action::Lock => "Lock activated!",
            Action::Unlock => "Unlock activated!",
            Action::Engine => "Engine activated!",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Lock => f.write_str("lock"),
            Action::Unlock => f.write_str("unlock"),
            Action::Engine => f.write_str("engine"),
        }
    }
}

/// Named bucket of routes sharing one rate-limit policy.
///
/// - `Doors`: /lock and /unlock
/// - `Engine`: /engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Doors,
    Engine,
}

impl fmt::Display for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteGroup::Doors => f.write_str("doors"),
            RouteGroup::Engine => f.write_str("engine"),
        }
    }
}

/// Successful activation response.
///
/// # Example
///
/// ```json
/// {
///   "status": "Lock activated!"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: String,
}

impl From<Action> for ActionResponse {
    fn from(action: Action) -> Self {
        Self {
            status: action.status_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_and_unlock_share_a_group() {
        assert_eq!(Action::Lock.route_group(), RouteGroup::Doors);
        assert_eq!(Action::Unlock.route_group(), RouteGroup::Doors);
        assert_eq!(Action::Engine.route_group(), RouteGroup::Engine);
    }

    #[test]
    fn test_response_body() {
        let body = serde_json::to_value(ActionResponse::from(Action::Unlock)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "Unlock activated!" }));
    }
}
