//! Who the page is acting for.
//!
//! The page has exactly two states. It starts in [`Session::LoggedOut`] unless
//! the URL carries a `user_id` query parameter (the OAuth callbacks send the
//! browser back with one), and it moves to [`Session::LoggedIn`] after a
//! successful login. There is no way back.

use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Query parameter that resumes a session on page load.
pub const USER_ID_QUERY_PARAM: &str = "user_id";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(UserId),
}

impl Session {
    /// Build the initial session from the raw `user_id` query value.
    /// Only a missing (empty) value leaves the page logged out.
    pub fn from_query(user_id: &str) -> Self {
        UserId::parse(user_id)
            .map(Self::LoggedIn)
            .unwrap_or(Self::LoggedOut)
    }

    pub fn user(&self) -> Option<&UserId> {
        match self {
            Self::LoggedIn(user) => Some(user),
            Self::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_param_logs_in() {
        let session = Session::from_query("ada");
        assert_eq!(session.user().map(UserId::as_str), Some("ada"));
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_missing_query_param_stays_logged_out() {
        assert_eq!(Session::from_query(""), Session::LoggedOut);
        assert!(Session::default().user().is_none());
    }

    #[test]
    fn test_whitespace_query_param_is_a_user() {
        let session = Session::from_query(" ");
        assert_eq!(session.user().map(UserId::as_str), Some(" "));
    }
}
