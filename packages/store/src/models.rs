//! Records exchanged with the `users` table and the backend API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Identity of a user. The user's name doubles as the primary key of the
/// `users` table, so an id is the name exactly as typed, and only the empty
/// string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Parse a user id. The name is kept byte-for-byte; `" ada"` and `"ada"`
    /// are different users.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        if raw.is_empty() {
            return Err(StoreError::EmptyName);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// A row of the `users` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub channel_id: Option<String>,
    pub message_format: Option<String>,
}

impl UserRecord {
    /// A freshly registered user with no preferences yet.
    pub fn new(name: &UserId) -> Self {
        Self {
            name: name.to_string(),
            channel_id: None,
            message_format: None,
        }
    }
}

/// A notification channel offered by the backend for a given user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// The editable notification preferences of a user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub channel_id: String,
    pub message_format: String,
}

impl Settings {
    /// Overlay the values stored in `record`. Only values that are present
    /// and non-empty replace what is already being edited.
    pub fn overlay_stored(&mut self, record: &UserRecord) {
        if let Some(channel_id) = record.channel_id.as_deref().filter(|c| !c.is_empty()) {
            self.channel_id = channel_id.to_string();
        }
        if let Some(format) = record.message_format.as_deref().filter(|f| !f.is_empty()) {
            self.message_format = format.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_keeps_name_verbatim() {
        let id = UserId::parse("  ada ").unwrap();
        assert_eq!(id.as_str(), "  ada ");
        assert_ne!(id, UserId::parse("ada").unwrap());
    }

    #[test]
    fn test_user_id_rejects_empty() {
        assert!(matches!(UserId::parse(""), Err(StoreError::EmptyName)));
        assert_eq!(UserId::parse("   ").unwrap().as_str(), "   ");
    }

    #[test]
    fn test_user_id_deserialize_validates() {
        let ok: UserId = serde_json::from_str("\"grace\"").unwrap();
        assert_eq!(ok.as_str(), "grace");
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }

    #[test]
    fn test_overlay_keeps_values_missing_from_record() {
        let record = UserRecord {
            name: "ada".to_string(),
            channel_id: Some("C123".to_string()),
            message_format: Some(String::new()),
        };
        let mut settings = Settings {
            channel_id: "C000".to_string(),
            message_format: "draft".to_string(),
        };
        settings.overlay_stored(&record);
        assert_eq!(settings.channel_id, "C123");
        assert_eq!(settings.message_format, "draft");
    }

    #[test]
    fn test_channel_from_backend_json() {
        let channels: Vec<Channel> =
            serde_json::from_str(r#"[{"id":"C1","name":"general"},{"id":"D2","name":"ada"}]"#)
                .unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[1].id, "D2");
    }
}
