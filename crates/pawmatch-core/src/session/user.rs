use serde::{Deserialize, Serialize};

/// The participant using this device.
///
/// `likes` keeps insertion order so the vote code is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub user_id: String,
    pub user_name: String,
    pub likes: Vec<String>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self {
            user_id: "1".to_string(),
            user_name: "Anfitrión".to_string(),
            likes: Vec::new(),
        }
    }
}

impl UserSession {
    /// Identity taken when generating names for others to join.
    pub fn into_host(self) -> Self {
        Self {
            user_id: "host".to_string(),
            user_name: "Tú".to_string(),
            likes: self.likes,
        }
    }

    /// Identity taken when joining someone else's session.
    pub fn into_guest(self) -> Self {
        Self {
            user_id: "guest".to_string(),
            user_name: "Tú".to_string(),
            likes: self.likes,
        }
    }

    pub fn like(&mut self, candidate_id: impl Into<String>) {
        self.likes.push(candidate_id.into());
    }
}
