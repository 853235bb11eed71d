use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile facts captured from a social profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub url: String,
    pub username: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub posts_count: Option<u64>,
    pub last_post_date: Option<DateTime<Utc>>,
    /// Raw bio candidate; may still be UI text, see [`crate::is_valid_bio`].
    pub bio: Option<String>,
    pub has_profile_picture: bool,
    pub is_business_account: bool,
}

impl ProfileRecord {
    /// Whether any sign of posting activity was resolved.
    #[must_use]
    pub fn has_recent_activity(&self) -> bool {
        self.last_post_date.is_some() || self.posts_count.is_some_and(|n| n > 0)
    }
}

/// Outcome of the profile extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProfileCapture {
    /// Profile automation is switched off; nothing was fetched.
    Disabled { handle: String, message: String },
    Profile(ProfileRecord),
    /// Automation is on but the fetch or parse failed.
    Unavailable { handle: String, reason: String },
}

impl ProfileCapture {
    #[must_use]
    pub fn disabled(handle: impl Into<String>) -> Self {
        ProfileCapture::Disabled {
            handle: handle.into(),
            message: "profile scraping is disabled; analyze the profile manually".to_string(),
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        match self {
            ProfileCapture::Disabled { handle, .. } | ProfileCapture::Unavailable { handle, .. } => {
                Some(handle)
            }
            ProfileCapture::Profile(record) => record.username.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProfileRecord {
        ProfileRecord {
            url: "https://www.instagram.com/acme/".to_string(),
            username: Some("acme".to_string()),
            followers: Some(1200),
            following: Some(80),
            posts_count: None,
            last_post_date: None,
            bio: None,
            has_profile_picture: true,
            is_business_account: false,
        }
    }

    #[test]
    fn no_activity_without_date_or_posts() {
        assert!(!record().has_recent_activity());
        let zero = ProfileRecord {
            posts_count: Some(0),
            ..record()
        };
        assert!(!zero.has_recent_activity());
    }

    #[test]
    fn positive_post_count_counts_as_activity() {
        let rec = ProfileRecord {
            posts_count: Some(3),
            ..record()
        };
        assert!(rec.has_recent_activity());
    }

    #[test]
    fn disabled_capture_serializes_state_tag() {
        let json = serde_json::to_value(ProfileCapture::disabled("acme")).unwrap();
        assert_eq!(json["state"], "disabled");
        assert_eq!(json["handle"], "acme");
    }

    #[test]
    fn handle_is_available_for_every_variant() {
        assert_eq!(ProfileCapture::disabled("a").handle(), Some("a"));
        assert_eq!(ProfileCapture::Profile(record()).handle(), Some("acme"));
    }
}
