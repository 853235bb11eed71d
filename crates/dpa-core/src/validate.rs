//! Rejection rules for profile text captured from page chrome instead of
//! from the account owner.

use std::sync::LazyLock;

use regex::Regex;

/// Substrings that mark a bio candidate as UI text rather than a real bio.
const BIO_DENYLIST: &[&str] = &[
    "followers",
    "following",
    "posts",
    "reels",
    "tagged",
    "follow",
    "message",
    "share",
    "more",
    "edit profile",
    "view profile",
    "story highlights",
    "highlights",
    "activity",
    "archive",
    "settings",
    "switch accounts",
    "log out",
    "meta",
    "about",
    "help",
    "press",
    "api",
    "jobs",
    "privacy",
    "terms",
    "locations",
    "language",
];

/// Usernames that are navigation labels, compared against the whole name.
const USERNAME_DENYLIST: &[&str] = &[
    "followers",
    "following",
    "posts",
    "reels",
    "tagged",
    "follow",
    "message",
    "share",
    "more",
    "edit profile",
    "view profile",
    "story highlights",
    "highlights",
];

const BIO_MIN_CHARS: usize = 10;
const BIO_MAX_CHARS: usize = 500;
const USERNAME_MAX_CHARS: usize = 30;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._]+$").expect("valid username regex")
});

/// Returns `true` when `bio` looks like text the account owner wrote.
#[must_use]
pub fn is_valid_bio(bio: &str) -> bool {
    let len = bio.chars().count();
    if !(BIO_MIN_CHARS..=BIO_MAX_CHARS).contains(&len) {
        return false;
    }
    let lowered = bio.to_lowercase();
    !BIO_DENYLIST.iter().any(|term| lowered.contains(term))
}

/// Returns `true` when `username` is a plausible profile handle.
///
/// One leading `@` is ignored.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    let name = username.strip_prefix('@').unwrap_or(username);
    let len = name.chars().count();
    if len == 0 || len > USERNAME_MAX_CHARS {
        return false;
    }
    if !USERNAME_RE.is_match(name) {
        return false;
    }
    if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return false;
    }
    let lowered = name.to_lowercase();
    !USERNAME_DENYLIST.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bio_accepts_owner_text() {
        assert!(is_valid_bio("Hello world, welcome!"));
    }

    #[test]
    fn bio_rejects_ui_labels() {
        assert!(!is_valid_bio("Followers"));
        assert!(!is_valid_bio("1,234 followers and counting"));
        assert!(!is_valid_bio("Tap to EDIT PROFILE now"));
    }

    #[test]
    fn bio_rejects_empty_and_short() {
        assert!(!is_valid_bio(""));
        assert!(!is_valid_bio("Hi there"));
    }

    #[test]
    fn bio_length_bounds_are_inclusive() {
        assert!(is_valid_bio(&"x".repeat(10)));
        assert!(is_valid_bio(&"x".repeat(500)));
        assert!(!is_valid_bio(&"x".repeat(501)));
    }

    #[test]
    fn bio_denylist_matches_inside_words() {
        // "api" inside "capital" is enough to reject.
        assert!(!is_valid_bio("Best bakery in the capital city"));
    }

    #[test]
    fn username_accepts_common_handles() {
        assert!(is_valid_username("john.doe_99"));
        assert!(is_valid_username("@acme"));
        assert!(is_valid_username("a"));
    }

    #[test]
    fn username_rejects_bad_dots() {
        assert!(!is_valid_username("john..doe"));
        assert!(!is_valid_username(".johndoe"));
        assert!(!is_valid_username("johndoe."));
    }

    #[test]
    fn username_rejects_navigation_words() {
        assert!(!is_valid_username("followers"));
        assert!(!is_valid_username("@Highlights"));
    }

    #[test]
    fn username_rejects_bad_length_and_charset() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("@"));
        assert!(!is_valid_username(&"a".repeat(31)));
        assert!(is_valid_username(&"a".repeat(30)));
        assert!(!is_valid_username("john doe"));
        assert!(!is_valid_username("john-doe"));
    }
}
