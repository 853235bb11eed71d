//! Profile section, one shape per capture outcome.

use dpa_core::{
    format_count, is_valid_bio, NarrativeSection, ProfileCapture, ProfileRecord, SectionKind,
};

use super::render::{render_section, LineItem};

pub const NO_RECENT_ACTIVITY: &str = "no recent activity";

pub(super) fn profile_section(capture: &ProfileCapture) -> NarrativeSection {
    match capture {
        ProfileCapture::Profile(record) => captured_section(record),
        ProfileCapture::Disabled { handle, message } => render_section(
            SectionKind::Profile,
            format!("Instagram profile: @{handle}"),
            &[LineItem::labeled(
                "Automated profile analysis disabled",
                Some(message.clone()),
                "",
            )],
        ),
        ProfileCapture::Unavailable { handle, reason } => render_section(
            SectionKind::Profile,
            format!("Instagram profile: @{handle}"),
            &[LineItem::labeled(
                "Profile could not be analyzed",
                Some(reason.clone()),
                "",
            )],
        ),
    }
}

fn captured_section(record: &ProfileRecord) -> NarrativeSection {
    let title = match &record.username {
        Some(name) => format!("Instagram profile: @{name}"),
        None => format!("Instagram profile: {}", record.url),
    };
    let bio_ok = record.bio.as_deref().is_some_and(is_valid_bio);

    let audience = format!(
        "{} followers, {} following, {} posts",
        format_count(record.followers),
        format_count(record.following),
        format_count(record.posts_count)
    );
    let activity = if let Some(date) = record.last_post_date {
        Some(format!("last post on {}", date.format("%Y-%m-%d")))
    } else if record.has_recent_activity() {
        Some(format!(
            "{} posts published",
            format_count(record.posts_count)
        ))
    } else {
        None
    };

    let mut items = vec![
        LineItem::labeled("Audience", Some(audience), ""),
        LineItem::labeled(
            "Bio",
            Some(if bio_ok { "complete" } else { "missing or incomplete" }.to_string()),
            "",
        ),
        LineItem::labeled(
            "Profile picture",
            Some(if record.has_profile_picture { "present" } else { "missing" }.to_string()),
            "",
        ),
        LineItem::labeled("Activity", activity, NO_RECENT_ACTIVITY),
        LineItem::labeled(
            "Account type",
            Some(if record.is_business_account { "business" } else { "personal" }.to_string()),
            "",
        ),
        LineItem::text("Recommended strategies:"),
    ];
    items.extend(strategies(record, bio_ok).into_iter().map(LineItem::bullet));
    render_section(SectionKind::Profile, title, &items)
}

fn strategies(record: &ProfileRecord, bio_ok: bool) -> Vec<&'static str> {
    let mut out = Vec::new();
    if !record.is_business_account {
        out.push("Switch to a business account to unlock insights and contact buttons");
    }
    if !bio_ok {
        out.push("Write a bio that says what the business offers and how to reach it");
    }
    if !record.has_profile_picture {
        out.push("Use the brand logo as the profile picture");
    }
    if !record.has_recent_activity() {
        out.push("Resume regular posting to show the business is active");
    }
    out.push("Plan content with a weekly calendar mixing posts, reels and stories");
    out
}
