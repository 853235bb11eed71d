use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use dpa_core::{
    AdFindings, Competitor, MarketFindings, ProfileRecord, ReviewFindings, SectionKind,
    SeoFindings, Signal, Snippet, SocialFindings,
};

use super::website::{CRO_ITEM, PERFORMANCE_ITEM, SEO_CONTENT_ITEM, UX_ITEM};
use super::*;
use crate::scorer::score;

fn page() -> AttributeRecord {
    let mut r = AttributeRecord::new("https://pousada.example.com");
    r.status_code = Some(200);
    r.load_time_secs = Some(1.4);
    r.title = Some("Pousada Mar Azul - Beachfront inn in Pipa".to_string());
    r.platform = Some("WordPress".to_string());
    r
}

fn snippet(text: &str) -> Snippet {
    Snippet {
        title: "Result".to_string(),
        url: "https://reviews.example.org/1".to_string(),
        text: text.to_string(),
    }
}

fn signals() -> SearchSignals {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "facebook".to_string(),
        vec!["https://facebook.com/pousada".to_string()],
    );
    platforms.insert("instagram".to_string(), Vec::new());
    SearchSignals {
        domain: "pousada.example.com".to_string(),
        seo: Signal::Found(SeoFindings {
            indexed_pages: 12,
            snippets: vec![],
        }),
        social: Signal::Found(SocialFindings { platforms }),
        ads: Signal::Found(AdFindings::default()),
        reputation: Signal::Found(ReviewFindings {
            snippets: vec![
                snippet("Excellent stay, I recommend it"),
                snippet("Quarto ótimo mas atendimento ruim"),
            ],
        }),
        market: Signal::Found(MarketFindings {
            competitors: vec![
                Competitor {
                    name: "Hotel A".to_string(),
                    url: "https://a.example".to_string(),
                },
                Competitor {
                    name: "Resort B".to_string(),
                    url: "https://b.example".to_string(),
                },
            ],
        }),
    }
}

fn profile_record() -> ProfileRecord {
    ProfileRecord {
        url: "https://www.instagram.com/pousada/".to_string(),
        username: Some("pousada".to_string()),
        followers: Some(12_500),
        following: Some(310),
        posts_count: None,
        last_post_date: None,
        bio: Some("Followers".to_string()),
        has_profile_picture: true,
        is_business_account: false,
    }
}

fn lines(report: &NarrativeReport, kind: SectionKind) -> Vec<String> {
    report
        .section(kind)
        .map(|s| s.lines.clone())
        .unwrap_or_default()
}

#[test]
fn website_only_report_has_four_sections() {
    let record = page();
    let report = assemble(&record, &score(Some(&record)), None, None);
    let kinds: Vec<_> = report.sections.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Platform,
            SectionKind::ScoreSummary,
            SectionKind::Improvements,
            SectionKind::MarketingNeeds,
        ]
    );
}

#[test]
fn platform_section_reports_platform_and_status() {
    let record = page();
    let report = assemble(&record, &score(Some(&record)), None, None);
    let platform = lines(&report, SectionKind::Platform);
    assert_eq!(platform[0], "Platform: WordPress");
    assert_eq!(platform[1], "Developer: not identified");
    assert_eq!(platform[2], "Operational status: the site is active and operational");
    assert_eq!(platform[3], "Security: SSL certificate (HTTPS) in place");
}

#[test]
fn platform_section_flags_missing_platform_and_ssl() {
    let mut record = AttributeRecord::new("http://plain.example.com");
    record.status_code = Some(503);
    let report = assemble(&record, &score(Some(&record)), None, None);
    let platform = lines(&report, SectionKind::Platform);
    assert_eq!(platform[0], "Platform: platform not identified");
    assert!(platform[2].contains("could not be confirmed"));
    assert!(platform[3].contains("security concern"));
}

#[test]
fn failed_fetch_still_renders_every_website_section() {
    let record = AttributeRecord::failed("https://down.example.com", "connection refused");
    let report = assemble(&record, &score(Some(&record)), None, None);
    assert_eq!(report.sections.len(), 4);
    assert!(report.sections.iter().all(|s| !s.lines.is_empty()));
    let platform = lines(&report, SectionKind::Platform);
    assert!(platform.contains(&"Operational status: could not be confirmed".to_string()));
    assert!(platform.contains(&"Fetch error: connection refused".to_string()));
    assert!(lines(&report, SectionKind::ScoreSummary)
        .contains(&"Site score: 0/100".to_string()));
}

#[test]
fn slow_site_gets_performance_item_first() {
    let mut record = page();
    record.load_time_secs = Some(4.2);
    let report = assemble(&record, &score(Some(&record)), None, None);
    assert_eq!(
        lines(&report, SectionKind::Improvements),
        vec![PERFORMANCE_ITEM, CRO_ITEM, UX_ITEM]
    );
}

#[test]
fn fast_site_gets_seo_content_item_first() {
    let record = page();
    let report = assemble(&record, &score(Some(&record)), None, None);
    assert_eq!(
        lines(&report, SectionKind::Improvements),
        vec![SEO_CONTENT_ITEM, CRO_ITEM, UX_ITEM]
    );
}

#[test]
fn marketing_needs_always_has_two_items() {
    let record = page();
    let report = assemble(&record, &score(Some(&record)), None, None);
    assert_eq!(lines(&report, SectionKind::MarketingNeeds).len(), 2);
}

#[test]
fn search_section_narrates_each_category() {
    let record = page();
    let signals = signals();
    let report = assemble(&record, &score(Some(&record)), Some(&signals), None);
    let presence = lines(&report, SectionKind::SearchPresence);
    assert!(presence[0].starts_with("SEO status: 12 indexed pages"));
    assert_eq!(
        presence[1],
        "Social presence: limited social presence (found: facebook)"
    );
    assert_eq!(presence[2], "Advertising: low advertising presence detected");
    // excellent + recommend + ótimo against ruim.
    assert_eq!(
        presence[3],
        "Online reputation: 2 reviews found (sentiment: positive)"
    );
    assert_eq!(presence[4], "Market: 2 competitors identified");
}

#[test]
fn two_platforms_is_not_limited() {
    let record = page();
    let mut signals = signals();
    if let Signal::Found(social) = &mut signals.social {
        social.platforms.insert(
            "instagram".to_string(),
            vec!["https://instagram.com/pousada".to_string()],
        );
    }
    let report = assemble(&record, &score(Some(&record)), Some(&signals), None);
    assert_eq!(
        lines(&report, SectionKind::SearchPresence)[1],
        "Social presence: platforms found: facebook, instagram"
    );
}

#[test]
fn unavailable_categories_render_could_not_be_evaluated() {
    let record = page();
    let signals = SearchSignals::unavailable("pousada.example.com", "search timed out");
    let report = assemble(&record, &score(Some(&record)), Some(&signals), None);
    let presence = lines(&report, SectionKind::SearchPresence);
    assert_eq!(presence.len(), 5);
    assert!(presence.iter().all(|l| l.ends_with(NOT_EVALUATED)));
}

#[test]
fn strategies_are_capped_per_group() {
    let record = page();
    let signals = signals();
    let report = assemble(&record, &score(Some(&record)), Some(&signals), None);
    let strategies = lines(&report, SectionKind::SearchStrategies);
    assert_eq!(strategies.len(), 3 * (1 + MAX_STRATEGIES_PER_GROUP));
    assert_eq!(strategies[0], "SEO and online visibility:");
    assert!(strategies[1].starts_with("• "));
}

#[test]
fn disabled_profile_renders_single_placeholder() {
    let record = page();
    let capture = ProfileCapture::disabled("pousada");
    let report = assemble(&record, &score(Some(&record)), None, Some(&capture));
    let section = report.section(SectionKind::Profile).unwrap();
    assert_eq!(section.title, "Instagram profile: @pousada");
    assert_eq!(section.lines.len(), 1);
    assert!(section.lines[0].starts_with("Automated profile analysis disabled"));
}

#[test]
fn unavailable_profile_renders_single_line() {
    let record = page();
    let capture = ProfileCapture::Unavailable {
        handle: "pousada".to_string(),
        reason: "HTTP 429".to_string(),
    };
    let report = assemble(&record, &score(Some(&record)), None, Some(&capture));
    assert_eq!(
        lines(&report, SectionKind::Profile),
        vec!["Profile could not be analyzed: HTTP 429"]
    );
}

#[test]
fn captured_profile_flags_invalid_bio_and_no_activity() {
    let record = page();
    let capture = ProfileCapture::Profile(profile_record());
    let report = assemble(&record, &score(Some(&record)), None, Some(&capture));
    let profile = lines(&report, SectionKind::Profile);
    assert_eq!(profile[0], "Audience: 12.5K followers, 310 following, N/A posts");
    assert_eq!(profile[1], "Bio: missing or incomplete");
    assert_eq!(profile[2], "Profile picture: present");
    assert_eq!(profile[3], "Activity: no recent activity");
    assert_eq!(profile[4], "Account type: personal");
    assert!(profile.len() > 6, "expected strategy bullets: {profile:?}");
}

#[test]
fn captured_profile_with_activity_and_business_account() {
    let record = page();
    let capture = ProfileCapture::Profile(ProfileRecord {
        bio: Some("Beachfront inn in Pipa, breakfast included.".to_string()),
        last_post_date: Some(Utc.with_ymd_and_hms(2026, 9, 30, 12, 0, 0).unwrap()),
        posts_count: Some(340),
        is_business_account: true,
        ..profile_record()
    });
    let report = assemble(&record, &score(Some(&record)), None, Some(&capture));
    let profile = lines(&report, SectionKind::Profile);
    assert_eq!(profile[1], "Bio: complete");
    assert_eq!(profile[3], "Activity: last post on 2026-09-30");
    assert_eq!(profile[4], "Account type: business");
}

#[test]
fn flattened_text_follows_section_layout() {
    let record = page();
    let report = assemble(&record, &score(Some(&record)), None, None);
    let text_lines: Vec<&str> = report.text.split('\n').collect();
    assert_eq!(text_lines[0], "Website analysis: https://pousada.example.com");
    assert_eq!(text_lines[1], "");
    assert_eq!(text_lines[2], "Platform: WordPress");
    assert_eq!(text_lines[3], "");
    assert_eq!(*text_lines.last().unwrap(), CALL_TO_ACTION);
    let expected_len: usize = report
        .sections
        .iter()
        .map(|s| 2 + 2 * s.lines.len())
        .sum::<usize>()
        + 1;
    assert_eq!(text_lines.len(), expected_len);
}

#[test]
fn flatten_with_no_sections_is_just_the_call_to_action() {
    assert_eq!(flatten(&[]), CALL_TO_ACTION);
}

#[test]
fn assembly_is_deterministic() {
    let record = page();
    let signals = signals();
    let capture = ProfileCapture::Profile(profile_record());
    let s = score(Some(&record));
    let a = assemble(&record, &s, Some(&signals), Some(&capture));
    let b = assemble(&record, &s, Some(&signals), Some(&capture));
    assert_eq!(a, b);
}
