//! Formatting helpers for cards and collaborator rows

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Placeholder for timestamps that cannot be read
pub const UNKNOWN_TIME: &str = "\u{2014}";

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Zone-less timestamps are taken as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn plural(count: i64, unit: &str) -> String {
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}

/// "5 minutes ago", "3 days ago", ... or "Mar 5, 2024" once 30 days have passed
pub fn relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(timestamp) else {
        return UNKNOWN_TIME.to_string();
    };

    let elapsed = (now - then).max(chrono::Duration::zero());
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if days < 30 {
        plural(days / 7, "week")
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}

/// Relative time against the current clock
pub fn relative_time_now(timestamp: &str) -> String {
    relative_time(timestamp, Utc::now())
}

/// Avatar initials from a name, else the email's local part, else "?"
pub fn initials(name: Option<&str>, email: Option<&str>) -> String {
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        let parts: Vec<&str> = name.split_whitespace().collect();
        let letters: String = match parts.as_slice() {
            [first, .., last] => first.chars().take(1).chain(last.chars().take(1)).collect(),
            _ => name.chars().take(2).collect(),
        };
        return letters.to_uppercase();
    }

    let local = email
        .map(str::trim)
        .and_then(|email| email.split('@').next())
        .unwrap_or("");
    if local.is_empty() {
        return "?".to_string();
    }
    local.chars().take(2).collect::<String>().to_uppercase()
}
