use chrono::{DateTime, Local};

/// Human-friendly rendering of elapsed time since `timestamp`. Anything
/// under a minute (including a timestamp in the future) is "Just now";
/// beyond a week the absolute date is shown. `now` is an explicit argument
/// so the function stays pure; callers pass `Local::now()`.
pub fn relative_time(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(timestamp);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }

    let days = elapsed.num_days();
    if days < 7 {
        return format!("{} day{} ago", days, plural(days));
    }

    timestamp.format("%b %-d, %Y, %H:%M").to_string()
}

fn plural(count: i64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

/// Message content flows into Pango markup, so every character that could
/// open or close markup structure is encoded. Ampersand first.
pub fn escape_for_display(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn under_a_minute_is_just_now() {
        let now = at(2026, 8, 6, 12, 0, 0);
        assert_eq!(relative_time(now - Duration::seconds(59), now), "Just now");
        assert_eq!(relative_time(now, now), "Just now");
    }

    #[test]
    fn future_timestamps_fall_into_just_now() {
        let now = at(2026, 8, 6, 12, 0, 0);
        assert_eq!(relative_time(now + Duration::hours(2), now), "Just now");
        assert_eq!(relative_time(now + Duration::days(30), now), "Just now");
    }

    #[test]
    fn minutes_pluralize_above_one() {
        let now = at(2026, 8, 6, 12, 0, 0);
        assert_eq!(
            relative_time(now - Duration::seconds(90), now),
            "1 minute ago"
        );
        assert_eq!(
            relative_time(now - Duration::minutes(2), now),
            "2 minutes ago"
        );
        assert_eq!(
            relative_time(now - Duration::minutes(59), now),
            "59 minutes ago"
        );
    }

    #[test]
    fn hours_bucket() {
        let now = at(2026, 8, 6, 12, 0, 0);
        assert_eq!(relative_time(now - Duration::minutes(60), now), "1 hour ago");
        assert_eq!(relative_time(now - Duration::hours(23), now), "23 hours ago");
    }

    #[test]
    fn days_bucket() {
        let now = at(2026, 8, 6, 12, 0, 0);
        assert_eq!(relative_time(now - Duration::hours(24), now), "1 day ago");
        assert_eq!(relative_time(now - Duration::days(6), now), "6 days ago");
    }

    #[test]
    fn a_week_or_more_shows_the_absolute_date() {
        let now = at(2026, 8, 6, 12, 0, 0);
        let timestamp = at(2026, 1, 5, 9, 30, 0);
        assert_eq!(relative_time(timestamp, now), "Jan 5, 2026, 09:30");
    }

    #[test]
    fn escapes_script_tags() {
        let escaped = escape_for_display("<script>alert('hi')</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(
            escaped,
            "&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_for_display(r#"& < > " '"#),
            "&amp; &lt; &gt; &quot; &#39;"
        );
    }

    #[test]
    fn already_escaped_text_is_escaped_again() {
        assert_eq!(escape_for_display("&lt;"), "&amp;lt;");
    }
}
