use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry of a conversation, in the order the server returned it. The
/// client never sorts or rewrites history.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Local>,
}

/// The backend stores `datetime.now().isoformat()`, so the wire value is
/// usually a naive local ISO 8601 string; RFC 3339 with an offset is
/// accepted too.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognized timestamp: {}", raw))
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_naive_isoformat() {
        let dt = parse_timestamp("2026-08-06T14:30:05.123456").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2026-08-06T14:30:05+00:00").is_some());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        assert!(parse_timestamp("yesterday-ish").is_none());
    }

    #[test]
    fn decodes_wire_message() {
        let message: Message = serde_json::from_str(
            r#"{"role": "assistant", "content": "hi", "timestamp": "2026-08-06T14:30:05"}"#,
        )
        .unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "hi");
    }

    #[test]
    fn unknown_role_fails_decode() {
        let result: Result<Message, _> = serde_json::from_str(
            r#"{"role": "system", "content": "hi", "timestamp": "2026-08-06T14:30:05"}"#,
        );
        assert!(result.is_err());
    }
}
