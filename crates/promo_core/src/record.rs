//! Participant records and their on-disk line format

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between fields of a persisted record line.
pub const FIELD_DELIMITER: &str = ",";

/// Registration timestamps are kept at minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const FIELD_COUNT: usize = 5;

/// Stable identity of a chat participant.
///
/// Transports hand out either numeric or textual ids; both are kept as text.
/// Serialized as a string, deserialized from either a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "RawUserId")]
pub struct UserId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Signed(i64),
    Unsigned(u64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Signed(id) => Self(id.to_string()),
            RawUserId::Unsigned(id) => Self(id.to_string()),
            RawUserId::Text(id) => Self(id),
        }
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
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

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Drop delimiters and control characters from a field that must not span
/// columns or lines.
fn single_field(value: &str) -> String {
    value
        .chars()
        .filter(|c| !FIELD_DELIMITER.contains(*c) && !c.is_control())
        .collect()
}

/// One completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub code: String,
    pub registered_at: String,
}

impl ParticipantRecord {
    /// Build a record stamped with `registered_at` in its own time zone.
    ///
    /// Line breaks in the name are folded into spaces, and delimiters and
    /// control characters are dropped from the user id and phone, so a
    /// record always occupies exactly one line of the log.
    pub fn new(
        user_id: &UserId,
        name: &str,
        phone: &str,
        code: impl Into<String>,
        registered_at: DateTime<Tz>,
    ) -> Self {
        Self {
            user_id: single_field(user_id.as_str()),
            name: name.replace(['\r', '\n'], " "),
            phone: single_field(phone),
            code: code.into(),
            registered_at: registered_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Serialize as a single log line, without the trailing newline.
    ///
    /// Fields are not escaped: a delimiter inside a name ends up in the
    /// line verbatim.
    pub fn to_line(&self) -> String {
        [
            self.user_id.as_str(),
            self.name.as_str(),
            self.phone.as_str(),
            self.code.as_str(),
            self.registered_at.as_str(),
        ]
        .join(FIELD_DELIMITER)
    }

    /// Parse one log line.
    ///
    /// The first field is the user id and the last three are phone, code
    /// and date; none of those can contain the delimiter, so whatever sits
    /// between them is the name, commas included.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() < FIELD_COUNT {
            return None;
        }

        let last = fields.len();
        Some(Self {
            user_id: fields[0].to_string(),
            name: fields[1..last - 3].join(FIELD_DELIMITER),
            phone: fields[last - 3].to_string(),
            code: fields[last - 2].to_string(),
            registered_at: fields[last - 1].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tashkent(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        chrono_tz::Asia::Tashkent
            .with_ymd_and_hms(y, m, d, h, min, 42)
            .unwrap()
    }

    #[test]
    fn test_user_id_accepts_numbers_and_text() {
        let numeric: UserId = serde_json::from_str("6434717615").unwrap();
        let text: UserId = serde_json::from_str("\"6434717615\"").unwrap();
        let negative: UserId = serde_json::from_str("-100200").unwrap();

        assert_eq!(numeric, text);
        assert_eq!(negative.as_str(), "-100200");
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "\"6434717615\"");
        assert!(serde_json::from_str::<UserId>("1.5").is_err());
    }

    #[test]
    fn test_new_formats_timestamp_to_minutes() {
        let record = ParticipantRecord::new(
            &UserId::from(42i64),
            "Ali Valiyev",
            "+998901234567",
            "USMON1A2B3C4D",
            tashkent(2025, 6, 1, 9, 5),
        );

        assert_eq!(record.user_id, "42");
        assert_eq!(record.registered_at, "2025-06-01 09:05");
    }

    #[test]
    fn test_line_layout() {
        let record = ParticipantRecord::new(
            &UserId::from(7i64),
            "Ali Valiyev",
            "+998901234567",
            "USMON1A2B3C4D",
            tashkent(2025, 6, 1, 18, 30),
        );

        assert_eq!(
            record.to_line(),
            "7,Ali Valiyev,+998901234567,USMON1A2B3C4D,2025-06-01 18:30"
        );
        assert_eq!(ParticipantRecord::parse_line(&record.to_line()), Some(record));
    }

    #[test]
    fn test_parse_keeps_commas_in_name() {
        let parsed =
            ParticipantRecord::parse_line("9,Valiyev, Ali,998901234567,USMONAAAA1111,2025-01-02 03:04\n")
                .unwrap();

        assert_eq!(parsed.name, "Valiyev, Ali");
        assert_eq!(parsed.phone, "998901234567");
        assert_eq!(parsed.code, "USMONAAAA1111");
    }

    #[test]
    fn test_parse_rejects_short_lines() {
        assert!(ParticipantRecord::parse_line("1,Ali,+998901234567").is_none());
        assert!(ParticipantRecord::parse_line("").is_none());
    }

    #[test]
    fn test_new_keeps_phone_in_one_field() {
        let record = ParticipantRecord::new(
            &UserId::from(5i64),
            "Ali",
            "998901234567\n666,Forged,+1234567,USMONFORGED00,2020-01-01 00:00",
            "USMON11112222",
            tashkent(2025, 1, 1, 0, 0),
        );

        assert!(!record.phone.contains(FIELD_DELIMITER));
        assert!(!record.to_line().contains('\n'));
        let parsed = ParticipantRecord::parse_line(&record.to_line()).unwrap();
        assert_eq!(parsed.code, "USMON11112222");
        assert_eq!(parsed.user_id, "5");
    }

    #[test]
    fn test_new_keeps_user_id_in_one_field() {
        let record = ParticipantRecord::new(
            &UserId::from("7\n8,Forged"),
            "Ali",
            "1234567",
            "USMON11112222",
            tashkent(2025, 1, 1, 0, 0),
        );

        assert_eq!(record.user_id, "78Forged");
        assert_eq!(ParticipantRecord::parse_line(&record.to_line()).unwrap().name, "Ali");
    }

    #[test]
    fn test_new_folds_line_breaks_in_name() {
        let record = ParticipantRecord::new(
            &UserId::from("u1"),
            "Ali\nValiyev",
            "1234567",
            "USMON00000000",
            tashkent(2025, 1, 1, 0, 0),
        );
        assert_eq!(record.name, "Ali Valiyev");
        assert!(!record.to_line().contains('\n'));
    }
}
