use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Problem Records ────────────────────────────────────────────────────────

/// One practice entry exactly as the API sends it. Field names on the wire
/// are capitalized (`Problem`, `Difficult`, …); we keep idiomatic names here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRecord {
    #[serde(rename = "Problem")]
    pub problem: String,
    #[serde(rename = "Difficult")]
    pub difficulty: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Status")]
    pub status: String,
    /// Zero-padded `DD-MM-YYYY`.
    #[serde(rename = "Date")]
    pub date: String,
}

impl ProblemRecord {
    /// `"Completed"` marks a problem as solved; any other status does not.
    pub fn is_completed(&self) -> bool {
        self.status == "Completed"
    }
}

/// A record whose `Date` string has been resolved to a calendar day once at
/// load time. `day` always round-trips to the source string under DD-MM-YYYY.
#[derive(Debug, Clone)]
pub struct ParsedProblem {
    pub record: ProblemRecord,
    pub day: NaiveDate,
}

// ─── Difficulty ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Exact match against the wire strings. Anything else is unrecognized
    /// and stays out of the per-difficulty stats.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Self::Easy),
            "Medium" => Some(Self::Medium),
            "Hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_field_names() {
        let json = r#"{
            "Problem": "Two Sum",
            "Difficult": "Easy",
            "Language": "Python",
            "Status": "Completed",
            "Date": "01-03-2024"
        }"#;
        let record: ProblemRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.problem, "Two Sum");
        assert_eq!(record.difficulty, "Easy");
        assert_eq!(record.language, "Python");
        assert!(record.is_completed());
        assert_eq!(record.date, "01-03-2024");
    }

    #[test]
    fn difficulty_parse_is_exact() {
        assert_eq!(Difficulty::parse("Easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("Medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("easy"), None);
        assert_eq!(Difficulty::parse("Extreme"), None);
    }

    #[test]
    fn attempted_status_is_not_completed() {
        let record = ProblemRecord {
            problem: "Word Ladder".into(),
            difficulty: "Hard".into(),
            language: "Rust".into(),
            status: "Attempted".into(),
            date: "05-01-2024".into(),
        };
        assert!(!record.is_completed());
    }
}
