//! Assessment and plan data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of daily practices in every plan.
pub const PLAN_DAYS: u32 = 21;

/// The four cardinal virtues.
///
/// Declaration order is significant: it is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virtue {
    Wisdom,
    Courage,
    Justice,
    Temperance,
}

impl Virtue {
    /// All virtues in tie-break order.
    pub const ALL: [Virtue; 4] = [
        Virtue::Wisdom,
        Virtue::Courage,
        Virtue::Justice,
        Virtue::Temperance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wisdom => "wisdom",
            Self::Courage => "courage",
            Self::Justice => "justice",
            Self::Temperance => "temperance",
        }
    }
}

impl std::fmt::Display for Virtue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content framing chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Door {
    Christian,
    Secular,
}

impl Door {
    pub const ALL: [Door; 2] = [Door::Christian, Door::Secular];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Christian => "christian",
            Self::Secular => "secular",
        }
    }
}

impl std::fmt::Display for Door {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Door {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "christian" => Ok(Self::Christian),
            "secular" => Ok(Self::Secular),
            other => Err(format!("unknown door: {other}")),
        }
    }
}

/// Preferred time of day for the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Daypart {
    Morning,
    Midday,
    Afternoon,
    Evening,
    Anytime,
}

impl std::str::FromStr for Daypart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "anytime" => Ok(Self::Anytime),
            other => Err(format!("unknown daypart: {other}")),
        }
    }
}

/// A validated intake submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Struggle tags, de-duplicated, in submission order.
    pub struggles: Vec<String>,
    pub door: Door,
    pub time_budget: String,
    pub daypart: Daypart,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bible_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub primary_virtue: Virtue,
    pub created_at: DateTime<Utc>,
}

/// How a quote should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteType {
    Biblical,
    Wisdom,
}

/// A quote attached to a daily practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: QuoteType,
}

/// One day of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPractice {
    pub day: u32,
    pub title: String,
    pub steps: Vec<String>,
    pub reflection: String,
    pub quote: Quote,
    pub commentary: String,
    /// Minutes.
    pub estimated_time: u32,
}

/// A generated 21-day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedPlan {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub assessment: Assessment,
    pub anchor: String,
    pub virtue: Virtue,
    pub door: Door,
    pub daily: Vec<DailyPractice>,
    pub weekly_checkin: String,
    pub created_at: DateTime<Utc>,
    pub version: String,
}

impl PersonalizedPlan {
    /// Attach the owning user. The only mutation a plan accepts after
    /// creation.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Look up a practice by its 1-based day number.
    pub fn practice(&self, day: u32) -> Option<&DailyPractice> {
        day.checked_sub(1)
            .and_then(|i| self.daily.get(i as usize))
            .filter(|p| p.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtue_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Virtue::Temperance).unwrap(), "\"temperance\"");
        let v: Virtue = serde_json::from_str("\"courage\"").unwrap();
        assert_eq!(v, Virtue::Courage);
    }

    #[test]
    fn door_parses_case_insensitively() {
        assert_eq!(" Christian ".parse::<Door>().unwrap(), Door::Christian);
        assert_eq!("SECULAR".parse::<Door>().unwrap(), Door::Secular);
        assert!("agnostic".parse::<Door>().is_err());
    }

    #[test]
    fn daypart_rejects_unknown_values() {
        assert_eq!("evening".parse::<Daypart>().unwrap(), Daypart::Evening);
        assert!("midnight".parse::<Daypart>().is_err());
    }

    #[test]
    fn quote_kind_serializes_as_type() {
        let quote = Quote {
            text: "Be still.".into(),
            source: "Psalm 46:10".into(),
            kind: QuoteType::Biblical,
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["type"], "biblical");
        assert!(json.get("kind").is_none());
    }
}
