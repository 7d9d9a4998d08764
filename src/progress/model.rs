//! Progress records and the derived streak / milestone / fruit summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::PLAN_DAYS;

/// Completion state of one plan day. Keyed by (plan_id, day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub plan_id: String,
    pub day: u32,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

/// The nine fruit of the spirit, in Galatians order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fruit {
    Love,
    Joy,
    Peace,
    Patience,
    Kindness,
    Goodness,
    Faithfulness,
    Gentleness,
    SelfControl,
}

impl Fruit {
    pub const ALL: [Fruit; 9] = [
        Fruit::Love,
        Fruit::Joy,
        Fruit::Peace,
        Fruit::Patience,
        Fruit::Kindness,
        Fruit::Goodness,
        Fruit::Faithfulness,
        Fruit::Gentleness,
        Fruit::SelfControl,
    ];

    /// Fruit grown by completing a 1-based plan day.
    pub fn for_day(day: u32) -> Self {
        let idx = (day.max(1) - 1) as usize % Self::ALL.len();
        Self::ALL[idx]
    }
}

/// Growth level of one fruit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FruitGrowth {
    pub fruit: Fruit,
    pub level: u32,
}

/// A named completed-day threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub days: u32,
    pub name: &'static str,
}

pub const MILESTONES: [Milestone; 5] = [
    Milestone { days: 1, name: "First Step" },
    Milestone { days: 3, name: "Three-Day Thread" },
    Milestone { days: 7, name: "Week One Complete" },
    Milestone { days: 14, name: "Two Weeks Strong" },
    Milestone { days: 21, name: "Keel Laid" },
];

/// Aggregate progress for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub plan_id: String,
    pub total_days: u32,
    pub completed_days: u32,
    pub percent_complete: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub milestones: Vec<Milestone>,
    pub fruit: Vec<FruitGrowth>,
}

/// Summarize a plan's progress records.
///
/// Records for days outside the plan are ignored. When several records share
/// a day, the last one in `records` wins.
pub fn summarize(plan_id: &str, records: &[ProgressRecord]) -> ProgressSummary {
    let mut done = [false; PLAN_DAYS as usize];
    for record in records {
        if (1..=PLAN_DAYS).contains(&record.day) {
            done[record.day as usize - 1] = record.completed;
        }
    }

    let completed_days = done.iter().filter(|d| **d).count() as u32;

    let mut longest_streak = 0;
    let mut run = 0;
    for completed in done {
        run = if completed { run + 1 } else { 0 };
        longest_streak = longest_streak.max(run);
    }

    let current_streak = done
        .iter()
        .rposition(|d| *d)
        .map(|last| done[..=last].iter().rev().take_while(|d| **d).count() as u32)
        .unwrap_or(0);

    let percent_complete = (completed_days * 100 + PLAN_DAYS / 2) / PLAN_DAYS;

    let milestones = MILESTONES
        .iter()
        .filter(|m| completed_days >= m.days)
        .copied()
        .collect();

    let fruit = Fruit::ALL
        .iter()
        .map(|fruit| FruitGrowth {
            fruit: *fruit,
            level: (1..=PLAN_DAYS)
                .filter(|day| done[*day as usize - 1] && Fruit::for_day(*day) == *fruit)
                .count() as u32,
        })
        .collect();

    ProgressSummary {
        plan_id: plan_id.to_string(),
        total_days: PLAN_DAYS,
        completed_days,
        percent_complete,
        current_streak,
        longest_streak,
        milestones,
        fruit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(days: &[u32]) -> Vec<ProgressRecord> {
        days.iter()
            .map(|day| ProgressRecord {
                plan_id: "plan_1".into(),
                day: *day,
                completed: true,
                timestamp: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn empty_progress() {
        let summary = summarize("plan_1", &[]);
        assert_eq!(summary.total_days, 21);
        assert_eq!(summary.completed_days, 0);
        assert_eq!(summary.percent_complete, 0);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 0);
        assert!(summary.milestones.is_empty());
        assert_eq!(summary.fruit.len(), 9);
        assert!(summary.fruit.iter().all(|f| f.level == 0));
    }

    #[test]
    fn streaks_track_runs() {
        let summary = summarize("plan_1", &completed(&[1, 2, 3, 4, 6, 7]));
        assert_eq!(summary.completed_days, 6);
        assert_eq!(summary.longest_streak, 4);
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.percent_complete, 29);
    }

    #[test]
    fn later_record_for_same_day_wins() {
        let mut records = completed(&[1, 2]);
        records.push(ProgressRecord {
            plan_id: "plan_1".into(),
            day: 2,
            completed: false,
            timestamp: Utc::now(),
        });
        let summary = summarize("plan_1", &records);
        assert_eq!(summary.completed_days, 1);
        assert_eq!(summary.current_streak, 1);
    }

    #[test]
    fn out_of_range_days_are_ignored() {
        let summary = summarize("plan_1", &completed(&[0, 22, 5]));
        assert_eq!(summary.completed_days, 1);
    }

    #[test]
    fn milestones_follow_completed_days() {
        let summary = summarize("plan_1", &completed(&[1, 5, 9]));
        let names: Vec<&str> = summary.milestones.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["First Step", "Three-Day Thread"]);

        let all: Vec<u32> = (1..=21).collect();
        let summary = summarize("plan_1", &completed(&all));
        assert_eq!(summary.milestones.len(), MILESTONES.len());
        assert_eq!(summary.percent_complete, 100);
        assert_eq!(summary.current_streak, 21);
    }

    #[test]
    fn fruit_grows_cyclically() {
        assert_eq!(Fruit::for_day(1), Fruit::Love);
        assert_eq!(Fruit::for_day(9), Fruit::SelfControl);
        assert_eq!(Fruit::for_day(10), Fruit::Love);

        let summary = summarize("plan_1", &completed(&[1, 10, 19, 2]));
        let love = summary.fruit.iter().find(|f| f.fruit == Fruit::Love).unwrap();
        let joy = summary.fruit.iter().find(|f| f.fruit == Fruit::Joy).unwrap();
        assert_eq!(love.level, 3);
        assert_eq!(joy.level, 1);
    }

    #[test]
    fn fruit_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Fruit::SelfControl).unwrap(),
            "\"self-control\""
        );
    }
}
