//! Deterministic 21-day plan templating.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{Assessment, DailyPractice, Door, PLAN_DAYS, PersonalizedPlan, Virtue};
use super::quotes::quote_for;
use crate::config::PlanConfig;

/// Minutes per day when the time budget has no usable lower bound.
pub const DEFAULT_MINUTES: u32 = 5;

pub const MULTI_AGENT_VERSION: &str = "multi-agent-v1.0";
pub const FUNCTIONAL_VERSION: &str = "1.0-functional";

static LEADING_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("static regex"));

/// Weekly phase of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Foundation,
    Deepening,
    Integration,
}

impl Theme {
    /// Theme for a 1-based week number.
    pub fn for_week(week: u32) -> Self {
        match week {
            1 => Self::Foundation,
            2 => Self::Deepening,
            _ => Self::Integration,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Deepening => "Deepening",
            Self::Integration => "Integration",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based week for a 1-based day.
pub fn week_of(day: u32) -> u32 {
    day.div_ceil(7)
}

/// Whether a day closes a week.
pub fn is_weekly(day: u32) -> bool {
    day % 7 == 0
}

/// Minutes per day from a range like `"10-15"`: the leading integer of the
/// lower bound, or [`DEFAULT_MINUTES`] when missing or zero.
pub fn estimated_minutes(time_budget: &str) -> u32 {
    LEADING_MINUTES
        .captures(time_budget)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_MINUTES)
}

pub fn anchor_for(virtue: Virtue) -> String {
    format!("Today I practice {virtue} — small, consistent, unhurried.")
}

pub fn weekly_checkin_for(virtue: Virtue) -> String {
    format!(
        "What is one way {virtue} grew in you this week, and where do you still feel resistance?"
    )
}

fn micro_action(virtue: Virtue) -> &'static str {
    match virtue {
        Virtue::Wisdom => "Pause before one decision today and name the wisest next step.",
        Virtue::Courage => "Take one small action you have been avoiding.",
        Virtue::Justice => "Do one concrete act of fairness or kindness for someone near you.",
        Virtue::Temperance => "Choose one appetite or distraction to set aside for the day.",
    }
}

/// `"social-media-overwhelm"` → `"social media overwhelm"`.
fn humanize(tag: &str) -> String {
    tag.replace(['-', '_'], " ")
}

fn build_practice(
    day: u32,
    assessment: &Assessment,
    virtue: Virtue,
    minutes: u32,
    config: &PlanConfig,
) -> DailyPractice {
    let week = week_of(day);
    let theme = Theme::for_week(week);
    let weekly = is_weekly(day);

    let title = if weekly {
        format!("Week {week} Reflection: {virtue}")
    } else {
        format!("Day {day}: {theme} in {virtue}")
    };

    let struggle = match assessment.struggles.len() {
        0 => None,
        len => Some(&assessment.struggles[(day as usize - 1) % len]),
    };

    let third_step = match (config.multi_agent, struggle) {
        (true, Some(tag)) => format!(
            "Bring {virtue} to {}: notice one moment today where it pulls at you and respond differently.",
            humanize(tag)
        ),
        _ => format!("Reflect for a minute on where {virtue} could shape your day."),
    };

    let closing_step = if weekly {
        format!("Review your week: note where {virtue} grew and where it was hard.")
    } else {
        "Set one clear intention for tomorrow's practice.".to_string()
    };

    let steps = vec![
        "Take three slow breaths and settle into the present moment.".to_string(),
        micro_action(virtue).to_string(),
        third_step,
        closing_step,
    ];

    let reflection = if weekly {
        format!("Looking back over week {week}, where did you see {virtue} take root?")
    } else {
        format!("Where did {virtue} show up in your choices today?")
    };

    let struggles = if assessment.struggles.is_empty() {
        "everyday life".to_string()
    } else {
        assessment
            .struggles
            .iter()
            .map(|s| humanize(s))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let door_phrase = match assessment.door {
        Door::Christian => "with Scripture as your guide",
        Door::Secular => "drawing on timeless wisdom",
    };

    let commentary = format!(
        "Day {day} of the {theme} phase: through the {} door and {door_phrase}, you practice {virtue} in the midst of {struggles}.",
        assessment.door
    );

    DailyPractice {
        day,
        title,
        steps,
        reflection,
        quote: quote_for(virtue, assessment.door).clone(),
        commentary,
        estimated_time: minutes,
    }
}

/// Build the full plan for an assessment.
///
/// Pure: the same assessment and config always produce the same plan. The
/// plan id and creation time derive from the assessment; `user_id` is left
/// for the caller to attach.
pub fn generate_plan(assessment: &Assessment, config: &PlanConfig) -> PersonalizedPlan {
    let virtue = assessment.primary_virtue;
    let minutes = estimated_minutes(&assessment.time_budget);

    let daily: Vec<DailyPractice> = (1..=PLAN_DAYS)
        .map(|day| build_practice(day, assessment, virtue, minutes, config))
        .collect();

    let version = if config.multi_agent {
        MULTI_AGENT_VERSION
    } else {
        FUNCTIONAL_VERSION
    };

    PersonalizedPlan {
        id: format!("plan_{}", assessment.id),
        user_id: None,
        assessment: assessment.clone(),
        anchor: anchor_for(virtue),
        virtue,
        door: assessment.door,
        daily,
        weekly_checkin: weekly_checkin_for(virtue),
        created_at: assessment.created_at,
        version: version.to_string(),
    }
}
