//! Inbound intake payload and field validation.

use serde::Deserialize;
use serde_json::Value;

use crate::error::IntakeError;
use crate::plan::{Daypart, Door};

/// Required assessment fields, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "struggles",
    "door",
    "timeBudget",
    "daypart",
];

/// `POST /api/intake` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeRequest {
    pub assessment: Option<AssessmentInput>,
}

/// Raw assessment as submitted. Fields are kept as untyped JSON so a value of
/// the wrong type is reported as invalid instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email: Option<Value>,
    pub struggles: Option<Value>,
    pub door: Option<Value>,
    pub time_budget: Option<Value>,
    pub daypart: Option<Value>,
    pub bible_version: Option<Value>,
    pub context: Option<Value>,
}

/// An assessment whose required fields are all present and well-formed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAssessment {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// De-duplicated, first occurrence wins.
    pub struggles: Vec<String>,
    pub door: Door,
    pub time_budget: String,
    pub daypart: Daypart,
    pub bible_version: Option<String>,
    pub context: Option<String>,
}

/// Outcome of checking one submitted field.
#[derive(Debug, Clone, PartialEq)]
enum Field<T> {
    Missing,
    Invalid,
    Valid(T),
}

impl<T> Field<T> {
    fn and_then<U>(self, f: impl FnOnce(T) -> Option<U>) -> Field<U> {
        match self {
            Self::Valid(v) => f(v).map_or(Field::Invalid, Field::Valid),
            Self::Missing => Field::Missing,
            Self::Invalid => Field::Invalid,
        }
    }

    fn state(&self) -> State {
        match self {
            Self::Missing => State::Missing,
            Self::Invalid => State::Invalid,
            Self::Valid(_) => State::Valid,
        }
    }

    fn valid(self) -> Option<T> {
        match self {
            Self::Valid(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Missing,
    Invalid,
    Valid,
}

/// Absent, `null` and blank strings are missing; non-strings are invalid.
fn text(value: &Option<Value>) -> Field<String> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::String(s)) if s.trim().is_empty() => Field::Missing,
        Some(Value::String(s)) => Field::Valid(s.trim().to_string()),
        Some(_) => Field::Invalid,
    }
}

/// An array of strings; an empty array is present.
fn string_list(value: &Option<Value>) -> Field<Vec<String>> {
    match value {
        None | Some(Value::Null) => Field::Missing,
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .map_or(Field::Invalid, Field::Valid),
        Some(_) => Field::Invalid,
    }
}

fn dedup_struggles(struggles: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(struggles.len());
    for tag in struggles.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

impl IntakeRequest {
    /// Parse a raw JSON body. Malformed JSON is a validation failure.
    pub fn from_json(body: &[u8]) -> Result<Self, IntakeError> {
        serde_json::from_slice(body).map_err(|e| IntakeError::Validation {
            message: format!("Malformed request body: {e}"),
            required: REQUIRED_FIELDS.to_vec(),
            invalid: Vec::new(),
        })
    }

    /// Check presence and shape of every required field.
    pub fn validate(self) -> Result<ValidatedAssessment, IntakeError> {
        let Some(input) = self.assessment else {
            return Err(IntakeError::Validation {
                message: "Assessment data is required".to_string(),
                required: REQUIRED_FIELDS.to_vec(),
                invalid: Vec::new(),
            });
        };
        input.validate()
    }
}

impl AssessmentInput {
    pub fn validate(self) -> Result<ValidatedAssessment, IntakeError> {
        let first_name = text(&self.first_name);
        let last_name = text(&self.last_name);
        let email = text(&self.email);
        let struggles = string_list(&self.struggles);
        let door = text(&self.door).and_then(|s| s.parse::<Door>().ok());
        let time_budget = text(&self.time_budget);
        let daypart = text(&self.daypart).and_then(|s| s.parse::<Daypart>().ok());

        let states = [
            first_name.state(),
            last_name.state(),
            email.state(),
            struggles.state(),
            door.state(),
            time_budget.state(),
            daypart.state(),
        ];
        let mut required = Vec::new();
        let mut invalid = Vec::new();
        for (field, state) in REQUIRED_FIELDS.iter().zip(states) {
            match state {
                State::Missing => required.push(*field),
                State::Invalid => invalid.push(*field),
                State::Valid => {}
            }
        }

        match (
            first_name,
            last_name,
            email,
            struggles,
            door,
            time_budget,
            daypart,
        ) {
            (
                Field::Valid(first_name),
                Field::Valid(last_name),
                Field::Valid(email),
                Field::Valid(struggles),
                Field::Valid(door),
                Field::Valid(time_budget),
                Field::Valid(daypart),
            ) => Ok(ValidatedAssessment {
                first_name,
                last_name,
                email,
                struggles: dedup_struggles(&struggles),
                door,
                time_budget,
                daypart,
                bible_version: text(&self.bible_version).valid(),
                context: text(&self.context).valid(),
            }),
            _ => {
                let message = if required.is_empty() {
                    format!("Invalid values for fields: {}", invalid.join(", "))
                } else {
                    format!("Missing required fields: {}", required.join(", "))
                };
                Err(IntakeError::Validation {
                    message,
                    required,
                    invalid,
                })
            }
        }
    }
}
