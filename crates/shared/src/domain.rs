use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(RecordId);

/// Attributes the predictor scores a candidate on, as the Predict form sends
/// them.
///
/// Codes follow the form legends: gender `0` female / `1` male, education
/// `1..=4` (high school to PhD), recruitment strategy `1..=3` (aggressive,
/// moderate, conservative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAttributes {
    pub age: i64,
    pub gender: i64,
    pub education_level: i64,
    pub experience_years: i64,
    pub previous_companies: i64,
    pub distance_from_company: i64,
    pub interview_score: i64,
    pub skill_score: i64,
    pub personality_score: i64,
    pub recruitment_strategy: i64,
}

/// The `input` stored on a history record.
///
/// The backend keeps whatever the client posted, so values may be numeric
/// strings or carry a fraction (`"experienceYears": "5.5"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedAttributes {
    #[serde(deserialize_with = "lenient_f64")]
    pub age: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub gender: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub education_level: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub experience_years: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub previous_companies: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub distance_from_company: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub interview_score: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub skill_score: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub personality_score: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub recruitment_strategy: f64,
}

impl RecordedAttributes {
    pub fn gender_label(&self) -> &'static str {
        if self.gender == 1.0 {
            "Male"
        } else {
            "Female"
        }
    }
}

impl From<&CandidateAttributes> for RecordedAttributes {
    fn from(sent: &CandidateAttributes) -> Self {
        Self {
            age: sent.age as f64,
            gender: sent.gender as f64,
            education_level: sent.education_level as f64,
            experience_years: sent.experience_years as f64,
            previous_companies: sent.previous_companies as f64,
            distance_from_company: sent.distance_from_company as f64,
            interview_score: sent.interview_score as f64,
            skill_score: sent.skill_score as f64,
            personality_score: sent.personality_score as f64,
            recruitment_strategy: sent.recruitment_strategy as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    #[serde(deserialize_with = "bool_or_int")]
    pub prediction: bool,
    #[serde(deserialize_with = "unit_interval")]
    pub probability: f64,
}

impl PredictionOutcome {
    pub fn headline(&self) -> &'static str {
        if self.prediction {
            "Candidate is likely to be hired!"
        } else {
            "Candidate is unlikely to be hired."
        }
    }

    pub fn probability_percent(&self) -> String {
        format_percent(self.probability)
    }
}

/// One row of prediction history. Created by the backend, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(deserialize_with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub input: RecordedAttributes,
    #[serde(rename = "prediction", deserialize_with = "bool_or_int")]
    pub predicted: bool,
    #[serde(deserialize_with = "unit_interval")]
    pub probability: f64,
}

impl PredictionRecord {
    pub fn verdict_label(&self) -> &'static str {
        if self.predicted {
            "Hired"
        } else {
            "Not Hired"
        }
    }

    pub fn probability_percent(&self) -> String {
        format_percent(self.probability)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAck {
    pub message: String,
}

fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrInt {
    Bool(bool),
    Int(i64),
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(value) => Ok(value),
        BoolOrInt::Int(0) => Ok(false),
        BoolOrInt::Int(1) => Ok(true),
        BoolOrInt::Int(other) => Err(serde::de::Error::custom(format!(
            "expected boolean or 0/1, got {other}"
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Older web clients posted every input as a string.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => value,
        NumberOrText::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("expected a number, got '{text}'"))
        })?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a finite number, got {value}"
        )))
    }
}

fn unit_interval<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "probability must be within [0, 1], got {value}"
        )))
    }
}

fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{raw}'")))
}

/// Accepts RFC 3339, RFC 2822 (`Tue, 15 Oct 2024 10:00:00 GMT`) and naive
/// ISO timestamps, which are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
