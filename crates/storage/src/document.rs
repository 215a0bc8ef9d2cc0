//! Document shapes of the hosted store's JSON export.
//!
//! Historical documents are accepted as they are: numeric fields may be
//! numbers or numeric strings, units and flags may be missing, and unknown
//! values degrade to defaults instead of failing the whole document.

use chrono::{DateTime, Utc};
use ironlog_domain as domain;
use log::warn;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDocument {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "flexible_u32")]
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseDocument>,
    #[serde(default)]
    pub template_info: Option<TemplateInfoDocument>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: Vec<SetDocument>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetDocument {
    #[serde(default, deserialize_with = "flexible_u32")]
    pub reps: u32,
    #[serde(default, deserialize_with = "flexible_f64")]
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub weight_type: Option<String>,
    #[serde(default = "default_true")]
    pub completed: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfoDocument {
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub day_id: String,
    #[serde(default)]
    pub day_name: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDocument {
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub trend_basis: Option<String>,
}

const fn default_true() -> bool {
    true
}

fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) => value,
        Raw::Text(value) => domain::WeightValue::from(value).as_number().unwrap_or(0.0),
        Raw::Other(_) => 0.0,
    })
}

fn flexible_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = flexible_f64(deserializer)?.max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value as u32;
    Ok(value)
}

fn parse_weight_unit(value: &str) -> Option<domain::WeightUnit> {
    match domain::WeightUnit::try_from(value) {
        Ok(unit) => Some(unit),
        Err(err) => {
            warn!("ignoring stored weight unit {value:?}: {err}");
            None
        }
    }
}

impl From<WorkoutDocument> for domain::WorkoutRecord {
    fn from(value: WorkoutDocument) -> Self {
        Self {
            id: value.id.into(),
            user_id: value.user_id.into(),
            timestamp: value.timestamp,
            duration: value.duration,
            weight_unit: value.weight_unit.as_deref().and_then(parse_weight_unit),
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseEntry::from)
                .collect(),
            template_info: value.template_info.map(domain::TemplateInfo::from),
        }
    }
}

impl From<&domain::WorkoutRecord> for WorkoutDocument {
    fn from(value: &domain::WorkoutRecord) -> Self {
        Self {
            id: value.id.as_str().to_string(),
            user_id: value.user_id.as_str().to_string(),
            timestamp: value.timestamp,
            duration: value.duration,
            completed: true,
            weight_unit: value.weight_unit.map(|unit| unit.as_str().to_string()),
            exercises: value.exercises.iter().map(ExerciseDocument::from).collect(),
            template_info: value.template_info.as_ref().map(TemplateInfoDocument::from),
        }
    }
}

impl From<ExerciseDocument> for domain::ExerciseEntry {
    fn from(value: ExerciseDocument) -> Self {
        Self {
            name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(domain::SetRecord::from)
                .collect(),
            notes: value.notes,
        }
    }
}

impl From<&domain::ExerciseEntry> for ExerciseDocument {
    fn from(value: &domain::ExerciseEntry) -> Self {
        Self {
            name: value.name.clone(),
            sets: value.sets.iter().map(SetDocument::from).collect(),
            notes: value.notes.clone(),
        }
    }
}

impl From<SetDocument> for domain::SetRecord {
    fn from(value: SetDocument) -> Self {
        Self {
            reps: value.reps,
            weight: value.weight,
            weight_unit: value.weight_unit.as_deref().and_then(parse_weight_unit),
            weight_kind: value
                .weight_type
                .as_deref()
                .map(domain::WeightKind::from)
                .unwrap_or_default(),
            completed: value.completed,
        }
    }
}

impl From<&domain::SetRecord> for SetDocument {
    fn from(value: &domain::SetRecord) -> Self {
        Self {
            reps: value.reps,
            weight: value.weight,
            weight_unit: value.weight_unit.map(|unit| unit.as_str().to_string()),
            weight_type: Some(value.weight_kind.to_string()),
            completed: value.completed,
        }
    }
}

impl From<TemplateInfoDocument> for domain::TemplateInfo {
    fn from(value: TemplateInfoDocument) -> Self {
        Self {
            template_id: value.template_id,
            template_name: value.template_name,
            day_id: value.day_id,
            day_name: value.day_name,
        }
    }
}

impl From<&domain::TemplateInfo> for TemplateInfoDocument {
    fn from(value: &domain::TemplateInfo) -> Self {
        Self {
            template_id: value.template_id.clone(),
            template_name: value.template_name.clone(),
            day_id: value.day_id.clone(),
            day_name: value.day_name.clone(),
        }
    }
}

impl From<PreferencesDocument> for domain::Preferences {
    fn from(value: PreferencesDocument) -> Self {
        Self {
            weight_unit: value
                .weight_unit
                .as_deref()
                .and_then(parse_weight_unit)
                .unwrap_or_default(),
            trend_basis: match value.trend_basis.as_deref() {
                Some("converted") => domain::TrendBasis::Converted,
                _ => domain::TrendBasis::Stored,
            },
        }
    }
}

impl From<&domain::Preferences> for PreferencesDocument {
    fn from(value: &domain::Preferences) -> Self {
        Self {
            weight_unit: Some(value.weight_unit.as_str().to_string()),
            trend_basis: Some(
                match value.trend_basis {
                    domain::TrendBasis::Stored => "stored",
                    domain::TrendBasis::Converted => "converted",
                }
                .to_string(),
            ),
        }
    }
}
