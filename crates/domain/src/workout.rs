use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{AsRef, Display, Into};

use crate::{
    Achievement, CreateError, DeleteError, ExerciseStats, OverallStats, ReadError, WeightUnit,
    statistics, units,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService: Send + Sync + 'static {
    async fn get_workout_records(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout_record(
        &self,
        timestamp: DateTime<Utc>,
        duration: u32,
        weight_unit: Option<WeightUnit>,
        exercises: Vec<ExerciseEntry>,
        template_info: Option<TemplateInfo>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn delete_workout_record(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn exercise_history(
        &self,
        display_unit: WeightUnit,
    ) -> Result<Vec<ExerciseStats>, ReadError> {
        Ok(statistics::exercise_stats(
            &self.get_workout_records().await?,
            display_unit,
            units::convert,
        ))
    }

    async fn training_summary(&self, display_unit: WeightUnit) -> Result<OverallStats, ReadError> {
        let workouts = self.get_workout_records().await?;
        let stats = statistics::exercise_stats(&workouts, display_unit, units::convert);
        Ok(statistics::overall_stats(&workouts, &stats))
    }

    async fn latest_achievements(
        &self,
        display_unit: WeightUnit,
    ) -> Result<Vec<Achievement>, ReadError> {
        Ok(statistics::recent_achievements(
            &self.exercise_history(display_unit).await?,
            display_unit,
            units::convert,
            statistics::DEFAULT_ACHIEVEMENT_LIMIT,
        ))
    }
}

/// Access to the stored workout records of one user. Implementations must
/// return only completed workouts, sorted by timestamp descending.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository: Send + Sync + 'static {
    async fn read_workout_records(&self) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn create_workout_record(
        &self,
        timestamp: DateTime<Utc>,
        duration: u32,
        weight_unit: Option<WeightUnit>,
        exercises: Vec<ExerciseEntry>,
        template_info: Option<TemplateInfo>,
    ) -> Result<WorkoutRecord, CreateError>;
    async fn delete_workout_record(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// One completed training session.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub timestamp: DateTime<Utc>,
    /// Total session length in seconds.
    pub duration: u32,
    /// Workout-level stored unit, absent on older records.
    pub weight_unit: Option<WeightUnit>,
    pub exercises: Vec<ExerciseEntry>,
    pub template_info: Option<TemplateInfo>,
}

impl WorkoutRecord {
    /// Calendar day of the session in UTC.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

#[derive(AsRef, Debug, Default, Display, Clone, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(AsRef, Debug, Default, Display, Clone, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(String);

impl UserID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One exercise performed within a workout. `name` is the grouping key for
/// aggregation, matched case-sensitively and taken verbatim from the record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub name: String,
    pub sets: Vec<SetRecord>,
    pub notes: Option<String>,
}

/// One set of an exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetRecord {
    pub reps: u32,
    pub weight: f64,
    /// Stored unit of this set, absent on older records.
    pub weight_unit: Option<WeightUnit>,
    pub weight_kind: WeightKind,
    pub completed: bool,
}

impl SetRecord {
    /// Weight that counts toward statistics. Bodyweight sets count as 0.
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        match self.weight_kind {
            WeightKind::Weighted => self.weight,
            WeightKind::Bodyweight => 0.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Display, PartialEq, Eq)]
pub enum WeightKind {
    #[default]
    #[display("weighted")]
    Weighted,
    #[display("bodyweight")]
    Bodyweight,
}

impl From<&str> for WeightKind {
    fn from(value: &str) -> Self {
        match value {
            "bodyweight" => WeightKind::Bodyweight,
            _ => WeightKind::Weighted,
        }
    }
}

/// Origin of a workout that was started from a template/program day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub template_id: String,
    pub template_name: String,
    pub day_id: String,
    pub day_name: String,
}
