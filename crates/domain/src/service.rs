use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{
    CreateError, DeleteError, ExerciseEntry, Preferences, PreferencesRepository,
    PreferencesService, ReadError, TemplateInfo, UpdateError, WeightUnit, WorkoutID,
    WorkoutRecord, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workout_records(&self) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(
            self.repository.read_workout_records(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn create_workout_record(
        &self,
        timestamp: DateTime<Utc>,
        duration: u32,
        weight_unit: Option<WeightUnit>,
        exercises: Vec<ExerciseEntry>,
        template_info: Option<TemplateInfo>,
    ) -> Result<WorkoutRecord, CreateError> {
        log_on_error!(
            self.repository
                .create_workout_record(timestamp, duration, weight_unit, exercises, template_info),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn delete_workout_record(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_record(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: PreferencesRepository> PreferencesService for Service<R> {
    async fn get_preferences(&self) -> Result<Preferences, ReadError> {
        log_on_error!(
            self.repository.read_preferences(),
            ReadError,
            "get",
            "preferences"
        )
    }

    async fn set_preferences(&self, preferences: Preferences) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_preferences(preferences),
            UpdateError,
            "set",
            "preferences"
        )
    }
}
