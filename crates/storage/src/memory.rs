//! In-memory document store.
//!
//! Holds the raw workout documents of a single user and mirrors the query
//! semantics of the hosted store: reads return only the owner's completed
//! workouts, most recent first. Intended for tests, demos, and offline use.

#![allow(clippy::missing_errors_doc)]

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use ironlog_domain as domain;
use log::debug;
use strum::AsRefStr;
use uuid::Uuid;

use crate::document::{PreferencesDocument, WorkoutDocument};

pub struct Memory {
    user_id: domain::UserID,
    workouts: RwLock<Vec<WorkoutDocument>>,
    preferences: RwLock<Option<PreferencesDocument>>,
}

impl Memory {
    #[must_use]
    pub fn new(user_id: domain::UserID) -> Self {
        Self::with_documents(user_id, vec![])
    }

    #[must_use]
    pub fn with_documents(user_id: domain::UserID, documents: Vec<WorkoutDocument>) -> Self {
        Self {
            user_id,
            workouts: RwLock::new(documents),
            preferences: RwLock::new(None),
        }
    }

    /// Seed the store from a JSON export, an array of workout documents.
    pub fn from_json(user_id: domain::UserID, json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::with_documents(user_id, serde_json::from_str(json)?))
    }
}

#[derive(AsRefStr)]
enum Collection {
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "preferences")]
    Preferences,
}

fn poisoned_lock() -> domain::StorageError {
    domain::StorageError::Other("poisoned lock".into())
}

impl domain::WorkoutRepository for Memory {
    async fn read_workout_records(&self) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        let documents = self.workouts.read().map_err(|_| poisoned_lock())?;
        let mut records = documents
            .iter()
            .filter(|d| d.user_id == self.user_id.as_str() && d.completed)
            .cloned()
            .map(domain::WorkoutRecord::from)
            .collect::<Vec<_>>();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn create_workout_record(
        &self,
        timestamp: DateTime<Utc>,
        duration: u32,
        weight_unit: Option<domain::WeightUnit>,
        exercises: Vec<domain::ExerciseEntry>,
        template_info: Option<domain::TemplateInfo>,
    ) -> Result<domain::WorkoutRecord, domain::CreateError> {
        let record = domain::WorkoutRecord {
            id: Uuid::new_v4().to_string().into(),
            user_id: self.user_id.clone(),
            timestamp,
            duration,
            weight_unit,
            exercises,
            template_info,
        };
        let mut documents = self.workouts.write().map_err(|_| poisoned_lock())?;
        documents.push(WorkoutDocument::from(&record));
        debug!(
            "created document {} in {}",
            record.id,
            Collection::Workouts.as_ref()
        );
        Ok(record)
    }

    async fn delete_workout_record(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut documents = self.workouts.write().map_err(|_| poisoned_lock())?;
        let Some(index) = documents.iter().position(|d| d.id == id.as_str()) else {
            return Err(domain::StorageError::NotFound.into());
        };
        documents.remove(index);
        debug!("deleted document {id} from {}", Collection::Workouts.as_ref());
        Ok(id)
    }
}

impl domain::PreferencesRepository for Memory {
    async fn read_preferences(&self) -> Result<domain::Preferences, domain::ReadError> {
        let preferences = self.preferences.read().map_err(|_| poisoned_lock())?;
        Ok(preferences
            .clone()
            .map(domain::Preferences::from)
            .unwrap_or_default())
    }

    async fn write_preferences(
        &self,
        preferences: domain::Preferences,
    ) -> Result<(), domain::UpdateError> {
        let mut stored = self.preferences.write().map_err(|_| poisoned_lock())?;
        *stored = Some(PreferencesDocument::from(&preferences));
        debug!("replaced document in {}", Collection::Preferences.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use ironlog_domain::{
        PreferencesRepository, Service, WorkoutRepository, WorkoutService,
    };
    use pretty_assertions::assert_eq;

    use crate::document::{ExerciseDocument, SetDocument};

    use super::*;

    fn workout_document(id: &str, user_id: &str, day: u32, completed: bool) -> WorkoutDocument {
        WorkoutDocument {
            id: id.to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap(),
            duration: 3600,
            completed,
            weight_unit: Some("kg".to_string()),
            exercises: vec![ExerciseDocument {
                name: "Bench Press".to_string(),
                sets: vec![SetDocument {
                    reps: 10,
                    weight: 100.0,
                    weight_unit: None,
                    weight_type: None,
                    completed: true,
                }],
                notes: None,
            }],
            template_info: None,
        }
    }

    #[tokio::test]
    async fn test_read_workout_records() {
        let memory = Memory::with_documents(
            domain::UserID::from("u1"),
            vec![
                workout_document("w1", "u1", 1, true),
                workout_document("w2", "u1", 3, true),
                workout_document("w3", "u1", 2, false),
                workout_document("w4", "u2", 5, true),
            ],
        );

        let records = memory.read_workout_records().await.unwrap();

        assert_eq!(
            records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["w2", "w1"]
        );
        assert_eq!(records[0].weight_unit, Some(domain::WeightUnit::Kg));
    }

    #[tokio::test]
    async fn test_create_workout_record() {
        let memory = Memory::new(domain::UserID::from("u1"));

        let created = memory
            .create_workout_record(
                Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap(),
                1800,
                Some(domain::WeightUnit::Lbs),
                vec![],
                None,
            )
            .await
            .unwrap();

        assert!(!created.id.as_str().is_empty());
        assert_eq!(created.user_id, domain::UserID::from("u1"));

        let records = memory.read_workout_records().await.unwrap();
        assert_eq!(records, vec![created.clone()]);

        let second = memory
            .create_workout_record(
                Utc.with_ymd_and_hms(2024, 3, 2, 18, 0, 0).unwrap(),
                1800,
                None,
                vec![],
                None,
            )
            .await
            .unwrap();
        assert_ne!(second.id, created.id);
    }

    #[tokio::test]
    async fn test_delete_workout_record() {
        let memory = Memory::with_documents(
            domain::UserID::from("u1"),
            vec![workout_document("w1", "u1", 1, true)],
        );

        assert_eq!(
            memory
                .delete_workout_record(domain::WorkoutID::from("w1"))
                .await
                .unwrap(),
            domain::WorkoutID::from("w1")
        );
        assert_eq!(memory.read_workout_records().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_delete_workout_record_non_existing() {
        let memory = Memory::new(domain::UserID::from("u1"));

        assert!(matches!(
            memory
                .delete_workout_record(domain::WorkoutID::from("w1"))
                .await,
            Err(domain::DeleteError::Storage(
                domain::StorageError::NotFound
            ))
        ));
    }

    #[tokio::test]
    async fn test_preferences_default_when_absent() {
        let memory = Memory::new(domain::UserID::from("u1"));

        assert_eq!(
            memory.read_preferences().await.unwrap(),
            domain::Preferences::default()
        );
    }

    #[tokio::test]
    async fn test_write_and_read_preferences() {
        let memory = Memory::new(domain::UserID::from("u1"));
        let preferences = domain::Preferences {
            weight_unit: domain::WeightUnit::Kg,
            trend_basis: domain::TrendBasis::Converted,
        };

        memory.write_preferences(preferences).await.unwrap();

        assert_eq!(memory.read_preferences().await.unwrap(), preferences);
    }

    #[tokio::test]
    async fn test_from_json() {
        let json = r#"[
            {
                "id": "w1",
                "userId": "u1",
                "timestamp": "2024-03-01T18:00:00Z",
                "duration": 3600,
                "completed": true,
                "weightUnit": "kg",
                "exercises": [
                    {
                        "name": "Bench Press",
                        "sets": [{ "reps": 10, "weight": "100", "completed": true }]
                    }
                ]
            },
            {
                "id": "w2",
                "userId": "u1",
                "timestamp": "2024-03-02T18:00:00Z",
                "duration": "1800",
                "completed": true,
                "exercises": []
            }
        ]"#;

        let memory = Memory::from_json(domain::UserID::from("u1"), json).unwrap();
        let records = memory.read_workout_records().await.unwrap();

        assert_eq!(
            records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["w2", "w1"]
        );
        assert_eq!(records[0].duration, 1800);
        assert_eq!(records[1].exercises[0].sets[0].weight, 100.0);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Memory::from_json(domain::UserID::from("u1"), "[{").is_err());
    }

    #[tokio::test]
    async fn test_exercise_history_via_service() {
        let memory = Memory::with_documents(
            domain::UserID::from("u1"),
            vec![workout_document("w1", "u1", 1, true)],
        );
        let service = Service::new(memory);

        let stats = service
            .exercise_history(domain::WeightUnit::Lbs)
            .await
            .unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "Bench Press");
        assert_approx_eq!(stats[0].max_weight, 220.5, 0.1);
        assert_eq!(stats[0].max_weight_unit, Some(domain::WeightUnit::Kg));
    }
}
