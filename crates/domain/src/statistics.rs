use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use derive_more::Display;

use crate::{SetRecord, WeightUnit, WeightValue, WorkoutID, WorkoutRecord, units};

pub const DEFAULT_PERSONAL_RECORD_LIMIT: usize = 3;
pub const DEFAULT_ACHIEVEMENT_LIMIT: usize = 10;

/// Aggregated view of one exercise's history, recomputed from scratch on
/// every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    pub name: String,
    /// Most recent first, one per workout entry containing this exercise.
    pub sessions: Vec<ExerciseSession>,
    /// Largest set weight observed, in the display unit of the pass.
    pub max_weight: f64,
    /// Stored unit of the set that holds the maximum.
    pub max_weight_unit: Option<WeightUnit>,
    pub max_reps: u32,
    /// Sum of converted weight times reps over all sets.
    pub total_volume: f64,
    pub last_performed: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSession {
    pub date: DateTime<Utc>,
    pub workout_id: WorkoutID,
    /// The enclosing workout's stored unit.
    pub weight_unit: Option<WeightUnit>,
    pub sets: Vec<SetRecord>,
}

/// Group the given workouts by exercise name and derive per-exercise
/// statistics, with all weights normalized into `display_unit` through the
/// given converter.
///
/// The workouts are expected to be sorted by timestamp descending; the first
/// session seen for an exercise determines `last_performed`. The result is
/// sorted by `last_performed` descending.
#[must_use]
pub fn exercise_stats(
    workouts: &[WorkoutRecord],
    display_unit: WeightUnit,
    convert: impl Fn(&WeightValue, WeightUnit, WeightUnit) -> WeightValue,
) -> Vec<ExerciseStats> {
    let mut stats: BTreeMap<&str, ExerciseStats> = BTreeMap::new();

    for workout in workouts {
        for entry in &workout.exercises {
            let exercise = stats
                .entry(entry.name.as_str())
                .or_insert_with(|| ExerciseStats {
                    name: entry.name.clone(),
                    sessions: vec![],
                    max_weight: 0.0,
                    max_weight_unit: None,
                    max_reps: 0,
                    total_volume: 0.0,
                    last_performed: workout.timestamp,
                });
            exercise.sessions.push(ExerciseSession {
                date: workout.timestamp,
                workout_id: workout.id.clone(),
                weight_unit: workout.weight_unit,
                sets: entry.sets.clone(),
            });
            for set in &entry.sets {
                let stored_unit = units::resolve_weight_unit(set.weight_unit, workout.weight_unit);
                let converted = converted_set_weight(set, stored_unit, display_unit, &convert);
                if converted > exercise.max_weight {
                    exercise.max_weight = converted;
                    exercise.max_weight_unit = Some(stored_unit);
                }
                if set.reps > exercise.max_reps {
                    exercise.max_reps = set.reps;
                }
                exercise.total_volume += converted * f64::from(set.reps);
            }
        }
    }

    let mut stats = stats.into_values().collect::<Vec<_>>();
    stats.sort_by(|a, b| b.last_performed.cmp(&a.last_performed));
    stats
}

fn converted_set_weight(
    set: &SetRecord,
    stored_unit: WeightUnit,
    display_unit: WeightUnit,
    convert: &impl Fn(&WeightValue, WeightUnit, WeightUnit) -> WeightValue,
) -> f64 {
    convert(
        &WeightValue::Number(set.effective_weight()),
        stored_unit,
        display_unit,
    )
    .as_number()
    .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
pub enum TrendDirection {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("neutral")]
    Neutral,
}

/// Basis on which trend arrows compare weights across sessions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrendBasis {
    /// Compare the stored weight values as recorded, ignoring their units.
    /// This is how the feature has always behaved; a history with mixed
    /// stored units can yield a direction that contradicts the converted
    /// weights.
    #[default]
    Stored,
    /// Convert both weights into the display unit before comparing.
    Converted,
}

/// Direction of the weight trend for the named exercise, from the first set
/// of its two most recent sessions. `display_unit` only matters under
/// `TrendBasis::Converted`.
#[must_use]
pub fn trend_direction(
    stats: &[ExerciseStats],
    name: &str,
    display_unit: WeightUnit,
    basis: TrendBasis,
) -> TrendDirection {
    let Some(exercise) = stats.iter().find(|s| s.name == name) else {
        return TrendDirection::Neutral;
    };
    let [latest, previous, ..] = exercise.sessions.as_slice() else {
        return TrendDirection::Neutral;
    };
    let latest_weight = first_set_weight(latest, display_unit, basis);
    let previous_weight = first_set_weight(previous, display_unit, basis);
    match latest_weight.partial_cmp(&previous_weight) {
        Some(std::cmp::Ordering::Greater) => TrendDirection::Up,
        Some(std::cmp::Ordering::Less) => TrendDirection::Down,
        _ => TrendDirection::Neutral,
    }
}

fn first_set_weight(session: &ExerciseSession, display_unit: WeightUnit, basis: TrendBasis) -> f64 {
    let Some(set) = session.sets.first() else {
        return 0.0;
    };
    match basis {
        TrendBasis::Stored => set.weight,
        TrendBasis::Converted => {
            let stored_unit = units::resolve_weight_unit(set.weight_unit, session.weight_unit);
            units::convert(&WeightValue::Number(set.weight), stored_unit, display_unit)
                .as_number()
                .unwrap_or(0.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallStats {
    pub total_sessions: usize,
    /// Largest `ExerciseStats::max_weight`, 0 with no history.
    pub max_weight: f64,
    pub total_volume: f64,
    /// Longest run of consecutive calendar days with at least one workout.
    pub longest_streak: u32,
    pub unique_exercises: usize,
}

#[must_use]
pub fn overall_stats(workouts: &[WorkoutRecord], stats: &[ExerciseStats]) -> OverallStats {
    OverallStats {
        total_sessions: workouts.len(),
        max_weight: stats.iter().map(|s| s.max_weight).fold(0.0, f64::max),
        total_volume: stats.iter().map(|s| s.total_volume).sum(),
        longest_streak: longest_streak(workouts),
        unique_exercises: stats.len(),
    }
}

fn longest_streak(workouts: &[WorkoutRecord]) -> u32 {
    let days = workouts
        .iter()
        .map(WorkoutRecord::date)
        .collect::<BTreeSet<_>>();
    let mut longest = u32::from(!days.is_empty());
    let mut current = longest;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        if let Some(previous) = previous {
            if day - previous == Duration::days(1) {
                current += 1;
            } else {
                current = 1;
            }
            longest = longest.max(current);
        }
        previous = Some(day);
    }
    longest
}

/// The exercises with the highest recorded weights, heaviest first.
/// Exercises without a positive maximum do not qualify.
#[must_use]
pub fn personal_records(stats: &[ExerciseStats], limit: usize) -> Vec<&ExerciseStats> {
    let mut records = stats
        .iter()
        .filter(|s| s.max_weight > 0.0)
        .collect::<Vec<_>>();
    records.sort_by(|a, b| b.max_weight.total_cmp(&a.max_weight));
    records.truncate(limit);
    records
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub exercise: String,
    /// Best converted weight of the latest session.
    pub weight: f64,
    pub date: DateTime<Utc>,
    pub improvement: f64,
}

/// Personal records set in the most recent session of each exercise: the
/// best converted weight of the latest session has to strictly exceed the
/// best of all earlier sessions taken together. Most recent first.
#[must_use]
pub fn recent_achievements(
    stats: &[ExerciseStats],
    display_unit: WeightUnit,
    convert: impl Fn(&WeightValue, WeightUnit, WeightUnit) -> WeightValue,
    limit: usize,
) -> Vec<Achievement> {
    let mut achievements = vec![];

    for exercise in stats {
        let Some((latest, earlier)) = exercise.sessions.split_first() else {
            continue;
        };
        if earlier.is_empty() {
            continue;
        }
        let latest_max = session_max_weight(latest, display_unit, &convert);
        let previous_max = earlier
            .iter()
            .map(|session| session_max_weight(session, display_unit, &convert))
            .fold(0.0, f64::max);
        if latest_max > previous_max {
            achievements.push(Achievement {
                exercise: exercise.name.clone(),
                weight: latest_max,
                date: latest.date,
                improvement: latest_max - previous_max,
            });
        }
    }

    achievements.sort_by(|a, b| b.date.cmp(&a.date));
    achievements.truncate(limit);
    achievements
}

fn session_max_weight(
    session: &ExerciseSession,
    display_unit: WeightUnit,
    convert: &impl Fn(&WeightValue, WeightUnit, WeightUnit) -> WeightValue,
) -> f64 {
    session
        .sets
        .iter()
        .map(|set| {
            let stored_unit = units::resolve_weight_unit(set.weight_unit, session.weight_unit);
            converted_set_weight(set, stored_unit, display_unit, convert)
        })
        .fold(0.0, f64::max)
}
