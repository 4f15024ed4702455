//! Calendar helpers for streaks and quest windows
//!
//! All date math is UTC. Weeks are ISO-8601: they start on Monday regardless
//! of locale, so daily and weekly windows behave identically everywhere.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;

use crate::domain::{CompletedWorkout, WorkoutCategory};

/// Calendar day of a timestamp
pub fn day_of(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Midnight at the start of the given day
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}

/// 23:59:59 on the given day
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .expect("23:59:59 is always valid")
        .and_utc()
}

/// Monday of the ISO week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 23:59:59 on the Sunday closing the ISO week containing `date`
pub fn end_of_week(date: NaiveDate) -> DateTime<Utc> {
    end_of_day(start_of_week(date) + Duration::days(6))
}

/// Unique workout days, most recent first
fn unique_days_desc(workouts: &[CompletedWorkout]) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = workouts.iter().map(|w| day_of(w.completed_at)).collect();
    days.into_iter().rev().collect()
}

/// Consecutive calendar days with at least one workout, ending at or
/// including `today`. Returns 0 when the most recent workout is older than
/// yesterday.
pub fn current_streak(workouts: &[CompletedWorkout], today: NaiveDate) -> u32 {
    let days = unique_days_desc(workouts);
    let Some(&most_recent) = days.first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 1u32;
    for i in 1..days.len() {
        let expected = most_recent - Duration::days(i as i64);
        if days[i] == expected {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive workout days anywhere in history
pub fn best_streak(workouts: &[CompletedWorkout]) -> u32 {
    let mut days = unique_days_desc(workouts);
    days.reverse();
    if days.is_empty() {
        return 0;
    }

    let mut best = 1u32;
    let mut run = 1u32;
    for pair in days.windows(2) {
        if pair[1] == pair[0] + Duration::days(1) {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
    }
    best
}

/// Number of workouts completed on `date`
pub fn workouts_on_day(workouts: &[CompletedWorkout], date: NaiveDate) -> usize {
    workouts
        .iter()
        .filter(|w| day_of(w.completed_at) == date)
        .count()
}

/// Number of workouts completed in the ISO week containing `date`
pub fn workouts_in_week(workouts: &[CompletedWorkout], date: NaiveDate) -> usize {
    let week_start = start_of_week(date);
    let window_start = start_of_day(week_start);
    workouts
        .iter()
        .filter(|w| w.completed_at >= window_start)
        .filter(|w| day_of(w.completed_at) <= week_start + Duration::days(6))
        .count()
}

/// Distinct categories trained in the ISO week containing `date`
pub fn categories_in_week(
    workouts: &[CompletedWorkout],
    date: NaiveDate,
) -> BTreeSet<WorkoutCategory> {
    let week_start = start_of_week(date);
    let window_start = start_of_day(week_start);
    workouts
        .iter()
        .filter(|w| w.completed_at >= window_start)
        .filter(|w| day_of(w.completed_at) <= week_start + Duration::days(6))
        .map(|w| w.category)
        .collect()
}
