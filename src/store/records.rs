//! Row records and the domain <-> storage boundary
//!
//! Enums and collections are stored as raw strings; parsing back into the
//! domain is validated and an unrecognized raw value is an error naming the
//! bad value, never a silent default.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    Achievement, AchievementCategory, AchievementTier, ActivityLevel, CompletedWorkout,
    Equipment, FitnessGoal, FitnessLevel, FocusArea, Gender, HunterRank, PlayerProfile, Quest,
    QuestKind, QuestType, WorkoutCategory, XpEvent, XpSource,
};

pub(crate) fn to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| anyhow!("timestamp out of range: {ms}"))
}

pub(crate) fn opt_to_millis(ts: Option<DateTime<Utc>>) -> Option<i64> {
    ts.map(to_millis)
}

pub(crate) fn opt_from_millis(ms: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    ms.map(from_millis).transpose()
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid uuid: {raw}"))
}

/// Join a typed collection into a comma-separated raw string
fn join_raw<T>(items: &[T], as_str: impl Fn(&T) -> &str) -> String {
    items.iter().map(as_str).collect::<Vec<_>>().join(",")
}

/// Split a comma-separated raw string back into a typed collection
fn split_raw<T>(
    raw: &str,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',')
        .map(|part| parse(part).ok_or_else(|| anyhow!("unrecognized {field} value: {part}")))
        .collect()
}

// ---------------------------------------------------------------------------
// Player profile
// ---------------------------------------------------------------------------

/// Raw `player_profile` row
pub struct ProfileRow {
    pub id: String,
    pub display_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub fitness_level: String,
    pub activity_level: String,
    pub goal: String,
    pub focus_areas: String,
    pub equipment: String,
    pub motivations: String,
    pub current_xp: i64,
    pub total_xp: i64,
    pub current_level: i64,
    pub rank: String,
    pub strength: i64,
    pub vitality: i64,
    pub agility: i64,
    pub recovery: i64,
    pub potential_strength: i64,
    pub potential_vitality: i64,
    pub potential_agility: i64,
    pub potential_recovery: i64,
    pub workout_days: String,
    pub weekly_goal: i64,
    pub preferred_workout_duration: i64,
    pub has_completed_onboarding: bool,
    pub onboarding_completed_at: Option<i64>,
    pub created_at: i64,
}

impl ProfileRow {
    pub fn from_domain(profile: &PlayerProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            display_name: profile.display_name.clone(),
            gender: profile.gender.map(|g| g.as_str().to_string()),
            birth_date: profile.birth_date.map(|d| d.to_string()),
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            target_weight_kg: profile.target_weight_kg,
            fitness_level: profile.fitness_level.as_str().to_string(),
            activity_level: profile.activity_level.as_str().to_string(),
            goal: profile.goal.as_str().to_string(),
            focus_areas: join_raw(&profile.focus_areas, |f| f.as_str()),
            equipment: join_raw(&profile.equipment, |e| e.as_str()),
            motivations: profile.motivations.join(","),
            current_xp: profile.current_xp as i64,
            total_xp: profile.total_xp as i64,
            current_level: profile.current_level as i64,
            rank: profile.rank.as_str().to_string(),
            strength: profile.strength as i64,
            vitality: profile.vitality as i64,
            agility: profile.agility as i64,
            recovery: profile.recovery as i64,
            potential_strength: profile.potential_strength as i64,
            potential_vitality: profile.potential_vitality as i64,
            potential_agility: profile.potential_agility as i64,
            potential_recovery: profile.potential_recovery as i64,
            workout_days: profile
                .workout_days
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(","),
            weekly_goal: profile.weekly_goal as i64,
            preferred_workout_duration: profile.preferred_workout_duration as i64,
            has_completed_onboarding: profile.has_completed_onboarding,
            onboarding_completed_at: opt_to_millis(profile.onboarding_completed_at),
            created_at: to_millis(profile.created_at),
        }
    }

    pub fn into_domain(self) -> Result<PlayerProfile> {
        let gender = self
            .gender
            .as_deref()
            .map(|raw| {
                Gender::parse(raw).ok_or_else(|| anyhow!("unrecognized gender value: {raw}"))
            })
            .transpose()?;
        let birth_date = self
            .birth_date
            .as_deref()
            .map(|raw| {
                raw.parse::<NaiveDate>()
                    .with_context(|| format!("invalid birth date: {raw}"))
            })
            .transpose()?;

        Ok(PlayerProfile {
            id: parse_uuid(&self.id)?,
            display_name: self.display_name,
            gender,
            birth_date,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            target_weight_kg: self.target_weight_kg,
            fitness_level: FitnessLevel::parse(&self.fitness_level).ok_or_else(|| {
                anyhow!("unrecognized fitness level value: {}", self.fitness_level)
            })?,
            activity_level: ActivityLevel::parse(&self.activity_level).ok_or_else(|| {
                anyhow!("unrecognized activity level value: {}", self.activity_level)
            })?,
            goal: FitnessGoal::parse(&self.goal)
                .ok_or_else(|| anyhow!("unrecognized goal value: {}", self.goal))?,
            focus_areas: split_raw(&self.focus_areas, "focus area", FocusArea::parse)?,
            equipment: split_raw(&self.equipment, "equipment", Equipment::parse)?,
            motivations: if self.motivations.is_empty() {
                Vec::new()
            } else {
                self.motivations.split(',').map(String::from).collect()
            },
            current_xp: self.current_xp as u64,
            total_xp: self.total_xp as u64,
            current_level: self.current_level as u32,
            rank: HunterRank::parse(&self.rank)
                .ok_or_else(|| anyhow!("unrecognized rank value: {}", self.rank))?,
            strength: self.strength as u32,
            vitality: self.vitality as u32,
            agility: self.agility as u32,
            recovery: self.recovery as u32,
            potential_strength: self.potential_strength as u32,
            potential_vitality: self.potential_vitality as u32,
            potential_agility: self.potential_agility as u32,
            potential_recovery: self.potential_recovery as u32,
            workout_days: split_raw(&self.workout_days, "workout day", |raw| {
                raw.parse::<u8>().ok().filter(|d| *d < 7)
            })?,
            weekly_goal: self.weekly_goal as u32,
            preferred_workout_duration: self.preferred_workout_duration as u32,
            has_completed_onboarding: self.has_completed_onboarding,
            onboarding_completed_at: opt_from_millis(self.onboarding_completed_at)?,
            created_at: from_millis(self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Completed workouts
// ---------------------------------------------------------------------------

/// Raw `completed_workouts` row
pub struct WorkoutRow {
    pub id: String,
    pub workout_name: String,
    pub category: String,
    pub duration_minutes: i64,
    pub completed_at: i64,
}

impl WorkoutRow {
    pub fn from_domain(workout: &CompletedWorkout) -> Self {
        Self {
            id: workout.id.to_string(),
            workout_name: workout.workout_name.clone(),
            category: workout.category.as_str().to_string(),
            duration_minutes: workout.duration_minutes as i64,
            completed_at: to_millis(workout.completed_at),
        }
    }

    pub fn into_domain(self) -> Result<CompletedWorkout> {
        Ok(CompletedWorkout {
            id: parse_uuid(&self.id)?,
            workout_name: self.workout_name,
            category: WorkoutCategory::parse(&self.category)
                .ok_or_else(|| anyhow!("unrecognized category value: {}", self.category))?,
            duration_minutes: self.duration_minutes as u32,
            completed_at: from_millis(self.completed_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// Raw `quests` row
pub struct QuestRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub quest_type: String,
    pub kind: String,
    pub category: Option<String>,
    pub target_count: i64,
    pub current_progress: i64,
    pub xp_reward: i64,
    pub completed: bool,
    pub completed_at: Option<i64>,
    pub expires_at: i64,
    pub created_at: i64,
}

impl QuestRow {
    pub fn from_domain(quest: &Quest) -> Self {
        Self {
            id: quest.id.to_string(),
            title: quest.title.clone(),
            description: quest.description.clone(),
            quest_type: quest.quest_type.as_str().to_string(),
            kind: quest.kind.as_str().to_string(),
            category: quest.category.map(|c| c.as_str().to_string()),
            target_count: quest.target_count as i64,
            current_progress: quest.current_progress as i64,
            xp_reward: quest.xp_reward as i64,
            completed: quest.completed,
            completed_at: opt_to_millis(quest.completed_at),
            expires_at: to_millis(quest.expires_at),
            created_at: to_millis(quest.created_at),
        }
    }

    pub fn into_domain(self) -> Result<Quest> {
        let category = self
            .category
            .as_deref()
            .map(|raw| {
                WorkoutCategory::parse(raw)
                    .ok_or_else(|| anyhow!("unrecognized category value: {raw}"))
            })
            .transpose()?;

        Ok(Quest {
            id: parse_uuid(&self.id)?,
            title: self.title,
            description: self.description,
            quest_type: QuestType::parse(&self.quest_type)
                .ok_or_else(|| anyhow!("unrecognized quest type value: {}", self.quest_type))?,
            kind: QuestKind::parse(&self.kind)
                .ok_or_else(|| anyhow!("unrecognized quest kind value: {}", self.kind))?,
            category,
            target_count: self.target_count as u32,
            current_progress: self.current_progress as u32,
            xp_reward: self.xp_reward as u32,
            completed: self.completed,
            completed_at: opt_from_millis(self.completed_at)?,
            expires_at: from_millis(self.expires_at)?,
            created_at: from_millis(self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Achievements
// ---------------------------------------------------------------------------

/// Raw `achievements` row
pub struct AchievementRow {
    pub id: String,
    pub key: String,
    pub title: String,
    pub description: String,
    pub tier: String,
    pub category: String,
    pub xp_reward: i64,
    pub icon: String,
    pub unlocked: bool,
    pub unlocked_at: Option<i64>,
    pub progress: i64,
    pub target_progress: i64,
    pub created_at: i64,
}

impl AchievementRow {
    pub fn from_domain(achievement: &Achievement) -> Self {
        Self {
            id: achievement.id.to_string(),
            key: achievement.key.clone(),
            title: achievement.title.clone(),
            description: achievement.description.clone(),
            tier: achievement.tier.as_str().to_string(),
            category: achievement.category.as_str().to_string(),
            xp_reward: achievement.xp_reward as i64,
            icon: achievement.icon.clone(),
            unlocked: achievement.unlocked,
            unlocked_at: opt_to_millis(achievement.unlocked_at),
            progress: achievement.progress as i64,
            target_progress: achievement.target_progress as i64,
            created_at: to_millis(achievement.created_at),
        }
    }

    pub fn into_domain(self) -> Result<Achievement> {
        Ok(Achievement {
            id: parse_uuid(&self.id)?,
            key: self.key,
            title: self.title,
            description: self.description,
            tier: AchievementTier::parse(&self.tier)
                .ok_or_else(|| anyhow!("unrecognized tier value: {}", self.tier))?,
            category: AchievementCategory::parse(&self.category).ok_or_else(|| {
                anyhow!("unrecognized achievement category value: {}", self.category)
            })?,
            xp_reward: self.xp_reward as u32,
            icon: self.icon,
            unlocked: self.unlocked,
            unlocked_at: opt_from_millis(self.unlocked_at)?,
            progress: self.progress as u32,
            target_progress: self.target_progress as u32,
            created_at: from_millis(self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// XP events
// ---------------------------------------------------------------------------

/// Raw `xp_events` row
pub struct XpEventRow {
    pub id: String,
    pub amount: i64,
    pub source_type: String,
    pub source_id: Option<String>,
    pub source_name: Option<String>,
    pub earned_at: i64,
}

impl XpEventRow {
    pub fn from_domain(event: &XpEvent) -> Self {
        Self {
            id: event.id.to_string(),
            amount: event.amount as i64,
            source_type: event.source.as_str().to_string(),
            source_id: event.source_id.clone(),
            source_name: event.source_name.clone(),
            earned_at: to_millis(event.earned_at),
        }
    }

    pub fn into_domain(self) -> Result<XpEvent> {
        Ok(XpEvent {
            id: parse_uuid(&self.id)?,
            amount: self.amount as u32,
            source: XpSource::parse(&self.source_type)
                .ok_or_else(|| anyhow!("unrecognized xp source value: {}", self.source_type))?,
            source_id: self.source_id,
            source_name: self.source_name,
            earned_at: from_millis(self.earned_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_profile_row_roundtrip() {
        let mut profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));
        profile.gender = Some(Gender::Other);
        profile.focus_areas = vec![FocusArea::Chest, FocusArea::Legs];
        profile.equipment = vec![Equipment::Dumbbells, Equipment::PullUpBar];
        profile.motivations = vec!["health".to_string(), "discipline".to_string()];
        profile.workout_days = vec![0, 2, 4];
        profile.rank = HunterRank::C;
        profile.credit_xp(2_500);

        let row = ProfileRow::from_domain(&profile);
        let restored = row.into_domain().unwrap();

        assert_eq!(restored.id, profile.id);
        assert_eq!(restored.gender, Some(Gender::Other));
        assert_eq!(restored.focus_areas, profile.focus_areas);
        assert_eq!(restored.equipment, profile.equipment);
        assert_eq!(restored.motivations, profile.motivations);
        assert_eq!(restored.workout_days, vec![0, 2, 4]);
        assert_eq!(restored.rank, HunterRank::C);
        assert_eq!(restored.total_xp, 2_500);
    }

    #[test]
    fn test_unrecognized_enum_raw_is_an_error() {
        let quest = Quest::complete_workouts(1, ts("2026-03-02T23:59:59Z"), ts("2026-03-02T08:00:00Z"));
        let mut row = QuestRow::from_domain(&quest);
        row.kind = "mystery".to_string();

        let err = row.into_domain().unwrap_err();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn test_quest_row_roundtrip() {
        let mut quest =
            Quest::category_workout(WorkoutCategory::Core, ts("2026-03-02T23:59:59Z"), ts("2026-03-02T08:00:00Z"));
        quest.increment_progress(1, ts("2026-03-02T09:00:00Z"));

        let restored = QuestRow::from_domain(&quest).into_domain().unwrap();
        assert_eq!(restored.id, quest.id);
        assert_eq!(restored.kind, QuestKind::Category);
        assert_eq!(restored.category, Some(WorkoutCategory::Core));
        assert!(restored.completed);
        assert_eq!(restored.completed_at, quest.completed_at);
    }

    #[test]
    fn test_empty_collections_stay_empty() {
        let profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));
        let restored = ProfileRow::from_domain(&profile).into_domain().unwrap();
        assert!(restored.focus_areas.is_empty());
        assert!(restored.equipment.is_empty());
        assert!(restored.motivations.is_empty());
    }
}
