use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::engine::constants::PERCENT;
use crate::error::{NutriError, Result};
use crate::models::{
    ConsumptionRecord, DailyProgress, MealType, Nutrient, NutritionGoal, NutritionInfo,
};

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range from `start` to `end` inclusive. Rejects `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(NutriError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Monday through Sunday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        let week = date.week(chrono::Weekday::Mon);
        Self {
            start: week.first_day(),
            end: week.last_day(),
        }
    }

    /// First through last day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// The `n` days ending on `end` (at least one day).
    pub fn last_n_days(end: NaiveDate, n: u32) -> Self {
        let back = u64::from(n.max(1) - 1);
        let start = end.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Number of days covered; 0 if the bounds are inverted.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take_while(move |d| *d <= self.end)
    }
}

/// Stored progress for a day, shown next to the consumption totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoggedDay {
    pub nutrition: NutritionInfo,
    pub completed: bool,
}

/// Consumption totals for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub date: NaiveDate,
    pub nutrition: NutritionInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged: Option<LoggedDay>,
}

/// Output of [`aggregate_period`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub range: DateRange,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type_filter: Option<MealType>,

    pub per_day: Vec<DayTotal>,
    pub averages: NutritionInfo,
    pub meal_distribution: BTreeMap<MealType, u32>,
}

impl PeriodSummary {
    /// Sum of per-day totals over the whole range.
    pub fn totals(&self) -> NutritionInfo {
        self.per_day.iter().map(|d| d.nutrition).sum()
    }

    /// Days whose stored progress is marked completed.
    pub fn completed_days(&self) -> usize {
        self.per_day
            .iter()
            .filter(|d| d.logged.is_some_and(|l| l.completed))
            .count()
    }

    /// Average daily intake as a rounded percent of each goal target.
    pub fn goal_adherence(&self, goal: &NutritionGoal) -> BTreeMap<Nutrient, u32> {
        Nutrient::ALL
            .iter()
            .map(|&n| {
                let target = goal.target(n);
                let pct = if target > 0.0 {
                    (self.averages.get(n) / target * PERCENT).round().max(0.0) as u32
                } else {
                    0
                };
                (n, pct)
            })
            .collect()
    }
}

/// Roll consumption up into per-day totals for `range`.
///
/// - one entry per date, chronological, zero-filled;
/// - only records matching `meal_type_filter` count towards totals;
/// - `meal_distribution` counts every in-range record, ignoring the filter;
/// - `averages` are the rounded per-day means (all zero for an empty range).
pub fn aggregate_period(
    range: &DateRange,
    daily_progress: &[DailyProgress],
    consumption: &[ConsumptionRecord],
    meal_type_filter: Option<MealType>,
) -> PeriodSummary {
    let mut day_sums: HashMap<NaiveDate, NutritionInfo> = HashMap::new();
    let mut meal_distribution: BTreeMap<MealType, u32> = BTreeMap::new();

    for record in consumption {
        let date = record.consumed_on();
        if !range.contains(date) {
            continue;
        }
        *meal_distribution.entry(record.meal_type).or_insert(0) += 1;

        if meal_type_filter.is_some_and(|meal| meal != record.meal_type) {
            continue;
        }
        let entry = day_sums.entry(date).or_default();
        *entry = *entry + record.total_nutrition();
    }

    let logged: HashMap<NaiveDate, LoggedDay> = daily_progress
        .iter()
        .filter(|p| range.contains(p.date))
        .map(|p| {
            (
                p.date,
                LoggedDay {
                    nutrition: p.nutrition,
                    completed: p.completed,
                },
            )
        })
        .collect();

    let per_day: Vec<DayTotal> = range
        .days()
        .map(|date| DayTotal {
            date,
            nutrition: day_sums.get(&date).copied().unwrap_or_default(),
            logged: logged.get(&date).copied(),
        })
        .collect();

    let averages = if per_day.is_empty() {
        NutritionInfo::zero()
    } else {
        let total: NutritionInfo = per_day.iter().map(|d| d.nutrition).sum();
        let days = per_day.len() as f64;
        NutritionInfo::new(
            total.calories / days,
            total.protein / days,
            total.carbs / days,
            total.fat / days,
        )
        .rounded()
    };

    debug!(
        days = per_day.len(),
        records = consumption.len(),
        filter = ?meal_type_filter,
        "aggregated period"
    );

    PeriodSummary {
        range: *range,
        meal_type_filter,
        per_day,
        averages,
        meal_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn record(at: &str, meal: MealType, servings: f64, calories: f64) -> ConsumptionRecord {
        ConsumptionRecord {
            recipe_id: "r1".to_string(),
            servings,
            meal_type: meal,
            consumed_at: DateTime::parse_from_rfc3339(at).unwrap(),
            nutrition_info: NutritionInfo::new(calories, 10.0, 20.0, 5.0),
        }
    }

    #[test]
    fn test_empty_week() {
        let range = DateRange::new(date(3, 4), date(3, 10)).unwrap();
        let summary = aggregate_period(&range, &[], &[], None);

        assert_eq!(summary.per_day.len(), 7);
        assert!(summary.per_day.iter().all(|d| d.nutrition.is_zero()));
        assert!(summary.averages.is_zero());
        assert!(summary.meal_distribution.is_empty());
    }

    #[test]
    fn test_sums_servings_by_day() {
        let range = DateRange::new(date(3, 1), date(3, 3)).unwrap();
        let log = vec![
            record("2024-03-01T08:00:00+00:00", MealType::Breakfast, 2.0, 150.0),
            record("2024-03-01T13:00:00+00:00", MealType::Lunch, 1.0, 500.0),
            record("2024-03-03T19:00:00+00:00", MealType::Dinner, 1.5, 600.0),
            record("2024-02-28T19:00:00+00:00", MealType::Dinner, 1.0, 999.0),
        ];
        let summary = aggregate_period(&range, &[], &log, None);

        assert_eq!(summary.per_day[0].nutrition.calories, 800.0);
        assert_eq!(summary.per_day[1].nutrition.calories, 0.0);
        assert_eq!(summary.per_day[2].nutrition.calories, 900.0);
        assert_eq!(summary.averages.calories, 567.0);
        assert_eq!(summary.meal_distribution.len(), 3);
        assert_eq!(summary.totals().calories, 1700.0);
    }

    #[test]
    fn test_filter_keeps_full_distribution() {
        let range = DateRange::new(date(3, 1), date(3, 1)).unwrap();
        let log = vec![
            record("2024-03-01T08:00:00+00:00", MealType::Breakfast, 1.0, 100.0),
            record("2024-03-01T15:00:00+00:00", MealType::Snack, 1.0, 50.0),
            record("2024-03-01T16:00:00+00:00", MealType::Snack, 1.0, 70.0),
        ];
        let summary = aggregate_period(&range, &[], &log, Some(MealType::Snack));

        assert_eq!(summary.per_day[0].nutrition.calories, 120.0);
        assert_eq!(summary.meal_distribution.get(&MealType::Breakfast), Some(&1));
        assert_eq!(summary.meal_distribution.get(&MealType::Snack), Some(&2));
    }

    #[test]
    fn test_logged_progress_attached() {
        let range = DateRange::new(date(3, 1), date(3, 2)).unwrap();
        let progress = vec![DailyProgress::new(
            date(3, 2),
            NutritionInfo::new(1900.0, 40.0, 200.0, 60.0),
            true,
        )];
        let summary = aggregate_period(&range, &progress, &[], None);

        assert!(summary.per_day[0].logged.is_none());
        assert_eq!(summary.per_day[1].logged.unwrap().nutrition.calories, 1900.0);
        assert!(summary.per_day[1].nutrition.is_zero());
        assert_eq!(summary.completed_days(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(DateRange::new(date(3, 5), date(3, 1)).is_err());
    }

    #[test]
    fn test_range_helpers() {
        // 2024-03-06 is a Wednesday
        let week = DateRange::week_of(date(3, 6));
        assert_eq!(week.start, date(3, 4));
        assert_eq!(week.end, date(3, 10));
        assert_eq!(week.len(), 7);

        let feb = DateRange::month_of(date(2, 14));
        assert_eq!(feb.start, date(2, 1));
        assert_eq!(feb.end, date(2, 29));

        let last = DateRange::last_n_days(date(3, 10), 3);
        assert_eq!(last.days().collect::<Vec<_>>(), vec![date(3, 8), date(3, 9), date(3, 10)]);
    }

    #[test]
    fn test_goal_adherence() {
        let range = DateRange::new(date(3, 1), date(3, 2)).unwrap();
        let log = vec![record("2024-03-01T08:00:00+00:00", MealType::Lunch, 1.0, 2000.0)];
        let summary = aggregate_period(&range, &[], &log, None);
        let goal = NutritionGoal::new(2000.0, 50.0, 250.0, 70.0);

        let adherence = summary.goal_adherence(&goal);
        assert_eq!(adherence[&Nutrient::Calories], 50);
        assert_eq!(adherence[&Nutrient::Protein], 10);
    }
}
