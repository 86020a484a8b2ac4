use chrono::{DateTime, NaiveDate};
use tempfile::TempDir;

use pantry_nutrition::engine::{DateRange, aggregate_period};
use pantry_nutrition::models::{MealType, SustainabilityScore};
use pantry_nutrition::state::{HouseholdStore, load_state, save_state};

const STATE_JSON: &str = r#"{
    "recipes": [
        {"id": "r1", "name": "Chickpea Salad", "nutritionInfo": {"calories": 380, "protein": 28, "carbs": 48, "fat": 18}},
        {"id": "r2", "name": "Pasta Bake", "nutritionInfo": {"calories": 720, "protein": 25, "carbs": 90, "fat": 30},
         "sustainabilityInfo": {"score": {"kind": "manual", "value": 40}}}
    ],
    "pantry": [
        {"id": "p1", "name": "Rolled Oats", "quantity": 1, "nutritionInfo": {"calories": 150, "protein": 5, "carbs": 27, "fat": 3},
         "sustainabilityInfo": {"score": {"kind": "computed", "value": 0}, "packaging": "biodegradable", "carbonFootprint": "low"}}
    ],
    "goal": {"dailyCalories": 2000, "dailyProtein": 60, "dailyCarbs": 250, "dailyFat": 70, "progress": []},
    "consumption": []
}"#;

fn write_state(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("household.json");
    std::fs::write(&path, STATE_JSON).unwrap();
    path
}

#[test]
fn test_log_save_reload_summarize() {
    let dir = TempDir::new().unwrap();
    let path = write_state(&dir);

    let mut store = HouseholdStore::new(load_state(&path).unwrap());
    let lunch = DateTime::parse_from_rfc3339("2024-05-14T12:30:00+02:00").unwrap();
    let dinner = DateTime::parse_from_rfc3339("2024-05-14T19:45:00+02:00").unwrap();
    store.consume_recipe("r1", 1.0, MealType::Lunch, lunch).unwrap();
    store.consume_recipe("pasta bake", 2.0, MealType::Dinner, dinner).unwrap();
    save_state(&path, store.state()).unwrap();

    let reloaded = HouseholdStore::new(load_state(&path).unwrap());
    assert_eq!(reloaded.consumption().len(), 2);

    let goal = reloaded.goal().unwrap();
    assert_eq!(goal.progress.len(), 1);
    assert_eq!(goal.progress[0].nutrition.calories, 1820.0);
    assert!(!goal.progress[0].completed);

    let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
    let range = DateRange::last_n_days(day, 3);
    let summary = aggregate_period(
        &range,
        &goal.progress,
        reloaded.consumption(),
        Some(MealType::Dinner),
    );

    assert_eq!(summary.per_day.len(), 3);
    assert_eq!(summary.per_day[2].nutrition.calories, 1440.0);
    assert_eq!(summary.per_day[2].logged.unwrap().nutrition.calories, 1820.0);
    assert_eq!(summary.meal_distribution.get(&MealType::Lunch), Some(&1));
    assert_eq!(summary.averages.calories, 480.0);
}

#[test]
fn test_check_then_exceed() {
    let dir = TempDir::new().unwrap();
    let path = write_state(&dir);
    let mut store = HouseholdStore::new(load_state(&path).unwrap());
    let day = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();

    assert!(store.check_recipe("r1", 1.0, day).unwrap().is_valid());

    let at = DateTime::parse_from_rfc3339("2024-05-14T08:00:00+02:00").unwrap();
    store.consume_recipe("r2", 2.0, MealType::Lunch, at).unwrap();

    // 1440 + 380 kcal fits, but fat 60 + 18 > 70
    let result = store.check_recipe("r1", 1.0, day).unwrap();
    let report = result.report().unwrap();
    assert!(!report.exceeds.calories);
    assert!(report.exceeds.fat);
    assert!(!result.is_valid());
}

#[test]
fn test_rescore_persists() {
    let dir = TempDir::new().unwrap();
    let path = write_state(&dir);
    let mut store = HouseholdStore::new(load_state(&path).unwrap());
    store.rescore_all();
    save_state(&path, store.state()).unwrap();

    let state = load_state(&path).unwrap();
    // oats: 150 kcal +15, shares 0.14/0.77/0.09 -> 0, biodegradable +10, low carbon +10
    let oats = state.pantry[0].sustainability_info.unwrap();
    assert_eq!(oats.score, SustainabilityScore::Computed(85));
    let pasta = state.recipes[1].sustainability_info.unwrap();
    assert_eq!(pasta.score, SustainabilityScore::Manual(40));
    // salad with recipe bands: 380 kcal +15, shares 0.30/0.51/0.19 -> +15 each
    assert_eq!(state.recipes[0].sustainability_info.unwrap().score.value(), 100);
}
