use std::path::Path;

use crate::engine::PeriodSummary;
use crate::error::Result;

/// Write per-day totals of a period summary to a CSV file.
///
/// One row per date, followed by an `average` row.
pub fn write_summary_csv(summary: &PeriodSummary, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "date",
        "calories",
        "protein",
        "carbs",
        "fat",
        "logged_calories",
        "completed",
    ])?;

    for day in &summary.per_day {
        let (logged_calories, completed) = match day.logged {
            Some(logged) => (
                format!("{:.0}", logged.nutrition.calories),
                logged.completed.to_string(),
            ),
            None => (String::new(), String::new()),
        };
        wtr.write_record([
            day.date.to_string(),
            format!("{:.1}", day.nutrition.calories),
            format!("{:.1}", day.nutrition.protein),
            format!("{:.1}", day.nutrition.carbs),
            format!("{:.1}", day.nutrition.fat),
            logged_calories,
            completed,
        ])?;
    }

    let avg = &summary.averages;
    wtr.write_record([
        "average".to_string(),
        format!("{:.0}", avg.calories),
        format!("{:.0}", avg.protein),
        format!("{:.0}", avg.carbs),
        format!("{:.0}", avg.fat),
        String::new(),
        String::new(),
    ])?;

    wtr.flush()?;
    Ok(())
}
