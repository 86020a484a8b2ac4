use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::engine::{CalorieBands, DateRange};
use crate::models::{CarbonFootprint, MealType, Packaging};

/// pantry-nutrition: nutrition parsing, sustainability scores, goal checks
/// and period summaries for a household food log.
#[derive(Parser, Debug)]
#[command(name = "pantry-nutrition")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the household state JSON file.
    #[arg(
        short,
        long,
        global = true,
        env = "PANTRY_NUTRITION_FILE",
        default_value = "household.json"
    )]
    pub file: PathBuf,

    /// Print structured results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Calorie calibration used by the scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScoreProfile {
    /// Snack/pantry item bands (<=200, <=300, <=400 kcal).
    #[default]
    Pantry,
    /// Full recipe bands (<=400, <=600, <=800 kcal).
    Recipe,
}

impl ScoreProfile {
    pub fn bands(self) -> CalorieBands {
        match self {
            ScoreProfile::Pantry => CalorieBands::PANTRY_ITEM,
            ScoreProfile::Recipe => CalorieBands::RECIPE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Period {
    #[default]
    Week,
    Month,
    /// The last `--days` days.
    Days,
}

/// Date-range selection shared by `summary` and `export`.
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Period to summarize.
    #[arg(long, value_enum, default_value_t = Period::Week)]
    pub period: Period,

    /// Reference date (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Number of days for `--period days`.
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Only count meals of this type in the totals.
    #[arg(long, value_enum)]
    pub meal: Option<MealType>,
}

impl Default for PeriodArgs {
    fn default() -> Self {
        Self {
            period: Period::Week,
            date: None,
            days: 7,
            meal: None,
        }
    }
}

impl PeriodArgs {
    /// Resolve to a concrete range around `today` unless `--date` is given.
    pub fn range(&self, today: NaiveDate) -> DateRange {
        let date = self.date.unwrap_or(today);
        match self.period {
            Period::Week => DateRange::week_of(date),
            Period::Month => DateRange::month_of(date),
            Period::Days => DateRange::last_n_days(date, self.days),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract calories and macros from a free-text description.
    Parse {
        /// Text such as "320 kcal, 18g protein, 40g carbs, 9g fat".
        text: String,
    },

    /// Compute a sustainability score.
    Score {
        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Parse nutrition from text instead of the numeric flags.
        #[arg(long, conflicts_with_all = ["calories", "protein", "carbs", "fat"])]
        from_text: Option<String>,

        /// Calorie calibration.
        #[arg(long, value_enum, default_value_t = ScoreProfile::Pantry)]
        profile: ScoreProfile,

        #[arg(long, value_enum)]
        packaging: Option<Packaging>,

        #[arg(long, value_enum)]
        carbon: Option<CarbonFootprint>,
    },

    /// Show or set the daily nutrition goal.
    Goal {
        #[arg(long)]
        calories: Option<f64>,

        #[arg(long)]
        protein: Option<f64>,

        #[arg(long)]
        carbs: Option<f64>,

        #[arg(long)]
        fat: Option<f64>,

        /// Prompt for every target.
        #[arg(long)]
        interactive: bool,
    },

    /// Check whether servings of a recipe would exceed today's goal.
    Check {
        /// Recipe id or name.
        recipe: String,

        #[arg(long, default_value_t = 1.0)]
        servings: f64,

        /// Day to check against (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log servings of a recipe as eaten. Missing values are prompted for.
    Log {
        /// Recipe id or name.
        #[arg(long)]
        recipe: Option<String>,

        #[arg(long)]
        servings: Option<f64>,

        #[arg(long, value_enum)]
        meal: Option<MealType>,

        /// Log even if the goal would be exceeded, without asking.
        #[arg(short, long)]
        yes: bool,
    },

    /// Per-day totals, averages and meal counts for a period.
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Write a period summary to CSV.
    Export {
        #[command(flatten)]
        period: PeriodArgs,

        /// Output CSV file.
        #[arg(long, default_value = "nutrition_summary.csv")]
        out: PathBuf,
    },

    /// Recompute all computed sustainability scores.
    Rescore,
}

impl Default for Command {
    fn default() -> Self {
        Command::Summary {
            period: PeriodArgs::default(),
        }
    }
}
