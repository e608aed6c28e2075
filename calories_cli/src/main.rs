use calories_core::calendar::{resolve_start_at, week_range_from_start};
use calories_core::daily::project_daily_at;
use calories_core::energy::total_calories_burned;
use calories_core::export::write_weekly_csv;
use calories_core::projection::project_weight_plan_at;
use calories_core::*;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Highest week number accepted on the command line (about 190 years)
const MAX_WEEK: i64 = 10_000;

#[derive(Parser)]
#[command(name = "jcal")]
#[command(about = "Weight projection from a daily calorie balance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the overview for the saved profile (default)
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Manage the saved profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show BMR and daily energy balance
    Bmr,

    /// Show the weekly projection with logged actuals
    Project {
        #[arg(long)]
        json: bool,
    },

    /// Show the day-by-day projection for one week
    Week {
        /// Week number (1 = start date through the first Sunday)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_WEEK))]
        number: u32,

        #[arg(long)]
        json: bool,
    },

    /// Print the date range of one week
    Range {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_WEEK))]
        number: u32,
    },

    /// Record actual measurements for a day
    Log {
        /// Date to record (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Actual weight in pounds
        #[arg(long)]
        weight: Option<f64>,

        /// Calories eaten
        #[arg(long)]
        eaten: Option<f64>,

        /// Calories burned by exercise
        #[arg(long)]
        exercise: Option<f64>,

        /// Toggle a daily goal (repeatable)
        #[arg(long = "done")]
        done: Vec<String>,
    },

    /// Export the weekly projection to CSV
    Export {
        /// Output file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create or replace the profile
    Set {
        #[arg(long)]
        age: i32,
        /// Weight in pounds
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height_feet: i32,
        #[arg(long, default_value_t = 0)]
        height_inches: i32,
        /// male or female
        #[arg(long)]
        gender: Gender,
        /// Calories eaten per day
        #[arg(long)]
        eaten: f64,
        /// Calories burned by exercise per day
        #[arg(long, default_value_t = 0.0)]
        exercise: f64,
        /// Goal weight in pounds
        #[arg(long)]
        goal: f64,
        /// Start date (defaults to today)
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Print the saved profile as JSON
    Show,

    /// Delete the profile and all logged measurements
    Clear,

    /// Add a daily goal label
    GoalAdd { label: String },

    /// Remove a daily goal label
    GoalRemove { label: String },
}

/// Paths and settings shared by every command
struct AppContext {
    profiles: ProfileStore,
    measurements: MeasurementStore,
    config: Config,
    now: NaiveDateTime,
}

impl AppContext {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn require_profile(&self) -> Result<UserProfile> {
        self.profiles.load()?.ok_or_else(|| {
            Error::Profile("No profile saved. Run `jcal profile set` first.".into())
        })
    }

    fn fmt_date(&self, date: NaiveDate) -> String {
        date.format(&self.config.display.date_format).to_string()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    calories_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let now = match cli.today {
        Some(today) => today.and_time(Local::now().time()),
        None => Local::now().naive_local(),
    };

    let ctx = AppContext {
        profiles: ProfileStore::in_dir(&data_dir),
        measurements: MeasurementStore::in_dir(&data_dir),
        config,
        now,
    };

    match cli.command {
        Some(Commands::Summary { json }) => cmd_summary(&ctx, json),
        Some(Commands::Profile { action }) => cmd_profile(&ctx, action),
        Some(Commands::Bmr) => cmd_bmr(&ctx),
        Some(Commands::Project { json }) => cmd_project(&ctx, json),
        Some(Commands::Week { number, json }) => cmd_week(&ctx, number, json),
        Some(Commands::Range { number }) => cmd_range(&ctx, number),
        Some(Commands::Log {
            date,
            weight,
            eaten,
            exercise,
            done,
        }) => cmd_log(&ctx, date, weight, eaten, exercise, done),
        Some(Commands::Export { path }) => cmd_export(&ctx, path),
        None => {
            // Default to "summary" command
            cmd_summary(&ctx, false)
        }
    }
}

fn cmd_profile(ctx: &AppContext, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Set {
            age,
            weight,
            height_feet,
            height_inches,
            gender,
            eaten,
            exercise,
            goal,
            start_date,
        } => {
            // Keep daily goals across edits
            let daily_goals = ctx
                .profiles
                .load()?
                .map(|p| p.daily_goals)
                .unwrap_or_default();

            let profile = UserProfile {
                age,
                weight,
                height_feet,
                height_inches,
                gender,
                calories_eaten: eaten,
                calories_burned_exercise: exercise,
                start_date: start_date
                    .unwrap_or_else(|| ctx.today().format("%Y-%m-%d").to_string()),
                goal_weight: goal,
                daily_goals,
            };
            ctx.profiles.save(&profile)?;
            println!("✓ Profile saved");
            println!("  Start date: {}", profile.start_date);
            Ok(())
        }
        ProfileAction::Show => {
            let profile = ctx.require_profile()?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        ProfileAction::Clear => {
            ctx.profiles.clear()?;
            ctx.measurements.clear()?;
            println!("✓ Profile and measurements cleared");
            Ok(())
        }
        ProfileAction::GoalAdd { label } => {
            let label = label.trim().to_string();
            if label.is_empty() {
                return Err(Error::Profile("Goal label must not be empty".into()));
            }
            ctx.profiles.update(|p| {
                if !p.daily_goals.contains(&label) {
                    p.daily_goals.push(label.clone());
                }
                Ok(())
            })?;
            println!("✓ Added daily goal: {}", label);
            Ok(())
        }
        ProfileAction::GoalRemove { label } => {
            let profile = ctx.profiles.update(|p| {
                p.daily_goals.retain(|g| g != &label);
                Ok(())
            })?;
            println!("✓ Removed daily goal: {}", label);
            println!("  {} goals remaining", profile.daily_goals.len());
            Ok(())
        }
    }
}

fn cmd_summary(ctx: &AppContext, json: bool) -> Result<()> {
    let profile = ctx.require_profile()?;
    let plan = project_weight_plan_at(&profile, ctx.now);
    let summary = ProgressSummary::compute(&profile, &plan.weeks, ctx.now);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  OVERVIEW");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Starting weight: {:.1} lbs", profile.weight);
    println!("  Goal weight:     {:.1} lbs", profile.goal_weight);
    println!(
        "  Net calories:    {:+.0} kcal/day ({:+.2} lbs/day)",
        summary.net_calories, summary.pounds_per_day
    );
    if summary.days_per_pound > 0.0 {
        println!("  One pound every {:.1} days", summary.days_per_pound);
    }

    match plan.outcome {
        ProjectionOutcome::GoalReached { week } => {
            if let Some(end) = summary.expected_end_date {
                println!("  Goal reached in week {} ({})", week, ctx.fmt_date(end));
            }
        }
        ProjectionOutcome::CapReached => {
            println!(
                "  Goal not reached within {} weeks at this balance",
                MAX_PROJECTION_WEEKS
            );
        }
    }

    if let Some(week) = summary.current_week {
        println!("  Current week:    {}", week);
    }
    if summary.weight_to_go > 0.0 {
        println!(
            "  Calorie progress: {:.0} kcal ({:.0}%)",
            summary.calories_banked,
            summary.calorie_progress * 100.0
        );
    }
    println!();
    Ok(())
}

fn cmd_bmr(ctx: &AppContext) -> Result<()> {
    let profile = ctx.require_profile()?;
    println!("BMR:          {} kcal/day", compute_bmr(&profile));
    println!("Total burned: {:.0} kcal/day", total_calories_burned(&profile));
    println!("Eaten:        {:.0} kcal/day", profile.calories_eaten);
    println!("Net:          {:+.0} kcal/day", compute_net_calories(&profile));
    Ok(())
}

fn cmd_project(ctx: &AppContext, json: bool) -> Result<()> {
    let profile = ctx.require_profile()?;
    let start = resolve_start_at(&profile, ctx.now).date();
    let plan = project_weight_plan_at(&profile, ctx.now);
    let records = ctx.measurements.load_all()?;
    let rows = compare_weeks(start, &plan.weeks, &records, ctx.today());

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:>4}  {:<23}  {:>7}  {:>7}  {:>7}",
        "Week", "Dates", "Start", "End", "Actual"
    );
    for row in &rows {
        let actual = match (ctx.config.display.show_actuals, row.actual_weight) {
            (true, Some(weight)) => format!("{:.1}", weight),
            _ => "-".to_string(),
        };
        println!(
            "{:>4}  {:<23}  {:>7.1}  {:>7.1}  {:>7}{}",
            row.projection.week,
            format!(
                "{} - {}",
                ctx.fmt_date(row.range.start_date),
                ctx.fmt_date(row.range.end_date)
            ),
            row.projection.start_weight,
            row.projection.end_weight,
            actual,
            if row.is_current { "  ← this week" } else { "" }
        );
    }

    if !plan.goal_reachable() {
        println!(
            "\nGoal not reached within {} weeks at this balance.",
            MAX_PROJECTION_WEEKS
        );
    }
    Ok(())
}

fn cmd_week(ctx: &AppContext, number: u32, json: bool) -> Result<()> {
    let profile = ctx.require_profile()?;
    let days = project_daily_at(&profile, number, ctx.now);

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    let start = resolve_start_at(&profile, ctx.now).date();
    let range = week_range_from_start(start, number);
    let records = ctx.measurements.load_all()?;

    println!("Week {} ({})", number, range);
    for day in &days {
        let key = day.date.format("%Y-%m-%d").to_string();
        let record = records.iter().find(|r| r.date == key);

        let actual = record
            .and_then(|r| r.weight)
            .filter(|_| ctx.config.display.show_actuals)
            .map(|w| format!("{:.1}", w))
            .unwrap_or_else(|| "-".into());

        let goals = profile
            .daily_goals
            .iter()
            .map(|goal| {
                let done = record.map_or(false, |r| r.completed_goals.contains(goal));
                format!("[{}] {}", if done { "x" } else { " " }, goal)
            })
            .collect::<Vec<_>>()
            .join("  ");

        println!(
            "  {:<9}  {}  {:>6.1}  {:>6}  {}",
            day.day_name,
            ctx.fmt_date(day.date),
            day.weight,
            actual,
            goals
        );
    }
    Ok(())
}

fn cmd_range(ctx: &AppContext, number: u32) -> Result<()> {
    let profile = ctx.require_profile()?;
    let start = resolve_start_at(&profile, ctx.now).date();
    println!("{}", week_range_from_start(start, number));
    Ok(())
}

fn cmd_log(
    ctx: &AppContext,
    date: Option<NaiveDate>,
    weight: Option<f64>,
    eaten: Option<f64>,
    exercise: Option<f64>,
    done: Vec<String>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| ctx.today());

    if weight.is_none() && eaten.is_none() && exercise.is_none() && done.is_empty() {
        return Err(Error::Measurement(
            "Nothing to log: pass --weight, --eaten, --exercise or --done".into(),
        ));
    }

    if weight.is_some() || eaten.is_some() || exercise.is_some() {
        let record = ctx.measurements.save(MeasurementRecord {
            weight,
            calories_eaten: eaten,
            calories_burned_exercise: exercise,
            ..MeasurementRecord::for_date(date)
        })?;
        println!("✓ Logged {}", record.date);
    }

    for goal in &done {
        let completed = ctx.measurements.toggle_goal(date, goal)?;
        println!(
            "✓ {} {}",
            goal,
            if completed { "done" } else { "not done" }
        );
    }
    Ok(())
}

fn cmd_export(ctx: &AppContext, path: PathBuf) -> Result<()> {
    let profile = ctx.require_profile()?;
    let start = resolve_start_at(&profile, ctx.now).date();
    let plan = project_weight_plan_at(&profile, ctx.now);
    let records = ctx.measurements.load_all()?;
    let rows = compare_weeks(start, &plan.weeks, &records, ctx.today());

    let count = write_weekly_csv(&path, &rows)?;
    println!("✓ Exported {} weeks", count);
    println!("  CSV: {}", path.display());
    Ok(())
}
