use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use irontrack_core::*;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "irontrack")]
#[command(about = "Personal workout logger with progress reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workout file seeded with the default catalog
    Init,

    /// Log one performed set
    Log {
        #[arg(long)]
        category: String,

        #[arg(long)]
        exercise: String,

        /// Weight in kilograms (0 for bodyweight)
        #[arg(long)]
        weight: f64,

        /// Repetitions performed
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        reps: u32,

        /// Date of the set (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Register a custom category/exercise pair
    AddExercise {
        #[arg(long)]
        category: String,

        #[arg(long)]
        exercise: String,
    },

    /// Show the sets logged on one date (default)
    View {
        /// Date to show (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show past sets for one exercise, newest first
    History {
        #[arg(long)]
        exercise: String,
    },

    /// List selectable categories, or the exercises within one category
    Catalog {
        #[arg(long)]
        category: Option<String>,
    },

    /// Per-date reps, weight and volume sums for one exercise
    Progress {
        #[arg(long)]
        exercise: String,
    },

    /// Distinct workout days per week or month
    Consistency {
        #[arg(long, value_enum, default_value_t = PeriodArg::Week)]
        period: PeriodArg,
    },

    /// How training is distributed across categories
    Categories {
        #[arg(long, value_enum, default_value_t = MetricArg::Volume)]
        metric: MetricArg,
    },

    /// Most-performed exercises
    Top {
        /// How many exercises to show (defaults to the configured value)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, value_enum, default_value_t = MetricArg::Volume)]
        metric: MetricArg,
    },

    /// Write the full table to another format
    Export {
        #[arg(long, value_enum)]
        format: ExportFormat,

        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Week,
    Month,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Sets,
    Volume,
}

impl From<MetricArg> for UsageMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Sets => UsageMetric::Sets,
            MetricArg::Volume => UsageMetric::Volume,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    // Initialize logging
    irontrack_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = WorkoutStore::new(data_dir.join(irontrack_core::config::STORE_FILE_NAME));

    let today = Local::now().date_naive();

    // Seed on first use, like the dashboard did at startup
    let seeded = store.initialize(today)?;
    if seeded > 0 {
        println!("Initialized workout file with {} placeholder rows.", seeded);
    }

    match cli.command {
        Some(Commands::Init) => {
            if seeded == 0 {
                println!("Workout file already exists at {}", store.path().display());
            }
            Ok(())
        }
        Some(Commands::Log {
            category,
            exercise,
            weight,
            reps,
            date,
        }) => cmd_log(&store, category, exercise, weight, reps, date.unwrap_or(today)),
        Some(Commands::AddExercise { category, exercise }) => {
            cmd_add_exercise(&store, &category, &exercise, today)
        }
        Some(Commands::View { date }) => cmd_view(&store, date.unwrap_or(today)),
        Some(Commands::History { exercise }) => cmd_history(&store, &exercise),
        Some(Commands::Catalog { category }) => cmd_catalog(&store, category.as_deref()),
        Some(Commands::Progress { exercise }) => cmd_progress(&store, &exercise),
        Some(Commands::Consistency { period }) => cmd_consistency(&store, period.into()),
        Some(Commands::Categories { metric }) => cmd_categories(&store, metric.into()),
        Some(Commands::Top { limit, metric }) => {
            cmd_top(&store, limit.unwrap_or(config.charts.top_n), metric.into())
        }
        Some(Commands::Export { format, output }) => cmd_export(&store, format, &output),
        None => {
            // Default to showing today's workouts
            cmd_view(&store, today)
        }
    }
}

fn cmd_log(
    store: &WorkoutStore,
    category: String,
    exercise: String,
    weight: f64,
    reps: u32,
    date: NaiveDate,
) -> Result<()> {
    let set = WorkoutSet::new(date, category, exercise, weight, reps);
    store.append(set.clone())?;

    println!(
        "✓ Saved: {} reps @ {}kg for {} on {}",
        set.reps, set.weight, set.exercise, set.date
    );
    Ok(())
}

fn cmd_add_exercise(
    store: &WorkoutStore,
    category: &str,
    exercise: &str,
    today: NaiveDate,
) -> Result<()> {
    let category = title_case(category);
    let exercise = title_case(exercise);

    if category.is_empty() || exercise.is_empty() {
        return Err(Error::Other(
            "Please enter both a category and an exercise name".into(),
        ));
    }

    store.append(WorkoutSet::placeholder(today, &category, &exercise))?;

    println!(
        "✓ Custom exercise '{}' added to category '{}'!",
        exercise, category
    );
    Ok(())
}

fn cmd_view(store: &WorkoutStore, date: NaiveDate) -> Result<()> {
    let rows = store.load();
    let day: Vec<&WorkoutSet> = rows.iter().filter(|r| r.date == date).collect();

    if day.is_empty() {
        println!("No workouts found for {}.", date);
        return Ok(());
    }

    for category in unique_in_order(day.iter().map(|r| r.category.as_str())) {
        println!("\n{} - {}", date, category);

        let in_category: Vec<&WorkoutSet> = day
            .iter()
            .copied()
            .filter(|r| r.category == category)
            .collect();
        for exercise in unique_in_order(in_category.iter().map(|r| r.exercise.as_str())) {
            println!("  {}", exercise);
            for row in in_category.iter().filter(|r| r.exercise == exercise) {
                println!("    {}", format_set(row));
            }
        }
    }
    Ok(())
}

fn cmd_history(store: &WorkoutStore, exercise: &str) -> Result<()> {
    let rows = store.load();
    let sets: Vec<&WorkoutSet> = rows
        .iter()
        .filter(|r| r.is_logged() && r.exercise == exercise)
        .collect();

    if sets.is_empty() {
        println!("No past workouts found for this exercise.");
        return Ok(());
    }

    let mut dates: Vec<NaiveDate> = sets.iter().map(|r| r.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    println!("Past sets for {}:", exercise);
    for date in dates {
        println!("\n{}", date);
        for row in sets.iter().filter(|r| r.date == date) {
            println!("  {} reps @ {}kg", row.reps, row.weight);
        }
    }
    Ok(())
}

fn cmd_catalog(store: &WorkoutStore, category: Option<&str>) -> Result<()> {
    let rows = store.load();

    match category {
        Some(category) => {
            for exercise in exercises_for(category, &rows) {
                println!("{}", exercise);
            }
        }
        None => {
            for category in categories(&rows) {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

fn cmd_progress(store: &WorkoutStore, exercise: &str) -> Result<()> {
    let rows = store.load();
    let progress = exercise_progress(&rows, exercise);

    if progress.is_empty() {
        println!("No logged data to show progress for '{}'.", exercise);
        return Ok(());
    }

    println!(
        "{:<12} {:>6} {:>10} {:>10}",
        "date", "reps", "weight", "volume"
    );
    for point in progress {
        println!(
            "{:<12} {:>6} {:>10.1} {:>10.1}",
            point.date.to_string(),
            point.reps,
            point.weight,
            point.volume
        );
    }
    Ok(())
}

fn cmd_consistency(store: &WorkoutStore, period: Period) -> Result<()> {
    let rows = store.load();
    let buckets = workout_consistency(&rows, period);

    if buckets.is_empty() {
        println!("No data available to track workout consistency.");
        return Ok(());
    }

    let label = match period {
        Period::Week => "week",
        Period::Month => "month",
    };
    println!("Workout days per {}:", label);
    for bucket in buckets {
        println!("  {:<10} {}", bucket.period, bucket.workout_days);
    }
    Ok(())
}

fn cmd_categories(store: &WorkoutStore, metric: UsageMetric) -> Result<()> {
    let rows = store.load();
    let usage = category_distribution(&rows, metric);

    if usage.is_empty() {
        println!("No data available to show category distribution.");
        return Ok(());
    }

    println!("Categories by {}:", metric_label(metric));
    for entry in usage {
        println!(
            "  {:<20} {}",
            entry.category,
            format_value(entry.value, metric)
        );
    }
    Ok(())
}

fn cmd_top(store: &WorkoutStore, limit: usize, metric: UsageMetric) -> Result<()> {
    let rows = store.load();
    let top = top_exercises(&rows, limit, metric);

    if top.is_empty() {
        println!("No data available to determine top exercises.");
        return Ok(());
    }

    println!("Top {} exercises by {}:", top.len(), metric_label(metric));
    for entry in top {
        println!(
            "  {:<24} {}",
            entry.exercise,
            format_value(entry.value, metric)
        );
    }
    Ok(())
}

fn cmd_export(store: &WorkoutStore, format: ExportFormat, output: &Path) -> Result<()> {
    let rows = store.load();

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(output)?;
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            let file = std::fs::File::create(output)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writer.flush()?;
        }
    }

    println!("✓ Exported {} rows to {}", rows.len(), output.display());
    Ok(())
}

/// One "reps @ weight" line; placeholder fields display as N/A.
fn format_set(row: &WorkoutSet) -> String {
    let reps = if row.reps > 0 {
        format!("{} reps", row.reps)
    } else {
        "N/A reps".to_string()
    };
    let weight = if row.weight > 0.0 {
        format!("{}kg", row.weight)
    } else {
        "N/A weight".to_string()
    };
    format!("{} @ {}", reps, weight)
}

fn metric_label(metric: UsageMetric) -> &'static str {
    match metric {
        UsageMetric::Sets => "number of sets",
        UsageMetric::Volume => "total volume (kg)",
    }
}

fn format_value(value: f64, metric: UsageMetric) -> String {
    match metric {
        UsageMetric::Sets => format!("{:.0}", value),
        UsageMetric::Volume => format!("{:.1}", value),
    }
}

/// Title-case free-text input the way the log form expects
/// ("incline  press" -> "Incline Press").
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// First-seen order dedup, used to mirror the stored row order in views.
fn unique_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}
