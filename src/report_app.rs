use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, error::ErrorKind};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoaderConfig;
use crate::constants::report::{DATASET_ENV_VAR, DEFAULT_DATASET_PATH, DEFAULT_LOG_FILTER};
use crate::loader::load_offerings;
use crate::ranking::RankField;
use crate::store::CourseStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RankArg {
    Hours,
    Participants,
}

impl From<RankArg> for RankField {
    fn from(value: RankArg) -> Self {
        match value {
            RankArg::Hours => RankField::Hours,
            RankArg::Participants => RankField::Participants,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "course_report",
    disable_help_subcommand = true,
    about = "Analytical reports over an online course offering dataset",
    long_about = "Load a course offering CSV once and answer rollup, instructor, ranking, search, and recommendation queries over it.",
    after_help = "The dataset path is resolved in order by explicit --dataset, the COURSE_DATASET environment variable, then resources/online_courses.csv."
)]
/// CLI for `course_report`.
///
/// Common usage:
/// - `course_report by-institution`
/// - `course_report top --k 10 --by hours`
/// - `course_report search --subject bio --min-audited 50 --max-hours 100`
/// - `course_report recommend --age 25 --gender 1 --degree 1 --json`
struct CourseReportCli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional dataset path override"
    )]
    dataset: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit results as JSON instead of text")]
    json: bool,
    #[command(subcommand)]
    command: ReportCommand,
}

#[derive(Debug, Subcommand)]
enum ReportCommand {
    /// Dataset-level counts and launch date range.
    Summary,
    /// Participants per institution.
    ByInstitution,
    /// Participants per institution and subject.
    BySubject,
    /// Solo and co-taught titles per instructor.
    Instructors {
        #[arg(long, help = "Only report this instructor")]
        name: Option<String>,
    },
    /// Top distinct titles by hours or participants.
    Top {
        #[arg(
            long,
            default_value_t = 10,
            value_parser = parse_positive_usize,
            help = "Number of distinct titles to return"
        )]
        k: usize,
        #[arg(long, value_enum, default_value = "participants", help = "Ranking field")]
        by: RankArg,
    },
    /// Titles matching a subject substring and metric thresholds.
    Search {
        #[arg(long, help = "Case-insensitive subject substring")]
        subject: String,
        #[arg(long = "min-audited", help = "Inclusive minimum percent audited")]
        min_audited: f64,
        #[arg(long = "max-hours", help = "Inclusive maximum total course hours")]
        max_hours: f64,
    },
    /// Titles whose learner demographics best match the given learner.
    Recommend {
        #[arg(long, help = "Learner age")]
        age: i32,
        #[arg(
            long,
            value_parser = clap::value_parser!(i32).range(0..=1),
            help = "1 for male, 0 for female"
        )]
        gender: i32,
        #[arg(
            long,
            value_parser = clap::value_parser!(i32).range(0..=1),
            help = "1 when holding a bachelor's degree or higher"
        )]
        degree: i32,
    },
}

/// Install a stderr `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Resolve the dataset path from an explicit argument, the environment, then the default.
pub fn resolve_dataset_path(explicit: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    explicit
        .or_else(|| {
            env_value
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH))
}

/// Parse `args_iter` (without the program name) and print the report to stdout.
pub fn run_course_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_course_report_to(args_iter, &mut out)
}

/// Same as `run_course_report`, writing the report to `out`.
pub fn run_course_report_to<I>(args_iter: I, out: &mut dyn Write) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<CourseReportCli, _>(
        std::iter::once("course_report".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let dataset = resolve_dataset_path(cli.dataset, std::env::var(DATASET_ENV_VAR).ok());
    let store = load_offerings(&dataset, &LoaderConfig::default())?;
    if let Some(summary) = store.summary() {
        info!(
            offerings = summary.offerings,
            institutions = summary.institutions,
            course_numbers = summary.course_numbers,
            "dataset ready"
        );
    }
    write_report(&store, cli.command, cli.json, out)
}

fn write_report(
    store: &CourseStore,
    command: ReportCommand,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), Box<dyn Error>> {
    match command {
        ReportCommand::Summary => {
            let summary = store.summary();
            if json {
                return write_json(out, &summary);
            }
            writeln!(out, "=== dataset summary ===")?;
            match summary {
                Some(summary) => {
                    writeln!(out, "offerings: {}", summary.offerings)?;
                    writeln!(out, "institutions: {}", summary.institutions)?;
                    writeln!(out, "course numbers: {}", summary.course_numbers)?;
                    writeln!(out, "distinct titles: {}", summary.distinct_titles)?;
                    writeln!(out, "total participants: {}", summary.total_participants)?;
                    writeln!(
                        out,
                        "launch dates: {} .. {}",
                        summary.earliest_launch, summary.latest_launch
                    )?;
                }
                None => writeln!(out, "(empty dataset)")?,
            }
        }
        ReportCommand::ByInstitution => {
            let totals = store.participants_by_institution();
            if json {
                return write_json(out, &totals);
            }
            writeln!(out, "=== participants by institution ===")?;
            for (institution, total) in &totals {
                writeln!(out, "{institution} == {total}")?;
            }
        }
        ReportCommand::BySubject => {
            let totals = store.participants_by_institution_and_subject();
            if json {
                return write_json(out, &totals);
            }
            writeln!(out, "=== participants by institution and subject ===")?;
            for (key, total) in &totals {
                writeln!(out, "{key} == {total}")?;
            }
        }
        ReportCommand::Instructors { name } => {
            let mut index = store.course_list_of_instructor();
            if let Some(name) = name {
                index.retain(|instructor, _| *instructor == name);
            }
            if json {
                return write_json(out, &index);
            }
            writeln!(out, "=== courses by instructor ===")?;
            for (instructor, sets) in &index {
                writeln!(out, "{instructor}")?;
                writeln!(out, "  solo: [{}]", sets.solo.join(", "))?;
                writeln!(out, "  co-taught: [{}]", sets.co_taught.join(", "))?;
            }
        }
        ReportCommand::Top { k, by } => {
            let field = RankField::from(by);
            let titles = store.top_k_by_field(k, field)?;
            if json {
                return write_json(out, &titles);
            }
            writeln!(out, "=== top {k} courses by {field} ===")?;
            write_numbered(out, &titles)?;
        }
        ReportCommand::Search {
            subject,
            min_audited,
            max_hours,
        } => {
            let titles = store.search_courses(&subject, min_audited, max_hours);
            if json {
                return write_json(out, &titles);
            }
            writeln!(
                out,
                "=== courses matching subject '{subject}' (audited >= {min_audited}, hours <= {max_hours}) ==="
            )?;
            write_numbered(out, &titles)?;
        }
        ReportCommand::Recommend {
            age,
            gender,
            degree,
        } => {
            let titles = store.recommend_courses(age, gender, degree);
            if json {
                return write_json(out, &titles);
            }
            writeln!(
                out,
                "=== recommendations for age={age} gender={gender} degree={degree} ==="
            )?;
            write_numbered(out, &titles)?;
        }
    }
    Ok(())
}

fn write_numbered(out: &mut dyn Write, titles: &[String]) -> io::Result<()> {
    if titles.is_empty() {
        return writeln!(out, "(no matches)");
    }
    for (idx, title) in titles.iter().enumerate() {
        writeln!(out, "{:>3}. {title}", idx + 1)?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --k value '{}' as a positive integer", raw))?;
    if parsed == 0 {
        return Err("--k must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
