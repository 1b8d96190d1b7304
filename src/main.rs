// --- Suplencias docentes - binario principal ---

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use timetable_sub::excel::{inspect_workbook, ExcelWorkbook};
use timetable_sub::{find_substitutes, AppConfig, Day, Importer, OwnerId, ScheduleStore, TeacherId, TimetableError};

/// Import school timetables and rank substitute teachers.
///
/// Examples:
///   timetable_sub inspect horario.xlsx
///   timetable_sub import horario.xlsx --owner 1
///   timetable_sub rank --owner 1 --teacher "أحمد" --day الإثنين --period 3
///   timetable_sub assign --owner 1 --original "أحمد" --covering "ليلى" --day Monday --period 3
#[derive(Parser, Debug)]
#[command(name = "timetable_sub")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the owner's schedule with the timetable in FILE
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        owner: i64,
    },
    /// Show which sheet holds the timetable and how its header reads, without importing
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// List the owner's teachers sorted by name
    Teachers {
        #[arg(long)]
        owner: i64,
    },
    /// List the days present in the owner's schedule
    Days {
        #[arg(long)]
        owner: i64,
    },
    /// Rank free teachers who could cover a lesson
    Rank {
        #[arg(long)]
        owner: i64,
        /// Name of the absent teacher
        #[arg(long)]
        teacher: String,
        /// English key (Monday) or Arabic spelling (الإثنين)
        #[arg(long)]
        day: String,
        #[arg(long)]
        period: u8,
    },
    /// Record a substitution
    Assign {
        #[arg(long)]
        owner: i64,
        #[arg(long)]
        original: String,
        #[arg(long)]
        covering: String,
        #[arg(long)]
        day: String,
        #[arg(long)]
        period: u8,
    },
    /// Show recorded substitutions, newest first
    Log {
        #[arg(long)]
        owner: i64,
    },
    /// Delete a recorded substitution
    Unassign {
        #[arg(long)]
        owner: i64,
        #[arg(value_name = "ID")]
        id: i64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn teacher_id(store: &ScheduleStore, owner: OwnerId, name: &str) -> Result<TeacherId, TimetableError> {
    store
        .teacher_by_name(owner, name)?
        .map(|t| t.id)
        .ok_or_else(|| TimetableError::UnknownTeacher(name.trim().to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Import { file, owner } => {
            let importer = Importer::from_config(&config)?;
            let report = importer.import_file(OwnerId(owner), &file)?;
            print_json(&report)?;
        }
        Command::Inspect { file } => {
            let mut workbook = ExcelWorkbook::open(&file)?;
            print_json(&inspect_workbook(&mut workbook, config.scan_rows)?)?;
        }
        Command::Teachers { owner } => {
            let store = ScheduleStore::open(&config)?;
            print_json(&store.list_teachers(OwnerId(owner))?)?;
        }
        Command::Days { owner } => {
            let store = ScheduleStore::open(&config)?;
            for day in store.schedule_days(OwnerId(owner))? {
                println!("{}\t{}", day.key(), day.arabic());
            }
        }
        Command::Rank { owner, teacher, day, period } => {
            let owner = OwnerId(owner);
            let store = ScheduleStore::open(&config)?;
            let original = teacher_id(&store, owner, &teacher)?;
            let day: Day = day.parse()?;
            let ranking = find_substitutes(&store, owner, original, day, period)?;
            print_json(&ranking)?;
        }
        Command::Assign { owner, original, covering, day, period } => {
            let owner = OwnerId(owner);
            let store = ScheduleStore::open(&config)?;
            let original = teacher_id(&store, owner, &original)?;
            let covering = teacher_id(&store, owner, &covering)?;
            let day: Day = day.parse()?;
            let sub = store.record_substitution(owner, original, covering, day, period)?;
            print_json(&sub)?;
        }
        Command::Log { owner } => {
            let store = ScheduleStore::open(&config)?;
            print_json(&store.list_substitutions(OwnerId(owner))?)?;
        }
        Command::Unassign { owner, id } => {
            let store = ScheduleStore::open(&config)?;
            store.delete_substitution(OwnerId(owner), id)?;
            eprintln!("substitution {} deleted", id);
        }
    }

    Ok(())
}
