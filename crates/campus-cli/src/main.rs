//! `campus` CLI — manage calendar events and inspect student records from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Add an event (refused if it overlaps another event that day)
//! campus event add --title "Lezione Angular" --time "09:00 - 13:00" --date 2025-06-01
//!
//! # Check a slot without storing anything
//! campus event check --time "12:30 - 14:00" --date 2025-06-01
//!
//! # Show a day, and its free gaps
//! campus event agenda --date 2025-06-01
//! campus event free --date 2025-06-01 --min 60
//!
//! # Student table from a backend export, filtered and sorted
//! campus students list -i studenti.json --filter rossi --sort media --desc
//!
//! # Grade statistics for one student
//! campus students stats -i studenti.json 6650a1 --threshold 27
//!
//! # Enroll a student in a module, record an exam (prints the updated records)
//! campus students enroll -i studenti.json --modules moduli.json 6650a1 SEC03
//! campus students add-exam -i studenti.json --modules moduli.json 6650a1 \
//!     --module SEC03 --grade 28 --date 2025-06-20
//! ```
//!
//! Events live in a JSON file chosen with `--store` or `CAMPUS_STORE`.
//! Logging goes to stderr and is controlled by `RUST_LOG` or `-v`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use campus_calendar::{
    agenda, find_conflicts, find_first_free_slot, find_free_slots, CalendarError, DayWindow,
    Event, EventStore, EventType,
};
use campus_records::{
    enroll, find_module, find_module_mut, find_student, find_student_mut, parse_modules,
    parse_students, withdraw, Exam, Module, ModuleColumn, ModuleQuery, SortOrder, Student,
    StudentColumn, StudentQuery, DEFAULT_HIGH_GRADE,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SKIPPED_CHECK: &str = "time range not recognized; overlap check skipped";

#[derive(Parser)]
#[command(
    name = "campus",
    version,
    about = "Course administration: calendar events and student records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Event store file
    #[arg(long, global = true, env = "CAMPUS_STORE", default_value = "campus-events.json")]
    store: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar events
    Event {
        #[command(subcommand)]
        action: EventCommand,
    },
    /// Student records exported from the backend
    Students {
        #[command(subcommand)]
        action: StudentCommand,
    },
    /// Module records exported from the backend
    Modules {
        #[command(subcommand)]
        action: ModuleCommand,
    },
}

#[derive(Subcommand)]
enum EventCommand {
    /// Add an event, refusing it if it overlaps another event on the same date
    Add {
        #[arg(long)]
        title: String,
        /// Time range, e.g. "09:00 - 13:00"
        #[arg(long)]
        time: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "")]
        description: String,
        /// lecture, exam, lab, break or internship
        #[arg(long = "type", default_value = "lecture")]
        kind: EventType,
        /// Store the event even if it overlaps
        #[arg(long)]
        force: bool,
    },
    /// Report whether a time range on a date overlaps stored events
    Check {
        #[arg(long)]
        time: String,
        #[arg(long)]
        date: NaiveDate,
    },
    /// List stored events with their positions
    List {
        /// Only events on this date
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove the event at a position shown by `list`
    Remove { index: usize },
    /// Remove every stored event
    Clear,
    /// Events of one day in time order
    Agenda {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Free gaps in a day
    Free {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value = "08:00")]
        from: String,
        #[arg(long, default_value = "18:00")]
        to: String,
        /// Only the first gap of at least this many minutes
        #[arg(long)]
        min: Option<u32>,
    },
}

#[derive(Subcommand)]
enum StudentCommand {
    /// Print the student table
    List {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Case-insensitive text filter over name, surname and email
        #[arg(long)]
        filter: Option<String>,
        /// Sort column: nome, cognome, email or media
        #[arg(long)]
        sort: Option<StudentColumn>,
        #[arg(long)]
        desc: bool,
    },
    /// Grade statistics for one student
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Backend id of the student
        id: String,
        /// Minimum grade counted as high
        #[arg(long, default_value_t = DEFAULT_HIGH_GRADE)]
        threshold: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Enroll a student in a module and print both updated records
    Enroll(EnrollmentArgs),
    /// Withdraw a student from a module and print both updated records
    Withdraw(EnrollmentArgs),
    /// Record an exam for a student and print the updated student
    AddExam {
        /// Student JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Module JSON file the exam's module is looked up in
        #[arg(long)]
        modules: String,
        /// Backend id of the student
        id: String,
        /// Code of the module the exam was taken for
        #[arg(long)]
        module: String,
        #[arg(long)]
        grade: u32,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Args)]
struct EnrollmentArgs {
    /// Student JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Module JSON file
    #[arg(long)]
    modules: String,
    /// Backend id of the student
    id: String,
    /// Module code
    code: String,
}

#[derive(Subcommand)]
enum ModuleCommand {
    /// Print the module table
    List {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Case-insensitive text filter over code, name and description
        #[arg(long)]
        filter: Option<String>,
        /// Sort column: codice, nome or ore
        #[arg(long)]
        sort: Option<ModuleColumn>,
        #[arg(long)]
        desc: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Event { action } => run_event(&cli.store, action),
        Commands::Students { action } => run_students(action),
        Commands::Modules { action } => run_modules(action),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "campus_cli=debug,campus_calendar=debug,campus_records=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_event(store_path: &Path, action: EventCommand) -> Result<()> {
    let mut store = EventStore::open(store_path)
        .with_context(|| format!("Failed to open event store: {}", store_path.display()))?;

    match action {
        EventCommand::Add {
            title,
            time,
            date,
            description,
            kind,
            force,
        } => {
            let event = Event::new(title, time, description, kind, date);
            if event.range().is_none() {
                tracing::warn!(time = %event.time, "{}", SKIPPED_CHECK);
            }
            if force {
                store.add_unchecked(event);
            } else {
                store.add(event).map_err(|e| match e {
                    CalendarError::Overlap { .. } => {
                        anyhow::Error::new(e).context("Event not added (use --force to add anyway)")
                    }
                    other => anyhow::Error::new(other),
                })?;
            }
            store.save().context("Failed to save event store")?;
            println!("Added event #{}", store.len() - 1);
        }
        EventCommand::Check { time, date } => {
            let candidate = Event::new("candidate", time, "", EventType::default(), date);
            if candidate.range().is_none() {
                tracing::warn!(time = %candidate.time, "{}", SKIPPED_CHECK);
            }
            let conflicts = find_conflicts(&candidate, store.events());
            if conflicts.is_empty() {
                println!("free");
            } else {
                println!("overlap");
                for c in &conflicts {
                    println!(
                        "  #{} {} {} ({} min)",
                        c.index, c.existing.time, c.existing.title, c.overlap_minutes
                    );
                }
            }
        }
        EventCommand::List { date } => {
            for (index, event) in store.events().iter().enumerate() {
                if date.is_some_and(|d| d != event.date) {
                    continue;
                }
                println!("#{} {}", index, format_event(event));
            }
        }
        EventCommand::Remove { index } => {
            let removed = store.remove(index)?;
            store.save().context("Failed to save event store")?;
            println!("Removed '{}' on {}", removed.title, removed.date);
        }
        EventCommand::Clear => {
            let count = store.len();
            store.clear();
            store.save().context("Failed to save event store")?;
            println!("Removed {} events", count);
        }
        EventCommand::Agenda { date } => {
            let day = agenda(store.events(), date);
            if day.is_empty() {
                println!("No events on {}", date);
            }
            for event in day {
                println!("{}", format_event(event));
            }
        }
        EventCommand::Free {
            date,
            from,
            to,
            min,
        } => {
            let window = DayWindow::parse(&from, &to)?;
            match min {
                Some(min) => match find_first_free_slot(store.events(), date, window, min) {
                    Some(slot) => println!("{}", slot),
                    None => println!("No free slot of {} minutes on {}", min, date),
                },
                None => {
                    for slot in find_free_slots(store.events(), date, window) {
                        println!("{}", slot);
                    }
                }
            }
        }
    }

    Ok(())
}

fn format_event(event: &Event) -> String {
    let mut line = format!(
        "{} {} [{}] {}",
        event.date, event.time, event.kind, event.title
    );
    if !event.description.is_empty() {
        line.push_str(": ");
        line.push_str(&event.description);
    }
    line
}

fn order(desc: bool) -> SortOrder {
    if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    }
}

fn run_students(action: StudentCommand) -> Result<()> {
    match action {
        StudentCommand::List {
            input,
            filter,
            sort,
            desc,
        } => {
            let students = read_students(input.as_deref())?;
            let query = StudentQuery {
                filter,
                sort,
                order: order(desc),
            };
            let rows = query.apply(&students);
            debug!(total = students.len(), shown = rows.len(), "student table");
            for s in rows {
                let average = s
                    .average_grade()
                    .map(|a| format!("{:.2}", a))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    s.id.as_deref().unwrap_or("-"),
                    s.last_name,
                    s.first_name,
                    s.email.as_deref().unwrap_or("-"),
                    average
                );
            }
        }
        StudentCommand::Stats {
            input,
            id,
            threshold,
            json,
        } => {
            let students = read_students(input.as_deref())?;
            let student = find_student(&students, &id)?;
            let summary = student.grade_summary();
            let high = student.high_grades(threshold);

            if json {
                let out = serde_json::json!({
                    "id": id,
                    "name": student.full_name(),
                    "summary": summary,
                    "threshold": threshold,
                    "high_grades": high,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("{}", student.full_name());
            match summary.average {
                Some(avg) => println!("Average: {:.2} over {} exams", avg, summary.graded_exams),
                None => println!("Average: - (no graded exams)"),
            }
            if let (Some(min), Some(max)) = (summary.min, summary.max) {
                println!("Range:   {} - {}", min, max);
            }
            println!("Grades >= {}: {}", threshold, high.len());
            for exam in high {
                let module = exam
                    .module
                    .as_ref()
                    .map(|m| format!("{} {}", m.code, m.name))
                    .unwrap_or_else(|| "-".to_string());
                let date = exam
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("  {} {} {}", date, exam.grade.unwrap_or_default(), module);
            }
        }
        StudentCommand::Enroll(args) => run_enrollment(args, true)?,
        StudentCommand::Withdraw(args) => run_enrollment(args, false)?,
        StudentCommand::AddExam {
            input,
            modules,
            id,
            module,
            grade,
            date,
            note,
        } => {
            let mut students = read_students(input.as_deref())?;
            let modules = read_modules(&modules)?;
            let snapshot = find_module(&modules, &module)?.snapshot();
            let student = find_student_mut(&mut students, &id)?;
            student.record_exam(Exam {
                date,
                grade: Some(grade),
                notes: note,
                module: Some(snapshot),
            });
            println!("{}", serde_json::to_string_pretty(student)?);
        }
    }
    Ok(())
}

fn run_enrollment(args: EnrollmentArgs, join: bool) -> Result<()> {
    let mut students = read_students(args.input.as_deref())?;
    let mut modules = read_modules(&args.modules)?;
    let student = find_student_mut(&mut students, &args.id)?;
    let module = find_module_mut(&mut modules, &args.code)?;

    let changed = if join {
        enroll(student, module)
    } else {
        withdraw(student, module)
    };
    if !changed {
        tracing::info!(student = %args.id, module = %args.code, "records already up to date");
    }

    let out = serde_json::json!({ "studente": student, "modulo": module });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn read_students(input: Option<&str>) -> Result<Vec<Student>> {
    parse_students(&read_input(input)?).context("Failed to parse student records")
}

fn read_modules(path: &str) -> Result<Vec<Module>> {
    parse_modules(&read_input(Some(path))?).context("Failed to parse module records")
}

fn run_modules(action: ModuleCommand) -> Result<()> {
    match action {
        ModuleCommand::List {
            input,
            filter,
            sort,
            desc,
        } => {
            let modules = parse_modules(&read_input(input.as_deref())?)
                .context("Failed to parse module records")?;
            let query = ModuleQuery {
                filter,
                sort,
                order: order(desc),
            };
            for m in query.apply(&modules) {
                let hours = m
                    .hours
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}\t{}\t{}\t{} enrolled", m.code, m.name, hours, m.enrolled.len());
            }
        }
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
