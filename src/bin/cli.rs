use chrono::{Datelike, Utc};
use clap::{Parser, ValueEnum};
use course_planner::{
    Planner, PlannerError, Schedule, Term, load_schedule_from_csv, load_schedule_from_json,
    render_schedule, render_table, save_schedule_to_csv, save_schedule_to_json,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(
    name = "planner",
    about = "Course Planner - lay out a course catalog over four academic years",
    version
)]
struct Cli {
    /// Catalog CSV with Class, Term, Credits columns
    catalog: Option<PathBuf>,

    /// Two-digit start year (defaults to the current year)
    #[arg(short, long, env = "PLANNER_START_YEAR")]
    start_year: Option<u32>,

    /// Build and print the schedule, then exit
    #[arg(short, long)]
    build: bool,

    /// Write the built schedule to this path
    #[arg(long, requires = "build")]
    save: Option<PathBuf>,

    /// Format used by --save
    #[arg(long, value_enum, default_value = "json")]
    format: Format,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the catalog\n  add <terms> <credits> <label...>   Add a course (terms like F,W)\n  remove <label...>                  Remove a course\n  terms <label...>                   Show the terms a course is offered in\n  credits <label...>                 Show a course's credits\n  total                              Total catalog credits\n  build                              Build and print the schedule\n  table                              Show the last schedule as a table\n  year <yy>                          Show one year of the last schedule\n  save <json|csv> <path>             Save the last schedule\n  load <json|csv> <path>             Load a saved schedule\n  catalog save <path>                Write the catalog as CSV\n  quit|exit                          Exit"
    );
}

fn save_schedule(schedule: &Schedule, format: Format, path: &Path) -> Result<(), PlannerError> {
    match format {
        Format::Json => save_schedule_to_json(schedule, path)?,
        Format::Csv => save_schedule_to_csv(schedule, path)?,
    }
    Ok(())
}

fn load_schedule(format: Format, path: &Path) -> Result<Schedule, PlannerError> {
    Ok(match format {
        Format::Json => load_schedule_from_json(path)?,
        Format::Csv => load_schedule_from_csv(path)?,
    })
}

fn print_catalog(planner: &Planner) {
    println!("{planner}");
    match planner.catalog().to_dataframe() {
        Ok(df) => println!("{}", render_table(&df)),
        Err(e) => println!("Error: {}", e),
    }
}

/// The last built or loaded schedule, building one if there is none yet.
fn current_schedule<'a>(
    planner: &Planner,
    current: &'a mut Option<Schedule>,
) -> Result<&'a Schedule, PlannerError> {
    let schedule = match current.take() {
        Some(schedule) => schedule,
        None => planner.create_schedule()?.schedule,
    };
    Ok(current.insert(schedule))
}

fn run_build(planner: &Planner, save: Option<&Path>, format: Format) -> Result<(), PlannerError> {
    let outcome = planner.create_schedule()?;
    print!("{}", render_schedule(&outcome));
    println!("{}", outcome.summary().to_cli_summary());
    if let Some(path) = save {
        save_schedule(&outcome.schedule, format, path)?;
        println!("Schedule saved to {}", path.display());
    }
    Ok(())
}

fn run_repl(mut planner: Planner) {
    println!("Course Planner (CLI) - type 'help' for commands\n");
    print_catalog(&planner);

    let mut current: Option<Schedule> = None;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let rest = parts.clone().collect::<Vec<_>>().join(" ");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_catalog(&planner),
            "add" => {
                let terms_s = parts.next();
                let credits_s = parts.next();
                let label = parts.collect::<Vec<_>>().join(" ");
                match (terms_s, credits_s, label.is_empty()) {
                    (Some(terms_s), Some(credits_s), false) => {
                        let credits: i64 = match credits_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid credits");
                                continue;
                            }
                        };
                        match planner.add_course(&label, Term::split_tags(terms_s), credits) {
                            Ok(()) => {
                                current = None;
                                println!("Course added.");
                                print_catalog(&planner);
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: add <terms> <credits> <label...>"),
                }
            }
            "remove" => {
                if rest.is_empty() {
                    println!("Usage: remove <label...>");
                    continue;
                }
                match planner.remove_course(&rest) {
                    Ok(course) => {
                        current = None;
                        println!("Removed {}.", course.label());
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "terms" => match planner.eligible_terms(&rest) {
                Ok(terms) => println!("{}: {}", rest, Term::join_tags(terms)),
                Err(e) => println!("Error: {}", e),
            },
            "credits" => match planner.credits(&rest) {
                Ok(credits) => println!("{}: {}", rest, credits),
                Err(e) => println!("Error: {}", e),
            },
            "total" => println!("Total credits: {}", planner.total_credits()),
            "build" => match planner.create_schedule() {
                Ok(outcome) => {
                    print!("{}", render_schedule(&outcome));
                    println!("Built ({})", outcome.summary().to_cli_summary());
                    current = Some(outcome.schedule);
                }
                Err(e) => println!("Build error: {}", e),
            },
            "table" => match current_schedule(&planner, &mut current) {
                Ok(schedule) => match schedule.to_dataframe() {
                    Ok(df) => println!("{}", render_table(&df)),
                    Err(e) => println!("Error: {}", e),
                },
                Err(e) => println!("Error: {}", e),
            },
            "year" => {
                let year: u32 = match parts.next().map(str::parse::<u32>) {
                    Some(Ok(v)) => v,
                    _ => {
                        println!("Usage: year <yy>");
                        continue;
                    }
                };
                match current_schedule(&planner, &mut current) {
                    Ok(schedule) => match schedule.year_frame(year) {
                        Ok(df) => println!("{}", render_table(&df)),
                        Err(e) => println!("Error: {}", e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "save" | "load" => {
                let format = parts.next().and_then(|s| Format::from_str(s, true).ok());
                let path = parts.next().map(PathBuf::from);
                let (Some(format), Some(path)) = (format, path) else {
                    println!("Usage: {} <json|csv> <path>", cmd);
                    continue;
                };
                if cmd == "save" {
                    let res = current_schedule(&planner, &mut current)
                        .and_then(|schedule| save_schedule(schedule, format, &path));
                    match res {
                        Ok(()) => println!("Schedule saved to {}", path.display()),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    match load_schedule(format, &path) {
                        Ok(schedule) => {
                            match schedule.to_dataframe() {
                                Ok(df) => println!("{}", render_table(&df)),
                                Err(e) => println!("Error: {}", e),
                            }
                            current = Some(schedule);
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
            }
            "catalog" => match (parts.next(), parts.next()) {
                (Some("save"), Some(path)) => match planner.save_catalog(path) {
                    Ok(()) => println!("Catalog saved to {}", path),
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: catalog save <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let start_year = cli
        .start_year
        .unwrap_or_else(|| (Utc::now().year() % 100) as u32);

    let planner = match &cli.catalog {
        Some(path) => Planner::from_csv(path, start_year),
        None => Planner::new(start_year),
    };
    let planner = match planner {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.build {
        if let Err(e) = run_build(&planner, cli.save.as_deref(), cli.format) {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    run_repl(planner);
    ExitCode::SUCCESS
}
