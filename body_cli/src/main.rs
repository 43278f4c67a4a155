use body_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bodycalc")]
#[command(about = "Personal body measurement calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the record file location
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Override the schema file location
    #[arg(long, global = true)]
    schema: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Body mass index
    Bmi,

    /// Body adiposity index
    Bai,

    /// Basal metabolic rate and daily kcal requirement
    Bmr,

    /// Body fat percent from tape measurements
    Tape,

    /// Body fat percent from caliper measurements
    Calipers,

    /// Reset all stored measurements
    Reset,
}

/// Interactive menu options; indexes are the accepted choices
const MENU: [&str; 7] = [
    "Save and Quit",
    "Reset Data",
    "Body Mass Index",
    "Body Adiposity Index",
    "Basal Metabolic Rate",
    "Fat Percent (Tape Measure)",
    "Fat Percent (Calipers)",
];

fn main() -> Result<()> {
    // Initialize logging
    body_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let record_path = cli.file.unwrap_or_else(|| config.record_path());
    let schema_path = cli.schema.unwrap_or_else(|| config.schema_path());
    tracing::debug!("Record at {:?}, schema at {:?}", record_path, schema_path);

    let mut store = RecordStore::open(record_path, &schema_path)?;

    let result = match cli.command {
        Some(command) => report_recoverable(dispatch(&mut store, command, &config)),
        None => run_menu(&mut store, &config),
    };

    // Persist exactly once on every normal exit path, including after a
    // handled per-metric error.
    let closed = store.close();
    result.and(closed)
}

/// Run one action against the store, soliciting missing fields on stdin
fn dispatch(store: &mut RecordStore, command: Commands, config: &Config) -> Result<()> {
    let mut prompt = StdinPrompt;
    let mut report = ConsoleReport;
    let mut engine = Engine::new(store, &mut prompt, &mut report, config.display.rounding);

    match command {
        Commands::Bmi => engine.bmi(),
        Commands::Bai => engine.bai(),
        Commands::Bmr => engine.bmr(),
        Commands::Tape => engine.tape(),
        Commands::Calipers => engine.calipers(),
        Commands::Reset => {
            engine.reset();
            Ok(())
        }
    }
}

/// Field and metric failures are reported and survived; store-level
/// errors propagate untouched.
fn report_recoverable(result: Result<()>) -> Result<()> {
    match result {
        Err(err) if err.is_recoverable() => {
            println!("Error: {}", err);
            Ok(())
        }
        other => other,
    }
}

fn run_menu(store: &mut RecordStore, config: &Config) -> Result<()> {
    for (index, option) in MENU.iter().enumerate() {
        println!("{}. {}", index, option);
    }

    let stdin = io::stdin();
    loop {
        print!("\nChoose an option: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF behaves like Save and Quit
            break;
        }
        let raw = line.trim();

        let command = match raw.parse::<usize>() {
            Ok(0) => break,
            Ok(1) => Commands::Reset,
            Ok(2) => Commands::Bmi,
            Ok(3) => Commands::Bai,
            Ok(4) => Commands::Bmr,
            Ok(5) => Commands::Tape,
            Ok(6) => Commands::Calipers,
            _ => {
                println!("{} does not match option pattern.", raw);
                continue;
            }
        };

        report_recoverable(dispatch(store, command, config))?;
    }

    Ok(())
}

/// Solicits one line of raw text per prompt on stdin
struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        // Multi-line prompts keep every line tab-indented, with the
        // cursor left on the final line.
        match prompt.rsplit_once('\n') {
            Some((head, tail)) => {
                for line in head.lines() {
                    println!("\t{}", line);
                }
                print!("\t{}", tail);
            }
            None => print!("\t{}", prompt),
        }
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Prints metric report lines to stdout
struct ConsoleReport;

impl ReportSink for ConsoleReport {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}
