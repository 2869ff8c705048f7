//! dtbridge CLI - shape query rows into DataTables JSON
//!
//! ```bash
//! dtbridge render rows.json --options opts.json    # Rows + options → DataTables JSON
//! dtbridge render export.csv --pretty              # CSV rows, default options
//! cat rows.json | dtbridge render -                # Rows from stdin
//! dtbridge parse export.csv                        # Just load rows as JSON
//! dtbridge validate-options opts.json              # Schema-check an option bag
//! dtbridge example-options                         # Print an example option bag
//! ```

use clap::{Parser, Subcommand};
use dtbridge::logs::{log_info, log_success, log_warning, set_quiet};
use dtbridge::parser::parse_rows_auto;
use dtbridge::{
    create_json, example_options, load_rows, validate_options, Options, QueryRows,
};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dtbridge")]
#[command(about = "Shape query result rows into DataTables server-side JSON", long_about = None)]
struct Cli {
    /// Do not print progress logs to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rows through the option pipeline and print DataTables JSON
    Render {
        /// Rows file (.json or .csv), or "-" for stdin
        input: PathBuf,

        /// Option bag (JSON)
        #[arg(long, env = "DTBRIDGE_OPTIONS")]
        options: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        /// Reject malformed options instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Load rows and print them as JSON
    Parse {
        /// Rows file (.json or .csv), or "-" for stdin
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an option bag against the schema
    ValidateOptions {
        /// Option bag (JSON)
        input: PathBuf,
    },

    /// Show an example option bag
    ExampleOptions,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if cli.quiet {
        set_quiet(true);
    }

    let result = match cli.command {
        Commands::Render {
            input,
            options,
            output,
            pretty,
            strict,
        } => cmd_render(&input, options.as_deref(), output.as_deref(), pretty, strict),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::ValidateOptions { input } => cmd_validate_options(&input),

        Commands::ExampleOptions => cmd_example_options(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn read_rows(input: &Path) -> Result<QueryRows, Box<dyn std::error::Error>> {
    if input == Path::new("-") {
        log_info("Reading rows from stdin");
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        Ok(parse_rows_auto(&bytes)?)
    } else {
        log_info(format!("Reading rows from {}", input.display()));
        Ok(load_rows(input)?)
    }
}

fn cmd_render(
    input: &Path,
    options_path: Option<&Path>,
    output: Option<&Path>,
    pretty: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = read_rows(input)?;

    let mut options = match options_path {
        Some(path) => {
            log_info(format!("Using options: {}", path.display()));
            Options::from_file(path, strict)?
        }
        None => Options::default(),
    };
    if strict {
        options.strict = true;
    }

    if let QueryRows::Rows(ref rows) = rows {
        if let Some(first) = rows.first() {
            let headers: Vec<String> = first.keys().cloned().collect();
            if let Err(missing) = options.validate_headers(&headers) {
                log_warning(format!(
                    "Templates reference columns missing from the first row: {}",
                    missing.join(", ")
                ));
            }
        }
    }

    let result = create_json(rows, &options)?;
    let json = if pretty {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    write_output(&json, output)?;

    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = match read_rows(input)? {
        QueryRows::Rows(rows) => {
            log_success(format!("Loaded {} rows", rows.len()));
            serde_json::to_string_pretty(&rows)?
        }
        QueryRows::NoData => {
            log_warning("Input is the no-data marker");
            "false".to_string()
        }
    };
    write_output(&json, output)?;
    Ok(())
}

fn cmd_validate_options(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log_info(format!("Validating options: {}", input.display()));

    let content = fs::read_to_string(input)?;
    let value: Value = serde_json::from_str(&content)?;

    match validate_options(&value) {
        Ok(()) => {
            log_success("Options are valid");
            Ok(())
        }
        Err(errors) => {
            for err in &errors {
                eprintln!("   - {}", err);
            }
            Err(format!("{} schema error(s)", errors.len()).into())
        }
    }
}

fn cmd_example_options() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", example_options().to_json()?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_success(format!("Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
