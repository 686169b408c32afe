//! CLI tool to replay form event scripts (.form files).

use clap::Parser;
use dynaform_rs::{SchemaTable, run_script};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

/// Replay a form event script against the built-in schema table.
///
/// Prints a transcript of the resulting status lines and SHOW dumps.
#[derive(Parser)]
#[command(name = "form-run")]
struct Cli {
    /// Form event script file (.form)
    script: Option<String>,

    /// Write the transcript to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// List the available form types and exit
    #[arg(short, long)]
    list: bool,

    /// Show paths and the final record count on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let table = SchemaTable::builtin();

    if cli.list {
        for name in table.names() {
            println!("{}", name);
        }
        return;
    }

    let Some(script_path) = &cli.script else {
        eprintln!("Error: a script file is required (see --help)");
        process::exit(1);
    };

    let script_text = match fs::read_to_string(script_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading script file '{}': {e}", script_path);
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Script: {}", script_path);
        eprintln!("Output: {}", cli.output.as_deref().unwrap_or("(stdout)"));
        eprintln!("Forms:  {}", table.len());
    }

    match run_script(&script_text, &table) {
        Ok((transcript, record_count)) => {
            if let Some(out_path) = &cli.output {
                if let Some(parent) = Path::new(out_path.as_str()).parent()
                    && !parent.as_os_str().is_empty()
                    && fs::create_dir_all(parent).is_err()
                {
                    eprintln!("Error creating output directory for '{}'", out_path);
                    process::exit(1);
                }
                if let Err(e) = fs::write(out_path, &transcript) {
                    eprintln!("Error writing output file '{}': {e}", out_path);
                    process::exit(1);
                }
            } else {
                if let Err(e) = io::stdout().write_all(transcript.as_bytes()) {
                    eprintln!("Error writing transcript: {e}");
                    process::exit(1);
                }
                if !transcript.is_empty() && !transcript.ends_with('\n') {
                    println!();
                }
            }
            if cli.verbose {
                eprintln!("Submitted records: {record_count}");
            }
        }
        Err(e) => {
            eprintln!("Script error: {e}");
            process::exit(1);
        }
    }
}
