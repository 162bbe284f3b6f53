use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};

/// toylang is a small dynamically-typed scripting language with a
/// tree-walking interpreter.
#[derive(Parser, Debug)]
#[command(name = "toylang", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write code interactively; type EXEC on its own line to run the
    /// accumulated buffer, EXIT to quit
    Console,
    /// Run the code in a file
    Run {
        /// The script to execute
        path: PathBuf,
    },
    /// Rewrite a file in canonical formatting
    Format {
        /// The script to reformat
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Console => run_console(),
        Command::Run { path } => run_file(&path),
        Command::Format { path } => format_file(&path),
    }
}

/// Parses and evaluates one source text, reporting problems on stderr.
/// A runtime failure is reported but does not change the exit code.
fn execute_code(filename: &str, source: &str) {
    let (program, errors) = toylang::parse(source);
    if !errors.is_empty() {
        eprintln!("Encountered errors while parsing:");
        for error in &errors {
            eprintln!("{error}");
        }
        return;
    }
    if let Some(fatal) = toylang::evaluate(&program, filename) {
        eprintln!();
        eprintln!("Encountered a fatal error during runtime:");
        eprintln!("{fatal}");
    }
}

fn run_console() {
    let stdin = io::stdin();
    let mut code = String::new();
    loop {
        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == "EXIT" {
            return;
        }
        if line == "EXEC" {
            execute_code("CONSOLE", &code);
            code.clear();
            continue;
        }
        code.push_str(line);
        code.push('\n');
    }
}

fn run_file(path: &Path) {
    match fs::read_to_string(path) {
        Ok(source) => execute_code(&path.display().to_string(), &source),
        Err(_) => {
            eprintln!(
                "Error while opening file \"{}\". Maybe the file does not exist.",
                path.display()
            );
        },
    }
}

fn format_file(path: &Path) {
    let Ok(source) = fs::read_to_string(path) else {
        eprintln!(
            "Error while opening file \"{}\". Maybe the file does not exist.",
            path.display()
        );
        return;
    };
    let (program, errors) = toylang::parse(&source);
    if !errors.is_empty() {
        eprintln!("Found some errors while parsing:");
        eprintln!();
        for error in &errors {
            eprintln!("{error}");
        }
        return;
    }
    if fs::write(path, toylang::format(&program)).is_err() {
        eprintln!("Error while overwriting file \"{}\".", path.display());
    }
}
