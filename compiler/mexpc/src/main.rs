//! mexp compiler CLI
//!
//! Reads a JSON source tree, runs resolution and translation, and prints
//! either the diagnostics or the translated fragments.

use std::process::ExitCode;

use mexp_diagnostic::{DiagnosticConfig, ErrorCode};
use mexp_translate::StackFrameFactory;
use mexpc::{compile, init_tracing, parse_program, CompileOptions};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" => {
            println!("mexpc {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "--explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: mexpc --explain <code>");
                return ExitCode::FAILURE;
            };
            explain(code)
        }
        _ => {
            let mut options = CompileOptions::default();
            let mut path = None;
            for arg in &args[1..] {
                if let Some(value) = arg.strip_prefix("--word-size=") {
                    let word_size = match value.parse::<i64>() {
                        Ok(word_size) => word_size,
                        Err(err) => {
                            eprintln!("error: invalid word size `{value}`: {err}");
                            return ExitCode::FAILURE;
                        }
                    };
                    if let Err(err) = StackFrameFactory::check_word_size(word_size) {
                        eprintln!("error: {err}");
                        return ExitCode::FAILURE;
                    }
                    options.word_size = word_size;
                } else if let Some(value) = arg.strip_prefix("--error-limit=") {
                    let Ok(error_limit) = value.parse::<usize>() else {
                        eprintln!("error: invalid error limit `{value}`");
                        return ExitCode::FAILURE;
                    };
                    options.diagnostics = DiagnosticConfig { error_limit };
                } else if arg.starts_with("--") {
                    eprintln!("error: unknown option `{arg}`");
                    return ExitCode::FAILURE;
                } else if path.is_none() {
                    path = Some(arg.as_str());
                }
            }

            let Some(path) = path else {
                eprintln!("error: missing input file");
                print_usage();
                return ExitCode::FAILURE;
            };
            compile_file(path, &options)
        }
    }
}

fn compile_file(path: &str, options: &CompileOptions) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let program = match parse_program(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: `{path}` is not a valid source tree: {err}");
            return ExitCode::FAILURE;
        }
    };

    match compile(&program, options) {
        Ok(compilation) => {
            print!("{compilation}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let summary = err.to_string();
            for diagnostic in err.into_diagnostics() {
                eprintln!("{diagnostic}");
                eprintln!();
            }
            eprintln!("error: {summary}");
            ExitCode::FAILURE
        }
    }
}

fn explain(code: &str) -> ExitCode {
    match ErrorCode::parse(code) {
        Some(code) => {
            println!("{code}: {}", code.description());
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("error: unknown error code `{code}`");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("mexp compiler");
    println!();
    println!("Usage: mexpc <program.json> [options]");
    println!("       mexpc --explain <code>");
    println!();
    println!("Options:");
    println!("  --word-size=<bytes>   Frame word size, 1 to 1024 (default: 8)");
    println!("  --error-limit=<n>     Stop collecting after n errors (0: unlimited)");
    println!("  --explain <code>      Explain an error code (e.g., E2001)");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=mexp_translate=trace) for tracing output.");
}
