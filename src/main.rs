use std::fs;
use std::io::{self, Read, Write};

use bfi::{DEFAULT_DATA_SIZE, Interpreter, RunConfig, RunError, locate};
use clap::Parser;

const USAGE_TEXT: &str = "Usage: bfi [-f <file>] [-d <size>] [-b] [-w] [-s] [-q] [-h]
(run 'bfi -h' for help)";

const HELP_TEXT: &str = "\
Brainfuck interpreter

Usage: bfi [-f <file>] [-d <size>] [-b] [-w] [-s] [-q] [-h]

  -f <file>    read code from file (default is stdin)
  -d <size>    data segment size in cells (default 30000)
  -b           enable bounds checking for the data segment
  -w           enable wrap checking for data cells
  -s           enable strict syntax checking
  -q           quiet mode, only program output is shown
  -h           show this help text";

#[derive(Parser, Debug)]
#[command(name = "bfi", disable_help_flag = true)]
struct Cli {
    /// Read code from a file instead of stdin
    #[arg(short = 'f', value_name = "file")]
    file: Option<String>,

    /// Data segment size in cells
    #[arg(short = 'd', value_name = "size", default_value_t = DEFAULT_DATA_SIZE)]
    data_size: usize,

    /// Enable bounds checking for the data segment
    #[arg(short = 'b')]
    bounds_check: bool,

    /// Enable wrap checking for data cells
    #[arg(short = 'w')]
    wrap_check: bool,

    /// Enable strict syntax checking
    #[arg(short = 's')]
    syntax_check: bool,

    /// Suppress all informational and error text
    #[arg(short = 'q')]
    quiet: bool,

    /// Show the help text
    #[arg(short = 'h')]
    help: bool,
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!("{USAGE_TEXT}");
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => usage_and_exit(2),
    };

    if cli.help {
        println!("{HELP_TEXT}");
        let _ = io::stdout().flush();
        std::process::exit(0);
    }

    // The size must be a positive cell count; zero parses but is rejected
    // with the other malformed arguments.
    if cli.data_size == 0 {
        usage_and_exit(2);
    }

    std::process::exit(run_with_args(cli));
}

fn run_with_args(cli: Cli) -> i32 {
    let quiet = cli.quiet;

    let code = match &cli.file {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if !quiet {
                    eprintln!("Error: Reading file failed: {e}");
                }
                return 1;
            }
        },
        None => {
            if !quiet {
                eprintln!("Type in the code (issue ^D to stop):");
            }
            let mut buffer = Vec::new();
            if let Err(e) = io::stdin().lock().read_to_end(&mut buffer) {
                if !quiet {
                    eprintln!("Error: Reading stdin failed: {e}");
                }
                return 1;
            }
            if !quiet {
                eprintln!("Running the program...");
            }
            buffer
        }
    };

    if code.is_empty() {
        if !quiet {
            eprintln!("No code to be interpreted!");
        }
        return 1;
    }

    let config = RunConfig {
        data_size: cli.data_size,
        bounds_check: cli.bounds_check,
        wrap_check: cli.wrap_check,
        syntax_check: cli.syntax_check,
    };

    let mut vm = match Interpreter::new(code, config) {
        Ok(vm) => vm,
        Err(e) => {
            if !quiet {
                eprintln!("Error: {e}");
            }
            return 1;
        }
    };

    let result = vm.run();
    let _ = io::stdout().flush();

    if let Err(err) = result {
        if !quiet {
            print_run_error(vm.code(), &err);
        }
        return 1;
    }

    0
}

/// Print the positional diagnostic for a halted run: the error message, the
/// 1-based row:column of the failing instruction, the instruction byte, and
/// the current cell value.
fn print_run_error(code: &[u8], err: &RunError) {
    let (row, column) = locate(code, err.ip());
    let op = code[err.ip()] as char;
    eprintln!(
        "Error: {err} at {row}:{column} (code: '{op}' data: {cell})",
        cell = err.cell()
    );
    let _ = io::stderr().flush();
}
