//! CSPC CLI — assemble, list and execute CSPC programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, read or assembly error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: cspc <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <input.cspc> [options]    Assemble and execute main");
    eprintln!("  disassemble <input.cspc>      List every function with its pools");
    eprintln!("  help                          Show this message");
    eprintln!();
    eprintln!("Run options:");
    eprintln!("  --debug            Log the listing and one trace line per step");
    eprintln!("  --max-steps <N>    Stop after N instructions");
    eprintln!("  --max-stack <N>    Limit the operand stack to N values");
}
