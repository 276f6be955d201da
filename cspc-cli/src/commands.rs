//! CLI command implementations.

use std::fs;
use std::io;

use cspc_common::Program;
use cspc_vm::{LogTracer, Tracer, VmConfig};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

/// Options accepted by `cspc run`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RunOptions {
    input: String,
    debug: bool,
    config: VmConfig,
}

/// Assemble a .cspc file and execute its `main` function.
pub fn run(args: &[String]) -> Result<(), i32> {
    let options = parse_run_options(args)?;
    init_logging(options.debug);

    let program = read_program(&options.input)?;

    if options.debug {
        let listing = cspc_assembler::disassemble_program(&program).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
        for line in listing.lines() {
            debug!("{line}");
        }
    }

    let mut log_tracer = LogTracer;
    let tracer: Option<&mut dyn Tracer> = if options.debug {
        Some(&mut log_tracer)
    } else {
        None
    };

    match cspc_vm::run_with(&program, io::stdout(), options.config, tracer) {
        Ok(halted) => {
            debug!(
                "halted with {} stack values and {} globals",
                halted.stack.len(),
                halted.store.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(3)
        }
    }
}

/// Print the listing of every function in a .cspc file.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: cspc disassemble <input.cspc>");
        return Err(1);
    }

    init_logging(false);
    let program = read_program(&args[0])?;
    let text = cspc_assembler::disassemble_program(&program).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    print!("{text}");
    Ok(())
}

// ---- Helpers ----

fn read_program(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;
    cspc_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Route library logging to stderr. `RUST_LOG` overrides the default level.
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = SimpleLogger::new().with_level(level).env().init() {
        eprintln!("warning: logging unavailable: {e}");
    }
}

fn parse_run_options(args: &[String]) -> Result<RunOptions, i32> {
    let mut input = None;
    let mut options = RunOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => options.debug = true,
            "--max-steps" => {
                let steps = parse_count(arg, iter.next())?;
                options.config = options.config.with_step_limit(steps);
            }
            "--max-stack" => {
                let depth = parse_count(arg, iter.next())?;
                options.config = options.config.with_max_stack_depth(depth);
            }
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                return Err(1);
            }
            path if input.is_none() => input = Some(path.to_string()),
            extra => {
                eprintln!("error: unexpected argument '{extra}'");
                return Err(1);
            }
        }
    }

    options.input = input.ok_or_else(|| {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: cspc run <input.cspc> [--debug] [--max-steps N] [--max-stack N]");
        1
    })?;
    Ok(options)
}

fn parse_count<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, i32> {
    let value = value.ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        1
    })?;
    value.parse().map_err(|_| {
        eprintln!("error: {flag} expects a non-negative integer, got '{value}'");
        1
    })
}
