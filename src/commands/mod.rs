pub mod compare;
pub mod optimize;
pub mod sweep;

mod cli;

pub use self::cli::{Cli, FieldKind, WeightPreset};
use self::cli::Commands;
use clap::Parser;
use std::io::{self, Write};

/// Runs the main interactive CLI loop.
pub fn run_cli() {
    loop {
        if let Err(e) = handle_iteration() {
            eprintln!("Error: {e}");
        }
    }
}

/// Parses the process arguments and runs a single command.
pub fn run_once() -> Result<(), Box<dyn std::error::Error>> {
    let output = execute(Cli::parse())?;
    println!("{output}");
    Ok(())
}

/// Handles a single iteration of the command loop.
fn handle_iteration() -> Result<(), Box<dyn std::error::Error>> {
    let cli = read_and_parse_command()?;
    let output = execute(cli)?;
    println!("{output}");
    Ok(())
}

/// Runs a parsed command and returns the text to print.
pub fn execute(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Optimize {
            params,
            json,
            field,
        } => optimize::run(&params.configuration()?, json, field),
        Commands::Compare {
            params,
            folding_factor,
            remainder_max_degree,
        } => Ok(compare::run(
            &params.configuration()?,
            folding_factor,
            remainder_max_degree,
        )?),
        Commands::Sweep {
            degree,
            blowup,
            num_queries,
            max_arity,
            terminal_threshold,
            weights,
            output,
        } => {
            let configs = sweep::grid(
                &degree,
                &blowup,
                &num_queries,
                max_arity,
                terminal_threshold,
                weights.into(),
            );
            let num_rows = sweep::run(&configs, &output)?;
            Ok(format!(
                "Results saved to: {}\nTotal results: {num_rows}",
                output.display()
            ))
        }
    }
}

/// Reads a line from stdin and parses it into a CLI command.
fn read_and_parse_command() -> Result<Cli, String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;
    let input = input.trim();

    if input.eq_ignore_ascii_case("exit") {
        println!("Exiting.");
        std::process::exit(0);
    }

    parse_line(input)
}

fn parse_line(input: &str) -> Result<Cli, String> {
    // `shlex::split` correctly handles quoted arguments
    let args = shlex::split(input).ok_or_else(|| "Failed to parse input.".to_string())?;

    // We prepend the binary name to satisfy clap's parsing requirements
    let mut full_args = vec!["frida-schedule"];
    full_args.extend(args.iter().map(String::as_str));

    Cli::try_parse_from(full_args).map_err(|err| err.to_string())
}
