use std::env;
use std::process::ExitCode;

use simplicity_codec::vectors::type_skip;
use simplicity_codec::{DecodeLimits, Program};
use tracing::{error, Level};

const USAGE: &str = "usage: simplicity-inspect (--program <hex> [--witness <hex>] | --fixture type-skip) [--strict] [--budget <milli-wu>] [--verbose]";

struct Options {
    program: Vec<u8>,
    witness: Vec<u8>,
    limits: DecodeLimits,
    verbose: bool,
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if options.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    if let Err(err) = options.limits.validate() {
        error!(%err, "invalid limits");
        return ExitCode::from(2);
    }

    let program = match Program::decode_with_limits(&options.program, &options.witness, &options.limits)
    {
        Ok(program) => program,
        Err(err) => {
            error!(%err, "program rejected");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&program.report()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "failed to render report");
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut args = env::args().skip(1);
    let mut program = None;
    let mut witness = Vec::new();
    let mut limits = DecodeLimits::default();
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--program" => program = Some(hex_arg(&arg, args.next())?),
            "--witness" => witness = hex_arg(&arg, args.next())?,
            "--fixture" => match args.next().as_deref() {
                Some("type-skip") => {
                    program = Some(type_skip::PROGRAM.to_vec());
                    witness = type_skip::WITNESS.to_vec();
                }
                Some(other) => return Err(format!("unknown fixture `{other}`")),
                None => return Err("--fixture needs a name".into()),
            },
            "--strict" => {
                let budget = limits.cost_budget;
                limits = DecodeLimits::strict();
                if let Some(budget) = budget {
                    limits.cost_budget = Some(budget);
                }
            }
            "--budget" => {
                let value = args.next().ok_or("--budget needs a value")?;
                let budget = value
                    .parse::<u32>()
                    .map_err(|err| format!("invalid budget `{value}`: {err}"))?;
                limits = limits.with_cost_budget(budget);
            }
            "--verbose" | "-v" => verbose = true,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    let program = program.ok_or("missing --program or --fixture")?;
    Ok(Options {
        program,
        witness,
        limits,
        verbose,
    })
}

fn hex_arg(flag: &str, value: Option<String>) -> Result<Vec<u8>, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a hex value"))?;
    hex::decode(value.trim()).map_err(|err| format!("{flag}: {err}"))
}
