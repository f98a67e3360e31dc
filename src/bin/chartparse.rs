use std::{env, process::exit};

use chartparse::{cyk, earley, EventLog, Grammar, Limits, Rendered};
use chartparse::grammar::EXAMPLE_GRAMMAR;
use thiserror::Error;

const DEFAULT_INPUT: &str = "+baabcc";

#[derive(Debug, Error)]
enum UsageError {
    #[error("missing value after `{0}`")]
    MissingValue(String),
    #[error("`{flag}` expects a number, found `{value}`")]
    NotANumber { flag: String, value: String },
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("more than one input given")]
    ExtraInput,
    #[error("bad grammar: {0}")]
    Grammar(#[from] chartparse::GrammarError),
}

struct Options {
    input: String,
    grammar: String,
    limits: Limits,
    verbose: bool,
}

fn number(flag: &str, value: Option<String>) -> Result<usize, UsageError> {
    let value = value.ok_or_else(|| UsageError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| UsageError::NotANumber { flag: flag.to_string(), value })
}

fn options(mut args: impl Iterator<Item=String>) -> Result<Options, UsageError> {
    let mut input = None;
    let mut grammar = EXAMPLE_GRAMMAR.to_string();
    let mut limits = Limits::default();
    let mut verbose = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-length" => limits.max_length = number(&arg, args.next())?,
            "--max-states" => limits.max_states = number(&arg, args.next())?,
            "--grammar" => {
                grammar = args.next().ok_or_else(|| UsageError::MissingValue(arg.clone()))?;
            }
            "--verbose" | "-v" => verbose = true,
            flag if flag.starts_with("--") => return Err(UsageError::UnknownFlag(flag.to_string())),
            _ if input.is_some() => return Err(UsageError::ExtraInput),
            _ => input = Some(arg),
        }
    }
    Ok(Options {
        input: input.unwrap_or_else(|| DEFAULT_INPUT.to_string()),
        grammar,
        limits,
        verbose,
    })
}

fn run(opts: &Options) -> Result<bool, UsageError> {
    let grammar: Grammar = opts.grammar.parse()?;
    let input: Vec<char> = opts.input.chars().collect();
    println!("input: {}", input.as_slice().rendered());

    let mut cyk_log = EventLog::new();
    let by_cyk = cyk::parse_with(&grammar, &input, &opts.limits, &mut cyk_log);
    if opts.verbose {
        for line in cyk_log.lines() {
            println!("  {}", line);
        }
    }
    if let Some(chart) = by_cyk.chart() {
        print!("{}", chart.levels());
    }
    println!("cyk: {}", by_cyk.verdict());
    if by_cyk.accepted() {
        if let Some(chart) = by_cyk.chart() {
            print!("{}", chart.derivation());
        }
    }

    let mut earley_log = EventLog::new();
    let by_earley = earley::parse_with(&grammar, &input, &opts.limits, &mut earley_log);
    if opts.verbose {
        for line in earley_log.lines() {
            println!("  {}", line);
        }
    }
    if let Some(chart) = by_earley.chart() {
        print!("{}", chart.sets());
    }
    println!("earley: {}", by_earley.verdict());

    Ok(by_cyk.accepted() || by_earley.accepted())
}

fn main() {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "chartparse".to_string());
    let opts = match options(args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: {} [INPUT] [--max-length N] [--max-states N] [--grammar TEXT] [--verbose]", program);
            exit(2);
        }
    };
    match run(&opts) {
        Ok(true) => exit(0),
        Ok(false) => exit(1),
        Err(e) => {
            eprintln!("{}", e);
            exit(2);
        }
    }
}
