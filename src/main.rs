use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use hlp_solver::cli::{cache_size_log, level_filter, Cli, Command, DbinArgs, HexArgs};
use hlp_solver::context::SolverContext;
use hlp_solver::dbin::{self, map::DbinMap};
use hlp_solver::error::ParseError;
use hlp_solver::format::format_chain;
use hlp_solver::hex::Config;
use hlp_solver::hlp;
use hlp_solver::request::Request;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new().filter_level(level_filter(cli.verbose, cli.quiet)).init();

    let result = match cli.command {
        Command::Hex(args) => run_hex(&args),
        Command::Dbin(args) => run_dbin(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Parse(e)) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
        Err(CliError::Internal(msg)) => {
            eprintln!("error: {msg}");
            ExitCode::from(2)
        }
    }
}

enum CliError {
    Parse(ParseError),
    Internal(String),
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

fn run_hex(args: &HexArgs) -> Result<(), CliError> {
    let request = Request::parse(Some(&args.function))?;
    debug!("parsed request: {request} (kind {:?})", request.kind);

    let ctx = SolverContext::new();
    let accuracy = args.resolved_accuracy();
    let cache_log = cache_size_log(args.cache);

    let mut chain = Vec::new();
    let outcome = hlp::solve_with_cache_size(&ctx, &request, args.max_length, accuracy, cache_log, &mut chain);

    if outcome > args.max_length {
        println!("no chain found within {} layers", args.max_length);
        return Ok(());
    }

    info!("found a {}-layer chain", chain.len());
    let configs: Vec<Config> = chain
        .iter()
        .map(|&raw| Config::new(raw).ok_or_else(|| CliError::Internal(format!("invalid config {raw:#x} in solved chain"))))
        .collect::<Result<_, _>>()?;
    println!("{}", format_chain(&configs));
    Ok(())
}

fn run_dbin(args: &DbinArgs) -> Result<(), CliError> {
    let goal = if let Some(exact) = &args.exact {
        DbinMap::from_exact(parse_hex16(exact)?)
    } else {
        let ones = args.ones.as_deref().ok_or(ParseError::Null)?;
        let zeros = args.zeros.as_deref().ok_or(ParseError::Null)?;
        DbinMap {
            ones: parse_hex16(ones)?,
            zeros: parse_hex16(zeros)?,
        }
    };

    if goal.is_contradictory() {
        return Err(CliError::Parse(ParseError::Malformed { at: 0 }));
    }

    let group = DbinMap::exact_group(goal.as_packed()).max(1);
    let ctx = SolverContext::new();
    let dbin_ctx = ctx.dbin_context(group);
    let cache_log = cache_size_log(args.cache);

    let mut chain = Vec::new();
    let length = dbin::solve_with_cache_size(dbin_ctx, goal, args.max_layers, cache_log, &mut chain);

    if length == args.max_layers - 1 {
        println!("no chain found within {} layers", args.max_layers);
        return Ok(());
    }

    info!("found a {}-layer chain", chain.len());
    for (i, raw) in chain.iter().enumerate() {
        println!("{}: {:#05x}", i + 1, raw);
    }
    Ok(())
}

fn parse_hex16(s: &str) -> Result<u16, ParseError> {
    u16::from_str_radix(s, 16).map_err(|_| ParseError::Malformed { at: 0 })
}
