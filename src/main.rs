extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod compiler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use compiler::lexer::Token;
use compiler::Translation;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tTokenize Only: {}\n\tDeny Warnings: {}\n\tOutfile: {}\n\tInfile: {}",
        level_for(args.occurrences_of("verbose")),
        args.is_present("tokens"),
        args.is_present("deny-warnings"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // INPUT is required, so clap has already exited if it is missing.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    let source = match std::fs::read_to_string(ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(source) => source,
    };

    if args.is_present("tokens") {
        match compiler::lexer::tokenize(&source) {
            Ok(tokens) => println!("{}", token_grid(&tokens)),
            Err(err) => {
                error!("fatal: {}", err);
                std::process::exit(1);
            },
        }
        return;
    }

    let translation = match compiler::compile(&source) {
        Err(err) => {
            error!("fatal: {}: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(translation) => translation,
    };

    for warning in translation.warnings.iter() {
        warn!("{}: {}", ipath.display(), warning);
    }
    if args.is_present("deny-warnings") && !translation.warnings.is_empty() {
        error!("Stopped compilation due to {} warning(s).", translation.warnings.len());
        std::process::exit(1);
    }

    if args.is_present("print-debug") {
        eprintln!("{}", listing_grid(&translation));
    }

    let mut out: Box<dyn Write> = match args.value_of("output") {
        Some(filename) => match File::create(filename) {
            Err(err) => {
                error!("fatal: unable to open output file `{}`: {}", filename, err);
                std::process::exit(1);
            },
            Ok(file) => Box::new(file),
        },
        None => Box::new(io::stdout()),
    };

    for line in translation.lines() {
        if let Err(err) = writeln!(out, "{}", line) {
            error!("fatal: unable to write output: {}", err);
            std::process::exit(1);
        }
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile instead of STDOUT"))
        .arg(Arg::with_name("tokens")
            .short("t")
            .takes_value(false)
            .help("tokenize only, printing the token list to STDOUT"))
        .arg(Arg::with_name("deny-warnings")
            .short("W")
            .takes_value(false)
            .help("treat skipped tokens and label collisions as errors"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints each statement alongside its assembly to STDERR"))
        .get_matches()
}

fn level_for(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    // Log to STDERR; STDOUT carries the assembly.
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}

fn token_grid(tokens: &[Token]) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, tok) in tokens.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(format!("line {}", tok.line)));
        grid.add(Cell::from(format!("{:?}", tok.kind)));
        grid.add(Cell::from(tok.text.clone()));
    }

    grid.fit_into_columns(4).to_string()
}

fn listing_grid(translation: &Translation) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    let mut addr = 0;
    for statement in translation.statements.iter() {
        for ins in statement.lower() {
            grid.add(Cell::from(format!("0x{:04X}:", addr)));
            grid.add(Cell::from(format!("{}", ins)));
            grid.add(Cell::from("<=".to_string()));
            grid.add(Cell::from(format!("{}: {}", statement.line, statement)));
            addr += 1;
        }
    }

    grid.fit_into_columns(4).to_string()
}
