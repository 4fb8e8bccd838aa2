use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use log::{debug, error};
use pcompiler::{
    compiler::compiler::compile,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorTip},
    },
    parse_source,
    type_checker::{
        symbol_table::SymbolTable,
        type_checker::{Analyzer, AnalyzerConfig, DEFAULT_MAX_NESTING_DEPTH},
    },
};

#[derive(Parser, Debug)]
#[command(name = "pcc")]
#[command(version)]
#[command(about = "Front end for the P language: parses and semantically checks a source file", long_about = None)]
struct Args {
    /// Input P source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Print the AST after parsing
    #[arg(long, default_value_t = false)]
    dump_ast: bool,

    /// Print the symbol table every time a scope closes
    #[arg(long, default_value_t = false)]
    dump_symbols: bool,

    /// Nesting bound: parser statement and expression rules, then analyzer tree nodes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Only print diagnostics
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let source = match read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", args.input.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let mut diagnostics = Diagnostics::new(&source);

    let (mut ast, root) = match parse_source(&source, args.max_depth) {
        Ok(parsed) => parsed,
        Err(e) => {
            display_error(&diagnostics, &e);
            return ExitCode::FAILURE;
        }
    };
    debug!("parsed {} nodes in {:?}", ast.len(), start.elapsed());

    if args.dump_ast {
        print!("{}", ast.render(root));
    }
    if !args.quiet {
        print_banner("There is no syntactic error!");
    }

    let config = AnalyzerConfig {
        dump_symbols_on_pop: args.dump_symbols,
        max_nesting_depth: args.max_depth,
    };

    let mut symbols = SymbolTable::init();
    let analyzed = Analyzer::new(&mut ast, &mut symbols, &mut diagnostics, config).analyze(root);
    symbols.teardown();

    let errors = match analyzed {
        Ok(errors) => errors + compile(&ast, root),
        Err(e) => {
            error!("analysis aborted: {}", e);
            display_error(&diagnostics, &e);
            return ExitCode::FAILURE;
        }
    };
    debug!("checked in {:?}", start.elapsed());

    if errors > 0 {
        eprintln!("{} semantic error(s) found", errors);
        return ExitCode::FAILURE;
    }

    if !args.quiet {
        print_banner("There is no semantic error!");
    }
    ExitCode::SUCCESS
}

fn display_error(diagnostics: &Diagnostics, error: &Error) {
    eprint!("{}", diagnostics.render(error));
    if let ErrorTip::Suggestion(_) = error.get_tip() {
        eprintln!("Tip: {}", error.get_tip());
    }
}

fn print_banner(message: &str) {
    let rule = format!("|{}|", "-".repeat(message.len() + 4));
    println!("\n{}\n|  {}  |\n{}", rule, message, rule);
}
