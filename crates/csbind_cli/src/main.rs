//! csbind: Filter a parsed C++ API down to what can be bound to C#.
//!
//! Usage:
//!   csbind <TREE> --rules <RULES> [--dump-json <OUT>] [--list-ignored]
//!
//! Reads the declaration tree written by the C++ front end, marks every
//! declaration that cannot be bound as ignored and reports why.

use clap::Parser as ClapParser;
use csbind_diagnostics::{Diagnostic, DiagnosticCategory};
use csbind_generator::Generator;
use csbind_rules::GeneratorRules;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "csbind", version, about = "Filter a parsed C++ API for C# binding generation")]
struct Cli {
    /// Declaration tree produced by the C++ front end (JSON).
    #[arg(value_name = "TREE")]
    tree: PathBuf,

    /// Generator rules file (JSON).
    #[arg(short = 'r', long)]
    rules: PathBuf,

    /// Write the annotated tree, ignore flags included, to this file.
    #[arg(long = "dump-json", value_name = "OUT")]
    dump_json: Option<PathBuf>,

    /// Print the symbol name of every ignored declaration.
    #[arg(long = "list-ignored")]
    list_ignored: bool,

    /// Enable colored diagnostics.
    #[arg(long, default_value_t = true)]
    pretty: bool,
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    init_logging();
    let cli = Cli::parse();
    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn init_logging() {
    let default_directive = if cfg!(debug_assertions) { "csbind=debug" } else { "csbind=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
}

fn run(cli: &Cli) -> i32 {
    let start = Instant::now();
    tracing::debug!(tree = %cli.tree.display(), rules = %cli.rules.display(), "loading inputs");

    let rules = match GeneratorRules::load(&cli.rules) {
        Ok(rules) => rules,
        Err(e) => {
            print_error(&format!("{}: {}", cli.rules.display(), e));
            return 1;
        }
    };

    let mut tree = match csbind_ast::dump::load_tree_file(&cli.tree) {
        Ok(tree) => tree,
        Err(e) => {
            print_error(&format!("{}: {}", cli.tree.display(), e));
            return 1;
        }
    };

    let report = Generator::run(rules, &mut tree);

    let use_color = cli.pretty && atty_is_terminal();
    for diag in report.diagnostics.diagnostics() {
        print_diagnostic(diag, use_color);
    }

    if cli.list_ignored {
        for symbol in &report.ignored {
            println!("{}", symbol);
        }
    }

    if let Some(ref out) = cli.dump_json {
        let written = csbind_ast::dump::write_tree(&tree)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(out, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            print_error(&format!("failed to write {}: {}", out.display(), e));
            return 1;
        }
    }

    if report.diagnostics.has_errors() {
        let count = report.diagnostics.error_count();
        if use_color {
            eprintln!("\n{}Found {} error{}.{}", RED, count, if count == 1 { "" } else { "s" }, RESET);
        } else {
            eprintln!("\nFound {} error{}.", count, if count == 1 { "" } else { "s" });
        }
        return 2;
    }

    let elapsed = start.elapsed();
    let kept = (tree.len() - 1).saturating_sub(report.ignored.len());
    if use_color {
        eprintln!(
            "{}Kept {} declarations, ignored {} in {:.2}s.{}",
            GRAY,
            kept,
            report.ignored.len(),
            elapsed.as_secs_f64(),
            RESET
        );
    } else {
        eprintln!(
            "Kept {} declarations, ignored {} in {:.2}s.",
            kept,
            report.ignored.len(),
            elapsed.as_secs_f64()
        );
    }
    0
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        let color = match diag.category {
            DiagnosticCategory::Error => RED,
            DiagnosticCategory::Warning => YELLOW,
            DiagnosticCategory::Message => GRAY,
        };
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}", CYAN, file, RESET);
            if let Some(location) = diag.location {
                eprint!("({})", location);
            }
            eprint!(": ");
        }
        eprintln!(
            "{}{}{}{} {}CSB{}{}: {}",
            BOLD, color, diag.category, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true
    }
}
