use std::env;
use std::process::ExitCode;

use anyhow::Context;
use pasindo_drv::{compile, parse_args, DriverError};
use pasindo_util::diagnostic::Handler;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let handler = Handler::new();

    let path = match parse_args(&args) {
        Ok(path) => path,
        Err(e) => return fail(&handler, e),
    };

    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match compile(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&handler, e),
    }
}

/// Records `e` with `handler` before printing it, so the process's one
/// diagnostic collection point (spec §7) actually counts the failure
/// rather than only rendering its `Display` text.
fn fail(handler: &Handler, e: DriverError) -> ExitCode {
    e.report(handler);
    debug_assert!(handler.has_errors());
    eprintln!("{e}");
    ExitCode::FAILURE
}

fn read_source(path: &std::path::Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("could not read '{}'", path.display()))
}
