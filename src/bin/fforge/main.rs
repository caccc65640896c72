use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod logging;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let output = cli.command.output();

    if let Err(e) = logging::init(&output.log_level) {
        display::print_error(&e);
        return ExitCode::FAILURE;
    }

    let ctx = display::Context::detect().with_quiet(output.quiet);
    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli.command, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
