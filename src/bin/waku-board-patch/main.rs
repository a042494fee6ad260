use std::process;

use clap::Parser;

mod cli;
mod commands;
mod context;
mod exit_codes;
mod logging;
mod output;

fn main() {
    logging::init_tracing();

    let cli = cli::Cli::parse();

    let exit_code = match cli.command {
        cli::Command::Apply(args) => {
            let mut out = output::make_for_apply(&args);
            let code = commands::apply::run(args, &mut *out);
            out.finish();
            code
        }
        cli::Command::Show(args) => {
            let mut out = output::make_for_show(&args);
            let code = commands::show::run(args, &mut *out);
            out.finish();
            code
        }
        cli::Command::List(args) => {
            let mut out = output::make_for_list(&args);
            let code = commands::list::run(args, &mut *out);
            out.finish();
            code
        }
        cli::Command::Check(args) => {
            let mut out = output::make_for_check(&args);
            let code = commands::check::run(args, &mut *out);
            out.finish();
            code
        }
    };

    process::exit(exit_code);
}
