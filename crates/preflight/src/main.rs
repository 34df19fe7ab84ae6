mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, ColorMode, Commands};
use output::{OutputMode, Reporter};
use preflight_core::exec::InterruptFlag;

fn main() {
    let cli = Cli::parse();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);
    let config_override = cli.config.as_deref();

    let interrupt = InterruptFlag::new();
    {
        let flag = interrupt.clone();
        if ctrlc::set_handler(move || flag.trigger()).is_err() {
            reporter.warning("Could not install Ctrl-C handler; cancellation will not be graceful");
        }
    }

    let code = match cli.command {
        Commands::Run {
            hook,
            all_files,
            parallel,
            files,
        } => commands::run::run_actions(
            hook,
            all_files,
            parallel,
            &files,
            config_override,
            &interrupt,
            &mut reporter,
        ),
        Commands::Check => commands::check::run_check(config_override, &mut reporter),
        Commands::List => commands::list::run_list(config_override, &mut reporter),
        Commands::Install { force } => {
            commands::install::run_install(force, &mut reporter)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "preflight",
                &mut std::io::stdout(),
            );
            0
        }
    };

    reporter.finish();

    if code != 0 {
        std::process::exit(code);
    }
}
