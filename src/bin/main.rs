use std::process::exit;

use tracing_subscriber::EnvFilter;

use prockit::{
    app::App,
    cli::{Cli, Commands, parse_args},
    error::ToolkitError,
    shell::{self, RunOptions},
};

fn main() {
    let args = parse_args();
    init_logging(&args);

    let app = match App::from_env() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("prockit: {err}");
            exit(1);
        }
    };

    match args.command {
        Commands::Run {
            ignore_codes,
            command,
        } => {
            let options = RunOptions { ignore_codes };
            match shell::run(command, &options) {
                Ok(output) => {
                    if !output.is_empty() {
                        println!("{output}");
                    }
                }
                Err(err) => fail(&app, err),
            }
        }
        Commands::Exec { command } => {
            if let Err(err) = shell::exec(command) {
                fail(&app, err);
            }
        }
        Commands::Hostname => match app.hostname() {
            Ok(hostname) => println!("{hostname}"),
            Err(err) => fail(&app, err),
        },
    }
}

fn init_logging(args: &Cli) {
    let filter = if let Some(level) = args.log_level {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Reports a failure through the app logger and exits, propagating the
/// child's exit code when there is one.
fn fail(app: &App, err: ToolkitError) -> ! {
    app.log().error(err.to_string());
    let code = match &err {
        ToolkitError::Shell(shell_err) => shell_err.status.code().unwrap_or(1),
        _ => 1,
    };
    exit(code.max(1));
}
