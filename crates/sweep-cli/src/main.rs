use clap::Parser;
use std::process::ExitCode;
use sweep_cli::Cli;

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = sweep_cli::log_filter(cli)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(&cli) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match sweep_cli::run(&cli) {
        Ok(output) => {
            println!("{output:#}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
