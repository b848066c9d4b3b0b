use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use env_logger::{DEFAULT_FILTER_ENV, DEFAULT_WRITE_STYLE_ENV, Env};

use syllabus_schema::config::{Args, Config};
use syllabus_schema::report::{OutputFormat, Report};
use syllabus_schema::{check_paths, watch};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter = args.log_filter(std::env::var(DEFAULT_FILTER_ENV).ok().as_deref());
    env_logger::Builder::from_env(Env::new().write_style(DEFAULT_WRITE_STYLE_ENV))
        .parse_filters(&filter)
        .init();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every checked record was valid
async fn run(args: Args) -> Result<bool> {
    let config = Config::from_args(args)?;
    for path in &config.config_files {
        log::debug!("Using config file {}", path.display());
    }

    if config.watch {
        let format = config.format;
        watch::watch(&config, |report| print_report(report, format)).await?;
        return Ok(true);
    }

    let report = check_paths(&config.paths, &config.check_options());
    println!("{}", report.render(config.format)?.trim_end());
    Ok(report.is_clean())
}

fn print_report(report: &Report, format: OutputFormat) {
    match report.render(format) {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => log::error!("Failed to render report: {}", e),
    }
}
