use log::error;
use std::{path::PathBuf, process::ExitCode};
use structopt::StructOpt;
use suspension::Config;

#[derive(StructOpt)]
struct Options {
    /// Directory the run log is written to
    #[structopt(long, default_value = "logs", parse(from_os_str))]
    logs_dir: PathBuf,
    /// Directory the results csv is written to
    #[structopt(long, default_value = ".", parse(from_os_str))]
    output_dir: PathBuf,
    /// Csv of user ids to suspend, one per row after the header. Defaults to $INPUT_FILE_PATH
    #[structopt(parse(from_os_str))]
    input_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Get command line arguments
    let options = Options::from_args();
    // Load the config, reading a .env file if it is present
    let config = match Config::from_env(options.input_file) {
        Ok(config) => config.with_logs_dir(options.logs_dir).with_output_dir(options.output_dir),
        Err(error) => {
            eprintln!("Configuration error: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match suspension::run(&config).await {
        Ok(report) => {
            println!(
                "Done: {} suspended, {} failed. Results in {}, log in {}",
                report.summary.succeeded,
                report.summary.failed,
                report.output_file.display(),
                report.log_file.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            println!("\tError, try again: {}", error);
            error!("{:#}", anyhow::Error::new(error));
            ExitCode::FAILURE
        }
    }
}
