//! Bulk-suspend Canvas user accounts listed in a csv file, recording each outcome to an output csv.

use log::info;
use std::path::PathBuf;

pub mod canvas;
pub mod config;
mod error;
pub mod records;
pub mod session;
pub mod suspend;

pub use config::Config;
pub use error::{Error, Result};
pub use session::RunId;
pub use suspend::Summary;

use canvas::Client;
use records::OutputFile;
use session::{banner, Session};

/// Where a finished run left its files, and how it went.
#[derive(Debug, Clone)]
pub struct Report {
    pub run_id: RunId,
    pub log_file: PathBuf,
    pub output_file: PathBuf,
    pub summary: Summary,
}

/// Run the whole job once: open the session log, check the token, read the input, create the output
/// file, then suspend every user. The first error stops the run; nothing after it is attempted.
pub async fn run(config: &Config) -> Result<Report> {
    let session = Session::create(&config.logs_dir, RunId::now())?;
    session.install_logger()?;
    info!("Config: {:?}", config);

    let client = Client::new(config.base_url.clone(), config.token.as_str());
    info!("{}", banner("VALIDATE CANVAS TOKEN"));
    println!("Authenticating API Token:");
    client.validate_token().await?;
    println!("\tSuccessfully authenticated to {}", config.base_url);
    info!("Successfully authenticated to {}", config.base_url);

    info!("{}", banner("READ SUSPENSION INPUT FILE"));
    println!("\nReading {}:", config.input_file.display());
    let users = records::read_input(&config.input_file)?;
    info!("File {} read successfully", config.input_file.display());
    info!("Users to suspend: {}", users.len());
    info!("Data: {:?}", users);
    println!("\tSuccess, users to suspend: {}", users.len());

    info!("{}", banner("CREATE OUTPUT STATUS FILE"));
    let output = OutputFile::create(&config.output_dir, session.run_id())?;
    println!("\nCreated output file {} with headers", output.path().display());
    info!("File {} created with headers", output.path().display());

    let summary = suspend::suspend_users(&client, &users, &output).await?;
    Ok(Report {
        run_id: session.run_id().clone(),
        log_file: session.log_path().to_owned(),
        output_file: output.path().to_owned(),
        summary,
    })
}
