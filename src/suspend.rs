use crate::{
    canvas::Client,
    error::{Error, Result},
    records::{OutputFile, ResultRecord, SuspensionStatus},
    session::banner,
};
use log::{info, warn};

/// How many suspensions went through and how many were refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Suspend each user in order, appending one row to `output` per user.
///
/// A refused suspension is recorded and the loop moves on, as is an id that can't form a request path.
/// A transport error or a failed write stops the whole run; rows written before that stay in the output file.
pub async fn suspend_users(client: &Client, users: &[String], output: &OutputFile) -> Result<Summary> {
    info!("{}", banner("SUSPEND USERS"));
    println!("\nSuspend Users:");
    let mut summary = Summary::default();
    for (i, user) in users.iter().enumerate() {
        let user_id = user.trim();
        info!("{}. User ID: {}", i + 1, user_id);
        let (status, created_at, login_id) = match client.suspend_user(user_id).await {
            Ok(response) => {
                let status = SuspensionStatus::from_status(response.status);
                match status {
                    SuspensionStatus::Successful => {
                        println!("\t{}. {}: Suspension successful", i + 1, user_id);
                        info!("Suspension successful");
                    }
                    SuspensionStatus::Failed => {
                        println!("\t{}. {}: Suspension failed ({})", i + 1, user_id, response.status);
                        info!("Suspension failed with status {}", response.status);
                    }
                }
                (status, response.created_at, response.login_id)
            }
            Err(Error::UserUrl { .. }) => {
                println!("\t{}. {}: Suspension failed (not a usable user id)", i + 1, user_id);
                warn!("Suspension failed: {:?} can't be used as a user id in a request path", user_id);
                (SuspensionStatus::Failed, String::new(), String::new())
            }
            Err(error) => return Err(error),
        };
        match status {
            SuspensionStatus::Successful => summary.succeeded += 1,
            SuspensionStatus::Failed => summary.failed += 1,
        }
        output.append(&ResultRecord { id: user_id.to_owned(), created_at, login_id, status })?;
    }
    println!();
    info!("Suspended {} of {} users, {} failed", summary.succeeded, summary.total(), summary.failed);
    Ok(summary)
}
