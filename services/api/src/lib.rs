mod cli;
mod infra;
mod reports;
mod routes;
mod server;

use machine_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
