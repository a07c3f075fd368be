mod audit;
mod cli;
mod infra;
mod routes;
mod server;

use degree_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
