mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use glowcart::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
