use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match health_portal_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("health-portal: {e}");
            ExitCode::FAILURE
        }
    }
}
