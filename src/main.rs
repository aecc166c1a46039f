use std::process::ExitCode;

use recovai_intake::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    recovai_intake::init_tracing();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match recovai_intake::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
