use common::utils::logging::init_logging_json;
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    dotenv().ok();
    // JSON lines for the relay
    init_logging_json();
    info!(service = "say", event = "logger_init", "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "say", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "say", event = "config_invalid", error = %e, "invalid configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "say", event = "start", %service_id, pid, version, "say relay starting");

    if let Err(e) = server::run_say(cfg).await {
        error!(service = "say", event = "run_failed", error = %e, "server::run_say returned error");
        return std::process::ExitCode::FAILURE;
    }
    info!(service = "say", event = "stop", %service_id, pid, "say relay stopped");
    std::process::ExitCode::SUCCESS
}
