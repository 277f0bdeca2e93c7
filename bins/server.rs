use std::process::ExitCode;

use common::utils::logging::{init_logging, LogOptions};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // 提前加载 .env，使得 RUST_LOG / SERVER_* 等环境变量生效
    dotenv().ok();

    let cfg = AppConfig::load_and_validate();
    let opts = cfg
        .as_ref()
        .map(|c| LogOptions { debug: c.server.debug, json: c.server.log_json })
        .unwrap_or_default();
    init_logging(opts);

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "photo-store", event = "config_invalid", error = %format!("{e:#}"), "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "photo-store",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "photo-store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "photo-store",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "photo store starting"
    );

    match rt.block_on(server::run(cfg)) {
        Ok(()) => {
            info!(service = "photo-store", event = "stop", %service_id, pid, "photo store stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "photo-store", event = "run_failed", error = %e, "server::run returned error");
            ExitCode::FAILURE
        }
    }
}
