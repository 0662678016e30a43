use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));
    let shutdown = Arc::clone(&signals.shutdown);

    // Connections are served on spawn_local tasks under this LocalSet
    let local = tokio::task::LocalSet::new();
    let result = local
        .run_until(server::run_accept_loop(
            listener,
            state,
            active_connections,
            shutdown,
        ))
        .await;

    // The accept loop has stopped admitting connections; keep driving the
    // LocalSet until the in-flight connection tasks finish. Each task is
    // already bounded by the connection timeout, so this terminates.
    local.await;

    result
}
