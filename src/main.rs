mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::seed::SeedOutcome;
use crate::core::{app, database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing .env file is fine, anything else is worth a warning
    if let Err(e) = dotenv_result {
        if !e.not_found() {
            tracing::warn!("Error loading .env file: {}", e);
        }
    }

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created ({})", config.database.url);

    if config.database.seed_on_startup {
        let outcome = database::initialize(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Catalog initialization failed: {}", e))?;
        match outcome {
            SeedOutcome::Seeded {
                categories,
                listings,
            } => tracing::info!(categories, listings, "Catalog schema ready, seeded empty catalog"),
            SeedOutcome::Skipped => tracing::info!("Catalog schema ready, existing rows kept"),
        }
    } else {
        database::run_migrations(&pool)
            .await
            .map_err(|e| anyhow::anyhow!("Schema creation failed: {}", e))?;
        tracing::info!("Catalog schema ready, seeding disabled");
    }

    let router = app::build_router(pool, &config.app, &config.swagger);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, router).await?;

    Ok(())
}
