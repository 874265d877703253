use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use clap::Parser;
use tokio::sync::broadcast;

use tunebox::media::library::MediaLibrary;
use tunebox::{cli, config, http};

/// Set to true once the first Ctrl+C is received. Second Ctrl+C force-exits.
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Wait for Ctrl+C. The first one returns (graceful shutdown); a second one,
/// while in-flight requests drain, exits immediately.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    if SHUTTING_DOWN.swap(true, Ordering::SeqCst) {
        eprintln!("\ntunebox: forced exit");
        std::process::exit(1);
    }
}

/// Block until the first Ctrl+C, then tell every listener to stop and arm
/// the forced exit.
async fn broadcast_shutdown(shutdown_tx: broadcast::Sender<()>) {
    wait_for_shutdown().await;
    tracing::info!("Shutting down, draining in-flight requests...");
    let _ = shutdown_tx.send(());
    tokio::spawn(wait_for_shutdown());
}

fn fail(message: String) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref()).and_then(|path| {
        match config::load_config(&path) {
            Ok(cfg) => {
                tracing::debug!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config file: {}", e);
                None
            }
        }
    });

    let config = config::Config::resolve(file_config, &args);

    let library = MediaLibrary::open(&config.media_dir).unwrap_or_else(|e| {
        fail(format!(
            "cannot open media directory {}: {}",
            config.media_dir.display(),
            e
        ))
    });
    tracing::info!(
        "tunebox {} serving {} on port {}",
        env!("CARGO_PKG_VERSION"),
        library.store().root().display(),
        config.port
    );

    let state = http::state::AppState::new(library, config.max_upload_bytes);
    let app = http::build_router(state);

    if config.localhost {
        run_localhost(config.port, app).await;
    } else {
        run_dual_stack(config.port, app).await;
    }
}

/// Serve `app` on `listener` until the shutdown broadcast fires.
async fn serve(
    listener: tokio::net::TcpListener,
    app: Router,
    mut shutdown_rx: broadcast::Receiver<()>,
    label: &'static str,
) {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await
        .unwrap_or_else(|e| tracing::error!("{} server error: {}", label, e));
}

/// Run a localhost-only HTTP server and wait for graceful shutdown.
async fn run_localhost(port: u16, app: Router) {
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| fail(format!("failed to bind {}: {}", addr, e)));
    tracing::info!("Listening on http://{} (localhost only)", addr);

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(4);
    let server = tokio::spawn(serve(listener, app, shutdown_rx, "HTTP"));
    broadcast_shutdown(shutdown_tx).await;
    let _ = server.await;
    tracing::info!("Goodbye.");
}

/// Run dual-stack (IPv4 + IPv6) HTTP listeners and wait for graceful shutdown.
async fn run_dual_stack(port: u16, app: Router) {
    // Separate IPv4 (0.0.0.0) and IPv6 (:::) sockets. Linux defaults
    // IPV6_V6ONLY=false, which makes the second bind fail with
    // "Address already in use"; socket2 lets us set it explicitly.
    let ipv4_addr = format!("0.0.0.0:{}", port);
    let ipv4_listener = tokio::net::TcpListener::bind(&ipv4_addr)
        .await
        .unwrap_or_else(|e| fail(format!("failed to bind IPv4 {}: {}", ipv4_addr, e)));

    let ipv6_listener = match bind_ipv6(port) {
        Ok(listener) => Some(listener),
        Err(e) => {
            tracing::warn!("IPv6 listener unavailable, serving IPv4 only: {}", e);
            None
        }
    };
    tracing::info!(
        "Listening on port {} ({})",
        port,
        if ipv6_listener.is_some() { "IPv4 + IPv6" } else { "IPv4" }
    );

    let (shutdown_tx, _) = broadcast::channel::<()>(4);
    let mut servers = vec![tokio::spawn(serve(
        ipv4_listener,
        app.clone(),
        shutdown_tx.subscribe(),
        "IPv4",
    ))];
    if let Some(listener) = ipv6_listener {
        servers.push(tokio::spawn(serve(
            listener,
            app,
            shutdown_tx.subscribe(),
            "IPv6",
        )));
    }

    broadcast_shutdown(shutdown_tx).await;
    for server in servers {
        let _ = server.await;
    }
    tracing::info!("Goodbye.");
}

fn bind_ipv6(port: u16) -> std::io::Result<tokio::net::TcpListener> {
    let addr = std::net::SocketAddr::from((std::net::Ipv6Addr::UNSPECIFIED, port));
    let socket = socket2::Socket::new(
        socket2::Domain::IPV6,
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    if let Err(e) = socket.set_only_v6(true) {
        tracing::warn!("Could not set IPV6_V6ONLY: {} -- dual-bind may fail on Linux", e);
    }
    if let Err(e) = socket.set_reuse_address(true) {
        tracing::warn!("Could not set SO_REUSEADDR on IPv6 socket: {}", e);
    }
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;
    tokio::net::TcpListener::from_std(socket.into())
}
