//! BudgetLens Web Server
//!
//! Serves the server-rendered budget analysis front end. Configuration
//! comes from CLI flags or environment variables; the session signing
//! secret is required and the process refuses to start without it.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budgetlens_session::{SessionConfig, SessionStore};
use budgetlens_web::users::InMemoryUserStore;
use budgetlens_web::{router, AppState};
use budgetlens_ynab::BudgetClient;

/// BudgetLens Web Server - budget analysis front end
#[derive(Parser, Debug)]
#[command(name = "budgetlens-web")]
#[command(about = "Server-rendered front end for a personal budgeting API")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "BUDGETLENS_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "BUDGETLENS_PORT", default_value = "3000")]
    port: u16,

    /// Base URL of the remote budgeting API
    #[arg(long, env = "BUDGETLENS_YNAB_URL", default_value = "https://api.ynab.com/v1")]
    ynab_url: String,

    /// Session cookie signing secret (min 32 bytes)
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    session_secret: String,

    /// Emit the Secure cookie attribute (enable behind HTTPS)
    #[arg(long, env = "BUDGETLENS_SECURE_COOKIES")]
    secure_cookies: bool,

    /// Seed a demo account with this email
    #[arg(long, env = "BUDGETLENS_DEMO_USER")]
    demo_user: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let mut session_config = SessionConfig::new(args.session_secret);
    session_config.secure = args.secure_cookies;
    let sessions = SessionStore::new(session_config)?;

    let users = InMemoryUserStore::new();
    if let Some(email) = &args.demo_user {
        let user = users.insert(email).await;
        info!(email = %user.email, id = %user.id, "seeded demo account");
    }

    let state = AppState {
        sessions,
        client: BudgetClient::new(args.ynab_url.as_str()),
        users: Arc::new(users),
    };

    let app = router(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    info!("Starting BudgetLens Web Server");
    info!("Listening on http://{}", addr);
    info!("Remote budgeting API: {}", args.ynab_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
