//! muster-kiosk server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the kiosk over HTTP.
//!
//! # Registering identities
//!
//! To enrol someone from the command line instead of the HTTP API:
//!
//! ```
//! cargo run -p muster-kiosk --bin server -- --register "Priya Patel" --role student
//! ```
//!
//! The new identity's UUID is printed on stdout, ready to hand to the face
//! enrolment pipeline.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use muster_core::{
  clock::{Calendar, SystemClock},
  engine::PunchEngine,
  identity::{NewIdentity, Role},
  store::AttendanceStore as _,
};
use muster_kiosk::{AppState, ServerConfig, resolver::CloudFaceResolver};
use muster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Muster attendance kiosk")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Register an identity with this display name, print its UUID, and exit.
  #[arg(long, value_name = "NAME")]
  register: Option<String>,

  /// Role recorded for `--register`.
  #[arg(long, value_enum, default_value = "student")]
  role: RoleArg,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RoleArg {
  Student,
  Faculty,
}

impl From<RoleArg> for Role {
  fn from(role: RoleArg) -> Self {
    match role {
      RoleArg::Student => Role::Student,
      RoleArg::Faculty => Role::Faculty,
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("MUSTER").separator("__"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let zone = server_cfg.zone().with_context(|| {
    format!("invalid utc_offset {:?}", server_cfg.utc_offset)
  })?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let store = Arc::new(store);

  // Helper mode: register an identity and exit.
  if let Some(name) = cli.register {
    let identity = store
      .add_identity(NewIdentity {
        display_name:   name,
        role:           cli.role.into(),
        enrollment_ref: None,
      })
      .await
      .context("failed to register identity")?;
    println!("{}", identity.identity_id);
    return Ok(());
  }

  // Build application state.
  let engine = Arc::new(PunchEngine::new(
    Arc::clone(&store),
    Calendar::new(SystemClock, zone),
    server_cfg.cooldown(),
  ));
  let resolver = CloudFaceResolver::new(server_cfg.resolver.clone())
    .context("failed to build face resolver client")?;

  let state = AppState {
    engine,
    store,
    resolver: Arc::new(resolver),
  };

  let app = muster_kiosk::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
