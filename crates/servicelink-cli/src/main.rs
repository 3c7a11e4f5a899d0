//! ServiceLink command-line client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use servicelink_client::{ApiClient, ClientConfig, FileSessionStore, SessionStore};
use servicelink_models::{Pagination, ServiceFilters, Session};
use servicelink_router::Navigator;

const DEFAULT_SESSION_FILE: &str = ".servicelink-session.json";

#[derive(Parser, Debug)]
#[command(name = "servicelink", about = "ServiceLink API client and route inspector")]
struct Cli {
    /// API base URL
    #[arg(long, env = "SERVICELINK_API_BASE_URL")]
    api_url: Option<String>,

    /// Where the session token is kept between runs
    #[arg(long, env = "SERVICELINK_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session
    Login { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the account owning the stored token
    Whoami,
    /// Print the stored session
    Session,
    /// List services
    Services {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List categories with their services
    Categories,
    /// Show a provider's public profile
    Provider { id: String },
    /// List notifications
    Notifications {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Count unread notifications
    Unread,
    /// Resolve a path and run the navigation guard for the stored session
    Navigate { path: String },
    /// Print the route table
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&cli.session_file));

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    match cli.command {
        Command::Session => print_json(&serde_json::to_value(store.load()?)?),
        Command::Logout => {
            store.clear()?;
            info!("Signed out");
            Ok(())
        }
        Command::Routes => {
            let navigator = Navigator::default();
            print_json(&serde_json::to_value(navigator.table().routes())?)
        }
        Command::Navigate { path } => {
            let session = store.load()?;
            let navigator = Navigator::default();
            print_json(&serde_json::to_value(navigator.navigate(&path, &session))?)
        }
        command => {
            let client = ApiClient::new(config, Arc::clone(&store))
                .context("Failed to create API client")?;
            run_remote(&client, store.as_ref(), command).await
        }
    }
}

fn init_tracing() -> Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("servicelink=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

async fn run_remote(client: &ApiClient, store: &dyn SessionStore, command: Command) -> Result<()> {
    let output = match command {
        Command::Login { email, password } => {
            let body = client.auth().login(&email, &password).await?;
            let Some(session) = session_from_login(&body) else {
                print_json(&body)?;
                bail!("Login failed");
            };
            store.save(&session)?;
            info!(role = session.user_role.as_deref().unwrap_or("-"), "Signed in");
            body
        }
        Command::Whoami => {
            let session = store.load()?;
            let Some(token) = session.token() else {
                bail!("Not signed in");
            };
            client.users().me(token).await?
        }
        Command::Services {
            search,
            category,
            min_price,
            max_price,
            skills,
            page,
            limit,
        } => {
            let filters = ServiceFilters {
                category_id: category,
                min_price,
                max_price,
                search_term: search,
                skill_ids: skills,
            };
            client
                .services()
                .list(&filters, &Pagination { page, limit })
                .await?
        }
        Command::Categories => serde_json::to_value(client.services().categories_with_services().await)?,
        Command::Provider { id } => serde_json::to_value(client.providers().details(&id).await)?,
        Command::Notifications { page, limit } => {
            serde_json::to_value(client.notifications().list(page, limit).await)?
        }
        Command::Unread => serde_json::to_value(client.notifications().unread_count().await)?,
        other => {
            debug!(?other, "Handled locally");
            json!(null)
        }
    };

    print_json(&output)
}

/// Pull the token and role out of a login response.
///
/// Accepts the token and user either at the top level or under `data`.
fn session_from_login(body: &Value) -> Option<Session> {
    let token = ["/data/token", "/token"]
        .iter()
        .find_map(|p| body.pointer(p).and_then(Value::as_str))
        .filter(|t| !t.is_empty())?;

    let role = ["/data/user/role", "/data/role", "/user/role", "/role"]
        .iter()
        .find_map(|p| body.pointer(p).and_then(Value::as_str))
        .map(str::to_string);

    Some(Session::new(token, role))
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_nested_login() {
        let body = json!({
            "success": true,
            "data": {"token": "abc", "user": {"id": "u1", "role": "PROVIDER"}}
        });
        let session = session_from_login(&body).unwrap();
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user_role.as_deref(), Some("PROVIDER"));
    }

    #[test]
    fn test_session_from_flat_login() {
        let body = json!({"token": "xyz", "user": {"role": "CLIENT"}});
        let session = session_from_login(&body).unwrap();
        assert_eq!(session.token(), Some("xyz"));
        assert_eq!(session.user_role.as_deref(), Some("CLIENT"));
    }

    #[test]
    fn test_failed_login_has_no_session() {
        let body = json!({"success": false, "message": "Invalid credentials"});
        assert!(session_from_login(&body).is_none());
        assert!(session_from_login(&json!({"token": ""})).is_none());
    }

    #[test]
    fn test_cli_parses_service_filters() {
        let cli = Cli::try_parse_from([
            "servicelink",
            "services",
            "--search",
            "garden",
            "--skill",
            "1",
            "--skill",
            "2",
        ])
        .unwrap();
        match cli.command {
            Command::Services { search, skills, .. } => {
                assert_eq!(search.as_deref(), Some("garden"));
                assert_eq!(skills, vec!["1", "2"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_session_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("s.json"));
        let session = session_from_login(&json!({"data": {"token": "t", "role": "CLIENT"}})).unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);
    }
}
