//! Auth commands - login, logout, and session status
//!
//! `login` performs the handshake and stores session + credentials in the
//! system keyring; `logout` invalidates the session remotely (best effort)
//! and always erases local state; `status` restores the stored session.

use anyhow::Result;
use clap::Subcommand;

use dstation_core::domain::{Credentials, DsError, ServerConfiguration};

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in to the NAS and store the session
    Login {
        /// Hostname or IP address of the NAS
        #[arg(long)]
        host: String,
        /// API port
        #[arg(long, default_value_t = 5001)]
        port: u16,
        /// Connect over plain HTTP instead of HTTPS
        #[arg(long)]
        no_https: bool,
        /// Account name
        #[arg(long, short)]
        username: String,
        /// Account password
        #[arg(long, short)]
        password: String,
        /// One-time code for accounts with 2-factor authentication
        #[arg(long)]
        otp: Option<String>,
    },
    /// Log out and remove stored credentials
    Logout,
    /// Check whether a stored session exists and is usable
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        let app = App::from_default_config()?;

        match self {
            AuthCommand::Login {
                host,
                port,
                no_https,
                username,
                password,
                otp,
            } => {
                let server = match ServerConfiguration::new(host.clone(), *port, !no_https) {
                    Ok(server) => server,
                    Err(err) => {
                        fmt.fail(&err);
                        std::process::exit(1);
                    }
                };
                let credentials =
                    match Credentials::new(username.clone(), password.clone(), otp.clone()) {
                        Ok(credentials) => credentials,
                        Err(err) => {
                            fmt.fail(&err);
                            std::process::exit(1);
                        }
                    };

                match app.auth.login(server, credentials).await {
                    Ok(session) => {
                        fmt.success(&format!("Logged in to {}", session.server));
                        fmt.print_json(&serde_json::json!({
                            "host": session.server.host,
                            "port": session.server.port,
                            "created_at": session.created_at.to_rfc3339(),
                        }));
                        Ok(())
                    }
                    Err(err) => {
                        fmt.fail(&err);
                        std::process::exit(1);
                    }
                }
            }
            AuthCommand::Logout => match app.auth.logout().await {
                Ok(()) => {
                    fmt.success("Logged out");
                    Ok(())
                }
                Err(err) => {
                    fmt.fail(&err);
                    std::process::exit(1);
                }
            },
            AuthCommand::Status => match app.ensure_session().await {
                Ok(session) => {
                    fmt.success(&format!(
                        "Logged in to {} (session {} hours old)",
                        session.server,
                        session.age().num_hours()
                    ));
                    fmt.print_json(&serde_json::json!({
                        "logged_in": true,
                        "host": session.server.host,
                        "age_hours": session.age().num_hours(),
                    }));
                    Ok(())
                }
                Err(DsError::NotAuthenticated) => {
                    fmt.warn("Not logged in");
                    fmt.print_json(&serde_json::json!({"logged_in": false}));
                    Ok(())
                }
                Err(err) => {
                    fmt.fail(&err);
                    std::process::exit(1);
                }
            },
        }
    }
}
