//! Status command - session, reachability, and current transfer speeds

use anyhow::Result;
use clap::Args;

use dstation_core::domain::DsError;

use crate::app::App;
use crate::output::{format_bytes, get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        let app = App::from_default_config()?;

        let outcome: Result<(), DsError> = async {
            let session = app.ensure_session().await?;
            let online = app.is_online().await;

            fmt.info(&format!("Server:     {}", session.server));
            fmt.info(&format!(
                "Session:    established {}",
                session.created_at.to_rfc3339()
            ));
            if online {
                fmt.success("Reachable:  yes");
            } else {
                fmt.warn("Reachable:  no");
            }

            let mut stats_json = serde_json::Value::Null;
            if online {
                match app.tasks.statistics().await {
                    Ok(stats) => {
                        fmt.info(&format!(
                            "Download:   {}/s",
                            format_bytes(stats.speed_download)
                        ));
                        fmt.info(&format!(
                            "Upload:     {}/s",
                            format_bytes(stats.speed_upload)
                        ));
                        stats_json = serde_json::json!({
                            "speed_download": stats.speed_download,
                            "speed_upload": stats.speed_upload,
                        });
                    }
                    Err(err) => fmt.warn(&format!("Statistics unavailable: {err}")),
                }
            }

            fmt.print_json(&serde_json::json!({
                "server": session.server.base_url(),
                "session_created_at": session.created_at.to_rfc3339(),
                "online": online,
                "statistics": stats_json,
            }));
            Ok(())
        }
        .await;

        if let Err(err) = outcome {
            fmt.fail(&err);
            std::process::exit(1);
        }
        Ok(())
    }
}
