//! File Station commands - browse shares and create destination folders

use anyhow::Result;
use clap::Subcommand;

use dstation_core::domain::DsError;

use crate::app::App;
use crate::output::{format_bytes, get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum FsCommand {
    /// List the top-level shared folders
    Shares,
    /// List the contents of a folder
    Ls {
        /// Absolute path, e.g. /downloads
        path: String,
    },
    /// Create a folder
    Mkdir {
        /// Absolute path of the parent folder
        parent: String,
        /// Name of the folder to create
        name: String,
    },
}

impl FsCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        let app = App::from_default_config()?;

        let outcome: Result<(), DsError> = async {
            app.ensure_session().await?;
            match self {
                FsCommand::Shares => {
                    let shares = app.files.get_shares().await?;
                    if shares.is_empty() {
                        fmt.info("No shared folders visible to this account");
                    }
                    for share in &shares {
                        fmt.info(&format!("{}  ({})", share.path, share.name));
                    }
                    fmt.print_json(&serde_json::json!({ "shares": shares }));
                    Ok(())
                }
                FsCommand::Ls { path } => {
                    let items = app.files.get_folder_contents(path).await?;
                    if items.is_empty() {
                        fmt.info("Empty folder");
                    }
                    for item in &items {
                        let size = match item.size {
                            Some(bytes) => format_bytes(bytes),
                            None => "-".to_string(),
                        };
                        let marker = if item.is_directory { "d" } else { "-" };
                        fmt.info(&format!("{marker}  {:>10}  {}", size, item.name));
                    }
                    fmt.print_json(&serde_json::json!({ "path": path, "items": items }));
                    Ok(())
                }
                FsCommand::Mkdir { parent, name } => {
                    let created = app.files.create_folder(parent, name).await?;
                    fmt.success(&format!("Created {}", created.path));
                    fmt.print_json(&serde_json::json!({ "created": created }));
                    Ok(())
                }
            }
        }
        .await;

        if let Err(err) = outcome {
            fmt.fail(&err);
            std::process::exit(1);
        }
        Ok(())
    }
}
