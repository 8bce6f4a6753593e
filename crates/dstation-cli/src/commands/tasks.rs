//! Task commands - list, add, pause, resume, delete, move

use anyhow::Result;
use clap::Subcommand;

use dstation_core::domain::{CreateTaskRequest, DsError, TaskId, TorrentFile};

use crate::app::App;
use crate::output::{format_bytes, get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List download tasks
    List {
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },
    /// Add a download task from a URL, magnet link, or torrent file
    Add {
        /// Download URL or magnet link
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        uri: Option<String>,
        /// Path to a local .torrent file to upload
        #[arg(long)]
        file: Option<std::path::PathBuf>,
        /// Destination folder on the NAS
        #[arg(long)]
        destination: Option<String>,
    },
    /// Pause tasks
    Pause {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Resume tasks
    Resume {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete tasks
    Delete {
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move tasks to another destination folder
    Move {
        /// Destination folder on the NAS
        #[arg(long)]
        destination: String,
        /// Task IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn parse_ids(raw: &[String]) -> Result<Vec<TaskId>, DsError> {
    raw.iter()
        .map(|id| TaskId::new(id.clone()))
        .collect()
}

fn print_task_list(
    fmt: &dyn OutputFormatter,
    tasks: &[dstation_core::domain::DownloadTask],
    from_cache: bool,
) {
    if from_cache {
        fmt.warn("Showing cached data (use --refresh for live data)");
    }
    if tasks.is_empty() {
        fmt.info("No download tasks");
    }
    for task in tasks {
        fmt.info(&format!(
            "{}  {:>9}  {:5.1}%  {}  {}",
            task.id,
            format_bytes(task.size_bytes),
            task.progress_percent(),
            task.status,
            task.title,
        ));
    }
    fmt.print_json(&serde_json::json!({
        "from_cache": from_cache,
        "tasks": tasks,
    }));
}

impl TasksCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        let app = App::from_default_config()?;

        let outcome: Result<(), DsError> = async {
            app.ensure_session().await?;
            match self {
                TasksCommand::List { refresh } => {
                    let result = app.tasks.get_tasks(*refresh).await?;
                    print_task_list(&*fmt, &result.value, result.is_from_cache);
                    Ok(())
                }
                TasksCommand::Add {
                    uri,
                    file,
                    destination,
                } => {
                    let mut request = match (uri, file) {
                        (Some(uri), None) => CreateTaskRequest::from_uri(uri.clone()),
                        (None, Some(path)) => {
                            let bytes = std::fs::read(path)
                                .map_err(|e| DsError::InvalidInput(e.to_string()))?;
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| "upload.torrent".to_string());
                            CreateTaskRequest {
                                uri: None,
                                file: Some(TorrentFile { name, bytes }),
                                destination: None,
                            }
                        }
                        // clap enforces exactly one source
                        _ => unreachable!(),
                    };
                    if let Some(destination) = destination {
                        request = request.with_destination(destination.clone());
                    }
                    app.tasks.create_task(&request).await?;
                    fmt.success("Task created");
                    Ok(())
                }
                TasksCommand::Pause { ids } => {
                    app.tasks.pause_tasks(&parse_ids(ids)?).await?;
                    fmt.success(&format!("Paused {} task(s)", ids.len()));
                    Ok(())
                }
                TasksCommand::Resume { ids } => {
                    app.tasks.resume_tasks(&parse_ids(ids)?).await?;
                    fmt.success(&format!("Resumed {} task(s)", ids.len()));
                    Ok(())
                }
                TasksCommand::Delete { ids } => {
                    app.tasks.delete_tasks(&parse_ids(ids)?).await?;
                    fmt.success(&format!("Deleted {} task(s)", ids.len()));
                    Ok(())
                }
                TasksCommand::Move { destination, ids } => {
                    app.tasks
                        .edit_task_destination(&parse_ids(ids)?, destination)
                        .await?;
                    fmt.success(&format!("Moved {} task(s) to {destination}", ids.len()));
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
