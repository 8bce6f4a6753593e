//! Feed commands - list feeds, page through items, trigger refresh

use anyhow::Result;
use clap::Subcommand;

use dstation_core::domain::{DsError, FeedId, Pagination};

use crate::app::App;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum FeedsCommand {
    /// List registered RSS feeds
    List {
        /// Skip the cache and fetch from the server
        #[arg(long)]
        refresh: bool,
    },
    /// List items of one feed
    Items {
        /// Feed ID
        id: String,
        /// First item to show
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Number of items to show
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Ask the server to re-poll a feed now
    Refresh {
        /// Feed ID
        id: String,
    },
}

impl FeedsCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        let app = App::from_default_config()?;

        let outcome: Result<(), DsError> = async {
            app.ensure_session().await?;
            match self {
                FeedsCommand::List { refresh } => {
                    let result = app.feeds.get_feeds(*refresh).await?;
                    if result.is_from_cache {
                        fmt.warn("Showing cached data (use --refresh for live data)");
                    }
                    if result.value.is_empty() {
                        fmt.info("No feeds registered");
                    }
                    for feed in &result.value {
                        let updated = feed
                            .last_update
                            .map(|t| t.to_rfc3339())
                            .unwrap_or_else(|| "never".to_string());
                        fmt.info(&format!("{}  {}  (updated {updated})", feed.id, feed.title));
                    }
                    fmt.print_json(&serde_json::json!({
                        "from_cache": result.is_from_cache,
                        "feeds": result.value,
                    }));
                    Ok(())
                }
                FeedsCommand::Items { id, offset, limit } => {
                    let feed = FeedId::new(id.clone())?;
                    let page = app
                        .feeds
                        .get_feed_items(&feed, Pagination::new(*offset, *limit)?)
                        .await?;
                    for item in &page.items {
                        fmt.info(&format!("{}  {}", item.title, item.link));
                    }
                    fmt.info(&format!(
                        "{} of {} item(s), starting at {}",
                        page.items.len(),
                        page.total,
                        page.offset
                    ));
                    fmt.print_json(&serde_json::json!({
                        "total": page.total,
                        "offset": page.offset,
                        "items": page.items,
                    }));
                    Ok(())
                }
                FeedsCommand::Refresh { id } => {
                    let feed = FeedId::new(id.clone())?;
                    app.feeds.refresh_feed(&feed).await?;
                    fmt.success(&format!("Feed {feed} refresh requested"));
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
