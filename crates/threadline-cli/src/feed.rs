//! Proactive feed panel
//!
//! The panel replaces its whole list on every refresh. Entries are
//! deduplicated by thread id (falling back to the message id); the first
//! occurrence wins and input order is kept.

use std::collections::HashSet;
use std::time::Duration;

use threadline_core::{BlockFormatter, Message};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::source::{SourceResult, ThreadSource, TrendingThread};

#[derive(Debug, Clone, Default)]
pub struct FeedPanel {
    messages: Vec<Message>,
    formatter: BlockFormatter,
}

impl FeedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Replace the list, dropping duplicates. Returns how many were kept.
    pub fn refresh(&mut self, messages: Vec<Message>) -> usize {
        let total = messages.len();
        let mut seen = HashSet::new();
        self.messages = messages
            .into_iter()
            .filter(|m| seen.insert(m.dedup_key().to_string()))
            .collect();

        if self.messages.len() < total {
            debug!(
                dropped = total - self.messages.len(),
                "dropped duplicate feed entries"
            );
        }
        self.messages.len()
    }

    /// Turn trending threads into trend messages.
    pub fn messages_from_trending(&self, trending: Vec<TrendingThread>) -> Vec<Message> {
        trending
            .into_iter()
            .map(|TrendingThread { trend, thread }| {
                let blocks = self
                    .formatter
                    .format_trend_thread(&trend, &thread, &thread.articles);
                Message::trend(thread.thread_id.clone(), blocks)
            })
            .collect()
    }

    /// Fetch from `source` and refresh.
    pub async fn refresh_from(&mut self, source: &dyn ThreadSource) -> SourceResult<usize> {
        let trending = source.trending().await?;
        let messages = self.messages_from_trending(trending);
        Ok(self.refresh(messages))
    }
}

/// Refresh `panel` every `every` until `shutdown` flips to true or its
/// sender is dropped. A failed fetch keeps the previous list. `on_refresh`
/// runs after every successful refresh. Returns the number of successful
/// refreshes.
pub async fn poll_feed<F>(
    panel: &mut FeedPanel,
    source: &dyn ThreadSource,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut on_refresh: F,
) -> usize
where
    F: FnMut(&FeedPanel),
{
    let mut ticker = interval(every.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut refreshes = 0;

    loop {
        if *shutdown.borrow() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                match panel.refresh_from(source).await {
                    Ok(count) => {
                        refreshes += 1;
                        debug!(count, refreshes, "feed refreshed");
                        on_refresh(&*panel);
                    }
                    Err(err) => warn!(error = %err, "feed refresh failed, keeping previous entries"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    info!(refreshes, "feed polling stopped");
    refreshes
}
