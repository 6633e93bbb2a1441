use anyhow::Result;
use threadline_core::Message;
use tracing::debug;

use super::{transcript_view, RenderSettings};
use crate::chat::ChatState;
use crate::config::CliConfig;
use crate::source::{FixtureSource, ThreadSource};

/// Run one chat turn against `source` and return the transcript.
pub async fn ask(
    source: &dyn ThreadSource,
    query: &str,
    article: bool,
    max_messages: usize,
) -> Result<ChatState> {
    let message = if article {
        Message::user_article(query)
    } else {
        Message::user_text(query)
    };

    let mut chat = ChatState::new(max_messages);
    let reply = chat.ask(source, message).await?;
    debug!(blocks = reply.blocks.len(), "chat turn resolved");
    Ok(chat)
}

/// Execute ask command
pub async fn execute(config: CliConfig, query: Vec<String>, article: bool) -> Result<()> {
    let source = FixtureSource::new(&config.feed.fixtures);
    let query = query.join(" ");

    let chat = ask(&source, &query, article, config.feed.max_messages).await?;

    let settings = RenderSettings::from_config(&config);
    println!("{}", settings.render(&transcript_view(chat.messages(), settings)));
    Ok(())
}
