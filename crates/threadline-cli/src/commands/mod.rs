pub mod ask;
pub mod config;
pub mod feed;
pub mod render;

use threadline_core::{Message, MessageOrigin};
use threadline_oil::{
    col, render_with, spinner, styled, Gap, Node, RenderOptions, ThemeTokens, ViewContext,
};

use crate::blocks::{ActionHandler, BlockRenderer, BlockView};
use crate::config::CliConfig;

/// Layout settings shared by every command that prints blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: usize,
    pub color: bool,
    pub timeline_title_width: usize,
}

impl RenderSettings {
    pub fn from_config(config: &CliConfig) -> Self {
        Self {
            width: config.render_width(),
            color: config.display.color,
            timeline_title_width: config.display.timeline_title_width,
        }
    }

    /// Uncolored settings at `width`
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            color: false,
            timeline_title_width: crate::blocks::DEFAULT_TIMELINE_TITLE_WIDTH,
        }
    }

    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            color: self.color,
        }
    }

    pub fn context(&self) -> ViewContext<'static> {
        ViewContext::new(ThemeTokens::default_ref(), self.width)
    }

    pub fn render(&self, node: &Node) -> String {
        render_with(node, self.options())
    }
}

/// Render a message's blocks, keeping the interactive surface.
pub fn render_message_blocks<'a>(
    message: &'a Message,
    handler: Option<&'a dyn ActionHandler>,
    settings: RenderSettings,
) -> BlockView<'a> {
    let mut renderer =
        BlockRenderer::new(&message.blocks).timeline_title_width(settings.timeline_title_width);
    if let Some(handler) = handler {
        renderer = renderer.on_action(handler);
    }
    renderer.render(&settings.context())
}

/// One transcript entry: user text as a prompt line, a spinner while
/// loading, otherwise the message's blocks.
pub fn message_view(message: &Message, settings: RenderSettings) -> Node {
    let theme = ThemeTokens::default_ref();
    if message.is_loading {
        return spinner(Some("Finding related threads...".to_string()), 0)
            .with_style(theme.spinner_style());
    }

    match message.origin {
        MessageOrigin::UserText => styled(format!("> {}", message.content), theme.user_prompt()),
        MessageOrigin::UserArticle => styled(
            format!("> [article] {}", first_line(&message.content)),
            theme.user_prompt(),
        ),
        MessageOrigin::System | MessageOrigin::Trend => {
            render_message_blocks(message, None, settings).node
        }
    }
}

/// Stack messages with a blank line between them.
pub fn transcript_view(messages: &[Message], settings: RenderSettings) -> Node {
    col(messages.iter().map(|m| message_view(m, settings))).gap(Gap::row(1))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadline_core::{Block, BlockSequence};

    #[test]
    fn transcript_renders_prompt_then_blocks() {
        let messages = vec![
            Message::user_text("housing"),
            Message::system(BlockSequence::from(vec![Block::header("Found")])),
        ];
        let settings = RenderSettings::plain(40);
        let out = settings.render(&transcript_view(&messages, settings));
        assert_eq!(out, "> housing\n\nFound");
    }

    #[test]
    fn pasted_article_shows_first_line() {
        let message = Message::user_article("Headline\nBody text");
        let settings = RenderSettings::plain(40);
        assert_eq!(
            settings.render(&message_view(&message, settings)),
            "> [article] Headline"
        );
    }

    #[test]
    fn loading_message_shows_spinner_label() {
        let settings = RenderSettings::plain(60);
        let out = settings.render(&message_view(&Message::loading(), settings));
        assert!(out.ends_with("Finding related threads..."));
    }
}
