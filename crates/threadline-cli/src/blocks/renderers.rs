//! One pure function per block kind
//!
//! Renderers take the block, the registry that collects interactive targets,
//! and the view context. They never mutate the block and never invoke the
//! action handler; clicking happens later through the rendered view.

use threadline_core::{
    Accessory, ActionsBlock, Block, ButtonElement, ButtonStyle, ContextBlock, ContextElement,
    HeaderBlock, ImageElement, SectionBlock, TextObject, TimelineBlock, UnknownBlock,
};
use threadline_oil::utils::{pad_to_width, truncate_to_width, visible_width};
use threadline_oil::{
    col, fixed_width, row, styled, ButtonTone, Gap, Node, Style, ThemeTokens, ViewContext,
};

use super::action::{ActionRegistry, Inspection};
use super::mrkdwn;

const FALLBACK_WIDTH: usize = 40;
const BUTTON_GAP: u16 = 2;
const FIELD_GAP: u16 = 2;
const CONTEXT_GAP: u16 = 2;
const IMAGE_ICON: &str = "🖼 ";
const TIMELINE_MARKER: &str = "●";
const TIMELINE_CONNECTOR: &str = "─";
/// Display width of timeline titles unless configured otherwise
pub const DEFAULT_TIMELINE_TITLE_WIDTH: usize = 12;

fn view_width(ctx: &ViewContext<'_>) -> usize {
    match ctx.width() {
        0 => FALLBACK_WIDTH,
        w => w,
    }
}

/// Text object with emphasis substitution for `mrkdwn`, verbatim otherwise.
pub fn render_text(text: &TextObject, base: Style, theme: &ThemeTokens) -> Node {
    if text.is_markdown() {
        mrkdwn::render(&text.text, base, theme)
    } else {
        styled(text.text.clone(), base)
    }
}

pub fn render_header(block: &HeaderBlock, ctx: &ViewContext<'_>) -> Node {
    styled(block.text.text.clone(), ctx.theme().heading())
}

pub fn render_section(
    block: &SectionBlock,
    registry: &mut ActionRegistry,
    ctx: &ViewContext<'_>,
) -> Node {
    let theme = ctx.theme();
    let mut children = Vec::new();

    if let Some(text) = &block.text {
        children.push(render_text(text, theme.body(), theme));
    }

    if !block.fields.is_empty() {
        children.push(render_fields(&block.fields, ctx));
    }

    match &block.accessory {
        Some(Accessory::Button(button)) => children.push(render_button(button, registry, theme)),
        Some(Accessory::Image(image)) => children.push(render_image(image, theme)),
        Some(other @ Accessory::Unsupported(_)) => {
            children.push(render_unsupported_element(other.kind(), theme))
        }
        None => {}
    }

    col(children)
}

fn render_fields(fields: &[TextObject], ctx: &ViewContext<'_>) -> Node {
    let theme = ctx.theme();
    let column = (view_width(ctx).saturating_sub(FIELD_GAP as usize) / 2).max(1) as u16;

    col(fields.chunks(2).map(|pair| {
        row(pair
            .iter()
            .map(|field| fixed_width(column, render_text(field, theme.body(), theme))))
        .gap(Gap::column(FIELD_GAP))
    }))
}

fn render_image(image: &ImageElement, theme: &ThemeTokens) -> Node {
    styled(format!("{IMAGE_ICON}{}", image.alt_text), theme.muted())
}

/// Inert marker for an element this renderer has no view for.
fn render_unsupported_element(kind: &str, theme: &ThemeTokens) -> Node {
    styled(format!("[unsupported {kind}]"), theme.muted())
}

fn tone(style: Option<ButtonStyle>) -> ButtonTone {
    match style {
        Some(ButtonStyle::Primary) => ButtonTone::Primary,
        Some(ButtonStyle::Danger) => ButtonTone::Danger,
        Some(ButtonStyle::Default) | None => ButtonTone::Neutral,
    }
}

fn button_label(button: &ButtonElement) -> String {
    format!("[{}]", button.label())
}

fn button_width(hotkey: usize, button: &ButtonElement) -> usize {
    hotkey.to_string().len() + 1 + visible_width(&button_label(button))
}

/// Registers the button and shows it as `N [Label]`.
pub fn render_button(
    button: &ButtonElement,
    registry: &mut ActionRegistry,
    theme: &ThemeTokens,
) -> Node {
    let hotkey = registry.register(button);
    row([
        styled(format!("{hotkey} "), theme.button_hint_style()),
        styled(button_label(button), theme.button(tone(button.style))),
    ])
}

pub fn render_context(block: &ContextBlock, ctx: &ViewContext<'_>) -> Node {
    let theme = ctx.theme();
    row(block.elements.iter().map(|element| match element {
        ContextElement::Text(text) => render_text(text, theme.muted(), theme),
        ContextElement::Image(image) => render_image(image, theme),
        other @ ContextElement::Unsupported(_) => render_unsupported_element(other.kind(), theme),
    }))
    .gap(Gap::column(CONTEXT_GAP))
}

/// Buttons flow left to right and wrap before exceeding the view width.
pub fn render_actions(
    block: &ActionsBlock,
    registry: &mut ActionRegistry,
    ctx: &ViewContext<'_>,
) -> Node {
    let theme = ctx.theme();
    let width = view_width(ctx);

    let mut lines: Vec<Vec<Node>> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut used = 0;

    for button in &block.elements {
        let hotkey = registry.targets().len() + 1;
        let needed = button_width(hotkey, button);
        let extra = if current.is_empty() {
            needed
        } else {
            needed + BUTTON_GAP as usize
        };

        if !current.is_empty() && used + extra > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }

        used += if current.is_empty() {
            needed
        } else {
            needed + BUTTON_GAP as usize
        };
        current.push(render_button(button, registry, theme));
    }
    if !current.is_empty() {
        lines.push(current);
    }

    col(lines
        .into_iter()
        .map(|buttons| row(buttons).gap(Gap::column(BUTTON_GAP))))
}

pub fn render_divider(ctx: &ViewContext<'_>) -> Node {
    styled(
        TIMELINE_CONNECTOR.repeat(view_width(ctx)),
        ctx.theme().divider_style(),
    )
}

/// Three-line strip: years, markers joined by connectors, truncated titles.
/// Full titles go to the registry's inspection list.
pub fn render_timeline(
    block: &TimelineBlock,
    registry: &mut ActionRegistry,
    ctx: &ViewContext<'_>,
    title_width: usize,
) -> Node {
    let theme = ctx.theme();
    let events = block.sorted_events();
    if events.is_empty() {
        return Node::Empty;
    }

    let title_width = title_width.max(1);
    let cell = events
        .iter()
        .map(|e| e.year.to_string().len())
        .max()
        .unwrap_or(4)
        .max(title_width)
        + 1;
    let per_strip = (view_width(ctx) / cell).max(1);
    let last = events.len() - 1;

    let mut strips = Vec::new();
    for (chunk_index, chunk) in events.chunks(per_strip).enumerate() {
        let mut years = Vec::new();
        let mut markers = Vec::new();
        let mut titles = Vec::new();

        for (offset, event) in chunk.iter().enumerate() {
            let index = chunk_index * per_strip + offset;
            let is_last_in_strip = offset + 1 == chunk.len();
            let label = truncate_to_width(&event.title, title_width);

            registry.inspect(Inspection {
                label: label.clone(),
                detail: event.title.clone(),
                reference_id: event.reference_id.clone(),
            });

            years.push(styled(
                pad_cell(&event.year.to_string(), cell, is_last_in_strip),
                theme.timeline_year_style(),
            ));

            markers.push(styled(TIMELINE_MARKER, theme.timeline_marker_style()));
            if index != last {
                markers.push(styled(
                    TIMELINE_CONNECTOR.repeat(cell - 1),
                    theme.timeline_connector_style(),
                ));
            }

            titles.push(styled(
                pad_cell(&label, cell, is_last_in_strip),
                theme.body(),
            ));
        }

        strips.push(col([row(years), row(markers), row(titles)]));
    }

    if strips.len() == 1 {
        strips.remove(0)
    } else {
        col(strips)
    }
}

fn pad_cell(content: &str, cell: usize, last: bool) -> String {
    if last {
        content.to_string()
    } else {
        pad_to_width(content, cell)
    }
}

pub fn render_unknown(block: &UnknownBlock, ctx: &ViewContext<'_>) -> Node {
    let kind = block.kind().unwrap_or("<missing type>");
    styled(
        format!("⚠ Unsupported block: {kind}"),
        ctx.theme().warning_style(),
    )
}

/// Dispatch on the block tag.
pub fn render_block(
    block: &Block,
    registry: &mut ActionRegistry,
    ctx: &ViewContext<'_>,
    timeline_title_width: usize,
) -> Node {
    match block {
        Block::Header(b) => render_header(b, ctx),
        Block::Section(b) => render_section(b, registry, ctx),
        Block::Context(b) => render_context(b, ctx),
        Block::Actions(b) => render_actions(b, registry, ctx),
        Block::Divider(_) => render_divider(ctx),
        Block::Timeline(b) => render_timeline(b, registry, ctx, timeline_title_width),
        Block::Unknown(b) => render_unknown(b, ctx),
    }
}
