//! The bundled demo documents load and render

use std::path::PathBuf;

use threadline_cli::actions::ThreadAction;
use threadline_cli::commands::feed::render_panel;
use threadline_cli::commands::render::render_document;
use threadline_cli::commands::{ask, RenderSettings};
use threadline_cli::feed::FeedPanel;
use threadline_cli::source::{FixtureSource, ThreadSource};

fn demos() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

#[test]
fn demo_document_renders_every_block() {
    let json = std::fs::read_to_string(demos().join("blocks.json")).unwrap();
    let outcome = render_document(&json, &[1, 4], RenderSettings::plain(80)).unwrap();

    assert_eq!(outcome.unknown_blocks, 1);
    assert!(outcome.output.contains("⚠ Unsupported block: carousel"));
    assert!(outcome.output.starts_with("Trending: rent control"));

    let labels: Vec<&str> = outcome.targets.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["View", "👍 Helpful", "👎 Not Relevant", "📌 Save Thread"]);

    let years: Vec<&str> = outcome
        .inspections
        .iter()
        .map(|i| i.reference_id.as_str())
        .collect();
    assert_eq!(years, ["a-0415", "a-0872", "a-1001"]);

    assert_eq!(
        outcome.actions,
        [
            ThreadAction::ViewArticle("a-1001".into()),
            ThreadAction::Other {
                action_id: "button".into(),
                value: String::new()
            },
        ]
    );
}

#[tokio::test]
async fn demo_fixtures_feed_the_chat() {
    let source = FixtureSource::new(demos().join("fixtures"));

    let chat = ask::ask(&source, "housing rents", false, 20).await.unwrap();
    let reply = &chat.messages()[1];
    assert_eq!(reply.blocks[0].kind(), "header");
    assert!(reply.blocks.iter().any(|b| b.kind() == "timeline"));
}

#[tokio::test]
async fn demo_fixtures_feed_the_panel() {
    let source = FixtureSource::new(demos().join("fixtures"));
    assert_eq!(source.trending().await.unwrap().len(), 2);

    let mut panel = FeedPanel::new();
    assert_eq!(panel.refresh_from(&source).await.unwrap(), 2);

    let out = render_panel(&panel, RenderSettings::plain(80));
    assert!(out.contains("Trending: rent control"));
    assert!(out.contains("Trending: light rail"));
}
