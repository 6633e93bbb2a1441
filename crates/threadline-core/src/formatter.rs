//! Block sequence construction from threads, trends and pitches
//!
//! Every formatter output is an ordinary [`BlockSequence`]; the renderer does
//! not know or care which function produced it.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use tracing::debug;

use crate::block::{Block, BlockSequence, TimelineEvent, MAX_BLOCKS_TOTAL};
use crate::element::{ButtonElement, ButtonStyle};
use crate::thread::{
    AnalysisResult, ArticleReference, ConfidenceFactors, ConfidenceLevel, SectionGroup, Thread,
    Trend,
};

/// Articles listed under a single thread
pub const MAX_ARTICLES_PER_THREAD: usize = 10;
/// Articles listed under a single publication section
pub const MAX_ARTICLES_PER_SECTION: usize = 10;
/// Publication sections listed in a trend view
pub const MAX_SECTIONS_TO_SHOW: usize = 5;
/// Excerpts are cut to this many characters
pub const EXCERPT_LIMIT: usize = 280;
/// Pitch paragraphs are cut to this many characters
pub const PITCH_PARAGRAPH_LIMIT: usize = 2900;
/// Source articles listed under a pitch
pub const MAX_PITCH_SOURCES: usize = 6;
/// Source articles listed per section under a pitch
pub const MAX_PITCH_SOURCES_PER_SECTION: usize = 2;

const HISTOGRAM_WIDTH: usize = 10;

/// Builds block sequences for analysis results, trends and pitches.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFormatter;

impl BlockFormatter {
    /// Create a formatter
    pub fn new() -> Self {
        Self
    }

    /// A single thread: header, metadata, optional explanation, coverage
    /// histogram and timeline, article sections and feedback buttons.
    pub fn format_thread_result(&self, thread: &Thread) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        blocks.push(Block::header(format!("🎯 {}", thread.central_topic)));
        blocks.push(context_row([
            format!("*Type:* {}", thread.thread_type.label()),
            format!("*Relevance:* {}%", percent(thread.relevance_score)),
            format!("*Articles:* {}", thread.articles.len()),
        ]));

        if let Some(explanation) = thread.explanation.as_deref().filter(|e| !e.is_empty()) {
            blocks.push(Block::section(format!("_{explanation}_")));
        }

        blocks.push(Block::divider());

        if let Some(histogram) = coverage_histogram(&thread.articles) {
            blocks.push(histogram);
        }
        if let Some(timeline) = self.format_timeline(thread) {
            blocks.push(timeline);
        }

        let shown = thread.articles.len().min(MAX_ARTICLES_PER_THREAD);
        for (i, article) in thread.articles.iter().take(shown).enumerate() {
            blocks.push(article_section(article, i + 1));
        }

        let remaining = thread.articles.len() - shown;
        if remaining > 0 {
            blocks.push(Block::section(format!("_... and {remaining} more articles_")));
        }

        blocks.push(feedback_actions(&thread.thread_id, "👎 Not Helpful", "💾 Save Thread"));
        blocks
    }

    /// A whole analysis: summary header, topics and each thread separated by
    /// dividers. Capped at [`MAX_BLOCKS_TOTAL`].
    pub fn format_analysis_result(&self, result: &AnalysisResult) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        if result.threads.is_empty() {
            blocks.push(Block::header("🔍 No relevant threads found"));
            blocks.push(Block::section(
                "Try adjusting your search terms or try a different article.",
            ));
            return blocks;
        }

        let count = result.threads.len();
        blocks.push(Block::header(format!(
            "📊 Found {count} thread{}",
            plural(count)
        )));

        if !result.extracted_topics.is_empty() {
            let topics: Vec<&str> = result
                .extracted_topics
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            blocks.push(Block::context(format!("*Topics:* {}", topics.join(", "))));
        }

        blocks.push(Block::divider());

        for (i, thread) in result.threads.iter().enumerate() {
            blocks.extend(self.format_thread_result(thread));
            if i + 1 < count {
                blocks.push(Block::divider());
            }
        }

        debug!(
            query_id = %result.query_id,
            threads = count,
            blocks = blocks.len(),
            "formatted analysis result"
        );
        blocks.capped(MAX_BLOCKS_TOTAL)
    }

    /// Compact list of suggested threads, each with a `View` button.
    pub fn format_proactive_suggestions(&self, threads: &[Thread]) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        blocks.push(Block::header("📰 Trending Story Threads"));
        blocks.push(Block::context(format!(
            "*{} trending topics found*",
            threads.len()
        )));
        blocks.push(Block::divider());

        for thread in threads {
            blocks.push(Block::section_with_button(
                format!(
                    "*🎯 {}*\nType: {} | Relevance: {}% | Articles: {}",
                    thread.central_topic,
                    thread.thread_type.label(),
                    percent(thread.relevance_score),
                    thread.articles.len()
                ),
                ButtonElement::new("View").with_action("view_thread", &thread.thread_id),
            ));
        }

        blocks.capped(MAX_BLOCKS_TOTAL)
    }

    /// Error header plus the message
    pub fn format_error_message(&self, error: &str) -> BlockSequence {
        [
            Block::header("❌ Error"),
            Block::section(format!("An error occurred: {error}")),
        ]
        .into_iter()
        .collect()
    }

    /// [`format_thread_result`](Self::format_thread_result) with a trend
    /// notice placed right after the leading header and context blocks.
    pub fn format_thread_result_with_trend(&self, thread: &Thread, trend: &Trend) -> BlockSequence {
        let mut blocks = self.format_thread_result(thread);

        let position = blocks
            .iter()
            .take_while(|b| matches!(b, Block::Header(_) | Block::Context(_)))
            .count();

        let velocity = trend
            .growth()
            .map(|v| format!(" (+{v}% interest)"))
            .unwrap_or_default();
        blocks.insert(
            position,
            Block::context(format!(
                "📈 *This topic is trending:* {}{velocity}",
                trend.keyword
            )),
        );
        blocks
    }

    /// A thread surfaced by a trend, with interest and per-article match
    /// scores.
    pub fn format_trend_thread(
        &self,
        trend: &Trend,
        thread: &Thread,
        articles: &[ArticleReference],
    ) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        blocks.push(Block::header(format!("🔥 Trending: {}", trend.keyword)));

        let velocity = trend
            .growth()
            .map(|v| format!(" | *Growth:* +{v}%"))
            .unwrap_or_default();
        blocks.push(Block::context(format!(
            "*Interest:* {}/100 | *Category:* {}{velocity}",
            trend.trend_score,
            trend.trend_category.label()
        )));

        blocks.push(Block::section(format!(
            "*Thread:* {}\nType: {} | Relevance: {}%",
            thread.central_topic,
            thread.thread_type.label(),
            percent(thread.relevance_score)
        )));

        blocks.push(Block::divider());

        if !articles.is_empty() {
            blocks.push(Block::section(format!(
                "*{} relevant article{} found:*",
                articles.len(),
                plural(articles.len())
            )));

            for (i, article) in articles.iter().take(MAX_ARTICLES_PER_SECTION).enumerate() {
                let score = format!("Match Score: {:.2}", trend.match_score(article));
                blocks.push(scored_article_section(article, i + 1, &score));
            }

            if articles.len() > MAX_ARTICLES_PER_SECTION {
                blocks.push(Block::section(format!(
                    "_... and {} more articles_",
                    articles.len() - MAX_ARTICLES_PER_SECTION
                )));
            }
        }

        blocks.push(feedback_actions(&thread.thread_id, "👎 Not Relevant", "📌 Save Thread"));
        blocks.capped(MAX_BLOCKS_TOTAL)
    }

    /// A trend thread grouped by publication section, with a confidence
    /// badge and breakdown.
    pub fn format_trend_thread_with_sections(
        &self,
        trend: &Trend,
        thread: &Thread,
        articles: &[ArticleReference],
        groups: &[SectionGroup],
        factors: &ConfidenceFactors,
        threshold_met: bool,
    ) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        let confidence = factors.final_confidence;
        let level = ConfidenceLevel::from_score(confidence);
        let pct = percent(confidence);

        blocks.push(Block::header(format!(
            "{} Trending: {} ({pct}% confidence)",
            level.badge(),
            trend.keyword
        )));

        let velocity = trend
            .growth()
            .map(|v| format!(" | Growth: +{v}%"))
            .unwrap_or_default();
        blocks.push(Block::context(format!(
            "*Confidence:* {} {} ({pct}%) | *Articles:* {} across {} sections | *Interest:* {}/100{velocity}",
            level.badge(),
            level.label(),
            articles.len(),
            groups.len(),
            trend.trend_score
        )));

        if !threshold_met {
            blocks.push(Block::section(
                "⚠️ *Note:* This trend does not meet all quality thresholds. Results may be less reliable.",
            ));
        }

        blocks.push(Block::divider());

        if !groups.is_empty() {
            blocks.push(Block::section("📰 *SECTIONS WITH MATCHES:*"));

            for group in groups.iter().take(MAX_SECTIONS_TO_SHOW) {
                blocks.push(Block::section(format!(
                    "{} *{}* ({} article{}, avg: {}%)",
                    group.section_emoji,
                    group.section_name.to_uppercase(),
                    group.article_count,
                    plural(group.article_count),
                    percent(group.average_score)
                )));

                for (i, article) in group
                    .articles
                    .iter()
                    .take(MAX_ARTICLES_PER_SECTION)
                    .enumerate()
                {
                    let story_score = article
                        .story_score
                        .filter(|s| *s != 0.0)
                        .unwrap_or_else(|| trend.match_score(article));
                    let score = format!("Story Score: {story_score:.2}");
                    blocks.push(scored_article_section(article, i + 1, &score));
                }

                if group.articles.len() > MAX_ARTICLES_PER_SECTION {
                    blocks.push(Block::context(format!(
                        "_{} more articles in this section..._",
                        group.articles.len() - MAX_ARTICLES_PER_SECTION
                    )));
                }

                blocks.push(Block::divider());
            }
        }

        let mut breakdown = format!(
            "*Confidence breakdown:* Base {}%",
            percent(factors.base_confidence)
        );
        if factors.diversity_multiplier > 1.0 {
            breakdown.push_str(&format!(
                " × Diversity {:.2}",
                factors.diversity_multiplier
            ));
        }
        if factors.velocity_multiplier > 1.0 {
            breakdown.push_str(&format!(" × Velocity {:.2}", factors.velocity_multiplier));
        }
        breakdown.push_str(&format!(" = {pct}%"));
        blocks.push(Block::context(breakdown));

        blocks.push(feedback_actions(&thread.thread_id, "👎 Not Relevant", "📌 Save Thread"));
        blocks.capped(MAX_BLOCKS_TOTAL)
    }

    /// A generated story pitch with its source articles and pitch feedback
    /// buttons. Paragraphs wrapped entirely in `**` become bold headings.
    pub fn format_pitch_block(
        &self,
        keyword: &str,
        pitch: &str,
        groups: &[SectionGroup],
        confidence: f64,
    ) -> BlockSequence {
        let mut blocks = BlockSequence::new();

        blocks.push(Block::header(format!("📝 Story Pitch: {keyword}")));
        blocks.push(Block::context(format!(
            "*Confidence:* {}% | Based on {} section{} of coverage",
            percent(confidence),
            groups.len(),
            plural(groups.len())
        )));
        blocks.push(Block::divider());

        if pitch.contains("**") {
            for paragraph in pitch.split("\n\n").map(str::trim) {
                if paragraph.is_empty() {
                    continue;
                }
                let heading = paragraph
                    .strip_prefix("**")
                    .and_then(|p| p.strip_suffix("**"));
                match heading {
                    Some(heading) => blocks.push(Block::section(format!("*{heading}*"))),
                    None => blocks.push(Block::section(truncate_chars(
                        paragraph,
                        PITCH_PARAGRAPH_LIMIT,
                    ))),
                }
            }
        } else {
            blocks.push(Block::section(truncate_chars(pitch, PITCH_PARAGRAPH_LIMIT)));
        }

        blocks.push(Block::divider());

        if !groups.is_empty() {
            blocks.push(Block::section("*📰 Source Articles by Section:*"));

            let mut listed = 0;
            for group in groups {
                if listed >= MAX_PITCH_SOURCES {
                    break;
                }
                blocks.push(Block::section(format!(
                    "{} *{}* ({} article{})",
                    group.section_emoji,
                    group.section_name,
                    group.article_count,
                    plural(group.article_count)
                )));

                for article in group.articles.iter().take(MAX_PITCH_SOURCES_PER_SECTION) {
                    if listed >= MAX_PITCH_SOURCES {
                        break;
                    }
                    listed += 1;
                    let mut line = format!("• *{}*{}", article.title, year_suffix(article));
                    if let Some(author) = &article.author {
                        line.push_str(&format!(" by {author}"));
                    }
                    blocks.push(Block::section(line));
                }
            }
        }

        let value = format!("pitch_{keyword}");
        blocks.push(Block::actions([
            ButtonElement::new("👍 Good Pitch")
                .with_action("pitch_helpful", &value)
                .with_style(ButtonStyle::Primary),
            ButtonElement::new("👎 Not Useful").with_action("pitch_not_helpful", &value),
            ButtonElement::new("🔄 Regenerate")
                .with_action("regenerate_pitch", format!("regenerate_{keyword}")),
        ]));
        blocks.capped(MAX_BLOCKS_TOTAL)
    }

    /// Timeline of the thread's dated articles. `None` unless they span at
    /// least two distinct years.
    pub fn format_timeline(&self, thread: &Thread) -> Option<Block> {
        let events: Vec<TimelineEvent> = thread
            .articles
            .iter()
            .filter_map(|a| {
                a.year().map(|year| {
                    TimelineEvent::new(year, a.title.clone()).with_reference(a.article_id.clone())
                })
            })
            .collect();

        let years: BTreeSet<i32> = events.iter().map(|e| e.year).collect();
        if years.len() < 2 {
            return None;
        }
        Some(Block::timeline(events))
    }
}

fn percent(score: f64) -> i64 {
    (score * 100.0) as i64
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Keep the first `limit` characters, appending `...` when anything was cut.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    if s.chars().count() > limit {
        let mut cut: String = s.chars().take(limit).collect();
        cut.push_str("...");
        cut
    } else {
        s.to_string()
    }
}

fn year_suffix(article: &ArticleReference) -> String {
    article
        .year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default()
}

fn context_row<I: IntoIterator<Item = String>>(texts: I) -> Block {
    Block::Context(crate::block::ContextBlock {
        elements: texts
            .into_iter()
            .map(|t| crate::text::TextObject::mrkdwn(t).into())
            .collect(),
    })
}

fn view_button(article: &ArticleReference) -> ButtonElement {
    ButtonElement::new("View").with_action("view_article", &article.article_id)
}

fn excerpt_line(article: &ArticleReference) -> String {
    article
        .excerpt
        .as_deref()
        .filter(|e| !e.is_empty())
        .map(|e| format!("\n> {}", truncate_chars(e, EXCERPT_LIMIT)))
        .unwrap_or_default()
}

fn article_section(article: &ArticleReference, index: usize) -> Block {
    let text = format!(
        "*{index}. {}*{}\nAuthor: {} | Relevance: {}%{}",
        article.title,
        year_suffix(article),
        article.author.as_deref().unwrap_or("Unknown"),
        percent(article.relevance_score),
        excerpt_line(article)
    );
    Block::section_with_button(text, view_button(article))
}

fn scored_article_section(article: &ArticleReference, index: usize, score: &str) -> Block {
    let text = format!(
        "*{index}. {}*{}\nRelevance: {}% | {score}{}",
        article.title,
        year_suffix(article),
        percent(article.relevance_score),
        excerpt_line(article)
    );
    Block::section_with_button(text, view_button(article))
}

fn feedback_actions(thread_id: &str, negative: &str, save: &str) -> Block {
    Block::actions([
        ButtonElement::new("👍 Helpful")
            .with_action("feedback_positive", thread_id)
            .with_style(ButtonStyle::Primary),
        ButtonElement::new(negative).with_action("feedback_negative", thread_id),
        ButtonElement::new(save).with_action("save_thread", thread_id),
    ])
}

/// Month-by-month article counts as a fenced bar chart.
fn coverage_histogram(articles: &[ArticleReference]) -> Option<Block> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for date in articles.iter().filter_map(|a| a.published_date) {
        *counts.entry((date.year(), date.month())).or_default() += 1;
    }

    let max = counts.values().copied().max()?;

    let mut text = String::from("*Coverage over time:*\n```\n");
    for ((year, month), count) in &counts {
        let filled = count * HISTOGRAM_WIDTH / max;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(HISTOGRAM_WIDTH - filled)
        );
        let label = format!("{} {year}", month_abbrev(*month));
        text.push_str(&format!("{label:>8} │{bar}│ {count}\n"));
    }
    text.push_str("```");

    Some(Block::section(text))
}

fn month_abbrev(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContextBlock;
    use crate::element::{Accessory, ContextElement};
    use crate::thread::{ThreadType, TrendCategory};
    use chrono::{TimeZone, Utc};

    fn article(id: &str, year: Option<i32>) -> ArticleReference {
        let mut a = ArticleReference::new(id, format!("Article {id}"), 0.85);
        a.published_date = year.map(|y| Utc.with_ymd_and_hms(y, 3, 1, 0, 0, 0).unwrap());
        a
    }

    fn thread(articles: Vec<ArticleReference>) -> Thread {
        Thread {
            thread_id: "t1".into(),
            thread_type: ThreadType::EventDriven,
            central_topic: "Housing".into(),
            relevance_score: 0.9,
            articles,
            blocks: BlockSequence::new(),
            explanation: Some("Recurring coverage".into()),
        }
    }

    fn section_text(block: &Block) -> &str {
        match block {
            Block::Section(s) => s.text.as_ref().map(|t| t.text.as_str()).unwrap_or(""),
            other => panic!("expected section, got {other:?}"),
        }
    }

    fn context_texts(block: &Block) -> Vec<&str> {
        match block {
            Block::Context(ContextBlock { elements }) => elements
                .iter()
                .filter_map(|e| match e {
                    ContextElement::Text(t) => Some(t.text.as_str()),
                    _ => None,
                })
                .collect(),
            other => panic!("expected context, got {other:?}"),
        }
    }

    #[test]
    fn thread_result_layout() {
        let blocks = BlockFormatter::new().format_thread_result(&thread(vec![article("a1", None)]));
        let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            ["header", "context", "section", "divider", "section", "actions"]
        );
        assert_eq!(
            context_texts(&blocks[1]),
            ["*Type:* Event Driven", "*Relevance:* 90%", "*Articles:* 1"]
        );
        assert_eq!(section_text(&blocks[2]), "_Recurring coverage_");
    }

    #[test]
    fn article_section_has_view_button() {
        let blocks = BlockFormatter::new().format_thread_result(&thread(vec![article("a1", None)]));
        match &blocks[4] {
            Block::Section(s) => match &s.accessory {
                Some(Accessory::Button(b)) => {
                    assert_eq!(b.label(), "View");
                    assert_eq!(b.action_id, "view_article");
                    assert_eq!(b.value, "a1");
                }
                other => panic!("unexpected accessory {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            section_text(&blocks[4]),
            "*1. Article a1*\nAuthor: Unknown | Relevance: 85%"
        );
    }

    #[test]
    fn more_articles_uses_remaining_count() {
        let articles = (0..13).map(|i| article(&i.to_string(), None)).collect();
        let blocks = BlockFormatter::new().format_thread_result(&thread(articles));
        let more = &blocks[blocks.len() - 2];
        assert_eq!(section_text(more), "_... and 3 more articles_");
    }

    #[test]
    fn dated_articles_add_histogram_and_timeline() {
        let articles = vec![article("a", Some(2001)), article("b", Some(2003)), article("c", Some(2003))];
        let blocks = BlockFormatter::new().format_thread_result(&thread(articles));

        let histogram = section_text(&blocks[4]);
        assert!(histogram.starts_with("*Coverage over time:*\n```\n"));
        assert!(histogram.contains("Mar 2001 │█████░░░░░│ 1"));
        assert!(histogram.contains("Mar 2003 │██████████│ 2"));
        assert!(histogram.ends_with("```"));

        match &blocks[5] {
            Block::Timeline(t) => assert_eq!(t.events.len(), 3),
            other => panic!("expected timeline, got {other:?}"),
        }
    }

    #[test]
    fn single_year_has_no_timeline() {
        let t = thread(vec![article("a", Some(2001)), article("b", Some(2001))]);
        assert!(BlockFormatter::new().format_timeline(&t).is_none());
    }

    #[test]
    fn empty_analysis_result() {
        let result = AnalysisResult {
            query_id: "q".into(),
            threads: vec![],
            extracted_topics: vec![],
        };
        let blocks = BlockFormatter::new().format_analysis_result(&result);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind(), "header");
    }

    #[test]
    fn analysis_result_separates_threads_and_caps() {
        let many: Vec<ArticleReference> = (0..12).map(|i| article(&i.to_string(), None)).collect();
        let result = AnalysisResult {
            query_id: "q".into(),
            threads: vec![thread(many.clone()), thread(many.clone()), thread(many)],
            extracted_topics: vec!["housing".into(), "cities".into()],
        };
        let blocks = BlockFormatter::new().format_analysis_result(&result);
        assert_eq!(blocks.len(), MAX_BLOCKS_TOTAL);
        assert_eq!(context_texts(&blocks[1]), ["*Topics:* housing, cities"]);
    }

    #[test]
    fn trend_notice_follows_header_and_context() {
        let mut trend = Trend::new("housing", 85);
        trend.velocity = Some(150.0);
        let blocks = BlockFormatter::new()
            .format_thread_result_with_trend(&thread(vec![article("a1", None)]), &trend);
        assert_eq!(
            context_texts(&blocks[2]),
            ["📈 *This topic is trending:* housing (+150% interest)"]
        );
    }

    #[test]
    fn trend_thread_layout() {
        let mut trend = Trend::new("X", 85);
        trend.trend_category = TrendCategory::Breakout;
        let blocks = BlockFormatter::new().format_trend_thread(
            &trend,
            &thread(vec![]),
            &[article("a1", Some(2020))],
        );
        let kinds: Vec<&str> = blocks.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            ["header", "context", "section", "divider", "section", "section", "actions"]
        );
        assert_eq!(
            context_texts(&blocks[1]),
            ["*Interest:* 85/100 | *Category:* Breakout"]
        );
        assert_eq!(section_text(&blocks[4]), "*1 relevant article found:*");
        assert!(section_text(&blocks[5]).contains("Match Score: 0.72"));
    }

    #[test]
    fn sections_view_shows_badge_and_breakdown() {
        let trend = Trend::new("X", 80);
        let mut a = article("a1", None);
        a.section = Some("science".into());
        a.story_score = Some(0.6);
        let groups = SectionGroup::group(std::slice::from_ref(&a));
        let factors = ConfidenceFactors {
            base_confidence: 0.8,
            diversity_multiplier: 1.1,
            velocity_multiplier: 1.0,
            final_confidence: 0.88,
        };

        let blocks = BlockFormatter::new().format_trend_thread_with_sections(
            &trend,
            &thread(vec![]),
            &[a],
            &groups,
            &factors,
            false,
        );

        match &blocks[0] {
            Block::Header(h) => assert_eq!(h.text.text, "✅ Trending: X (88% confidence)"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(section_text(&blocks[2]).starts_with("⚠️ *Note:*"));
        assert_eq!(section_text(&blocks[5]), "🔬 *SCIENCE* (1 article, avg: 60%)");
        assert!(section_text(&blocks[6]).contains("Story Score: 0.60"));
        let breakdown = &blocks[blocks.len() - 2];
        assert_eq!(
            context_texts(breakdown),
            ["*Confidence breakdown:* Base 80% × Diversity 1.10 = 88%"]
        );
    }

    #[test]
    fn pitch_paragraph_headings_and_truncation() {
        let long = "y".repeat(PITCH_PARAGRAPH_LIMIT + 10);
        let pitch = format!("**Angle**\n\n{long}\n\n");
        let blocks = BlockFormatter::new().format_pitch_block("X", &pitch, &[], 0.5);

        assert_eq!(section_text(&blocks[3]), "*Angle*");
        let body = section_text(&blocks[4]);
        assert_eq!(body.chars().count(), PITCH_PARAGRAPH_LIMIT + 3);
        assert!(body.ends_with("..."));

        match blocks.last() {
            Some(Block::Actions(a)) => {
                let ids: Vec<&str> = a.elements.iter().map(|b| b.action_id.as_str()).collect();
                assert_eq!(ids, ["pitch_helpful", "pitch_not_helpful", "regenerate_pitch"]);
                assert_eq!(a.elements[2].value, "regenerate_X");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn pitch_sources_are_limited() {
        let groups: Vec<SectionGroup> = ["politics", "science", "culture", "books"]
            .iter()
            .map(|name| {
                let articles: Vec<ArticleReference> = (0..3)
                    .map(|i| {
                        let mut a = article(&format!("{name}{i}"), None);
                        a.section = Some(name.to_string());
                        a
                    })
                    .collect();
                SectionGroup::group(&articles).remove(0)
            })
            .collect();

        let blocks = BlockFormatter::new().format_pitch_block("X", "plain pitch", &groups, 0.5);
        let bullets = blocks
            .iter()
            .filter(|b| matches!(b, Block::Section(_)) && section_text(b).starts_with("• "))
            .count();
        assert_eq!(bullets, MAX_PITCH_SOURCES);
    }

    #[test]
    fn excerpt_is_truncated() {
        let mut a = article("a1", None);
        a.excerpt = Some("z".repeat(EXCERPT_LIMIT + 1));
        let blocks = BlockFormatter::new().format_thread_result(&thread(vec![a]));
        let text = section_text(&blocks[4]);
        let excerpt = text.rsplit("> ").next().unwrap_or_default();
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT + 3);
    }

    #[test]
    fn error_message() {
        let blocks = BlockFormatter::new().format_error_message("boom");
        assert_eq!(section_text(&blocks[1]), "An error occurred: boom");
    }
}
