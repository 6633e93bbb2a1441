//! Story threads, article references and trends
//!
//! These are the domain values [`BlockFormatter`](crate::BlockFormatter)
//! turns into block sequences.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::block::BlockSequence;

/// How a thread of coverage relates to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadType {
    /// Recurring subject with long-running coverage
    Evergreen,
    /// Coverage clustered around an event
    EventDriven,
    /// An idea the archive keeps returning to
    NovelConcept,
}

impl ThreadType {
    /// Title-cased display name, e.g. `Event Driven`
    pub fn label(&self) -> &'static str {
        match self {
            ThreadType::Evergreen => "Evergreen",
            ThreadType::EventDriven => "Event Driven",
            ThreadType::NovelConcept => "Novel Concept",
        }
    }
}

/// One archive item belonging to a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleReference {
    /// Archive identifier
    pub article_id: String,
    /// Headline
    pub title: String,
    /// Byline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Publication time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    /// Canonical location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Teaser text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Match quality in `0.0..=1.0`
    pub relevance_score: f64,
    /// Publication section, e.g. `politics`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Relevance weighted by trend interest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_score: Option<f64>,
}

impl ArticleReference {
    /// Minimal reference with only the required fields
    pub fn new(
        article_id: impl Into<String>,
        title: impl Into<String>,
        relevance_score: f64,
    ) -> Self {
        Self {
            article_id: article_id.into(),
            title: title.into(),
            author: None,
            published_date: None,
            url: None,
            excerpt: None,
            relevance_score,
            section: None,
            story_score: None,
        }
    }

    /// Publication year, when dated
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.published_date.map(|d| d.year())
    }
}

/// A connected group of archive coverage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Stable identifier; feeds deduplicate on it
    pub thread_id: String,
    /// Classification
    pub thread_type: ThreadType,
    /// What the thread is about
    pub central_topic: String,
    /// Match quality in `0.0..=1.0`
    pub relevance_score: f64,
    /// Member articles, most relevant first
    #[serde(default)]
    pub articles: Vec<ArticleReference>,
    /// Pre-rendered blocks, when the producer supplied them
    #[serde(default, skip_serializing_if = "BlockSequence::is_empty")]
    pub blocks: BlockSequence,
    /// Why these articles belong together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Output of analysing a query or article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Identifier of the analysed query
    pub query_id: String,
    /// Threads found, best first
    #[serde(default)]
    pub threads: Vec<Thread>,
    /// Topics pulled from the query
    #[serde(default)]
    pub extracted_topics: Vec<String>,
}

/// Search-interest classification of a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendCategory {
    /// Growing interest
    #[default]
    Rising,
    /// Consistently high interest
    Top,
    /// Sudden spike
    Breakout,
}

impl TrendCategory {
    /// Title-cased display name
    pub fn label(&self) -> &'static str {
        match self {
            TrendCategory::Rising => "Rising",
            TrendCategory::Top => "Top",
            TrendCategory::Breakout => "Breakout",
        }
    }
}

/// A currently trending search topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Search keyword
    pub keyword: String,
    /// Interest in `0..=100`
    pub trend_score: u8,
    /// Classification
    #[serde(default)]
    pub trend_category: TrendCategory,
    /// Percent growth; zero or absent means unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
}

impl Trend {
    /// Rising trend with no velocity
    pub fn new(keyword: impl Into<String>, trend_score: u8) -> Self {
        Self {
            keyword: keyword.into(),
            trend_score: trend_score.min(100),
            trend_category: TrendCategory::Rising,
            velocity: None,
        }
    }

    /// Velocity when known and non-zero
    pub fn growth(&self) -> Option<f64> {
        self.velocity.filter(|v| *v != 0.0)
    }

    /// Trend interest weighted article relevance
    pub fn match_score(&self, article: &ArticleReference) -> f64 {
        f64::from(self.trend_score) / 100.0 * article.relevance_score
    }
}

/// Articles grouped by publication section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGroup {
    /// Title-cased section name
    pub section_name: String,
    /// Icon shown before the name
    pub section_emoji: String,
    /// Members, highest story score first
    pub articles: Vec<ArticleReference>,
    /// Number of members
    pub article_count: usize,
    /// Mean story score of scored members
    pub average_score: f64,
}

impl SectionGroup {
    /// Group articles by section (missing sections become `general`),
    /// ordered by average story score, highest first. Ties keep first-seen
    /// section order.
    pub fn group(articles: &[ArticleReference]) -> Vec<SectionGroup> {
        let mut order: Vec<String> = Vec::new();
        let mut by_section: HashMap<String, Vec<ArticleReference>> = HashMap::new();

        for article in articles {
            let key = article
                .section
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "general".to_string())
                .to_lowercase();
            if !by_section.contains_key(&key) {
                order.push(key.clone());
            }
            by_section.entry(key).or_default().push(article.clone());
        }

        let mut groups: Vec<SectionGroup> = order
            .into_iter()
            .filter_map(|key| {
                let mut members = by_section.remove(&key)?;
                let scores: Vec<f64> = members.iter().filter_map(|a| a.story_score).collect();
                let average_score = if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<f64>() / scores.len() as f64
                };
                members.sort_by(|a, b| {
                    b.story_score
                        .unwrap_or(0.0)
                        .total_cmp(&a.story_score.unwrap_or(0.0))
                });
                Some(SectionGroup {
                    section_name: title_case(&key),
                    section_emoji: section_emoji(&key).to_string(),
                    article_count: members.len(),
                    articles: members,
                    average_score,
                })
            })
            .collect();

        groups.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));
        groups
    }
}

fn title_case(s: &str) -> String {
    s.split(|c: char| c == ' ' || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Icon for a publication section
pub fn section_emoji(section: &str) -> &'static str {
    match section.to_lowercase().as_str() {
        "politics" => "🏛️",
        "technology" => "💻",
        "science" => "🔬",
        "culture" => "🎭",
        "books" => "📚",
        "business" | "economy" => "💼",
        "health" => "🩺",
        "ideas" => "💡",
        "international" | "global" => "🌍",
        _ => "📰",
    }
}

/// Components of an overall confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    /// Average story score adjusted for article count
    pub base_confidence: f64,
    /// Bonus for spread across sections; `1.0` means none
    pub diversity_multiplier: f64,
    /// Bonus for rising trends; `1.0` means none
    pub velocity_multiplier: f64,
    /// Product of the above, capped at `1.0`
    pub final_confidence: f64,
}

/// Coarse confidence bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    /// `>= 0.90`
    VeryHigh,
    /// `>= 0.75`
    High,
    /// `>= 0.50`
    Medium,
    /// `>= 0.25`
    Low,
    /// Anything lower
    VeryLow,
}

impl ConfidenceLevel {
    /// Bucket a score in `0.0..=1.0`
    pub fn from_score(confidence: f64) -> Self {
        if confidence >= 0.90 {
            ConfidenceLevel::VeryHigh
        } else if confidence >= 0.75 {
            ConfidenceLevel::High
        } else if confidence >= 0.50 {
            ConfidenceLevel::Medium
        } else if confidence >= 0.25 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    /// Emoji badge
    pub fn badge(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "🔥",
            ConfidenceLevel::High => "✅",
            ConfidenceLevel::Medium => "⚠️",
            ConfidenceLevel::Low => "❓",
            ConfidenceLevel::VeryLow => "❌",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryHigh => "Very High",
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::VeryLow => "Very Low",
        }
    }
}
