//! Splitting one free-text analysis response into discrete issue records.
//!
//! The model is prompted to answer either with a flat bulleted list of
//! `- Line N: ...` findings or with a sectioned narrative. The segmenter
//! tries a line-pattern strategy first (per-defect granularity) and falls
//! back to a section splitter (per-topic granularity). Both are heuristics
//! tied to the prompt's expected output format, so they live behind a small
//! strategy trait and can be swapped without touching the orchestrator.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::classify::{classify_priority, extract_tags};
use crate::issue::{render_issue_body, IssueRecord, Priority};

/// Inputs shorter than this (trimmed) carry no findings.
const MIN_RESPONSE_CHARS: usize = 20;
/// Sections shorter than this (trimmed) are dropped.
const MIN_SECTION_CHARS: usize = 30;
/// Title truncation lengths.
const LINE_TITLE_CHARS: usize = 60;
const SECTION_TITLE_CHARS: usize = 80;

static LINE_FINDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*]\s*Line\s+(\d+):\s*(.+)$").unwrap());
static SECTION_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n###?\s+").unwrap());

/// Outcome of segmenting one response.
///
/// `NoIssues` (the model said so, or the response was too short to carry
/// findings) is distinct from `Unmatched` (a substantive response that fit
/// no known pattern); callers emit zero records either way but can log the
/// difference.
#[derive(Debug)]
pub enum Segmentation {
    Records(Vec<IssueRecord>),
    NoIssues,
    Unmatched,
}

/// An issue drafted by a strategy, before template wrapping.
#[derive(Debug)]
pub struct Draft {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

/// One way of carving an analysis text into drafts.
///
/// Returns `None` when the text contains nothing this strategy recognizes,
/// so the segmenter can try the next strategy in order.
pub trait SegmentStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn split(&self, path: &str, text: &str) -> Option<Vec<Draft>>;
}

/// Matches bulleted `- Line N: description` findings, one draft per line.
pub struct LineFindings;

impl SegmentStrategy for LineFindings {
    fn name(&self) -> &'static str {
        "line-findings"
    }

    fn split(&self, path: &str, text: &str) -> Option<Vec<Draft>> {
        let mut drafts = Vec::new();

        for line in text.lines() {
            let Some(caps) = LINE_FINDING.captures(line.trim()) else {
                continue;
            };
            let line_num = &caps[1];
            let description = caps[2].trim();

            let (head, truncated) = truncate_chars(description, LINE_TITLE_CHARS);
            let mut title = format!("Line {}: {}", line_num, head);
            if truncated {
                title.push_str("...");
            }

            let tags = extract_tags(&title, description, path);
            drafts.push(Draft {
                title,
                body: format!("**Line {}:** {}", line_num, description),
                tags,
            });
        }

        if drafts.is_empty() {
            None
        } else {
            Some(drafts)
        }
    }
}

/// Splits on markdown headings; the whole text is one section when fewer
/// than two parts result.
pub struct Sections;

impl SegmentStrategy for Sections {
    fn name(&self) -> &'static str {
        "sections"
    }

    fn split(&self, path: &str, text: &str) -> Option<Vec<Draft>> {
        let mut parts: Vec<&str> = SECTION_SPLIT.split(text).collect();
        if parts.len() < 2 {
            parts = vec![text];
        }

        let filename = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());

        let mut drafts = Vec::new();
        for part in parts {
            let mut section = part.trim();
            if section.is_empty() || section.chars().count() < MIN_SECTION_CHARS {
                continue;
            }

            // The prompt asks for an "Issues" heading; strip the leftover token.
            if section.to_lowercase().starts_with("issues") {
                section = section["issues".len()..].trim();
            }
            if section.is_empty() {
                continue;
            }

            let first_line = section.lines().next().unwrap_or("Code Issue");
            let (head, _) = truncate_chars(first_line, SECTION_TITLE_CHARS);
            let title = format!("{}: {}", head, filename);

            let tags = extract_tags(&title, section, path);
            drafts.push(Draft {
                title,
                body: section.to_string(),
                tags,
            });
        }

        if drafts.is_empty() {
            None
        } else {
            Some(drafts)
        }
    }
}

/// Segments model responses into issue records via an ordered strategy list.
pub struct Segmenter {
    strategies: Vec<Box<dyn SegmentStrategy>>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            strategies: vec![Box::new(LineFindings), Box::new(Sections)],
        }
    }
}

impl Segmenter {
    pub fn with_strategies(strategies: Vec<Box<dyn SegmentStrategy>>) -> Self {
        Self { strategies }
    }

    /// Split one analysis response into issue records.
    ///
    /// All records from one response share one priority, classified over the
    /// entire text rather than per finding.
    pub fn segment(&self, path: &str, text: &str, requested_types: &[String]) -> Segmentation {
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_RESPONSE_CHARS {
            return Segmentation::NoIssues;
        }

        let lowered = trimmed.to_lowercase();
        if lowered == "no issues detected" || lowered == "no issues detected." {
            return Segmentation::NoIssues;
        }

        let priority = classify_priority(text);
        let types = requested_types.join(", ");

        for strategy in &self.strategies {
            if let Some(drafts) = strategy.split(path, text) {
                tracing::debug!(
                    strategy = strategy.name(),
                    count = drafts.len(),
                    file = path,
                    "segmented analysis response"
                );
                let records = drafts
                    .into_iter()
                    .map(|d| finish(d, path, priority, &types))
                    .collect();
                return Segmentation::Records(records);
            }
        }

        Segmentation::Unmatched
    }
}

fn finish(draft: Draft, path: &str, priority: Priority, types: &str) -> IssueRecord {
    IssueRecord {
        title: draft.title,
        body: render_issue_body(path, priority, types, &draft.body),
        priority,
        tags: draft.tags,
    }
}

/// Take at most `max` characters; report whether anything was cut.
fn truncate_chars(s: &str, max: usize) -> (String, bool) {
    let mut out = String::new();
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if i >= max {
            truncated = true;
            break;
        }
        out.push(ch);
    }
    (out, truncated)
}
