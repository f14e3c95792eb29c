//! Faultline - code defect analyzer.
//!
//! Faultline inspects source files for defects (syntax errors, security
//! issues, logic bugs) and converts the findings into structured,
//! issue-tracker-shaped records with a title, markdown body, priority,
//! and tags.
//!
//! # Architecture
//!
//! The analysis pipeline is built from small, independently testable parts:
//!
//! - `language`: file extension to language label mapping
//! - `syntax`: deterministic syntax-error detection (tree-sitter grammars
//!   with a `syn` fallback for Rust sources)
//! - `classify`: priority classification and tag extraction from free text
//! - `segment`: splitting one model response into discrete issue records
//! - `analyzer`: per-file orchestration (syntax check first, then model
//!   review) and batch processing
//! - `inference`: the model collaborator behind the `InferenceEngine` trait
//! - `server`: HTTP API exposing the batch analysis endpoint
//! - `report`: CLI output formatting (pretty, JSON)
//!
//! A file flows through the orchestrator: syntax check (short-circuits on a
//! detected syntax error), otherwise prompt construction, one inference call,
//! and segmentation of the response into zero or more issue records.

pub mod analyzer;
pub mod classify;
pub mod cli;
pub mod config;
pub mod inference;
pub mod issue;
pub mod language;
pub mod prompt;
pub mod report;
pub mod segment;
pub mod server;
pub mod syntax;

pub use analyzer::Analyzer;
pub use config::Config;
pub use inference::{InferenceEngine, InferenceError, OpenAiEngine};
pub use issue::{BatchReport, BatchSummary, FileResult, FileStatus, FileUnit, IssueRecord, Priority};
pub use segment::{Segmentation, Segmenter};
pub use syntax::{SyntaxCheck, SyntaxChecker, SyntaxFinding};
