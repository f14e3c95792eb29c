//! Per-file analysis orchestration.
//!
//! For each file: syntax check first (a detected syntax error short-circuits
//! with exactly one issue and no inference call), otherwise one model review
//! round-trip segmented into issue records. Failures are contained per file;
//! a batch always produces one result per input, in input order.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::inference::{InferenceEngine, InferenceError};
use crate::issue::{render_issue_body, FileResult, FileUnit, IssueRecord, Priority};
use crate::prompt;
use crate::segment::{Segmentation, Segmenter};
use crate::syntax::{SyntaxCheck, SyntaxChecker};

/// Requested types that warrant the deterministic syntax pre-check.
const SYNTAX_CHECK_TYPES: &[&str] = &["bugs", "linting", "build"];

/// The analysis pipeline: syntax checker, inference engine, segmenter.
///
/// All state is read-only after construction; one analyzer serves any number
/// of sequential or concurrent batches.
pub struct Analyzer {
    engine: Arc<dyn InferenceEngine>,
    syntax: SyntaxChecker,
    segmenter: Segmenter,
}

impl Analyzer {
    pub fn new(engine: Arc<dyn InferenceEngine>) -> Self {
        Self {
            engine,
            syntax: SyntaxChecker::new(),
            segmenter: Segmenter::default(),
        }
    }

    /// Analyze one file into a result.
    ///
    /// Never returns an error: inference failures become a per-file `error`
    /// status so one bad file cannot abort a batch.
    pub async fn analyze_file(
        &self,
        file: &FileUnit,
        requested_types: &[String],
        user_prompt: Option<&str>,
    ) -> FileResult {
        if wants_syntax_check(requested_types) {
            if let SyntaxCheck::Finding(finding) = self.syntax.check(&file.path, &file.content) {
                debug!(file = %file.path, "syntax error found, skipping model review");
                let types = requested_types.join(", ");
                let record = IssueRecord {
                    title: finding.title,
                    body: render_issue_body(&file.path, Priority::High, &types, &finding.body),
                    priority: Priority::High,
                    tags: finding.tags,
                };
                return FileResult::success(&file.path, vec![record]);
            }
        }

        match self.review(file, requested_types, user_prompt).await {
            Ok(issues) => FileResult::success(&file.path, issues),
            Err(e) => {
                warn!(file = %file.path, error = %e, "analysis failed");
                FileResult::error(&file.path, e.to_string())
            }
        }
    }

    /// One model review round-trip: prompt, completion, segmentation.
    async fn review(
        &self,
        file: &FileUnit,
        requested_types: &[String],
        user_prompt: Option<&str>,
    ) -> Result<Vec<IssueRecord>, InferenceError> {
        let prompt =
            prompt::build_review_prompt(&file.path, &file.content, requested_types, user_prompt);
        let analysis = self.engine.complete(&prompt).await?;

        match self
            .segmenter
            .segment(&file.path, &analysis, requested_types)
        {
            Segmentation::Records(records) => Ok(records),
            Segmentation::NoIssues => Ok(Vec::new()),
            Segmentation::Unmatched => {
                warn!(
                    file = %file.path,
                    "model response matched no segmentation pattern, dropping"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Analyze a batch sequentially, preserving input order.
    pub async fn analyze_files(
        &self,
        files: &[FileUnit],
        requested_types: &[String],
        user_prompt: Option<&str>,
    ) -> Vec<FileResult> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            results.push(self.analyze_file(file, requested_types, user_prompt).await);
        }
        results
    }
}

fn wants_syntax_check(requested_types: &[String]) -> bool {
    requested_types
        .iter()
        .any(|t| SYNTAX_CHECK_TYPES.contains(&t.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::FileStatus;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test double returning a scripted response and counting calls.
    struct ScriptedEngine {
        response: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl ScriptedEngine {
        fn ok(response: &str) -> Self {
            Self {
                response: Ok(response.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InferenceEngine for ScriptedEngine {
        async fn complete(&self, _prompt: &str) -> Result<String, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(InferenceError::Api {
                    status: 500,
                    body: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    fn file(path: &str, content: &str) -> FileUnit {
        FileUnit {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn bugs() -> Vec<String> {
        vec!["bugs".to_string()]
    }

    #[tokio::test]
    async fn test_syntax_error_short_circuits_inference() {
        let engine = Arc::new(ScriptedEngine::ok("- Line 1: should not be reached"));
        let analyzer = Analyzer::new(engine.clone());

        let broken = file("bad.rs", "fn main() { let = ; }");
        let result = analyzer.analyze_file(&broken, &bugs(), None).await;

        assert_eq!(result.status, FileStatus::Success);
        assert_eq!(result.issues.len(), 1);
        assert!(result.issues[0].tags.contains(&"syntax-error".to_string()));
        assert_eq!(result.issues[0].priority, Priority::High);
        assert_eq!(engine.calls(), 0, "inference must not run on syntax errors");
    }

    #[tokio::test]
    async fn test_non_syntax_types_skip_precheck() {
        // "security" alone does not trigger the syntax pre-check, so even a
        // broken file goes to the model.
        let engine = Arc::new(ScriptedEngine::ok("No issues detected."));
        let analyzer = Analyzer::new(engine.clone());

        let broken = file("bad.rs", "fn main() { let = ; }");
        let result = analyzer
            .analyze_file(&broken, &["security".to_string()], None)
            .await;

        assert_eq!(result.status, FileStatus::Success);
        assert!(result.issues.is_empty());
        assert_eq!(engine.calls(), 1);
    }

    #[tokio::test]
    async fn test_line_findings_become_issues() {
        let engine = Arc::new(ScriptedEngine::ok(
            "- Line 12: missing semicolon\n- Line 45: undefined variable foo",
        ));
        let analyzer = Analyzer::new(engine);

        let clean = file("app.js", "var x = 1;\n");
        let result = analyzer.analyze_file(&clean, &bugs(), None).await;

        assert_eq!(result.status, FileStatus::Success);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[0].title, "Line 12: missing semicolon");
        assert_eq!(result.issues[1].title, "Line 45: undefined variable foo");
    }

    #[tokio::test]
    async fn test_inference_failure_is_contained() {
        let engine = Arc::new(ScriptedEngine::failing());
        let analyzer = Analyzer::new(engine);

        let files = vec![file("a.js", "var a = 1;\n"), file("b.js", "var b = 2;\n")];
        let results = analyzer.analyze_files(&files, &bugs(), None).await;

        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.status, FileStatus::Error);
            assert!(result.issues.is_empty());
            assert!(!result.error.as_deref().unwrap_or("").is_empty());
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let engine = Arc::new(ScriptedEngine::ok("No issues detected."));
        let analyzer = Analyzer::new(engine);

        let files = vec![
            file("z.py", "z = 1\n"),
            file("a.py", "a = 1\n"),
            file("m.py", "m = 1\n"),
        ];
        let results = analyzer.analyze_files(&files, &bugs(), None).await;
        let order: Vec<&str> = results.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(order, vec!["z.py", "a.py", "m.py"]);
    }

    #[tokio::test]
    async fn test_unmatched_response_yields_no_issues() {
        // Substantive text that fits neither segmentation pattern.
        let engine = Arc::new(ScriptedEngine::ok("ok\n### a\nshort\n### b\ntiny"));
        let analyzer = Analyzer::new(engine);

        let result = analyzer
            .analyze_file(&file("a.py", "x = 1\n"), &bugs(), None)
            .await;
        assert_eq!(result.status, FileStatus::Success);
        assert!(result.issues.is_empty());
    }
}
