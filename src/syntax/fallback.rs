//! Native fallback parser for Rust sources.
//!
//! `syn` gives a strict parse with a precise span, so `.rs` files keep
//! accurate syntax diagnostics even when the grammar subsystem is compiled
//! out entirely.

use crate::language;

use super::{finding_title, SyntaxFinding};

/// Strict-parse Rust source; a parse error becomes one finding.
pub(crate) fn check_rust(path: &str, content: &str) -> Option<SyntaxFinding> {
    let err = match syn::parse_file(content) {
        Ok(_) => return None,
        Err(e) => e,
    };

    let start = err.span().start();
    let mut message = format!("Syntax error on line {}: {}\n", start.line, err);

    // Quote the offending line with a caret under the reported column.
    if let Some(line) = content.lines().nth(start.line.saturating_sub(1)) {
        let trimmed = line.trim_start();
        message.push_str(&format!("Code: {}\n", trimmed.trim_end()));
        let leading = line.len() - trimmed.len();
        let column = start.column.saturating_sub(leading);
        message.push_str(&format!("      {}^\n", " ".repeat(column)));
    }

    let body = format!(
        "**Syntax error detected ({}):**\n\n{}\nThis code will fail to compile or run.",
        language::detect(path),
        message
    );

    Some(SyntaxFinding {
        title: finding_title(path),
        body,
        tags: vec![
            "syntax-error".to_string(),
            "rust".to_string(),
            "compilation-error".to_string(),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_line_and_caret() {
        let source = "fn main() {\n    let x = ;\n}\n";
        let f = check_rust("bad.rs", source).expect("syn should reject this");

        assert!(f.body.contains("Syntax error on line"));
        assert!(f.body.contains("Code: let x = ;"));
        assert!(f.body.contains('^'));
        assert_eq!(
            f.tags,
            vec!["syntax-error", "rust", "compilation-error"]
        );
    }

    #[test]
    fn test_valid_source_yields_nothing() {
        let source = "pub fn id<T>(t: T) -> T { t }\n";
        assert!(check_rust("ok.rs", source).is_none());
    }

    #[test]
    fn test_unbalanced_brace() {
        let source = "fn main() { if true { println!(\"hi\"); }\n";
        assert!(check_rust("brace.rs", source).is_some());
    }
}
