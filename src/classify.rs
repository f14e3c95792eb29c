//! Keyword-based priority classification and tag extraction.
//!
//! Both functions are deterministic and total: any input text produces
//! exactly one priority (default medium) and 1 to 5 unique tags. The keyword
//! tables are ordered; the first match wins, with no weighting. Tables are
//! English-only; behavior on other languages is undefined.

use crate::issue::Priority;
use crate::language;

/// Keywords that mark a finding as critical, checked first.
static CRITICAL_KEYWORDS: &[&str] = &[
    "critical",
    "security vulnerability",
    "sql injection",
    "xss",
    "csrf",
    "authentication bypass",
    "data breach",
    "exposed secret",
    "hardcoded password",
];

static HIGH_KEYWORDS: &[&str] = &[
    "syntax error",
    "compilation error",
    "runtime error",
    "undefined variable",
    "null pointer",
    "exception",
    "crash",
    "bug",
    "error",
    "typeerror",
    "nameerror",
    "attributeerror",
];

static MEDIUM_KEYWORDS: &[&str] = &[
    "warning",
    "deprecated",
    "performance issue",
    "memory leak",
    "infinite loop",
];

static LOW_KEYWORDS: &[&str] = &[
    "suggestion",
    "improvement",
    "best practice",
    "style",
    "formatting",
];

/// Tag table scanned in order; earlier entries win ties.
static TAG_TABLE: &[(&str, &[&str])] = &[
    (
        "syntax",
        &[
            "syntax error",
            "syntaxerror",
            "missing bracket",
            "missing parenthesis",
            "missing semicolon",
            "unclosed",
            "unterminated",
        ],
    ),
    (
        "type-error",
        &[
            "type error",
            "typeerror",
            "type mismatch",
            "wrong type",
            "undefined type",
        ],
    ),
    (
        "runtime-error",
        &[
            "runtime error",
            "runtimeerror",
            "null pointer",
            "nullpointerexception",
            "division by zero",
            "array out of bounds",
        ],
    ),
    (
        "reference-error",
        &[
            "reference error",
            "referenceerror",
            "undefined variable",
            "undefined function",
            "not defined",
        ],
    ),
    (
        "import-error",
        &[
            "import error",
            "importerror",
            "module not found",
            "cannot find module",
            "missing import",
        ],
    ),
    (
        "compilation-error",
        &[
            "compilation error",
            "compile error",
            "build error",
            "build failed",
        ],
    ),
    (
        "sql-injection",
        &["sql injection", "sql concatenation", "query concatenation"],
    ),
    (
        "xss",
        &[
            "xss",
            "cross-site scripting",
            "innerhtml",
            "dangerouslysetinnerhtml",
        ],
    ),
    (
        "command-injection",
        &[
            "command injection",
            "os.system",
            "subprocess",
            "eval",
            "exec",
        ],
    ),
    (
        "security",
        &[
            "security vulnerability",
            "security issue",
            "exposed secret",
            "hardcoded password",
            "api key",
        ],
    ),
    (
        "memory-leak",
        &["memory leak", "unclosed resource", "resource leak"],
    ),
    (
        "performance",
        &[
            "performance issue",
            "infinite loop",
            "blocking operation",
            "unnecessary re-render",
        ],
    ),
    (
        "logic-error",
        &[
            "logic error",
            "incorrect condition",
            "wrong operator",
            "unreachable code",
        ],
    ),
];

/// Maximum tags pulled from the keyword table before the language tag.
const MAX_TABLE_TAGS: usize = 3;
/// Hard cap on the tag list.
const MAX_TAGS: usize = 5;

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classify the priority of an analysis text by severity keywords.
///
/// Checks the four keyword sets in order (critical, high, medium, low); the
/// first set with any match wins. No match defaults to medium.
pub fn classify_priority(text: &str) -> Priority {
    let lowered = text.to_lowercase();

    if contains_any(&lowered, CRITICAL_KEYWORDS) {
        Priority::Critical
    } else if contains_any(&lowered, HIGH_KEYWORDS) {
        Priority::High
    } else if contains_any(&lowered, MEDIUM_KEYWORDS) {
        Priority::Medium
    } else if contains_any(&lowered, LOW_KEYWORDS) {
        Priority::Low
    } else {
        Priority::Medium
    }
}

/// Extract 1 to 5 unique tags for an issue.
///
/// Scans the tag table in order over the lower-cased title+body, appending a
/// tag the first time any of its keywords appears and stopping after three
/// table tags. The file's language family is appended last if not already
/// present.
pub fn extract_tags(title: &str, body: &str, path: &str) -> Vec<String> {
    let text = format!("{} {}", title, body).to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for (tag, keywords) in TAG_TABLE {
        if contains_any(&text, keywords) {
            tags.push((*tag).to_string());
            if tags.len() >= MAX_TABLE_TAGS {
                break;
            }
        }
    }

    let lang_tag = language::family(path);
    if !tags.contains(&lang_tag) {
        tags.push(lang_tag);
    }

    tags.truncate(MAX_TAGS);
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_critical_wins_over_high() {
        // "error" (high) and "sql injection" (critical) both present
        let p = classify_priority("Error: possible SQL injection in query builder");
        assert_eq!(p, Priority::Critical);
    }

    #[test]
    fn test_priority_high() {
        assert_eq!(
            classify_priority("undefined variable `foo` on line 4"),
            Priority::High
        );
    }

    #[test]
    fn test_priority_medium_keyword() {
        assert_eq!(
            classify_priority("deprecated API usage detected"),
            Priority::Medium
        );
    }

    #[test]
    fn test_priority_low() {
        assert_eq!(
            classify_priority("style: prefer snake_case names"),
            Priority::Low
        );
    }

    #[test]
    fn test_priority_default_medium() {
        assert_eq!(classify_priority("nothing remarkable here"), Priority::Medium);
        assert_eq!(classify_priority(""), Priority::Medium);
    }

    #[test]
    fn test_priority_case_insensitive() {
        assert_eq!(
            classify_priority("HARDCODED PASSWORD found"),
            Priority::Critical
        );
    }

    #[test]
    fn test_priority_idempotent_under_rewording() {
        // Any phrasing that keeps the first matching category keyword lands
        // on the same level.
        let a = classify_priority("there is a crash when input is empty");
        let b = classify_priority("crash observed for empty input");
        assert_eq!(a, b);
        assert_eq!(a, Priority::High);
    }

    #[test]
    fn test_tags_bounded_and_unique() {
        // Text hitting many table entries still yields at most 5 unique tags.
        let text = "syntax error, type error, null pointer, undefined variable, \
                    import error, compilation error, sql injection, xss";
        let tags = extract_tags("everything is broken", text, "mess.py");
        assert!(tags.len() <= 5);
        let mut deduped = tags.clone();
        deduped.dedup();
        assert_eq!(tags, deduped);
    }

    #[test]
    fn test_tags_table_order_tie_break() {
        let tags = extract_tags("", "type error and syntax error on one line", "a.js");
        // "syntax" is earlier in the table than "type-error"
        assert_eq!(tags[0], "syntax");
        assert_eq!(tags[1], "type-error");
    }

    #[test]
    fn test_tags_language_appended() {
        let tags = extract_tags("Line 3: off-by-one in loop bound", "", "src/count.go");
        assert!(tags.contains(&"go".to_string()));
        assert!(!tags.is_empty());
    }

    #[test]
    fn test_tags_language_not_duplicated() {
        // Unknown files tag as "unknown"; asking twice must not duplicate.
        let tags = extract_tags("", "", "whatever.xyz");
        assert_eq!(tags, vec!["unknown".to_string()]);
    }

    #[test]
    fn test_tags_stop_at_three_table_entries() {
        let text = "syntax error; typeerror; null pointer; undefined variable; importerror";
        let tags = extract_tags("", text, "a.py");
        // Three table tags plus the language tag.
        assert_eq!(tags, vec!["syntax", "type-error", "runtime-error", "python"]);
    }
}
