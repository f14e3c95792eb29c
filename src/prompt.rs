//! Review prompt construction.

use crate::language;

/// File content is truncated to this many characters before embedding.
const MAX_CONTENT_CHARS: usize = 80_000;

/// Build the single-turn review prompt for one file.
///
/// Embeds the detected language, the requested analysis types, a fenced code
/// block hinted with the file extension, a fixed defect checklist, and any
/// user-supplied context verbatim at the end.
pub fn build_review_prompt(
    path: &str,
    content: &str,
    requested_types: &[String],
    user_prompt: Option<&str>,
) -> String {
    let lang = language::detect(path);
    let types = requested_types.join(", ");
    let fence = language::extension(path).unwrap_or_else(|| "text".to_string());
    let snippet = truncate_chars(content, MAX_CONTENT_CHARS);
    let user_context = user_prompt
        .map(|p| format!("\n{}\n", p))
        .unwrap_or_default();

    format!(
        "You are analyzing {lang} code for: {types}\n\
         \n\
         ```{fence}\n\
         {snippet}\n\
         ```\n\
         \n\
         Check every line for these issues:\n\
         - Syntax errors: missing ), }}, ], ;, quotes, typos\n\
         - Division by zero: x / 0\n\
         - SQL injection: \"SELECT\" + user_input\n\
         - Null access: value.property without a null check\n\
         - Security: eval(), os.system(), hardcoded secrets\n\
         - Logic: if (x = 5) instead of ==, count && <Component/> rendering 0\n\
         \n\
         Report all problems found:\n\
         ### Issues\n\
         - Line X: [problem description]\n\
         \n\
         If no problems: \"No issues detected.\"{user_context}"
    )
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
