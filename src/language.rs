//! Language detection from file extensions.
//!
//! A pure, total mapping: any path yields a label, unknown extensions map to
//! `"Unknown"`. The table is an immutable compile-time map; nothing registers
//! into it at runtime.

use std::path::Path;

/// Sentinel label for extensions with no known language.
pub const UNKNOWN: &str = "Unknown";

static LABELS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "js" => "JavaScript",
    "jsx" => "JavaScript (React)",
    "ts" => "TypeScript",
    "tsx" => "TypeScript (React)",
    "py" => "Python",
    "pyw" => "Python",
    "java" => "Java",
    "kt" => "Kotlin",
    "scala" => "Scala",
    "go" => "Go",
    "rs" => "Rust",
    "c" => "C",
    "cpp" => "C++",
    "cc" => "C++",
    "cxx" => "C++",
    "h" => "C/C++ Header",
    "hpp" => "C++",
    "cs" => "C#",
    "vb" => "Visual Basic",
    "fs" => "F#",
    "rb" => "Ruby",
    "php" => "PHP",
    "swift" => "Swift",
    "m" => "Objective-C",
    "dart" => "Dart",
    "lua" => "Lua",
    "perl" => "Perl",
    "pl" => "Perl",
    "sh" => "Shell",
    "bash" => "Bash",
    "zsh" => "Zsh",
    "sol" => "Solidity",
    "vy" => "Vyper",
    "html" => "HTML",
    "htm" => "HTML",
    "xml" => "XML",
    "css" => "CSS",
    "scss" => "SCSS",
    "sass" => "Sass",
    "less" => "Less",
    "json" => "JSON",
    "yaml" => "YAML",
    "yml" => "YAML",
    "toml" => "TOML",
    "ini" => "INI",
    "conf" => "Config",
    "sql" => "SQL",
    "graphql" => "GraphQL",
    "gql" => "GraphQL",
    "md" => "Markdown",
    "rst" => "reStructuredText",
    "tex" => "LaTeX",
    "r" => "R",
    "jl" => "Julia",
    "ex" => "Elixir",
    "exs" => "Elixir",
    "erl" => "Erlang",
    "clj" => "Clojure",
    "hs" => "Haskell",
    "ml" => "OCaml",
    "dockerfile" => "Dockerfile",
    "proto" => "Protocol Buffer",
    "vue" => "Vue",
    "svelte" => "Svelte",
};

/// Return the path's extension, lowercased, without the leading dot.
pub fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Detect the language label for a file path from its extension.
pub fn detect(path: &str) -> &'static str {
    extension(path)
        .and_then(|ext| LABELS.get(ext.as_str()).copied())
        .unwrap_or(UNKNOWN)
}

/// The language family tag: the first word of the label, lowercased.
///
/// `"JavaScript (React)"` becomes `"javascript"`, unknown files `"unknown"`.
pub fn family(path: &str) -> String {
    detect(path)
        .split_whitespace()
        .next()
        .unwrap_or(UNKNOWN)
        .to_lowercase()
}
