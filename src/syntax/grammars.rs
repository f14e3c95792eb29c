//! Extension-to-grammar registry for tree-sitter parsing.
//!
//! Built once at startup and never mutated; the checker holds it by value
//! and shares references across analyses.

use std::collections::HashMap;

use tree_sitter::Language;

/// Immutable map from lowercased file extension to a tree-sitter grammar.
pub struct GrammarRegistry {
    map: HashMap<&'static str, Language>,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarRegistry {
    pub fn new() -> Self {
        let mut map: HashMap<&'static str, Language> = HashMap::new();

        map.insert("py", tree_sitter_python::LANGUAGE.into());

        let javascript: Language = tree_sitter_javascript::LANGUAGE.into();
        map.insert("js", javascript.clone());
        map.insert("jsx", javascript);

        map.insert("ts", tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into());
        map.insert("tsx", tree_sitter_typescript::LANGUAGE_TSX.into());

        map.insert("java", tree_sitter_java::LANGUAGE.into());
        map.insert("go", tree_sitter_go::LANGUAGE.into());
        map.insert("rs", tree_sitter_rust::LANGUAGE.into());

        let c: Language = tree_sitter_c::LANGUAGE.into();
        map.insert("c", c.clone());
        map.insert("h", c);

        let cpp: Language = tree_sitter_cpp::LANGUAGE.into();
        map.insert("cpp", cpp.clone());
        map.insert("cc", cpp.clone());
        map.insert("cxx", cpp.clone());
        map.insert("hpp", cpp);

        Self { map }
    }

    /// Grammar for a lowercased extension, if registered.
    pub fn get(&self, ext: &str) -> Option<&Language> {
        self.map.get(ext)
    }

    /// All registered extensions.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = self.map.keys().copied().collect();
        exts.sort_unstable();
        exts
    }
}
