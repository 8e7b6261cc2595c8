//! Layout module: where things live under a project base directory

use std::path::{Path, PathBuf};

use crate::{
    CORPORA_DIR_NAME, DOCUMENT_VECTORS_FILE, PARAGRAPH_VECTORS_FILE, SCRIPTS_DIR_NAME,
    SECTION_VECTORS_FILE, SETTINGS_FILE, VECTOR_DATA_JS_FILE, VECTORS_DIR_NAME,
};

/// Get the corpus directory for a domain.
pub fn corpora_dir(base: &Path, domain: &str) -> PathBuf {
    base.join(CORPORA_DIR_NAME).join(domain)
}

/// Get the vector output directory for a domain.
pub fn vectors_dir(base: &Path, domain: &str) -> PathBuf {
    base.join(VECTORS_DIR_NAME).join(domain)
}

/// Get the scripts directory (where notebooks run from).
pub fn scripts_dir(base: &Path) -> PathBuf {
    base.join(SCRIPTS_DIR_NAME)
}

/// Get the settings file path.
pub fn settings_path(base: &Path) -> PathBuf {
    scripts_dir(base).join(SETTINGS_FILE)
}

/// Get the corpus database for one language.
///
/// Follows `{corpora}/{language}/{domain}-{language}_database.json`.
pub fn corpus_file(corpora_dir: &Path, domain: &str, language: &str) -> PathBuf {
    corpora_dir
        .join(language)
        .join(format!("{domain}-{language}_database.json"))
}

/// Get the generated vector files: document, section, paragraph, then the
/// combined data file.
pub fn vector_files(vectors_dir: &Path) -> [PathBuf; 4] {
    [
        vectors_dir.join(DOCUMENT_VECTORS_FILE),
        vectors_dir.join(SECTION_VECTORS_FILE),
        vectors_dir.join(PARAGRAPH_VECTORS_FILE),
        vectors_dir.join(VECTOR_DATA_JS_FILE),
    ]
}
