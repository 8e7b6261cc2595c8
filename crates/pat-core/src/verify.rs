//! Corpus verification

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::EnvironmentConfig;

/// Presence of one language's corpus database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusEntry {
    pub language: String,
    pub path: PathBuf,
    pub present: bool,
}

/// Result of checking every configured language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusReport {
    /// One entry per language, in configured order
    pub entries: Vec<CorpusEntry>,
}

impl CorpusReport {
    /// True when every expected database exists.
    pub fn is_ready(&self) -> bool {
        self.entries.iter().all(|e| e.present)
    }

    /// Entries whose database is missing.
    pub fn missing(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter().filter(|e| !e.present)
    }
}

/// Check that the corpus database for each language exists.
///
/// Missing files are reported, not treated as errors; downstream tooling can
/// still run against a partial corpus.
pub fn verify_corpus_files(config: &EnvironmentConfig) -> CorpusReport {
    let entries = config
        .corpus_files()
        .into_iter()
        .map(|(language, path)| {
            let present = path.is_file();
            if present {
                info!(%language, path = %path.display(), "corpus database found");
            } else {
                warn!(%language, path = %path.display(), "corpus database missing");
            }
            CorpusEntry {
                language,
                path,
                present,
            }
        })
        .collect();

    CorpusReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExecutionContext, PipelineSettings};
    use std::fs;
    use std::path::Path;

    fn config_at(base: &Path) -> EnvironmentConfig {
        EnvironmentConfig::new(
            ExecutionContext::Local,
            base.to_path_buf(),
            PipelineSettings::default(),
        )
    }

    fn write_corpus(base: &Path, language: &str) {
        let dir = base.join("corpora").join("gai").join(language);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("gai-{language}_database.json")), "{}").unwrap();
    }

    #[test]
    fn test_all_present() {
        let temp = tempfile::tempdir().unwrap();
        write_corpus(temp.path(), "eng");
        write_corpus(temp.path(), "esp");

        let report = verify_corpus_files(&config_at(temp.path()));
        assert!(report.is_ready());
        assert_eq!(report.missing().count(), 0);
        assert_eq!(
            report.entries.iter().map(|e| e.language.as_str()).collect::<Vec<_>>(),
            ["eng", "esp"]
        );
    }

    #[test]
    fn test_missing_language_is_attributed() {
        let temp = tempfile::tempdir().unwrap();
        write_corpus(temp.path(), "eng");

        let report = verify_corpus_files(&config_at(temp.path()));
        assert!(!report.is_ready());

        let missing: Vec<_> = report.missing().collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].language, "esp");
        assert_eq!(
            missing[0].path,
            temp.path()
                .join("corpora/gai/esp/gai-esp_database.json")
        );
    }

    #[test]
    fn test_nothing_present() {
        let temp = tempfile::tempdir().unwrap();
        let report = verify_corpus_files(&config_at(temp.path()));
        assert!(!report.is_ready());
        assert_eq!(report.missing().count(), 2);
    }

    #[test]
    fn test_verification_is_repeatable() {
        let temp = tempfile::tempdir().unwrap();
        write_corpus(temp.path(), "esp");
        let config = config_at(temp.path());

        assert_eq!(verify_corpus_files(&config), verify_corpus_files(&config));
    }
}
