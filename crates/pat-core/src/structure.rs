//! Text rendering of the expected project tree

use std::fmt::Write;
use std::path::Path;

use crate::{EnvironmentConfig, ExecutionContext};

fn marker(path: &Path) -> &'static str {
    if path.is_file() { "✅" } else { "❌" }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn level_list(config: &EnvironmentConfig) -> String {
    let levels: Vec<String> = config
        .vector_settings
        .enabled_levels()
        .iter()
        .map(|l| l.to_string())
        .collect();
    if levels.is_empty() {
        "no vector levels".to_string()
    } else {
        levels.join(", ")
    }
}

/// Render the project layout for the current context.
///
/// Hosted trees mark which corpus databases and vector files exist; local
/// trees show the `scripts/` working directory convention.
pub fn render_structure(config: &EnvironmentConfig) -> String {
    let mut out = String::new();
    let domain = &config.domain;
    let levels = level_list(config);
    let _ = writeln!(out, "{}/", config.base_dir.display());

    match config.context {
        ExecutionContext::Hosted => {
            let _ = writeln!(out, "├── corpora/");
            let _ = writeln!(out, "│   └── {domain}/");
            let corpora = config.corpus_files();
            for (i, (language, path)) in corpora.iter().enumerate() {
                let last = i + 1 == corpora.len();
                let (branch, indent) = if last { ("└──", "    ") } else { ("├──", "│   ") };
                let _ = writeln!(out, "│       {branch} {language}/");
                let _ = writeln!(out, "│       {indent}├── submissions/");
                let _ = writeln!(out, "│       {indent}├── processed/");
                let _ = writeln!(
                    out,
                    "│       {indent}└── {} {}",
                    file_name(path),
                    marker(path)
                );
            }
            let _ = writeln!(out, "├── scripts/                    (notebooks go here)");
            let _ = writeln!(out, "└── vectors/                    (generated: {levels})");
            let _ = writeln!(out, "    └── {domain}/");
            let files = config.vector_files();
            for (i, path) in files.iter().enumerate() {
                let branch = if i + 1 == files.len() { "└──" } else { "├──" };
                let _ = writeln!(out, "        {branch} {} {}", file_name(path), marker(path));
            }
        }
        ExecutionContext::Local => {
            let _ = writeln!(out, "├── scripts/                    (you are here)");
            let _ = writeln!(out, "│   └── pipeline.json");
            let _ = writeln!(out, "├── corpora/");
            let _ = writeln!(out, "│   └── {domain}/ (your corpus files)");
            let _ = writeln!(out, "└── vectors/");
            let _ = writeln!(out, "    └── {domain}/ (generated: {levels})");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PipelineSettings;
    use std::fs;

    #[test]
    fn test_hosted_tree_marks_presence() {
        let temp = tempfile::tempdir().unwrap();
        let config = EnvironmentConfig::new(
            ExecutionContext::Hosted,
            temp.path().to_path_buf(),
            PipelineSettings::default(),
        );
        let eng = temp.path().join("corpora/gai/eng");
        fs::create_dir_all(&eng).unwrap();
        fs::write(eng.join("gai-eng_database.json"), "{}").unwrap();

        let tree = render_structure(&config);
        assert!(tree.contains("gai-eng_database.json ✅"));
        assert!(tree.contains("gai-esp_database.json ❌"));
        assert!(tree.contains("└── gai-vector-data.js ❌"));
    }

    #[test]
    fn test_local_tree() {
        let config = EnvironmentConfig::new(
            ExecutionContext::Local,
            "/work/project".into(),
            PipelineSettings::default(),
        );

        let tree = render_structure(&config);
        assert!(tree.starts_with("/work/project/\n"));
        assert!(tree.contains("(generated: document, section, paragraph)"));
        assert!(tree.contains("(you are here)"));
        assert!(!tree.contains("submissions/"));
    }

    #[test]
    fn test_disabled_levels_are_left_out() {
        let mut config = EnvironmentConfig::new(
            ExecutionContext::Hosted,
            "/content".into(),
            PipelineSettings::default(),
        );
        config.vector_settings.create_document_vectors = false;
        config.vector_settings.create_paragraph_vectors = false;

        let tree = render_structure(&config);
        assert!(tree.contains("(generated: section)"));
    }
}
