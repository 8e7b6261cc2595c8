//! Pipeline settings, optionally overridden by scripts/pipeline.json

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    MAX_TEXT_LENGTH, MODEL_DIMENSIONS, MODEL_NAME, MODEL_TASK, MODEL_TRUST_REMOTE_CODE, Result,
    layout,
};

/// Descriptor of the external embedding model.
///
/// Fixed by the pipeline; not read from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSettings {
    /// Model identifier on the model hub
    pub name: String,

    /// Whether the model needs its own loading code
    pub trust_remote_code: bool,

    /// Task adapter label
    pub task: String,

    /// Output embedding dimension
    pub dimensions: usize,

    /// Maximum input length in characters
    pub max_text_length: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: MODEL_NAME.to_string(),
            trust_remote_code: MODEL_TRUST_REMOTE_CODE,
            task: MODEL_TASK.to_string(),
            dimensions: MODEL_DIMENSIONS,
            max_text_length: MAX_TEXT_LENGTH,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Granularity of a generated vector set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorLevel {
    Document,
    Section,
    Paragraph,
}

impl fmt::Display for VectorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Section => f.write_str("section"),
            Self::Paragraph => f.write_str("paragraph"),
        }
    }
}

/// Which vector levels the pipeline produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorSettings {
    #[serde(default = "default_true")]
    pub create_document_vectors: bool,

    #[serde(default = "default_true")]
    pub create_section_vectors: bool,

    #[serde(default = "default_true")]
    pub create_paragraph_vectors: bool,
}

impl Default for VectorSettings {
    fn default() -> Self {
        Self {
            create_document_vectors: true,
            create_section_vectors: true,
            create_paragraph_vectors: true,
        }
    }
}

impl VectorSettings {
    /// Enabled levels, coarsest first.
    pub fn enabled_levels(&self) -> Vec<VectorLevel> {
        [
            (self.create_document_vectors, VectorLevel::Document),
            (self.create_section_vectors, VectorLevel::Section),
            (self.create_paragraph_vectors, VectorLevel::Paragraph),
        ]
        .into_iter()
        .filter_map(|(enabled, level)| enabled.then_some(level))
        .collect()
    }
}

/// How the pipeline reports and bounds its work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSettings {
    #[serde(default = "default_true")]
    pub show_progress: bool,

    #[serde(default = "default_true")]
    pub verbose: bool,

    /// Stop after this many documents (None = all)
    #[serde(default)]
    pub max_documents: Option<usize>,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            show_progress: true,
            verbose: true,
            max_documents: None,
        }
    }
}

/// Settings stored in scripts/pipeline.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub vectors: VectorSettings,

    #[serde(default)]
    pub processing: ProcessingSettings,
}

impl PipelineSettings {
    /// Load settings for a project, falling back to defaults.
    ///
    /// A file that cannot be parsed is logged and ignored; only read errors
    /// are returned.
    pub fn load(base: &Path) -> Result<Self> {
        let path = layout::settings_path(base);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        match serde_json::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save settings into the project's scripts directory.
    pub fn save(&self, base: &Path) -> Result<()> {
        let path = layout::settings_path(base);
        std::fs::create_dir_all(layout::scripts_dir(base))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
