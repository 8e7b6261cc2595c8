//! Environment Resolver: turn the ambient context into an EnvironmentConfig

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::runtime::{Environment, ExecutionContext};
use crate::settings::{ModelSettings, PipelineSettings, ProcessingSettings, VectorSettings};
use crate::{DOMAIN, HOSTED_PROJECT_PATH, LANGUAGES, Result, VECTORS_DIR_NAME, layout};

/// How the project base directory was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseDir {
    /// Project tree on mounted durable storage.
    Mounted(PathBuf),
    /// Storage could not be mounted; running from the runtime's scratch dir.
    Fallback { path: PathBuf, reason: String },
    /// Parent of the local working directory.
    Local(PathBuf),
}

impl BaseDir {
    pub fn path(&self) -> &Path {
        match self {
            Self::Mounted(path) | Self::Local(path) | Self::Fallback { path, .. } => path,
        }
    }
}

/// Resolve the project base directory for the given context.
///
/// A failed mount degrades to the fallback directory and is never returned
/// as an error.
pub fn resolve_base_dir(env: &dyn Environment) -> Result<BaseDir> {
    match env.context() {
        ExecutionContext::Hosted => match env.mount_storage() {
            Ok(mount) => {
                let base = mount.join(HOSTED_PROJECT_PATH);
                info!(base = %base.display(), "durable storage mounted");
                Ok(BaseDir::Mounted(base))
            }
            Err(e) => {
                let path = env.fallback_dir();
                warn!(error = %e, fallback = %path.display(), "storage mount failed, using fallback");
                Ok(BaseDir::Fallback {
                    path,
                    reason: e.to_string(),
                })
            }
        },
        ExecutionContext::Local => {
            let cwd = env.working_dir()?;
            Ok(BaseDir::Local(parent_of(cwd)))
        }
    }
}

/// Parent directory, tolerating relative paths and the filesystem root.
fn parent_of(dir: PathBuf) -> PathBuf {
    match dir.parent() {
        Some(parent) if parent.as_os_str().is_empty() => dir.join(".."),
        Some(parent) => parent.to_path_buf(),
        None => dir,
    }
}

/// Process-lifetime configuration of the embedding pipeline.
///
/// Built once by [`EnvironmentConfig::resolve`] and passed by reference to
/// everything that needs a path or a model setting.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentConfig {
    pub context: ExecutionContext,
    pub base_dir: PathBuf,
    pub corpora_dir: PathBuf,
    pub vectors_dir: PathBuf,
    pub domain: String,
    pub languages: Vec<String>,
    pub model_settings: ModelSettings,
    pub vector_settings: VectorSettings,
    pub processing: ProcessingSettings,
    /// Set when hosted storage failed to mount and the fallback is in use
    pub mount_error: Option<String>,
}

impl EnvironmentConfig {
    /// Derive the configuration for a known base directory.
    ///
    /// Touches nothing on disk.
    pub fn new(context: ExecutionContext, base_dir: PathBuf, settings: PipelineSettings) -> Self {
        Self {
            context,
            corpora_dir: layout::corpora_dir(&base_dir, DOMAIN),
            vectors_dir: layout::vectors_dir(&base_dir, DOMAIN),
            base_dir,
            domain: DOMAIN.to_string(),
            languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
            model_settings: ModelSettings::default(),
            vector_settings: settings.vectors,
            processing: settings.processing,
            mount_error: None,
        }
    }

    /// Resolve the configuration from the ambient environment.
    pub fn resolve(env: &dyn Environment) -> Result<Self> {
        let context = env.context();
        info!(%context, "environment detected");

        let base = resolve_base_dir(env)?;

        if let BaseDir::Mounted(path) = &base {
            std::fs::create_dir_all(layout::scripts_dir(path))?;
            std::fs::create_dir_all(path.join(VECTORS_DIR_NAME))?;
            std::fs::create_dir_all(layout::vectors_dir(path, DOMAIN))?;
        }

        let mount_error = match &base {
            BaseDir::Fallback { reason, .. } => Some(reason.clone()),
            _ => None,
        };

        let mut config = Self::new(
            context,
            base.path().to_path_buf(),
            PipelineSettings::default(),
        );
        config.mount_error = mount_error;
        config.ensure_vectors_dir()?;

        let settings = PipelineSettings::load(&config.base_dir)?;
        config.vector_settings = settings.vectors;
        config.processing = settings.processing;

        Ok(config)
    }

    /// Create the vector output directory if it is missing.
    pub fn ensure_vectors_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.vectors_dir)?;
        Ok(())
    }

    /// Settings currently in effect, in file form.
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings {
            vectors: self.vector_settings.clone(),
            processing: self.processing.clone(),
        }
    }

    /// Expected corpus database for each language, in display order.
    pub fn corpus_files(&self) -> Vec<(String, PathBuf)> {
        self.languages
            .iter()
            .map(|lang| {
                (
                    lang.clone(),
                    layout::corpus_file(&self.corpora_dir, &self.domain, lang),
                )
            })
            .collect()
    }

    /// Generated vector files, in pipeline order.
    pub fn vector_files(&self) -> [PathBuf; 4] {
        layout::vector_files(&self.vectors_dir)
    }
}
