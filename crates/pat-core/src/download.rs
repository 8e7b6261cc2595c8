//! Hand generated vector files back to the user from a hosted runtime

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::{Environment, EnvironmentConfig, ExecutionContext, PatError, Result};

/// Progress events emitted while downloading.
#[derive(Debug, Clone)]
pub enum DownloadEvent<'a> {
    /// Checking one vector file.
    Checking {
        current: usize,
        total: usize,
        path: &'a Path,
    },
}

/// Type alias for progress callback.
pub type ProgressCallback = Box<dyn Fn(DownloadEvent) + Send>;

/// Outcome of a download run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadReport {
    /// Local context: files are already where the user needs them.
    NotNeeded,
    /// Hosted context: what was delivered and what was never generated.
    Completed {
        downloaded: Vec<PathBuf>,
        missing: Vec<PathBuf>,
    },
}

/// Delivers the generated vector files through the environment.
pub struct Downloader<'a> {
    config: &'a EnvironmentConfig,
    env: &'a dyn Environment,
    progress_callback: Option<ProgressCallback>,
}

impl<'a> Downloader<'a> {
    pub fn new(config: &'a EnvironmentConfig, env: &'a dyn Environment) -> Self {
        Self {
            config,
            env,
            progress_callback: None,
        }
    }

    /// Set a callback for progress updates.
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    fn report_progress(&self, event: DownloadEvent) {
        if let Some(ref cb) = self.progress_callback {
            cb(event);
        }
    }

    /// Deliver every vector file that exists; record the rest as missing.
    pub fn run(&self) -> Result<DownloadReport> {
        if self.config.context != self.env.context() {
            return Err(PatError::ContextMismatch {
                config: self.config.context,
                env: self.env.context(),
            });
        }

        if self.config.context == ExecutionContext::Local {
            info!("files saved locally, no download needed");
            return Ok(DownloadReport::NotNeeded);
        }

        let files = self.config.vector_files();
        let total = files.len();
        let mut downloaded = Vec::new();
        let mut missing = Vec::new();

        for (i, path) in files.iter().enumerate() {
            self.report_progress(DownloadEvent::Checking {
                current: i + 1,
                total,
                path,
            });

            if path.is_file() {
                let staged = self.env.deliver(path)?;
                info!(file = %path.display(), to = %staged.display(), "vector file downloaded");
                downloaded.push(path.clone());
            } else {
                warn!(file = %path.display(), "vector file not found");
                missing.push(path.clone());
            }
        }

        Ok(DownloadReport::Completed {
            downloaded,
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HostedRuntime, LocalRuntime, PipelineSettings};
    use std::fs;
    use std::sync::{Arc, Mutex};

    fn config_at(context: ExecutionContext, base: &Path) -> EnvironmentConfig {
        let config =
            EnvironmentConfig::new(context, base.to_path_buf(), PipelineSettings::default());
        config.ensure_vectors_dir().unwrap();
        config
    }

    /// Every path under `root`, sorted.
    fn snapshot(root: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    pending.push(path.clone());
                }
                paths.push(path);
            }
        }
        paths.sort();
        paths
    }

    #[test]
    fn test_local_does_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(ExecutionContext::Local, temp.path());
        fs::write(config.vectors_dir.join("gai-document-vectors.json"), "[]").unwrap();

        let before = snapshot(temp.path());

        let env = LocalRuntime::at(temp.path().join("scripts"));
        let report = Downloader::new(&config, &env).run().unwrap();

        assert_eq!(report, DownloadReport::NotNeeded);
        assert_eq!(snapshot(temp.path()), before);
    }

    #[test]
    fn test_context_mismatch_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(ExecutionContext::Hosted, temp.path());
        fs::write(config.vectors_dir.join("gai-document-vectors.json"), "[]").unwrap();

        let env = LocalRuntime::at(temp.path().join("scripts"));
        let result = Downloader::new(&config, &env).run();

        assert!(matches!(
            result,
            Err(PatError::ContextMismatch {
                config: ExecutionContext::Hosted,
                env: ExecutionContext::Local,
            })
        ));
    }

    #[test]
    fn test_hosted_delivers_present_files() {
        let temp = tempfile::tempdir().unwrap();
        let config = config_at(ExecutionContext::Hosted, temp.path());
        let [document, section, paragraph, data] = config.vector_files();
        fs::write(&document, "[]").unwrap();
        fs::write(&data, "const vectors = [];").unwrap();

        let env = HostedRuntime {
            download_dir: temp.path().join("downloads"),
            ..HostedRuntime::default()
        };

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut downloader = Downloader::new(&config, &env);
        downloader.set_progress_callback(Box::new({
            let seen = Arc::clone(&seen);
            move |event: DownloadEvent<'_>| {
                let DownloadEvent::Checking { current, total, .. } = event;
                seen.lock().unwrap().push((current, total));
            }
        }));

        let report = downloader.run().unwrap();
        assert_eq!(
            report,
            DownloadReport::Completed {
                downloaded: vec![document, data],
                missing: vec![section, paragraph],
            }
        );
        assert!(temp.path().join("downloads/gai-document-vectors.json").is_file());
        assert!(temp.path().join("downloads/gai-vector-data.js").is_file());
        assert_eq!(*seen.lock().unwrap(), vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }
}
