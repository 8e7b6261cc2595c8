//! Execution context detection and the capabilities each context provides

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    HOSTED_DOWNLOAD_DIR, HOSTED_DRIVE_DIR, HOSTED_FALLBACK_DIR, HOSTED_MOUNT_POINT,
    HOSTED_PROBE_VAR, PatError, Result,
};

/// Where the process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionContext {
    /// Managed notebook runtime with ephemeral disk and mountable storage.
    Hosted,
    /// Persistent local checkout of the project.
    Local,
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted => f.write_str("hosted"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Capabilities of the ambient execution context.
///
/// The resolver and download helper only talk to this trait, so either
/// variant can be swapped for a fake in tests.
pub trait Environment {
    /// Which context this provider represents.
    fn context(&self) -> ExecutionContext;

    /// Directory the process was started from.
    fn working_dir(&self) -> Result<PathBuf>;

    /// Attach durable storage and return its mount point.
    fn mount_storage(&self) -> Result<PathBuf>;

    /// Base directory to use when storage cannot be mounted.
    fn fallback_dir(&self) -> PathBuf;

    /// Hand a generated file back to the user. Returns where it ended up.
    fn deliver(&self, file: &Path) -> Result<PathBuf>;
}

/// Hosted notebook runtime.
#[derive(Debug, Clone)]
pub struct HostedRuntime {
    pub mount_point: PathBuf,
    pub fallback_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl Default for HostedRuntime {
    fn default() -> Self {
        Self {
            mount_point: PathBuf::from(HOSTED_MOUNT_POINT),
            fallback_dir: PathBuf::from(HOSTED_FALLBACK_DIR),
            download_dir: PathBuf::from(HOSTED_DOWNLOAD_DIR),
        }
    }
}

impl Environment for HostedRuntime {
    fn context(&self) -> ExecutionContext {
        ExecutionContext::Hosted
    }

    fn working_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn mount_storage(&self) -> Result<PathBuf> {
        // The notebook kernel attaches the drive; all we can do is see it.
        let drive = self.mount_point.join(HOSTED_DRIVE_DIR);
        if drive.is_dir() {
            Ok(self.mount_point.clone())
        } else {
            Err(PatError::Mount(format!(
                "{} is not available",
                drive.display()
            )))
        }
    }

    fn fallback_dir(&self) -> PathBuf {
        self.fallback_dir.clone()
    }

    fn deliver(&self, file: &Path) -> Result<PathBuf> {
        let name = file.file_name().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", file.display()),
            )
        })?;

        std::fs::create_dir_all(&self.download_dir)?;
        let target = self.download_dir.join(name);
        std::fs::copy(file, &target)?;

        Ok(target)
    }
}

/// Local checkout of the project.
#[derive(Debug, Clone, Default)]
pub struct LocalRuntime {
    cwd: Option<PathBuf>,
}

impl LocalRuntime {
    /// Pin the working directory instead of reading the process cwd.
    pub fn at(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

impl Environment for LocalRuntime {
    fn context(&self) -> ExecutionContext {
        ExecutionContext::Local
    }

    fn working_dir(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    fn mount_storage(&self) -> Result<PathBuf> {
        Err(PatError::Unsupported(
            ExecutionContext::Local,
            "mounting durable storage",
        ))
    }

    // Never consulted: the resolver only falls back after a hosted mount.
    fn fallback_dir(&self) -> PathBuf {
        PathBuf::from(".")
    }

    fn deliver(&self, _file: &Path) -> Result<PathBuf> {
        Err(PatError::Unsupported(
            ExecutionContext::Local,
            "delivering files",
        ))
    }
}

/// Decide the context from an environment lookup.
///
/// Anything short of a non-empty probe variable counts as local.
pub fn detect_context<F>(lookup: F) -> ExecutionContext
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(HOSTED_PROBE_VAR) {
        Some(tag) if !tag.trim().is_empty() => {
            debug!(%tag, "hosted runtime detected");
            ExecutionContext::Hosted
        }
        _ => ExecutionContext::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detect_context() {
        assert_eq!(detect_context(|_| None), ExecutionContext::Local);
        assert_eq!(
            detect_context(|_| Some("   ".to_string())),
            ExecutionContext::Local
        );
        assert_eq!(
            detect_context(|key| (key == HOSTED_PROBE_VAR).then(|| "release-2026".to_string())),
            ExecutionContext::Hosted
        );
    }

    #[test]
    fn test_hosted_mount() {
        let temp = tempfile::tempdir().unwrap();
        let hosted = HostedRuntime {
            mount_point: temp.path().join("drive"),
            ..HostedRuntime::default()
        };

        assert!(matches!(hosted.mount_storage(), Err(PatError::Mount(_))));

        fs::create_dir_all(temp.path().join("drive").join(HOSTED_DRIVE_DIR)).unwrap();
        assert_eq!(hosted.mount_storage().unwrap(), temp.path().join("drive"));
    }

    #[test]
    fn test_hosted_deliver() {
        let temp = tempfile::tempdir().unwrap();
        let source = temp.path().join("gai-vector-data.js");
        fs::write(&source, "const data = {};").unwrap();

        let hosted = HostedRuntime {
            download_dir: temp.path().join("downloads"),
            ..HostedRuntime::default()
        };

        let staged = hosted.deliver(&source).unwrap();
        assert_eq!(staged, temp.path().join("downloads").join("gai-vector-data.js"));
        assert_eq!(fs::read_to_string(staged).unwrap(), "const data = {};");
    }

    #[test]
    fn test_local_capabilities() {
        let local = LocalRuntime::at("/work/project/scripts");
        assert_eq!(
            local.working_dir().unwrap(),
            PathBuf::from("/work/project/scripts")
        );
        assert!(matches!(
            local.mount_storage(),
            Err(PatError::Unsupported(ExecutionContext::Local, _))
        ));
        assert!(local.deliver(Path::new("x.json")).is_err());
    }
}
