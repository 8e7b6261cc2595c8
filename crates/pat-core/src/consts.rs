/// Corpus subject area
pub const DOMAIN: &str = "gai";

/// Corpus languages, in display order
pub const LANGUAGES: [&str; 2] = ["eng", "esp"];

/// Where the hosted runtime attaches durable storage
pub const HOSTED_MOUNT_POINT: &str = "/content/drive";

/// Directory that must appear under the mount point once storage is attached
pub const HOSTED_DRIVE_DIR: &str = "MyDrive";

/// Project root relative to the mount point
pub const HOSTED_PROJECT_PATH: &str =
    "MyDrive/Classroom/Auto-Traductor - UNAM-SMA/Proyectos/pragmatic-auto-translator";

/// Base directory when storage cannot be mounted
pub const HOSTED_FALLBACK_DIR: &str = "/content";

/// Staging directory for files handed back to the user
pub const HOSTED_DOWNLOAD_DIR: &str = "/content/downloads";

/// Environment variable only the hosted runtime defines
pub const HOSTED_PROBE_VAR: &str = "COLAB_RELEASE_TAG";

pub const CORPORA_DIR_NAME: &str = "corpora";
pub const VECTORS_DIR_NAME: &str = "vectors";
pub const SCRIPTS_DIR_NAME: &str = "scripts";

/// Settings file, looked up inside the scripts directory
pub const SETTINGS_FILE: &str = "pipeline.json";

/// External embedding model identifier
pub const MODEL_NAME: &str = "jinaai/jina-embeddings-v3";

pub const MODEL_TRUST_REMOTE_CODE: bool = true;

/// Task adapter used when embedding corpus passages
pub const MODEL_TASK: &str = "retrieval.passage";

/// Output dimension of the embedding model
pub const MODEL_DIMENSIONS: usize = 1024;

/// Maximum input length in characters
pub const MAX_TEXT_LENGTH: usize = 8000;

pub const DOCUMENT_VECTORS_FILE: &str = "gai-document-vectors.json";
pub const SECTION_VECTORS_FILE: &str = "gai-section-vectors.json";
pub const PARAGRAPH_VECTORS_FILE: &str = "gai-paragraph-vectors.json";

/// Combined vector data consumed by the frontend scripts
pub const VECTOR_DATA_JS_FILE: &str = "gai-vector-data.js";
