/// Program spawned when `GDC_DEPLOY_GCLOUD` is not set.
pub const DEFAULT_PROGRAM: &str = "gcloud";

/// Environment variable naming an alternative gcloud binary.
pub const PROGRAM_ENV: &str = "GDC_DEPLOY_GCLOUD";

#[derive(Debug, thiserror::Error)]
pub enum GcloudError {
    #[error("{program} not found; install: https://cloud.google.com/sdk/docs/install")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    /// The program exists but could not be started, e.g. it is not executable.
    #[error("could not start {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("gcloud command failed: {args:?}\n{stderr}")]
    CommandFailed {
        args: Vec<String>,
        stderr: String,
        /// Process exit code; `128 + signal` for a signal-terminated process on Unix.
        code: Option<i32>,
    },

    #[error("gcloud output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },
}

impl GcloudError {
    /// Exit code of the failed gcloud process, if it ran at all.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}
