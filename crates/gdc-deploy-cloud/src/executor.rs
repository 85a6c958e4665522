use std::process::{ExitStatus, Stdio};

use crate::gcloud::{DEFAULT_PROGRAM, GcloudError, PROGRAM_ENV};

/// Abstraction over gcloud CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait GcloudExecutor: Send + Sync {
    /// Execute a gcloud command and capture stdout.
    async fn exec(&self, args: &[String]) -> Result<String, GcloudError>;

    /// Execute a gcloud command attached to the terminal.
    ///
    /// stdin, stdout and stderr are inherited so gcloud's prompts and
    /// messages reach the user unmodified.
    async fn exec_streaming(&self, args: &[String]) -> Result<(), GcloudError>;
}

/// Real gcloud CLI executor.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    program: String,
}

impl RealExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `GDC_DEPLOY_GCLOUD` when set, `gcloud` otherwise.
    pub fn from_env() -> Self {
        std::env::var(PROGRAM_ENV)
            // arch-lint: allow(no-silent-result-drop) reason="unset means gcloud on PATH"
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[String]) -> tokio::process::Command {
        tracing::debug!(program = %self.program, ?args, "spawning");
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(args);
        cmd
    }

    fn spawn_failed(&self, source: std::io::Error) -> GcloudError {
        let program = self.program.clone();
        match source.kind() {
            std::io::ErrorKind::NotFound => GcloudError::NotFound { program, source },
            _ => GcloudError::Spawn { program, source },
        }
    }
}

impl Default for RealExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl GcloudExecutor for RealExecutor {
    async fn exec(&self, args: &[String]) -> Result<String, GcloudError> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_failed(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| GcloudError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(GcloudError::CommandFailed {
                args: args.to_vec(),
                stderr,
                code: exit_code(output.status),
            })
        }
    }

    async fn exec_streaming(&self, args: &[String]) -> Result<(), GcloudError> {
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_failed(e))?;

        tracing::debug!(%status, "gcloud exited");

        if status.success() {
            Ok(())
        } else {
            // stderr already went to the terminal
            Err(GcloudError::CommandFailed {
                args: args.to_vec(),
                stderr: String::new(),
                code: exit_code(status),
            })
        }
    }
}

/// Exit code as a shell would report it.
pub fn exit_code(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Some(128 + signal);
        }
    }
    status.code()
}
