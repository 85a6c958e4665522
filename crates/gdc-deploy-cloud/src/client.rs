use crate::executor::{GcloudExecutor, RealExecutor};
use crate::gcloud::GcloudError;
use gdc_deploy_core::DeployTarget;

/// Directory uploaded as application source.
pub const SOURCE_DIR: &str = ".";

/// Arguments of the single `gcloud run deploy` call for `target`.
pub fn source_deploy_args(target: &DeployTarget) -> Vec<String> {
    vec![
        "run".to_owned(),
        "deploy".to_owned(),
        target.service_name.clone(),
        format!("--source={SOURCE_DIR}"),
        format!("--region={}", target.region),
        format!("--project={}", target.project_id),
        "--allow-unauthenticated".to_owned(),
    ]
}

/// GCP operations client, parameterized over the executor for testability.
pub struct GcloudClient<E: GcloudExecutor = RealExecutor> {
    pub(crate) executor: E,
}

impl GcloudClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor::from_env(),
        }
    }
}

impl Default for GcloudClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GcloudExecutor> GcloudClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Cloud Run Deploy ──

    /// Build and deploy the current directory as `target`, with public access.
    ///
    /// gcloud's output is streamed unmodified. A non-zero exit surfaces as
    /// [`DeployError::Deploy`] carrying the exit code.
    pub async fn deploy_from_source(&self, target: &DeployTarget) -> Result<(), DeployError> {
        tracing::info!(%target, "deploying from source");

        self.executor
            .exec_streaming(&source_deploy_args(target))
            .await
            .map_err(|e| DeployError::Deploy { source: e })
    }

    /// URL of the deployed service.
    pub async fn describe_service(&self, target: &DeployTarget) -> Result<String, DeployError> {
        let output = self
            .executor
            .exec(&args([
                "run",
                "services",
                "describe",
                &target.service_name,
                "--project",
                &target.project_id,
                "--region",
                &target.region,
                "--format",
                "value(status.url)",
            ]))
            .await
            .map_err(|e| DeployError::Describe { source: e })?;

        Ok(output.trim().to_owned())
    }
}

// ── Helper ──

pub(crate) fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("cloud run deployment failed")]
    Deploy { source: GcloudError },

    #[error("failed to describe cloud run service")]
    Describe { source: GcloudError },
}

impl DeployError {
    pub fn gcloud(&self) -> &GcloudError {
        match self {
            Self::Deploy { source } | Self::Describe { source } => source,
        }
    }
}
