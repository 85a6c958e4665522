mod deploy;
mod doctor;
mod status;
mod targets;

use clap::Args;
use gdc_deploy_core::{DeployConfig, DeployTarget, Overrides};
use std::path::PathBuf;

pub use deploy::deploy;
pub use doctor::doctor;
pub use status::status;
pub use targets::targets;

/// Target selection shared by every subcommand.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Named target (built-in: munich-demo, frontend)
    #[arg(long, short = 't', global = true, env = "GDC_DEPLOY_TARGET")]
    pub target: Option<String>,

    /// Override the GCP project ID
    #[arg(long, global = true, env = "GDC_DEPLOY_PROJECT")]
    pub project: Option<String>,

    /// Override the Cloud Run region
    #[arg(long, global = true, env = "GDC_DEPLOY_REGION")]
    pub region: Option<String>,

    /// Override the Cloud Run service name
    #[arg(long, global = true, env = "GDC_DEPLOY_SERVICE")]
    pub service: Option<String>,

    /// TOML file with targets; only read when given
    #[arg(long, global = true, env = "GDC_DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    pub(crate) fn load_config(&self) -> anyhow::Result<DeployConfig> {
        Ok(DeployConfig::load_or_builtin(self.config.as_deref())?)
    }

    /// Built-in or configured target with command-line overrides applied.
    pub(crate) fn resolve(&self) -> anyhow::Result<DeployTarget> {
        let config = self.load_config()?;
        let overrides = Overrides {
            project_id: self.project.clone(),
            region: self.region.clone(),
            service_name: self.service.clone(),
        };

        let target = config
            .resolve(self.target.as_deref())?
            .with_overrides(&overrides);
        target.validate()?;

        tracing::debug!(%target, "resolved target");
        Ok(target)
    }
}
