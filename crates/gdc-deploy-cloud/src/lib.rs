pub mod client;
pub mod doctor;
pub mod executor;
pub mod gcloud;

pub use client::{DeployError, GcloudClient, SOURCE_DIR, source_deploy_args};
pub use doctor::{Finding, Outcome, Readiness, SOURCE_DEPLOY_APIS};
pub use executor::{GcloudExecutor, RealExecutor};
pub use gcloud::GcloudError;
