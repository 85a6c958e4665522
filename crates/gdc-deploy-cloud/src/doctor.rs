//! Readiness of a project for `gcloud run deploy --source`.
//!
//! A source deploy uploads the directory, builds it with Cloud Build, pushes
//! the image to Artifact Registry and rolls it out on Cloud Run. Each
//! [`Finding`] covers one thing that pipeline needs. Findings that depend on
//! an earlier failure are reported as [`Outcome::Skipped`] instead of
//! producing a cascade of misleading errors.

use std::collections::BTreeSet;

use gdc_deploy_core::DeployTarget;

use crate::client::{GcloudClient, args};
use crate::executor::GcloudExecutor;
use crate::gcloud::GcloudError;

/// Services a source deploy calls into, in pipeline order.
pub const SOURCE_DEPLOY_APIS: [&str; 3] = [
    "cloudbuild.googleapis.com",
    "artifactregistry.googleapis.com",
    "run.googleapis.com",
];

const RUN_API: &str = "run.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ready(String),
    Blocked(String),
    Skipped(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub subject: String,
    pub outcome: Outcome,
}

impl Finding {
    fn ready(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome: Outcome::Ready(detail.into()),
        }
    }

    fn blocked(subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            outcome: Outcome::Blocked(detail.into()),
        }
    }

    fn skipped(subject: impl Into<String>, because: &str) -> Self {
        Self {
            subject: subject.into(),
            outcome: Outcome::Skipped(format!("needs {because}")),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.outcome, Outcome::Ready(_))
    }
}

/// Everything checked for one target, in the order it was checked.
#[derive(Debug, Clone)]
pub struct Readiness {
    pub target: DeployTarget,
    pub findings: Vec<Finding>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.findings.iter().all(Finding::is_ready)
    }

    pub fn blocked(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| matches!(f.outcome, Outcome::Blocked(_)))
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .findings
            .iter()
            .map(|finding| finding.subject.len())
            .fold(0, usize::max);

        for finding in &self.findings {
            let (mark, detail) = match &finding.outcome {
                Outcome::Ready(d) => ("ok", d),
                Outcome::Blocked(d) => ("FAIL", d),
                Outcome::Skipped(d) => ("skip", d),
            };
            writeln!(f, "[{mark:^4}] {:<width$}  {detail}", finding.subject)?;
        }
        Ok(())
    }
}

impl<E: GcloudExecutor> GcloudClient<E> {
    /// Check whether `target` could be deployed from source right now.
    ///
    /// Issues read-only gcloud queries; never modifies the project.
    pub async fn readiness(&self, target: &DeployTarget) -> Readiness {
        let project = target.project_id.as_str();
        let project_subject = format!("project {project}");
        let region_subject = format!("region {}", target.region);

        let mut findings = vec![self.sdk_finding().await, self.account_finding().await];

        let project_check = self
            .executor
            .exec(&args([
                "projects",
                "describe",
                project,
                "--format=value(projectNumber)",
            ]))
            .await;

        if let Err(e) = project_check {
            findings.push(Finding::blocked(project_subject, summary(&e)));
            for api in SOURCE_DEPLOY_APIS {
                findings.push(Finding::skipped(api, "project access"));
            }
            findings.push(Finding::skipped(region_subject, "project access"));
            return Readiness {
                target: target.clone(),
                findings,
            };
        }
        findings.push(Finding::ready(project_subject, "accessible"));

        let project_flag = format!("--project={project}");
        let enabled = self
            .executor
            .exec(&args([
                "services",
                "list",
                "--enabled",
                &project_flag,
                "--format=value(config.name)",
            ]))
            .await;

        let run_enabled = match &enabled {
            Ok(listing) => {
                let names: BTreeSet<&str> = listing.lines().map(str::trim).collect();
                for api in SOURCE_DEPLOY_APIS {
                    findings.push(if names.contains(api) {
                        Finding::ready(api, "enabled")
                    } else {
                        Finding::blocked(
                            api,
                            format!("disabled; gcloud services enable {api} {project_flag}"),
                        )
                    });
                }
                names.contains(RUN_API)
            }
            Err(e) => {
                let why = summary(e);
                for api in SOURCE_DEPLOY_APIS {
                    findings.push(Finding::blocked(api, format!("cannot list services: {why}")));
                }
                false
            }
        };

        if run_enabled {
            findings.push(self.region_finding(target, region_subject, &project_flag).await);
        } else {
            findings.push(Finding::skipped(region_subject, RUN_API));
        }

        Readiness {
            target: target.clone(),
            findings,
        }
    }

    async fn sdk_finding(&self) -> Finding {
        const SUBJECT: &str = "gcloud CLI";

        match self.executor.exec(&args(["version", "--format=json"])).await {
            Ok(json) => match sdk_version(&json) {
                Some(version) => Finding::ready(SUBJECT, format!("Google Cloud SDK {version}")),
                None => Finding::ready(SUBJECT, "installed"),
            },
            Err(e) => Finding::blocked(SUBJECT, summary(&e)),
        }
    }

    async fn account_finding(&self) -> Finding {
        const SUBJECT: &str = "active account";

        let listing = self
            .executor
            .exec(&args([
                "auth",
                "list",
                "--filter=status:ACTIVE",
                "--format=value(account)",
            ]))
            .await;

        match listing {
            Ok(out) => match out.lines().map(str::trim).find(|l| !l.is_empty()) {
                Some(account) => Finding::ready(SUBJECT, account),
                None => Finding::blocked(SUBJECT, "none; run gcloud auth login"),
            },
            Err(e) => Finding::blocked(SUBJECT, summary(&e)),
        }
    }

    async fn region_finding(
        &self,
        target: &DeployTarget,
        subject: String,
        project_flag: &str,
    ) -> Finding {
        let regions = self
            .executor
            .exec(&args([
                "run",
                "regions",
                "list",
                project_flag,
                "--format=value(locationId)",
            ]))
            .await;

        match regions {
            Ok(out) if out.lines().any(|l| l.trim() == target.region) => {
                Finding::ready(subject, "offered by Cloud Run")
            }
            Ok(_) => Finding::blocked(subject, "not a Cloud Run region"),
            Err(e) => Finding::blocked(subject, summary(&e)),
        }
    }
}

/// `"Google Cloud SDK"` entry of `gcloud version --format=json`.
fn sdk_version(json: &str) -> Option<String> {
    // arch-lint: allow(no-silent-result-drop) reason="gcloud ran; version text is cosmetic"
    let parsed: serde_json::Value = serde_json::from_str(json).ok()?;
    parsed
        .get("Google Cloud SDK")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

/// First meaningful line of a gcloud failure.
fn summary(err: &GcloudError) -> String {
    match err {
        GcloudError::CommandFailed { stderr, .. } => {
            match stderr.lines().map(str::trim).find(|l| !l.is_empty()) {
                Some(line) => line.to_owned(),
                None => err.to_string(),
            }
        }
        other => other.to_string(),
    }
}
