use serde::{Deserialize, Serialize};

/// A fully resolved Cloud Run service to deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployTarget {
    /// GCP project ID
    pub project_id: String,
    /// Cloud Run region
    pub region: String,
    /// Cloud Run service name
    pub service_name: String,
}

/// Per-invocation replacements for individual target fields.
///
/// Each `Some` field replaces exactly that field of the target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub project_id: Option<String>,
    pub region: Option<String>,
    pub service_name: Option<String>,
}

impl DeployTarget {
    pub fn new(
        project_id: impl Into<String>,
        region: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            region: region.into(),
            service_name: service_name.into(),
        }
    }

    pub fn with_overrides(&self, overrides: &Overrides) -> Self {
        Self {
            project_id: replaced(&overrides.project_id, &self.project_id),
            region: replaced(&overrides.region, &self.region),
            service_name: replaced(&overrides.service_name, &self.service_name),
        }
    }

    /// Reject blank fields. Everything else is left to gcloud.
    pub fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("project_id", &self.project_id),
            ("region", &self.region),
            ("service_name", &self.service_name),
        ] {
            if value.trim().is_empty() {
                return Err(crate::Error::EmptyField { field });
            }
        }
        Ok(())
    }
}

fn replaced(over: &Option<String>, base: &str) -> String {
    match over {
        Some(value) => value.clone(),
        None => base.to_owned(),
    }
}

impl std::fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{service} ({project}, {region})",
            service = self.service_name,
            project = self.project_id,
            region = self.region,
        )
    }
}
