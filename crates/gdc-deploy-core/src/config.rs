use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::target::DeployTarget;

/// Name of the target deployed when none is selected.
pub const DEFAULT_TARGET: &str = "munich-demo";

/// deploy.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Target used when `--target` is not given
    #[serde(default = "default_target_name")]
    pub default_target: String,
    #[serde(default)]
    pub project: ProjectConfig,
    /// Named services. Replaces the built-in table when present.
    #[serde(default = "builtin_targets")]
    pub targets: BTreeMap<String, TargetConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// GCP project ID shared by all targets
    #[serde(default = "default_project_id")]
    pub gcp_project_id: String,
    /// Cloud Run region shared by all targets
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Cloud Run service name
    pub service_name: String,
    /// Overrides `[project].gcp_project_id` for this target
    #[serde(default)]
    pub gcp_project_id: Option<String>,
    /// Overrides `[project].region` for this target
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            default_target: default_target_name(),
            project: ProjectConfig::default(),
            targets: builtin_targets(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            gcp_project_id: default_project_id(),
            region: default_region(),
        }
    }
}

impl TargetConfig {
    fn service(name: &str) -> Self {
        Self {
            service_name: name.to_owned(),
            gcp_project_id: None,
            region: None,
        }
    }
}

impl DeployConfig {
    /// Load an explicitly requested config file. A missing file is an error.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), targets = config.targets.len(), "loaded config");
        Ok(config)
    }

    /// Built-in targets, or the given file when one is passed.
    pub fn load_or_builtin(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Target names in sorted order.
    pub fn target_names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    /// Resolve a named target, or the default one when `name` is `None`.
    pub fn resolve(&self, name: Option<&str>) -> crate::Result<DeployTarget> {
        let name = match name {
            Some(n) => n,
            None => self.default_target.as_str(),
        };
        let target = self
            .targets
            .get(name)
            .ok_or_else(|| crate::Error::UnknownTarget {
                name: name.to_owned(),
                available: self.target_names(),
            })?;

        Ok(DeployTarget {
            project_id: own_or_shared(&target.gcp_project_id, &self.project.gcp_project_id),
            region: own_or_shared(&target.region, &self.project.region),
            service_name: target.service_name.clone(),
        })
    }
}

/// A per-target setting wins over the `[project]` one.
fn own_or_shared(own: &Option<String>, shared: &str) -> String {
    match own {
        Some(value) => value.clone(),
        None => shared.to_owned(),
    }
}

fn default_target_name() -> String {
    DEFAULT_TARGET.to_owned()
}

fn default_project_id() -> String {
    "gemini-gdc-demo".to_owned()
}

fn default_region() -> String {
    "us-west2".to_owned()
}

fn builtin_targets() -> BTreeMap<String, TargetConfig> {
    BTreeMap::from([
        (DEFAULT_TARGET.to_owned(), TargetConfig::service("gdc-munich-demo")),
        ("frontend".to_owned(), TargetConfig::service("gdc-demo-frontend")),
    ])
}
