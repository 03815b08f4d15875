use anyhow::{bail, Result};
use serde::Serialize;

pub const BRANCH_REF_PREFIX: &str = "refs/heads/";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// The push/branch event that started this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerContext {
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    pub owner: String,
    pub repo: String,
    pub server_url: String,
}

impl TriggerContext {
    /// Build a context from a `owner/repo` repository slug.
    pub fn new(
        git_ref: Option<String>,
        repository: &str,
        server_url: Option<String>,
    ) -> Result<Self> {
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                (owner.to_string(), repo.to_string())
            }
            _ => bail!("Repository must be given as owner/name, got {repository:?}"),
        };
        let server_url = server_url
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok(Self {
            git_ref: git_ref.filter(|r| !r.is_empty()),
            owner,
            repo,
            server_url,
        })
    }

    pub fn branch_name(&self) -> String {
        let git_ref = self.git_ref.as_deref().unwrap_or_default();
        git_ref
            .strip_prefix(BRANCH_REF_PREFIX)
            .unwrap_or(git_ref)
            .to_string()
    }

    pub fn branch_url(&self, branch: &str) -> String {
        format!("{}/{}/{}/tree/{}", self.server_url, self.owner, self.repo, branch)
    }
}
