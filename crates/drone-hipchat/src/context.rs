//! Build context supplied by the Drone host
//!
//! These are read-only views of the `system`, `repo` and `build` parameters.
//! Missing fields deserialize to their defaults so partially populated
//! payloads still render.

use serde::{Deserialize, Serialize};

/// Drone server information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct System {
    /// Root URL of the Drone web UI
    pub link_url: String,
    pub version: String,
}

/// Repository being built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repo {
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub link_url: String,
    pub clone_url: String,
    pub default_branch: String,
    pub private: bool,
    pub trusted: bool,
}

/// The build that triggered the notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub number: i64,
    pub event: String,
    pub status: String,
    /// Unix seconds
    pub enqueued_at: i64,
    pub created_at: i64,
    pub started_at: i64,
    pub finished_at: i64,
    pub commit: String,
    pub branch: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub refspec: String,
    pub remote: String,
    pub title: String,
    pub message: String,
    pub timestamp: i64,
    pub author: String,
    pub author_avatar: String,
    pub author_email: String,
    pub link_url: String,
    pub deploy_to: String,
}

impl Build {
    /// Parsed status of this build
    pub fn status(&self) -> BuildStatus {
        BuildStatus::from(self.status.as_str())
    }
}

/// Template data root: `system.*`, `repo.*` and `build.*`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub system: System,
    pub repo: Repo,
    pub build: Build,
}

impl Payload {
    /// Link to this build in the Drone UI
    pub fn build_link(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.system.link_url, self.repo.owner, self.repo.name, self.build.number
        )
    }

    /// `owner/name#number`, used where a rendered string came out empty
    pub fn short_label(&self) -> String {
        format!("{}/{}#{}", self.repo.owner, self.repo.name, self.build.number)
    }
}

/// Drone build status
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BuildStatus {
    Skipped,
    Pending,
    Running,
    Success,
    Failure,
    Killed,
    Error,
    /// Anything Drone may add later
    Unknown(String),
}

impl From<&str> for BuildStatus {
    fn from(status: &str) -> Self {
        match status {
            "skipped" => BuildStatus::Skipped,
            "pending" => BuildStatus::Pending,
            "running" => BuildStatus::Running,
            "success" => BuildStatus::Success,
            "failure" => BuildStatus::Failure,
            "killed" => BuildStatus::Killed,
            "error" => BuildStatus::Error,
            other => BuildStatus::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            BuildStatus::Skipped => "skipped",
            BuildStatus::Pending => "pending",
            BuildStatus::Running => "running",
            BuildStatus::Success => "success",
            BuildStatus::Failure => "failure",
            BuildStatus::Killed => "killed",
            BuildStatus::Error => "error",
            BuildStatus::Unknown(other) => other,
        };
        f.write_str(word)
    }
}
