//! Hosting-provider seam: create a repository for the token's owner.
//!
//! [`GitHubClient`] is the only real implementation. It issues a single
//! `POST {api_url}/user/repos` and maps the response onto [`BootError`]:
//!
//! | response                              | error            |
//! |---------------------------------------|------------------|
//! | 401, 403                              | `Authentication` |
//! | 422 with "already exists" in the body | `Conflict`       |
//! | any other non-2xx                     | `Api`            |
//! | connect / DNS / timeout / TLS failure | `Network`        |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use autoboot_core::AuthToken;

use crate::error::BootError;

const USER_AGENT: &str = concat!("autoboot/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_BODY_IN_ERROR: usize = 500;

/// Payload for repository creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRepository {
    pub name: String,
    pub private: bool,
    pub description: String,
    /// Always `false`: the first commit comes from the local repository.
    pub auto_init: bool,
}

/// The created repository, as far as the pipeline cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub clone_url: String,
    pub html_url: String,
    pub full_name: String,
}

pub trait RemoteHost {
    fn create_repository(
        &self,
        spec: &CreateRepository,
        token: &AuthToken,
    ) -> Result<RemoteRepository, BootError>;
}

// ---------------------------------------------------------------------------
// GitHub
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreatedRepoJson {
    clone_url: Option<String>,
    html_url: Option<String>,
    full_name: Option<String>,
}

pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            api_url: api_url.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/user/repos", self.api_url.trim_end_matches('/'))
    }
}

impl RemoteHost for GitHubClient {
    fn create_repository(
        &self,
        spec: &CreateRepository,
        token: &AuthToken,
    ) -> Result<RemoteRepository, BootError> {
        let url = self.endpoint();
        tracing::debug!(%url, name = %spec.name, private = spec.private, "creating repository");

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", token.expose()))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
            .send_json(spec);

        match response {
            Ok(resp) => {
                let body = resp.into_string().map_err(|e| BootError::Network {
                    target: url.clone(),
                    message: format!("reading response body: {e}"),
                })?;
                parse_created(&body)
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                tracing::debug!(status, %body, "repository creation rejected");
                Err(classify_failure(status, &body, &spec.name))
            }
            Err(ureq::Error::Transport(t)) => Err(BootError::Network {
                target: url,
                message: t.to_string(),
            }),
        }
    }
}

/// Map a non-2xx response onto the error taxonomy.
pub fn classify_failure(status: u16, body: &str, name: &str) -> BootError {
    match status {
        401 | 403 => BootError::Authentication { status },
        422 if body.to_lowercase().contains("already exists") => BootError::Conflict {
            name: name.to_string(),
        },
        _ => BootError::Api {
            status,
            body: truncate(body.trim(), MAX_BODY_IN_ERROR),
        },
    }
}

/// Parse a 2xx creation body. A body without `clone_url` is an API error.
pub fn parse_created(body: &str) -> Result<RemoteRepository, BootError> {
    let json: CreatedRepoJson = serde_json::from_str(body).map_err(|e| BootError::Api {
        status: 201,
        body: format!("unparseable response ({e})"),
    })?;
    let clone_url = json.clone_url.filter(|u| !u.is_empty()).ok_or_else(|| BootError::Api {
        status: 201,
        body: "response did not include clone_url".to_string(),
    })?;
    Ok(RemoteRepository {
        html_url: json.html_url.unwrap_or_else(|| clone_url.trim_end_matches(".git").to_string()),
        full_name: json.full_name.unwrap_or_default(),
        clone_url,
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{cut}…")
}
