//! GitHub repository contents API as an object store.
//!
//! Every object is a file in the repository. The blob `sha` GitHub reports for
//! a file is its version token: writes and deletes must quote the current sha
//! or GitHub rejects them, which gives optimistic concurrency for free.

use super::{ObjectStore, StoredObject};
use crate::constants::APP_NAME;
use crate::errors::{AppError, AppResult, BackendError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// File or directory listing returned by `GET .../contents/{path}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    File(FileContent),
    Directory(Vec<DirectoryItem>),
}

#[derive(Debug, Deserialize)]
struct FileContent {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct DirectoryItem {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Request body for create/update.
#[derive(Debug, Serialize)]
struct PutRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    message: &'a str,
    sha: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: PutContent,
}

#[derive(Debug, Deserialize)]
struct PutContent {
    sha: String,
}

/// Object store backed by a GitHub repository.
pub struct GitHubStore {
    api_url: String,
    owner: String,
    repo: String,
    token: String,
    branch: Option<String>,
    client: Client,
}

impl std::fmt::Debug for GitHubStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubStore")
            .field("api_url", &self.api_url)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &crate::constants::REDACTED_PLACEHOLDER)
            .field("branch", &self.branch)
            .finish()
    }
}

impl GitHubStore {
    /// Creates a store for `repository`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the REST API (e.g., "https://api.github.com")
    /// * `repository` - Repository in `owner/repo` form
    /// * `token` - Access token sent as a bearer credential
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the repository is not `owner/repo` or the
    /// HTTP client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        repository: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let (owner, repo) = parse_repository(repository)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.into(),
            branch: None,
            client,
        })
    }

    /// Targets `branch` instead of the repository's default branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        let branch = branch.into();
        self.branch = if branch.trim().is_empty() {
            None
        } else {
            Some(branch)
        };
        self
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.owner, self.repo)
    }

    fn contents_url(&self, key: &str) -> String {
        format!("{}/contents/{}", self.repo_url(), key.trim_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(USER_AGENT, APP_NAME)
            .header(ACCEPT, GITHUB_ACCEPT)
    }

    fn fetch_contents(&self, key: &str) -> Result<ContentsResponse, BackendError> {
        let mut request = self.client.get(self.contents_url(key));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        let response = self
            .authorized(request)
            .send()
            .map_err(BackendError::Http)?;
        let response = check_status(response, key)?;

        response.json().map_err(|e| {
            BackendError::InvalidResponse(format!("Failed to parse contents response: {}", e))
        })
    }

    fn collect_files(&self, path: &str, keys: &mut Vec<String>) -> Result<(), BackendError> {
        let items = match self.fetch_contents(path) {
            Ok(ContentsResponse::Directory(items)) => items,
            Ok(ContentsResponse::File(_)) => {
                keys.push(path.to_string());
                return Ok(());
            }
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        };

        for item in items {
            match item.kind.as_str() {
                "file" => keys.push(item.path),
                "dir" => self.collect_files(&item.path, keys)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl ObjectStore for GitHubStore {
    fn get(&self, key: &str) -> Result<StoredObject, BackendError> {
        debug!("Fetching {} from {}/{}", key, self.owner, self.repo);

        let file = match self.fetch_contents(key)? {
            ContentsResponse::File(file) => file,
            ContentsResponse::Directory(_) => {
                return Err(BackendError::InvalidResponse(format!(
                    "{} is a directory, not a file",
                    key
                )))
            }
        };

        if !file.encoding.is_empty() && file.encoding != "base64" {
            return Err(BackendError::InvalidResponse(format!(
                "Unsupported content encoding '{}' for {}",
                file.encoding, key
            )));
        }

        Ok(StoredObject {
            content: decode_content(&file.content)?,
            version: file.sha,
        })
    }

    fn exists(&self, key: &str) -> Result<bool, BackendError> {
        let mut request = self.client.head(self.contents_url(key));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        let response = self
            .authorized(request)
            .send()
            .map_err(BackendError::Http)?;
        match check_status(response, key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn put(
        &self,
        key: &str,
        content: &[u8],
        version: Option<&str>,
        message: &str,
    ) -> Result<String, BackendError> {
        debug!("Writing {} ({} bytes)", key, content.len());

        let body = PutRequest {
            message,
            content: BASE64.encode(content),
            sha: version,
            branch: self.branch.as_deref(),
        };
        let response = self
            .authorized(self.client.put(self.contents_url(key)))
            .json(&body)
            .send()
            .map_err(BackendError::Http)?;
        let response = check_status(response, key)?;

        let put: PutResponse = response.json().map_err(|e| {
            BackendError::InvalidResponse(format!("Failed to parse write response: {}", e))
        })?;
        Ok(put.content.sha)
    }

    fn delete(&self, key: &str, version: &str, message: &str) -> Result<(), BackendError> {
        debug!("Deleting {}", key);

        let body = DeleteRequest {
            message,
            sha: version,
            branch: self.branch.as_deref(),
        };
        let response = self
            .authorized(self.client.delete(self.contents_url(key)))
            .json(&body)
            .send()
            .map_err(BackendError::Http)?;
        check_status(response, key)?;
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, BackendError> {
        let mut keys = Vec::new();
        self.collect_files(prefix.trim_matches('/'), &mut keys)?;
        keys.sort();
        Ok(keys)
    }

    fn ping(&self) -> Result<(), BackendError> {
        let response = self
            .authorized(self.client.get(self.repo_url()))
            .send()
            .map_err(BackendError::Http)?;
        check_status(response, &format!("{}/{}", self.owner, self.repo))?;
        Ok(())
    }
}

/// Splits `owner/repo`, rejecting anything else.
pub(crate) fn parse_repository(repository: &str) -> AppResult<(&str, &str)> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(AppError::Config(format!(
            "Repository must be in owner/repo form, got '{}'",
            repository
        ))),
    }
}

/// GitHub wraps base64 content at 60 columns.
fn decode_content(encoded: &str) -> Result<Vec<u8>, BackendError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact)
        .map_err(|e| BackendError::InvalidResponse(format!("Invalid base64 content: {}", e)))
}

fn check_status(response: Response, key: &str) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    match status.as_u16() {
        404 => Err(BackendError::NotFound {
            key: key.to_string(),
        }),
        409 | 412 => Err(BackendError::Conflict {
            key: key.to_string(),
        }),
        // Creating a file that already exists without its sha.
        422 if body.contains("sha") => Err(BackendError::Conflict {
            key: key.to_string(),
        }),
        code => Err(BackendError::Status { status: code, body }),
    }
}
