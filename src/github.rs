//! Typed client for the GitHub REST API (version 2022-11-28) and the raw
//! content host.

use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::errors::{GitviewError, Result};

/// Page size used for branch and repository enumeration.
pub const PER_PAGE: u64 = 100;

const MEDIA_JSON: &str = "application/vnd.github+json";
const MEDIA_HTML: &str = "application/vnd.github.html";

#[derive(Clone, Debug, Deserialize)]
pub struct Owner {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    pub avatar_url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Owner {
    pub fn is_organization(&self) -> bool {
        self.kind == "Organization"
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub fork: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub default_branch: String,
    pub language: Option<String>,
    pub parent: Option<Box<Repository>>,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Only blobs carry a size; trees omit the field.
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
struct BranchItem {
    name: String,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_root: String,
    raw_root: String,
    token: Option<String>,
}

impl Client {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gitview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_root: config.api_root.trim_end_matches('/').to_owned(),
            raw_root: config.raw_root.trim_end_matches('/').to_owned(),
            token: config.token.clone(),
        })
    }

    fn get(&self, path: &str, media_type: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .get(format!("{}{}", self.api_root, path))
            .header(header::ACCEPT, media_type)
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// GET an API path as JSON. A 404 is `None`; any other non-success
    /// status is surfaced as an upstream error.
    async fn get_json<T>(&self, path: &str) -> Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.get(path, MEDIA_JSON).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(GitviewError::UpstreamStatus(status)),
        }
    }

    pub async fn repository(&self, owner: &str, repo: &str) -> Result<Option<Repository>> {
        self.get_json(&format!("/repos/{}/{}", owner, repo)).await
    }

    pub async fn user(&self, login: &str) -> Result<Option<Owner>> {
        self.get_json(&format!("/users/{}", login)).await
    }

    /// One page of the user's own repositories, most recently pushed first.
    pub async fn user_repos(&self, login: &str, page: u64) -> Result<Option<Vec<Repository>>> {
        self.get_json(&format!(
            "/users/{}/repos?type=owner&page={}&per_page={}&sort=pushed",
            login, page, PER_PAGE
        ))
        .await
    }

    /// All branch names for a repository, aggregated across pages until a
    /// short page signals the end.
    pub async fn branches(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for page in 1u64.. {
            let path = format!(
                "/repos/{}/{}/branches?per_page={}&page={}",
                owner, repo, PER_PAGE, page
            );
            let items: Vec<BranchItem> = self.get_json(&path).await?.unwrap_or_default();
            let count = items.len() as u64;
            names.extend(items.into_iter().map(|branch| branch.name));
            if count < PER_PAGE {
                break;
            }
        }
        Ok(names)
    }

    /// Recursive flat listing for a ref.
    pub async fn tree(&self, owner: &str, repo: &str, reference: &str) -> Result<Option<TreeResponse>> {
        self.get_json(&format!(
            "/repos/{}/{}/git/trees/{}?recursive=true",
            owner, repo, reference
        ))
        .await
    }

    /// Server-rendered README HTML. `repo` is `owner/name`; `dir` selects a
    /// subdirectory README such as `/profile` for organisation profiles.
    pub async fn readme_html(
        &self,
        repo: &str,
        dir: &str,
        reference: Option<&str>,
    ) -> Result<Option<String>> {
        let mut path = format!("/repos/{}/readme{}", repo, dir);
        if let Some(reference) = reference {
            path.push_str("?ref=");
            path.push_str(reference);
        }
        let response = self.get(&path, MEDIA_HTML).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(GitviewError::UpstreamStatus(status)),
        }
    }

    /// Raw file bytes for `owner/repo/ref/path...`. Anything but a 200 is
    /// treated as not-found so the caller can fall through to the tree page.
    pub async fn raw(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let response = self.http.get(format!("{}/{}", self.raw_root, path)).send().await?;
        if response.status() == StatusCode::OK {
            Ok(Some(response.bytes().await?.to_vec()))
        } else {
            Ok(None)
        }
    }
}
