use axum::{extract::{Path, Query}, response::Html, Extension};
use serde::Deserialize;

use crate::{
    cache::ListingCache,
    errors::{Result, GitviewError},
    github::{Client, Repository, PER_PAGE},
    resolve, tree,
    utils::{format_count, safe_mime, strip_octicons, HtmlOrRaw},
};

const STYLES: &str = include_str!("templates/styles.css");

fn template(source: &str) -> Result<liquid::Template> {
    Ok(liquid::ParserBuilder::with_stdlib().build()?.parse(source)?)
}

fn repo_to_object(repo: &Repository) -> liquid::Object {
    liquid::object!({
        "name": repo.name.clone(),
        "full_name": repo.full_name.clone(),
        "description": repo.description.clone().unwrap_or_default(),
        "fork": repo.fork,
        "stargazers": format_count(repo.stargazers_count),
        "forks": format_count(repo.forks_count),
        "language": repo.language.clone().unwrap_or_default(),
        "default_branch": repo.default_branch.clone(),
    })
}

async fn redirect_to_default_branch(client: &Client, owner: &str, repo: &str) -> GitviewError {
    match client.repository(owner, repo).await {
        Ok(Some(details)) => {
            GitviewError::Redirect(format!("/{}/{}/{}", owner, repo, details.default_branch))
        }
        Ok(None) => GitviewError::NotFound,
        Err(error) => error,
    }
}

#[tracing::instrument]
pub(crate) async fn home() -> Result<Html<String>> {
    let template = template(include_str!("templates/home.html.liquid"))?;
    Ok(Html(template.render(&liquid::object!({
        "styles": STYLES,
    }))?))
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    page: Option<String>,
}

#[tracing::instrument(skip(client))]
pub(crate) async fn user(
    Path(owner): Path<String>,
    Query(pagination): Query<Pagination>,
    Extension(client): Extension<Client>,
) -> Result<Html<String>> {
    let template = template(include_str!("templates/user.html.liquid"))?;

    // An unparseable or non-positive page falls back to the first page.
    let page = pagination
        .page
        .and_then(|page| page.parse::<u64>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1);

    let user = client.user(&owner).await?.ok_or(GitviewError::NotFound)?;
    let repos = client
        .user_repos(&owner, page)
        .await?
        .ok_or(GitviewError::NotFound)?;

    let has_prev = page != 1;
    let has_next = user.public_repos > (page - 1) * PER_PAGE + repos.len() as u64;

    // Organisations keep their profile README in a `.github` repository.
    let (readme_repo, readme_dir) = if user.is_organization() {
        (format!("{}/.github", owner), "/profile")
    } else {
        (format!("{}/{}", owner, owner), "")
    };
    let readme = client
        .readme_html(&readme_repo, readme_dir, None)
        .await?
        .unwrap_or_default();

    let repos: Vec<liquid::Object> = repos.iter().map(repo_to_object).collect();

    Ok(Html(template.render(&liquid::object!({
        "styles": STYLES,
        "user": {
            "login": user.login,
            "name": user.name.clone().unwrap_or_default(),
            "bio": user.bio.clone().unwrap_or_default(),
            "avatar_url": user.avatar_url,
            "public_repos": user.public_repos as i64,
        },
        "repos": repos,
        "page": page as i64,
        "prev_page": page as i64 - 1,
        "next_page": page as i64 + 1,
        "has_prev": has_prev,
        "has_next": has_next,
        "readme": strip_octicons(readme.trim()),
    }))?))
}

#[tracing::instrument(skip(client))]
pub(crate) async fn repository(
    Path((owner, repo)): Path<(String, String)>,
    Extension(client): Extension<Client>,
) -> Result<Html<String>> {
    Err(redirect_to_default_branch(&client, &owner, &repo).await)
}

#[tracing::instrument(skip(client, cache))]
pub(crate) async fn tree(
    Path((owner, repo, ref_and_path)): Path<(String, String, String)>,
    Extension(client): Extension<Client>,
    Extension(cache): Extension<ListingCache>,
) -> Result<HtmlOrRaw> {
    let ref_and_path = ref_and_path.trim_matches('/');
    if ref_and_path.is_empty() {
        return Err(redirect_to_default_branch(&client, &owner, &repo).await);
    }

    // Fast path: when the ref contains no slash, the literal concatenation
    // already names a raw file and no branch resolution is needed.
    let raw_path = format!("{}/{}/{}", owner, repo, ref_and_path);
    if let Some(content) = client.raw(&raw_path).await? {
        let mime = safe_mime(mime_guess::from_path(ref_and_path).first_or_octet_stream());
        return Ok(HtmlOrRaw::Raw(mime.to_string(), content));
    }

    let branches = client.branches(&owner, &repo).await?;
    let resolved = resolve::resolve(ref_and_path, &branches);
    let branch = match resolved.branch {
        Some(branch) => branch,
        None => return Err(redirect_to_default_branch(&client, &owner, &repo).await),
    };
    if !resolved.filepath.is_empty() {
        // The raw fetch already missed this path, so fall back to the
        // branch's tree listing.
        tracing::debug!(filepath = %resolved.filepath, "no raw content at resolved path");
    }

    let details = client
        .repository(&owner, &repo)
        .await?
        .ok_or(GitviewError::NotFound)?;

    render_tree_page(&client, &cache, &owner, &repo, &branch, &details, &branches).await
}

async fn render_tree_page(
    client: &Client,
    cache: &ListingCache,
    owner: &str,
    repo: &str,
    branch: &str,
    details: &Repository,
    branches: &[String],
) -> Result<HtmlOrRaw> {
    let template = template(include_str!("templates/repo.html.liquid"))?;

    let key = ListingCache::key(owner, repo, branch);
    let listing = match cache.get(&key) {
        Some(listing) => listing,
        None => {
            let response = client
                .tree(owner, repo, branch)
                .await?
                .ok_or(GitviewError::NotFound)?;
            if response.truncated {
                tracing::warn!(%key, "recursive listing truncated by the API");
            }
            let blobs = response
                .tree
                .into_iter()
                .filter(|entry| entry.kind == "blob")
                .map(|entry| (entry.path, entry.size));
            let directory = tree::build(blobs);
            let lines = tree::render(
                &directory,
                &format!("/{}/{}/{}", owner, repo, branch),
                tree::RenderOptions { file_size: true, file_count: true },
            );
            let listing = lines.join("\n");
            cache.put(key, listing.clone());
            listing
        }
    };

    let readme = client
        .readme_html(&format!("{}/{}", owner, repo), "", Some(branch))
        .await?
        .unwrap_or_default();

    let (parent_full_name, parent_branch) = match &details.parent {
        Some(parent) => (parent.full_name.clone(), parent.default_branch.clone()),
        None => (String::new(), String::new()),
    };

    Ok(HtmlOrRaw::Html(template.render(&liquid::object!({
        "styles": STYLES,
        "owner": owner,
        "branch": branch,
        "repo": repo_to_object(details),
        "parent_full_name": parent_full_name,
        "parent_branch": parent_branch,
        "branches": branches.to_vec(),
        "listing": listing,
        "readme": strip_octicons(readme.trim()),
    }))?))
}
