//! GitHub REST API client
//!
//! A thin reqwest wrapper: every method maps to one endpoint and returns the
//! deserialized body. Non-2xx responses become [`GitHubError::Api`].

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::{GitHubError, GitHubResult};
use crate::search::{SearchKind, SearchOptions};
use crate::types::{
    CheckRun, CheckRunList, MergeResult, NewPullRequest, PullRequest, RepoRef, Repository,
    SearchResults, User, WorkflowJob, WorkflowJobList, WorkflowRun, WorkflowRunList,
};

/// Default public API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.diff";
const MAX_PER_PAGE: u32 = 100;

/// Filters for `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrListFilter {
    /// open, closed, all
    pub state: Option<String>,
    /// `owner:branch`
    pub head: Option<String>,
    pub base: Option<String>,
    pub limit: Option<u32>,
}

/// Filters for `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunListFilter {
    /// Workflow ID or file name; switches to the per-workflow endpoint
    pub workflow: Option<String>,
    pub branch: Option<String>,
    pub status: Option<String>,
    pub event: Option<String>,
    pub limit: Option<u32>,
}

/// Merge strategy for `PUT .../merge`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMethod {
    #[default]
    Merge,
    Squash,
    Rebase,
}

impl MergeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "merge",
            MergeMethod::Squash => "squash",
            MergeMethod::Rebase => "rebase",
        }
    }
}

/// GitHub REST client bound to one API base URL and an optional token
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`)
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        user_agent: &str,
    ) -> GitHubResult<Self> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_as(method, path, JSON_MEDIA_TYPE)
    }

    fn request_as(&self, method: Method, path: &str, accept: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> GitHubResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "GitHub API returned an error");
        Err(GitHubError::from_body(status.as_u16(), &body))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> GitHubResult<T> {
        let response = Self::check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GitHubResult<T> {
        debug!("GET {}", path);
        Self::send_json(self.request(Method::GET, path).query(query)).await
    }

    async fn send_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> GitHubResult<T> {
        debug!("{} {}", method, path);
        Self::send_json(self.request(method, path).json(body)).await
    }

    async fn post_empty(&self, path: &str) -> GitHubResult<()> {
        debug!("POST {}", path);
        Self::check(self.request(Method::POST, path).send().await?).await?;
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// `GET /user` - the authenticated user
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> GitHubResult<User> {
        if self.token.is_none() {
            return Err(GitHubError::NotAuthenticated);
        }
        self.get_json("/user", &[]).await
    }

    // ========================================================================
    // Pull requests
    // ========================================================================

    /// `GET /repos/{owner}/{repo}/pulls`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_pulls(
        &self,
        repo: &RepoRef,
        filter: &PrListFilter,
    ) -> GitHubResult<Vec<PullRequest>> {
        let mut query = vec![("per_page", per_page(filter.limit))];
        push_opt(&mut query, "state", &filter.state);
        push_opt(&mut query, "head", &filter.head);
        push_opt(&mut query, "base", &filter.base);

        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.repo);
        self.get_json(&path, &query).await
    }

    /// `GET /repos/{owner}/{repo}/pulls/{number}`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn get_pull(&self, repo: &RepoRef, number: u64) -> GitHubResult<PullRequest> {
        let path = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, number);
        self.get_json(&path, &[]).await
    }

    /// Unified diff of a pull request
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn get_pull_diff(&self, repo: &RepoRef, number: u64) -> GitHubResult<String> {
        let path = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, number);
        debug!("GET {} (diff)", path);
        let response = self
            .request_as(Method::GET, &path, DIFF_MEDIA_TYPE)
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }

    /// `POST /repos/{owner}/{repo}/pulls`
    #[instrument(skip(self, pull), fields(repo = %repo))]
    pub async fn create_pull(
        &self,
        repo: &RepoRef,
        pull: &NewPullRequest,
    ) -> GitHubResult<PullRequest> {
        let path = format!("/repos/{}/{}/pulls", repo.owner, repo.repo);
        self.send_body(Method::POST, &path, pull).await
    }

    /// `PUT /repos/{owner}/{repo}/pulls/{number}/merge`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn merge_pull(
        &self,
        repo: &RepoRef,
        number: u64,
        method: MergeMethod,
    ) -> GitHubResult<MergeResult> {
        let path = format!("/repos/{}/{}/pulls/{}/merge", repo.owner, repo.repo, number);
        let body = serde_json::json!({ "merge_method": method.as_str() });
        self.send_body(Method::PUT, &path, &body).await
    }

    /// `GET /repos/{owner}/{repo}/commits/{ref}/check-runs`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_check_runs(
        &self,
        repo: &RepoRef,
        git_ref: &str,
    ) -> GitHubResult<Vec<CheckRun>> {
        let path = format!(
            "/repos/{}/{}/commits/{}/check-runs",
            repo.owner, repo.repo, git_ref
        );
        let list: CheckRunList = self
            .get_json(&path, &[("per_page", MAX_PER_PAGE.to_string())])
            .await?;
        Ok(list.check_runs)
    }

    // ========================================================================
    // Repositories
    // ========================================================================

    /// `GET /repos/{owner}/{repo}`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn get_repo(&self, repo: &RepoRef) -> GitHubResult<Repository> {
        let path = format!("/repos/{}/{}", repo.owner, repo.repo);
        self.get_json(&path, &[]).await
    }

    /// Repositories of `owner`, or of the authenticated user when `None`
    #[instrument(skip(self))]
    pub async fn list_repos(
        &self,
        owner: Option<&str>,
        limit: Option<u32>,
    ) -> GitHubResult<Vec<Repository>> {
        let query = vec![
            ("per_page", per_page(limit)),
            ("sort", "updated".to_string()),
        ];
        match owner {
            Some(owner) => {
                let path = format!("/users/{}/repos", owner);
                self.get_json(&path, &query).await
            }
            None => {
                if self.token.is_none() {
                    return Err(GitHubError::NotAuthenticated);
                }
                self.get_json("/user/repos", &query).await
            }
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// `GET /repos/{owner}/{repo}/actions/runs`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_runs(
        &self,
        repo: &RepoRef,
        filter: &RunListFilter,
    ) -> GitHubResult<Vec<WorkflowRun>> {
        let mut query = vec![("per_page", per_page(filter.limit))];
        push_opt(&mut query, "branch", &filter.branch);
        push_opt(&mut query, "status", &filter.status);
        push_opt(&mut query, "event", &filter.event);

        let path = match filter.workflow {
            Some(ref workflow) => format!(
                "/repos/{}/{}/actions/workflows/{}/runs",
                repo.owner, repo.repo, workflow
            ),
            None => format!("/repos/{}/{}/actions/runs", repo.owner, repo.repo),
        };
        let list: WorkflowRunList = self.get_json(&path, &query).await?;
        Ok(list.workflow_runs)
    }

    /// `GET /repos/{owner}/{repo}/actions/runs/{id}`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn get_run(&self, repo: &RepoRef, run_id: u64) -> GitHubResult<WorkflowRun> {
        let path = format!("/repos/{}/{}/actions/runs/{}", repo.owner, repo.repo, run_id);
        self.get_json(&path, &[]).await
    }

    /// `GET /repos/{owner}/{repo}/actions/runs/{id}/jobs`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn list_run_jobs(
        &self,
        repo: &RepoRef,
        run_id: u64,
    ) -> GitHubResult<Vec<WorkflowJob>> {
        let path = format!(
            "/repos/{}/{}/actions/runs/{}/jobs",
            repo.owner, repo.repo, run_id
        );
        let list: WorkflowJobList = self
            .get_json(&path, &[("per_page", MAX_PER_PAGE.to_string())])
            .await?;
        Ok(list.jobs)
    }

    /// Re-run a workflow run, or only its failed jobs
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn rerun(&self, repo: &RepoRef, run_id: u64, failed_only: bool) -> GitHubResult<()> {
        let action = if failed_only { "rerun-failed-jobs" } else { "rerun" };
        let path = format!(
            "/repos/{}/{}/actions/runs/{}/{}",
            repo.owner, repo.repo, run_id, action
        );
        self.post_empty(&path).await
    }

    /// `POST /repos/{owner}/{repo}/actions/runs/{id}/cancel`
    #[instrument(skip(self), fields(repo = %repo))]
    pub async fn cancel_run(&self, repo: &RepoRef, run_id: u64) -> GitHubResult<()> {
        let path = format!(
            "/repos/{}/{}/actions/runs/{}/cancel",
            repo.owner, repo.repo, run_id
        );
        self.post_empty(&path).await
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// `GET /search/{kind}?q=...`
    ///
    /// `query` is passed through unchanged.
    #[instrument(skip(self, options))]
    pub async fn search<T: DeserializeOwned>(
        &self,
        kind: SearchKind,
        query: &str,
        options: &SearchOptions,
    ) -> GitHubResult<SearchResults<T>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("per_page", per_page(options.limit)),
        ];
        push_opt(&mut params, "sort", &options.sort);
        push_opt(&mut params, "order", &options.order);

        let path = format!("/search/{}", kind.endpoint());
        self.get_json(&path, &params).await
    }
}

fn per_page(limit: Option<u32>) -> String {
    limit.unwrap_or(30).clamp(1, MAX_PER_PAGE).to_string()
}

fn push_opt<'a>(query: &mut Vec<(&'a str, String)>, key: &'a str, value: &Option<String>) {
    if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
        query.push((key, value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pull_json(number: u64, branch: &str) -> serde_json::Value {
        json!({
            "number": number,
            "title": format!("PR {}", number),
            "state": "open",
            "user": {"login": "octo"},
            "head": {"ref": branch, "sha": "abc123", "label": format!("octo:{}", branch)},
            "base": {"ref": "main", "sha": "def456"},
            "draft": false,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z",
            "html_url": format!("https://github.com/o/r/pull/{}", number)
        })
    }

    async fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(server.uri(), Some("test-token".to_string()), "ghub-test").unwrap()
    }

    #[tokio::test]
    async fn test_list_pulls_sends_filters_and_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/pulls"))
            .and(query_param("state", "open"))
            .and(query_param("head", "o:feat"))
            .and(header_eq("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([pull_json(5, "feat")])))
            .mount(&server)
            .await;

        let filter = PrListFilter {
            state: Some("open".to_string()),
            head: Some("o:feat".to_string()),
            ..Default::default()
        };
        let prs = client(&server)
            .await
            .list_pulls(&RepoRef::new("o", "r"), &filter)
            .await
            .unwrap();
        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].number, 5);
        assert_eq!(prs[0].head.ref_name, "feat");
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .get_repo(&RepoRef::new("o", "missing"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_search_passes_query_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "bug type:issue label:p1"))
            .and(query_param("per_page", "5"))
            .and(query_param("sort", "created"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 0,
                "incomplete_results": false,
                "items": []
            })))
            .mount(&server)
            .await;

        let options = SearchOptions {
            sort: Some("created".to_string()),
            order: None,
            limit: Some(5),
        };
        let results: SearchResults<serde_json::Value> = client(&server)
            .await
            .search(SearchKind::Issues, "bug type:issue label:p1", &options)
            .await
            .unwrap();
        assert_eq!(results.total_count, 0);
    }

    #[tokio::test]
    async fn test_pull_diff_uses_diff_media_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/pulls/3"))
            .and(header_eq("accept", DIFF_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_string("diff --git a/x b/x\n"))
            .mount(&server)
            .await;

        let diff = client(&server)
            .await
            .get_pull_diff(&RepoRef::new("o", "r"), 3)
            .await
            .unwrap();
        assert!(diff.starts_with("diff --git"));
    }

    #[tokio::test]
    async fn test_list_runs_for_workflow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/actions/workflows/ci.yml/runs"))
            .and(query_param("branch", "main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 1,
                "workflow_runs": [{
                    "id": 99,
                    "run_number": 12,
                    "name": "CI",
                    "status": "completed",
                    "conclusion": "success",
                    "event": "push",
                    "head_branch": "main",
                    "head_sha": "abc",
                    "html_url": "https://github.com/o/r/actions/runs/99",
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": "2024-01-01T00:10:00Z"
                }]
            })))
            .mount(&server)
            .await;

        let filter = RunListFilter {
            workflow: Some("ci.yml".to_string()),
            branch: Some("main".to_string()),
            ..Default::default()
        };
        let runs = client(&server)
            .await
            .list_runs(&RepoRef::new("o", "r"), &filter)
            .await
            .unwrap();
        assert_eq!(runs[0].id, 99);
        assert_eq!(runs[0].outcome(), "success");
    }

    #[tokio::test]
    async fn test_current_user_requires_token() {
        let anonymous = GitHubClient::new("http://127.0.0.1:9", None, "ghub-test").unwrap();
        assert!(matches!(
            anonymous.current_user().await,
            Err(GitHubError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_per_page_clamps() {
        assert_eq!(per_page(None), "30");
        assert_eq!(per_page(Some(0)), "1");
        assert_eq!(per_page(Some(500)), "100");
    }
}
