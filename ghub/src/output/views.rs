//! Text and Markdown renderings of API entities

use serde::Serialize;
use serde_json::Value;

use super::style::{Style, CYAN, DIM, GREEN, RED, YELLOW};
use super::table::{columns, first_line, markdown_table};
use crate::types::{
    CheckRun, CodeHit, CommitHit, IssueHit, MergeResult, PullRequest, Repository, RunDetail,
    SearchResults, WorkflowJob, WorkflowRun,
};

/// Something a command can print in every output format
pub trait View: Serialize {
    fn text(&self, style: &Style) -> String;

    fn markdown(&self) -> String;

    /// JSON before projection
    fn json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Check runs of one pull request
#[derive(Debug, Clone, Serialize)]
pub struct ChecksSummary {
    pub number: u64,
    pub checks: Vec<CheckRun>,
}

impl ChecksSummary {
    pub fn counts(&self) -> (usize, usize, usize) {
        let pending = self.checks.iter().filter(|c| c.is_pending()).count();
        let passing = self.checks.iter().filter(|c| c.is_passing()).count();
        (passing, self.checks.len() - passing - pending, pending)
    }

    pub fn all_passing(&self) -> bool {
        let (_, failing, pending) = self.counts();
        failing == 0 && pending == 0
    }
}

/// Result of `auth status`
#[derive(Debug, Clone, Serialize)]
pub struct AuthStatus {
    pub host: String,
    pub login: String,
    pub source: String,
    pub token: String,
}

fn date(ts: &str) -> &str {
    ts.get(..10).unwrap_or(ts)
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

fn empty_text(style: &Style, what: &str) -> String {
    format!("{}\n", style.dim(&format!("No {} found", what)))
}

// ============================================================================
// Pull requests
// ============================================================================

impl View for Vec<PullRequest> {
    fn text(&self, style: &Style) -> String {
        if self.is_empty() {
            return empty_text(style, "pull requests");
        }
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|pr| {
                vec![
                    format!("#{}", pr.number),
                    first_line(&pr.title, 60),
                    pr.head.ref_name.clone(),
                    pr.display_state().to_string(),
                ]
            })
            .collect();
        columns(&rows, |col, cell| match col {
            0 => style.color(GREEN, cell),
            2 => style.color(CYAN, cell),
            3 => style.state(cell.trim_end()),
            _ => cell.to_string(),
        })
    }

    fn markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .iter()
            .map(|pr| {
                vec![
                    format!("[#{}]({})", pr.number, pr.html_url),
                    pr.title.clone(),
                    pr.user.login.clone(),
                    pr.head.ref_name.clone(),
                    pr.display_state().to_string(),
                ]
            })
            .collect();
        markdown_table(&["PR", "Title", "Author", "Branch", "State"], &rows)
    }
}

impl View for PullRequest {
    fn text(&self, style: &Style) -> String {
        let mut out = format!("{} #{}\n", style.bold(&self.title), self.number);
        out.push_str(&format!(
            "{} • {} wants to merge into {} from {}\n",
            style.state(self.display_state()),
            self.user.login,
            style.color(CYAN, &self.base.ref_name),
            style.color(CYAN, &self.head.ref_name),
        ));
        if !self.labels.is_empty() {
            let labels: Vec<&str> = self.labels.iter().map(|l| l.name.as_str()).collect();
            out.push_str(&format!("Labels: {}\n", labels.join(", ")));
        }
        if !self.requested_reviewers.is_empty() {
            let reviewers: Vec<&str> = self
                .requested_reviewers
                .iter()
                .map(|u| u.login.as_str())
                .collect();
            out.push_str(&format!("Reviewers: {}\n", reviewers.join(", ")));
        }
        if let (Some(add), Some(del), Some(files)) =
            (self.additions, self.deletions, self.changed_files)
        {
            out.push_str(&format!(
                "{} {} in {} files\n",
                style.color(GREEN, &format!("+{}", add)),
                style.color(RED, &format!("-{}", del)),
                files
            ));
        }
        match self.body.as_deref().map(str::trim) {
            Some(body) if !body.is_empty() => out.push_str(&format!("\n{}\n", body)),
            _ => out.push_str(&format!("\n{}\n", style.dim("No description provided"))),
        }
        out.push_str(&format!("\n{}\n", style.dim(&self.html_url)));
        out
    }

    fn markdown(&self) -> String {
        let mut out = format!("# {} (#{})\n\n", self.title, self.number);
        out.push_str(&format!("- **State:** {}\n", self.display_state()));
        out.push_str(&format!("- **Author:** {}\n", self.user.login));
        out.push_str(&format!(
            "- **Branch:** `{}` → `{}`\n",
            self.head.ref_name, self.base.ref_name
        ));
        if !self.labels.is_empty() {
            let labels: Vec<String> = self.labels.iter().map(|l| format!("`{}`", l.name)).collect();
            out.push_str(&format!("- **Labels:** {}\n", labels.join(", ")));
        }
        out.push_str(&format!("- **URL:** {}\n", self.html_url));
        if let Some(body) = self.body.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            out.push_str(&format!("\n{}\n", body));
        }
        out
    }
}

impl View for ChecksSummary {
    fn text(&self, style: &Style) -> String {
        if self.checks.is_empty() {
            return empty_text(style, "checks");
        }
        let rows: Vec<Vec<String>> = self
            .checks
            .iter()
            .map(|c| {
                let (mark, outcome) = check_outcome(c);
                vec![mark.to_string(), c.name.clone(), outcome.to_string()]
            })
            .collect();
        let mut out = columns(&rows, |col, cell| match (col, cell.trim_end()) {
            (0, "✓") => style.color(GREEN, cell),
            (0, "X") => style.color(RED, cell),
            (0, _) => style.color(YELLOW, cell),
            (2, outcome) => style.state(outcome),
            _ => cell.to_string(),
        });
        let (passing, failing, pending) = self.counts();
        out.push_str(&format!(
            "\n{} passing, {} failing, {} pending\n",
            passing, failing, pending
        ));
        out
    }

    fn markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .checks
            .iter()
            .map(|c| {
                let (_, outcome) = check_outcome(c);
                vec![c.name.clone(), outcome.to_string(), or_dash(c.html_url.as_deref())]
            })
            .collect();
        format!(
            "## Checks for #{}\n\n{}",
            self.number,
            markdown_table(&["Check", "Result", "Details"], &rows)
        )
    }
}

fn check_outcome(check: &CheckRun) -> (&'static str, &str) {
    if check.is_pending() {
        ("*", check.status.as_str())
    } else if check.is_passing() {
        ("✓", check.conclusion.as_deref().unwrap_or("success"))
    } else {
        ("X", check.conclusion.as_deref().unwrap_or("failure"))
    }
}

impl View for MergeResult {
    fn text(&self, style: &Style) -> String {
        if self.merged {
            format!("{} {}\n", style.color(GREEN, "✓"), self.message)
        } else {
            format!("{} {}\n", style.color(RED, "X"), self.message)
        }
    }

    fn markdown(&self) -> String {
        format!("{}\n", self.message)
    }
}

// ============================================================================
// Repositories
// ============================================================================

impl View for Repository {
    fn text(&self, style: &Style) -> String {
        let mut out = format!("{}\n", style.bold(&self.full_name));
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("{}\n", desc));
        }
        out.push('\n');
        out.push_str(&format!(
            "★ {}  forks {}  open issues {}\n",
            self.stargazers_count, self.forks_count, self.open_issues_count
        ));
        out.push_str(&format!("Language: {}\n", or_dash(self.language.as_deref())));
        out.push_str(&format!(
            "License: {}\n",
            or_dash(self.license.as_ref().map(|l| l.name.as_str()))
        ));
        out.push_str(&format!(
            "Default branch: {}\n",
            or_dash(self.default_branch.as_deref())
        ));
        if !self.topics.is_empty() {
            out.push_str(&format!("Topics: {}\n", self.topics.join(", ")));
        }
        if self.archived {
            out.push_str(&format!("{}\n", style.color(YELLOW, "This repository is archived")));
        }
        out.push_str(&format!("\n{}\n", style.dim(&self.html_url)));
        out
    }

    fn markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.full_name);
        if let Some(desc) = self.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("{}\n\n", desc));
        }
        out.push_str(&format!("- **Stars:** {}\n", self.stargazers_count));
        out.push_str(&format!("- **Forks:** {}\n", self.forks_count));
        out.push_str(&format!("- **Language:** {}\n", or_dash(self.language.as_deref())));
        out.push_str(&format!(
            "- **Default branch:** {}\n",
            or_dash(self.default_branch.as_deref())
        ));
        out.push_str(&format!("- **URL:** {}\n", self.html_url));
        out
    }
}

fn repo_rows(repos: &[Repository]) -> Vec<Vec<String>> {
    repos
        .iter()
        .map(|r| {
            vec![
                r.full_name.clone(),
                first_line(r.description.as_deref().unwrap_or(""), 50),
                r.visibility
                    .clone()
                    .unwrap_or_else(|| if r.private { "private" } else { "public" }.to_string()),
                r.stargazers_count.to_string(),
            ]
        })
        .collect()
}

impl View for Vec<Repository> {
    fn text(&self, style: &Style) -> String {
        if self.is_empty() {
            return empty_text(style, "repositories");
        }
        columns(&repo_rows(self), |col, cell| match col {
            0 => style.bold(cell),
            2 => style.color(DIM, cell),
            _ => cell.to_string(),
        })
    }

    fn markdown(&self) -> String {
        markdown_table(&["Repository", "Description", "Visibility", "Stars"], &repo_rows(self))
    }
}

// ============================================================================
// Workflow runs
// ============================================================================

fn run_rows(runs: &[WorkflowRun]) -> Vec<Vec<String>> {
    runs.iter()
        .map(|r| {
            vec![
                r.outcome().to_string(),
                or_dash(r.name.as_deref()),
                first_line(r.display_title.as_deref().unwrap_or(""), 50),
                or_dash(r.head_branch.as_deref()),
                r.event.clone(),
                r.id.to_string(),
                date(&r.created_at).to_string(),
            ]
        })
        .collect()
}

impl View for Vec<WorkflowRun> {
    fn text(&self, style: &Style) -> String {
        if self.is_empty() {
            return empty_text(style, "workflow runs");
        }
        columns(&run_rows(self), |col, cell| match col {
            0 => style.state(cell.trim_end()) + &" ".repeat(cell.len() - cell.trim_end().len()),
            3 => style.color(CYAN, cell),
            5 | 6 => style.dim(cell),
            _ => cell.to_string(),
        })
    }

    fn markdown(&self) -> String {
        markdown_table(
            &["Status", "Workflow", "Title", "Branch", "Event", "ID", "Created"],
            &run_rows(self),
        )
    }
}

fn job_line(job: &WorkflowJob, style: &Style) -> String {
    let outcome = job.conclusion.as_deref().unwrap_or(&job.status);
    format!("{} {}", style.state(outcome), job.name)
}

impl View for RunDetail {
    fn text(&self, style: &Style) -> String {
        let run = &self.run;
        let mut out = format!(
            "{} {} #{}\n",
            style.bold(run.name.as_deref().unwrap_or("workflow run")),
            or_dash(run.display_title.as_deref()),
            run.run_number
        );
        out.push_str(&format!(
            "{} • {} on {} • {}\n",
            style.state(run.outcome()),
            run.event,
            style.color(CYAN, run.head_branch.as_deref().unwrap_or("-")),
            &run.head_sha[..run.head_sha.len().min(7)]
        ));
        if !self.jobs.is_empty() {
            out.push_str("\nJobs\n");
            for job in &self.jobs {
                out.push_str(&format!("  {}\n", job_line(job, style)));
                for step in job.steps.iter().filter(|s| {
                    !matches!(s.conclusion.as_deref(), Some("success") | Some("skipped"))
                }) {
                    let outcome = step.conclusion.as_deref().unwrap_or(&step.status);
                    out.push_str(&format!("    {} {}\n", style.state(outcome), step.name));
                }
            }
        }
        out.push_str(&format!("\n{}\n", style.dim(&run.html_url)));
        out
    }

    fn markdown(&self) -> String {
        let run = &self.run;
        let mut out = format!(
            "# {} #{}\n\n- **Status:** {}\n- **Event:** {}\n- **Branch:** {}\n- **URL:** {}\n",
            run.name.as_deref().unwrap_or("workflow run"),
            run.run_number,
            run.outcome(),
            run.event,
            or_dash(run.head_branch.as_deref()),
            run.html_url
        );
        if !self.jobs.is_empty() {
            let rows: Vec<Vec<String>> = self
                .jobs
                .iter()
                .map(|j| {
                    vec![
                        j.name.clone(),
                        j.conclusion.clone().unwrap_or_else(|| j.status.clone()),
                    ]
                })
                .collect();
            out.push_str(&format!("\n## Jobs\n\n{}", markdown_table(&["Job", "Result"], &rows)));
        }
        out
    }
}

// ============================================================================
// Search results
// ============================================================================

fn search_footer<T>(results: &SearchResults<T>, style: &Style) -> String {
    format!(
        "\n{}\n",
        style.dim(&format!(
            "Showing {} of {} results",
            results.items.len(),
            results.total_count
        ))
    )
}

impl View for SearchResults<Repository> {
    fn text(&self, style: &Style) -> String {
        if self.items.is_empty() {
            return empty_text(style, "repositories");
        }
        self.items.text(style) + &search_footer(self, style)
    }

    fn markdown(&self) -> String {
        self.items.markdown()
    }

    fn json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.items)
    }
}

fn issue_rows(items: &[IssueHit]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|i| {
            vec![
                format!("{}#{}", i.repository(), i.number),
                first_line(&i.title, 60),
                i.state.clone(),
                date(&i.updated_at).to_string(),
            ]
        })
        .collect()
}

impl View for SearchResults<IssueHit> {
    fn text(&self, style: &Style) -> String {
        if self.items.is_empty() {
            return empty_text(style, "results");
        }
        columns(&issue_rows(&self.items), |col, cell| match col {
            0 => style.color(GREEN, cell),
            2 => style.state(cell.trim_end()) + &" ".repeat(cell.len() - cell.trim_end().len()),
            3 => style.dim(cell),
            _ => cell.to_string(),
        }) + &search_footer(self, style)
    }

    fn markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .items
            .iter()
            .map(|i| {
                vec![
                    format!("[{}#{}]({})", i.repository(), i.number, i.html_url),
                    i.title.clone(),
                    i.state.clone(),
                    i.user.login.clone(),
                ]
            })
            .collect();
        markdown_table(&["Reference", "Title", "State", "Author"], &rows)
    }

    fn json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.items)
    }
}

fn commit_rows(items: &[CommitHit]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|c| {
            let author = c
                .author
                .as_ref()
                .map(|u| u.login.clone())
                .or_else(|| c.commit.author.as_ref().map(|a| a.name.clone()))
                .unwrap_or_else(|| "-".to_string());
            vec![
                c.repository.full_name.clone(),
                c.sha.chars().take(7).collect(),
                first_line(&c.commit.message, 60),
                author,
            ]
        })
        .collect()
}

impl View for SearchResults<CommitHit> {
    fn text(&self, style: &Style) -> String {
        if self.items.is_empty() {
            return empty_text(style, "commits");
        }
        columns(&commit_rows(&self.items), |col, cell| match col {
            1 => style.color(YELLOW, cell),
            3 => style.dim(cell),
            _ => cell.to_string(),
        }) + &search_footer(self, style)
    }

    fn markdown(&self) -> String {
        markdown_table(
            &["Repository", "SHA", "Message", "Author"],
            &commit_rows(&self.items),
        )
    }

    fn json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.items)
    }
}

impl View for SearchResults<CodeHit> {
    fn text(&self, style: &Style) -> String {
        if self.items.is_empty() {
            return empty_text(style, "code results");
        }
        let rows: Vec<Vec<String>> = self
            .items
            .iter()
            .map(|c| vec![c.repository.full_name.clone(), c.path.clone()])
            .collect();
        columns(&rows, |col, cell| match col {
            0 => style.bold(cell),
            _ => cell.to_string(),
        }) + &search_footer(self, style)
    }

    fn markdown(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .items
            .iter()
            .map(|c| {
                vec![
                    c.repository.full_name.clone(),
                    format!("[{}]({})", c.path, c.html_url),
                ]
            })
            .collect();
        markdown_table(&["Repository", "Path"], &rows)
    }

    fn json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.items)
    }
}

// ============================================================================
// Auth
// ============================================================================

impl View for AuthStatus {
    fn text(&self, style: &Style) -> String {
        format!(
            "{}\n  {} Logged in as {} ({})\n  Token: {}\n",
            style.bold(&self.host),
            style.color(GREEN, "✓"),
            style.bold(&self.login),
            self.source,
            self.token
        )
    }

    fn markdown(&self) -> String {
        format!(
            "**{}**: logged in as `{}` ({})\n",
            self.host, self.login, self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::pr::testing::pull_request;
    use crate::types::{Label, User};

    fn check(name: &str, status: &str, conclusion: Option<&str>) -> CheckRun {
        CheckRun {
            id: 1,
            name: name.to_string(),
            status: status.to_string(),
            conclusion: conclusion.map(String::from),
            html_url: None,
            started_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_pr_list_text() {
        let prs = vec![pull_request(12, "feat"), pull_request(3, "fix")];
        let out = prs.text(&Style::plain());
        assert_eq!(out, "#12  PR 12  feat  open\n#3   PR 3   fix   open\n");
    }

    #[test]
    fn test_empty_list_text() {
        let prs: Vec<PullRequest> = vec![];
        assert_eq!(prs.text(&Style::plain()), "No pull requests found\n");
    }

    #[test]
    fn test_pr_view_markdown() {
        let mut pr = pull_request(5, "feat");
        pr.labels = vec![Label {
            name: "bug".to_string(),
            color: None,
        }];
        pr.body = Some("Fixes the thing".to_string());
        let out = pr.markdown();
        assert!(out.starts_with("# PR 5 (#5)\n"));
        assert!(out.contains("- **Labels:** `bug`"));
        assert!(out.ends_with("\nFixes the thing\n"));
    }

    #[test]
    fn test_checks_summary() {
        let summary = ChecksSummary {
            number: 1,
            checks: vec![
                check("build", "completed", Some("success")),
                check("lint", "completed", Some("failure")),
                check("deploy", "in_progress", None),
            ],
        };
        assert_eq!(summary.counts(), (1, 1, 1));
        assert!(!summary.all_passing());
        let out = summary.text(&Style::plain());
        assert!(out.contains("✓  build"));
        assert!(out.contains("X  lint"));
        assert!(out.ends_with("1 passing, 1 failing, 1 pending\n"));
    }

    #[test]
    fn test_search_json_is_items() {
        let results = SearchResults {
            total_count: 10,
            incomplete_results: false,
            items: vec![IssueHit {
                number: 4,
                title: "Crash".to_string(),
                state: "open".to_string(),
                user: User {
                    login: "octo".to_string(),
                    html_url: None,
                    name: None,
                },
                labels: vec![],
                html_url: "https://github.com/o/r/issues/4".to_string(),
                repository_url: "https://api.github.com/repos/o/r".to_string(),
                comments: 0,
                draft: None,
                pull_request: None,
                created_at: "2024-01-01T00:00:00Z".to_string(),
                updated_at: "2024-01-02T00:00:00Z".to_string(),
                closed_at: None,
            }],
        };
        let json = results.json().unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["number"], 4);

        let text = results.text(&Style::plain());
        assert!(text.starts_with("o/r#4  Crash  open  2024-01-02\n"));
        assert!(text.ends_with("Showing 1 of 10 results\n"));
    }
}
