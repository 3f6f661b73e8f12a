//! Search query builders
//!
//! Each builder turns a typed filter struct into GitHub's qualifier syntax:
//! free text first, then `name:value` tokens in a fixed order, joined by single
//! spaces. Values are never quoted or escaped.

use super::filters::{
    CodeSearchFilters, CommitSearchFilters, IssueSearchFilters, PrSearchFilters,
    RepoSearchFilters,
};

/// Accumulates query tokens
#[derive(Debug, Default)]
struct QueryBuilder {
    tokens: Vec<String>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Unqualified free text, verbatim; whitespace-only text is skipped
    fn text(&mut self, text: Option<&str>) -> &mut Self {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            self.tokens.push(text.to_string());
        }
        self
    }

    /// Bare token emitted unconditionally
    fn fixed(&mut self, token: &str) -> &mut Self {
        self.tokens.push(token.to_string());
        self
    }

    /// `name:value` when the value is present and non-empty
    fn scalar(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.tokens.push(format!("{}:{}", name, value));
        }
        self
    }

    /// One `name:value` token per element
    fn each(&mut self, name: &str, values: &[String]) -> &mut Self {
        for value in values.iter().filter(|v| !v.is_empty()) {
            self.tokens.push(format!("{}:{}", name, value));
        }
        self
    }

    /// `name:true` / `name:false` only when explicitly set
    fn boolean(&mut self, name: &str, value: Option<bool>) -> &mut Self {
        if let Some(value) = value {
            self.tokens.push(format!("{}:{}", name, value));
        }
        self
    }

    /// Presence-only token: emitted when set, nothing otherwise
    fn presence(&mut self, token: &str, set: bool) -> &mut Self {
        if set {
            self.tokens.push(token.to_string());
        }
        self
    }

    /// Single `name:a,b,c` token
    fn joined(&mut self, name: &str, values: &[String]) -> &mut Self {
        let values: Vec<&str> = values
            .iter()
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            self.tokens.push(format!("{}:{}", name, values.join(",")));
        }
        self
    }

    fn build(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Build the query for repository search
pub fn build_repo_query(filters: &RepoSearchFilters) -> String {
    QueryBuilder::new()
        .text(filters.query.as_deref())
        .each("user", &filters.owner)
        .scalar("language", filters.language.as_deref())
        .each("topic", &filters.topic)
        .scalar("stars", filters.stars.as_deref())
        .scalar("forks", filters.forks.as_deref())
        .scalar("size", filters.size.as_deref())
        .scalar("followers", filters.followers.as_deref())
        .scalar("topics", filters.number_topics.as_deref())
        .scalar("good-first-issues", filters.good_first_issues.as_deref())
        .scalar("help-wanted-issues", filters.help_wanted_issues.as_deref())
        .scalar("created", filters.created.as_deref())
        .scalar("pushed", filters.updated.as_deref())
        .scalar("license", filters.license.as_deref())
        .each("is", &filters.visibility)
        .boolean("archived", filters.archived)
        .scalar("fork", filters.include_forks.map(|f| f.as_str()))
        .joined("in", &filters.match_in)
        .build()
}

/// Build the query for issue search
///
/// Adds `type:issue` unless `include_prs` is set.
pub fn build_issue_query(filters: &IssueSearchFilters) -> String {
    let app = filters.app.as_ref().map(|a| format!("app/{}", a));

    let mut builder = QueryBuilder::new();
    builder.text(filters.query.as_deref());
    if !filters.include_prs {
        builder.fixed("type:issue");
    }
    builder
        .each("repo", &filters.repo)
        .each("user", &filters.owner)
        .scalar("author", filters.author.as_deref())
        .scalar("author", app.as_deref())
        .scalar("assignee", filters.assignee.as_deref())
        .scalar("mentions", filters.mentions.as_deref())
        .scalar("commenter", filters.commenter.as_deref())
        .scalar("involves", filters.involves.as_deref())
        .scalar("team", filters.team_mentions.as_deref())
        .each("label", &filters.label)
        .scalar("state", filters.state.as_deref())
        .scalar("milestone", filters.milestone.as_deref())
        .scalar("language", filters.language.as_deref())
        .scalar("created", filters.created.as_deref())
        .scalar("updated", filters.updated.as_deref())
        .scalar("closed", filters.closed.as_deref())
        .scalar("comments", filters.comments.as_deref())
        .scalar("reactions", filters.reactions.as_deref())
        .scalar("interactions", filters.interactions.as_deref())
        .each("is", &filters.visibility)
        .boolean("archived", filters.archived)
        .presence("is:locked", filters.locked)
        .presence("no:label", filters.no_label)
        .presence("no:assignee", filters.no_assignee)
        .presence("no:milestone", filters.no_milestone)
        .joined("in", &filters.match_in)
        .build()
}

/// Build the query for pull request search
///
/// Always adds `type:pr`; `merged` maps to `is:merged` / `is:unmerged`.
pub fn build_pr_query(filters: &PrSearchFilters) -> String {
    let app = filters.app.as_ref().map(|a| format!("app/{}", a));
    let merged = filters
        .merged
        .map(|m| if m { "is:merged" } else { "is:unmerged" });

    let mut builder = QueryBuilder::new();
    builder
        .text(filters.query.as_deref())
        .fixed("type:pr")
        .each("repo", &filters.repo)
        .each("user", &filters.owner)
        .scalar("author", filters.author.as_deref())
        .scalar("author", app.as_deref())
        .scalar("assignee", filters.assignee.as_deref())
        .scalar("mentions", filters.mentions.as_deref())
        .scalar("commenter", filters.commenter.as_deref())
        .scalar("involves", filters.involves.as_deref())
        .scalar("team", filters.team_mentions.as_deref())
        .each("label", &filters.label)
        .scalar("state", filters.state.as_deref())
        .scalar("milestone", filters.milestone.as_deref())
        .scalar("language", filters.language.as_deref())
        .scalar("created", filters.created.as_deref())
        .scalar("updated", filters.updated.as_deref())
        .scalar("closed", filters.closed.as_deref())
        .scalar("comments", filters.comments.as_deref())
        .scalar("reactions", filters.reactions.as_deref())
        .scalar("interactions", filters.interactions.as_deref())
        .scalar("base", filters.base.as_deref())
        .scalar("head", filters.head.as_deref())
        .boolean("draft", filters.draft);
    if let Some(merged) = merged {
        builder.fixed(merged);
    }
    builder
        .scalar("merged", filters.merged_at.as_deref())
        .scalar("review", filters.review.as_deref())
        .scalar("reviewed-by", filters.reviewed_by.as_deref())
        .scalar("review-requested", filters.review_requested.as_deref())
        .scalar("team-review-requested", filters.team_review_requested.as_deref())
        .scalar("status", filters.checks.as_deref())
        .each("is", &filters.visibility)
        .boolean("archived", filters.archived)
        .presence("is:locked", filters.locked)
        .presence("no:label", filters.no_label)
        .presence("no:assignee", filters.no_assignee)
        .presence("no:milestone", filters.no_milestone)
        .joined("in", &filters.match_in)
        .build()
}

/// Build the query for commit search
pub fn build_commit_query(filters: &CommitSearchFilters) -> String {
    QueryBuilder::new()
        .text(filters.query.as_deref())
        .each("repo", &filters.repo)
        .each("user", &filters.owner)
        .scalar("author", filters.author.as_deref())
        .scalar("committer", filters.committer.as_deref())
        .scalar("author-name", filters.author_name.as_deref())
        .scalar("author-email", filters.author_email.as_deref())
        .scalar("author-date", filters.author_date.as_deref())
        .scalar("committer-name", filters.committer_name.as_deref())
        .scalar("committer-email", filters.committer_email.as_deref())
        .scalar("committer-date", filters.committer_date.as_deref())
        .scalar("hash", filters.hash.as_deref())
        .scalar("parent", filters.parent.as_deref())
        .scalar("tree", filters.tree.as_deref())
        .boolean("merge", filters.merge)
        .each("is", &filters.visibility)
        .build()
}

/// Build the query for code search
pub fn build_code_query(filters: &CodeSearchFilters) -> String {
    QueryBuilder::new()
        .text(filters.query.as_deref())
        .each("repo", &filters.repo)
        .each("user", &filters.owner)
        .scalar("language", filters.language.as_deref())
        .scalar("filename", filters.filename.as_deref())
        .scalar("extension", filters.extension.as_deref())
        .scalar("size", filters.size.as_deref())
        .joined("in", &filters.match_in)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filters::ForkFilter;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_issue_query_labels_and_state() {
        let filters = IssueSearchFilters {
            query: Some("bug".to_string()),
            label: strings(&["p1", "urgent"]),
            state: Some("open".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_issue_query(&filters),
            "bug type:issue label:p1 label:urgent state:open"
        );
    }

    #[test]
    fn test_issue_query_include_prs_drops_type() {
        let filters = IssueSearchFilters {
            query: Some("crash".to_string()),
            include_prs: true,
            ..Default::default()
        };
        assert_eq!(build_issue_query(&filters), "crash");
    }

    #[test]
    fn test_issue_query_empty_filters() {
        assert_eq!(build_issue_query(&IssueSearchFilters::default()), "type:issue");
    }

    #[test]
    fn test_issue_query_presence_flags() {
        let filters = IssueSearchFilters {
            locked: true,
            no_label: true,
            no_assignee: false,
            ..Default::default()
        };
        assert_eq!(build_issue_query(&filters), "type:issue is:locked no:label");
    }

    #[test]
    fn test_issue_query_app_and_archived_false() {
        let filters = IssueSearchFilters {
            app: Some("dependabot".to_string()),
            archived: Some(false),
            ..Default::default()
        };
        assert_eq!(
            build_issue_query(&filters),
            "type:issue author:app/dependabot archived:false"
        );
    }

    #[test]
    fn test_pr_query_merged_tristate() {
        let mut filters = PrSearchFilters {
            repo: strings(&["o/r"]),
            merged: Some(true),
            ..Default::default()
        };
        assert_eq!(build_pr_query(&filters), "type:pr repo:o/r is:merged");

        filters.merged = Some(false);
        assert_eq!(build_pr_query(&filters), "type:pr repo:o/r is:unmerged");

        filters.merged = None;
        assert_eq!(build_pr_query(&filters), "type:pr repo:o/r");
    }

    #[test]
    fn test_pr_query_review_fields() {
        let filters = PrSearchFilters {
            query: Some("fix".to_string()),
            draft: Some(false),
            review: Some("approved".to_string()),
            reviewed_by: Some("alice".to_string()),
            checks: Some("success".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_pr_query(&filters),
            "fix type:pr draft:false review:approved reviewed-by:alice status:success"
        );
    }

    #[test]
    fn test_repo_query_visibility_repeats_and_match_joins() {
        let filters = RepoSearchFilters {
            query: Some("cli".to_string()),
            visibility: strings(&["public", "internal"]),
            match_in: strings(&["name", "description"]),
            ..Default::default()
        };
        assert_eq!(
            build_repo_query(&filters),
            "cli is:public is:internal in:name,description"
        );
    }

    #[test]
    fn test_repo_query_scalars_and_bools() {
        let filters = RepoSearchFilters {
            owner: strings(&["rust-lang", "tokio-rs"]),
            language: Some("rust".to_string()),
            stars: Some(">100".to_string()),
            updated: Some(">2024-01-01".to_string()),
            archived: Some(true),
            include_forks: Some(ForkFilter::Only),
            ..Default::default()
        };
        assert_eq!(
            build_repo_query(&filters),
            "user:rust-lang user:tokio-rs language:rust stars:>100 pushed:>2024-01-01 archived:true fork:only"
        );
    }

    #[test]
    fn test_repo_query_skips_empty_strings() {
        let filters = RepoSearchFilters {
            query: Some("   ".to_string()),
            language: Some(String::new()),
            topic: strings(&["", "cli"]),
            ..Default::default()
        };
        assert_eq!(build_repo_query(&filters), "topic:cli");
    }

    #[test]
    fn test_free_text_emitted_verbatim() {
        let filters = RepoSearchFilters {
            query: Some("\"exact phrase\"  NOT  draft".to_string()),
            language: Some("go".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_repo_query(&filters),
            "\"exact phrase\"  NOT  draft language:go"
        );
    }

    #[test]
    fn test_repo_query_is_pure() {
        let filters = RepoSearchFilters {
            query: Some("http".to_string()),
            topic: strings(&["client"]),
            ..Default::default()
        };
        assert_eq!(build_repo_query(&filters), build_repo_query(&filters));
    }

    #[test]
    fn test_commit_query() {
        let filters = CommitSearchFilters {
            query: Some("refactor".to_string()),
            repo: strings(&["o/r"]),
            author_email: Some("dev@example.com".to_string()),
            merge: Some(false),
            ..Default::default()
        };
        assert_eq!(
            build_commit_query(&filters),
            "refactor repo:o/r author-email:dev@example.com merge:false"
        );
    }

    #[test]
    fn test_code_query() {
        let filters = CodeSearchFilters {
            query: Some("fn main".to_string()),
            language: Some("rust".to_string()),
            extension: Some("rs".to_string()),
            match_in: strings(&["file", "path"]),
            ..Default::default()
        };
        assert_eq!(
            build_code_query(&filters),
            "fn main language:rust extension:rs in:file,path"
        );
    }
}
