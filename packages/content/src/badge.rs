use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::dates::format_long_date;
use crate::error::{BadgeError, FetchFailure, LastAttempt};
use crate::fetch::Transport;
use crate::locale::Locale;

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitBody,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    date: String,
}

/// Latest commit of `owner/repo` on the GitHub REST API.
pub fn commits_url(owner: &str, repo: &str) -> String {
    format!(
        "https://api.github.com/repos/{}/{}/commits?per_page=1",
        urlencoding::encode(owner),
        urlencoding::encode(repo)
    )
}

/// Author date of the repository's latest commit. One request, no fallback path.
pub async fn fetch_last_commit_date<T: Transport>(
    transport: &T,
    config: &SiteConfig,
) -> Result<NaiveDate, BadgeError> {
    let url = commits_url(&config.github_owner, &config.github_repo);
    let failure = |last| FetchFailure {
        path: url.clone(),
        last,
    };
    let res = transport
        .get(&url)
        .await
        .map_err(|e| failure(LastAttempt::Network(e)))?;
    debug!("badge.fetch: {url} -> {}", res.status);
    if !res.is_success() {
        return Err(failure(LastAttempt::Status(res.status)).into());
    }
    let body = res.body;
    let commits: Vec<CommitEntry> =
        serde_json::from_str(&body).map_err(|e| BadgeError::Malformed(e.to_string()))?;
    let first = commits.into_iter().next().ok_or(BadgeError::Empty)?;
    let raw = first.commit.author.date;
    let date = DateTime::parse_from_rfc3339(&raw)
        .map_err(|_| BadgeError::InvalidDate(raw.clone()))?
        .date_naive();
    info!("badge.fetch: last commit {date}");
    Ok(date)
}

/// Badge label used until the translation tables are available.
pub fn badge_text(date: NaiveDate, locale: Locale) -> String {
    let prefix = match locale {
        Locale::Pt => "Última atualização",
        Locale::En => "Last Update",
    };
    format!("{prefix}: {}", format_long_date(date, locale))
}
