use serde::Deserialize;

use crate::config::ScanConfig;

const NO_DESCRIPTION: &str = "No description";
const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Parameters of one repository search request. Only `page` changes
/// between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub filter: String,
    pub sort: &'static str,
    pub order: &'static str,
    pub per_page: u32,
    pub page: u32,
}

impl SearchQuery {
    pub fn new(config: &ScanConfig, page: u32) -> Self {
        SearchQuery {
            filter: config.repository_filter(),
            sort: "updated",
            order: "desc",
            per_page: config.page_size,
            page,
        }
    }

    pub fn params(&self) -> [(&'static str, String); 5] {
        [
            ("q", self.filter.clone()),
            ("sort", self.sort.to_string()),
            ("order", self.order.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One item of the repository search response.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRepository {
    pub full_name: String,
    pub owner: Owner,
    pub name: String,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub pushed_at: String,
    pub language: Option<String>,
    pub description: Option<String>,
}

/// Body of `GET /search/repositories`. GitHub omits `items` and sets
/// `message` when it rejects a query.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: Option<u64>,
    /// Set when GitHub timed out and returned only part of the page.
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Option<Vec<CandidateRepository>>,
    pub message: Option<String>,
}

impl SearchResponse {
    /// Whether no further page should be requested after this one.
    pub fn is_last_page(&self, query: &SearchQuery) -> bool {
        let Some(items) = &self.items else {
            return true;
        };
        if items.is_empty() {
            return true;
        }
        if let Some(total) = self.total_count {
            if u64::from(query.page) * u64::from(query.per_page) >= total {
                return true;
            }
        }
        // An incomplete page can be short before the end of the results.
        items.len() < query.per_page as usize && !self.incomplete_results
    }
}

/// Body of `GET /search/code`.
#[derive(Debug, Deserialize)]
pub struct CodeSearchResponse {
    pub total_count: u64,
}

/// Result of probing one repository for one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The code search found this many matching files.
    Hit(u64),
    Miss,
    /// The API answered 403.
    RateLimited,
    /// Transport failure or unreadable body.
    Failed,
}

impl ProbeOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ProbeOutcome::Hit(_))
    }
}

/// A flagged repository as shown in the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub owner: String,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub last_updated: String,
    pub language: String,
    pub description: String,
}

impl From<&CandidateRepository> for ReportEntry {
    fn from(repo: &CandidateRepository) -> Self {
        let description = repo
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);

        ReportEntry {
            name: repo.name.clone(),
            owner: repo.owner.login.clone(),
            url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            last_updated: repo.pushed_at.clone(),
            language: repo
                .language
                .clone()
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            description: description.to_string(),
        }
    }
}
