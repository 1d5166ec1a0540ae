use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::error::Error;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use crate::config::ScanConfig;
use crate::models::{
    CandidateRepository, CodeSearchResponse, ProbeOutcome, ReportEntry, SearchQuery,
    SearchResponse,
};
use crate::Args;

pub struct GitHubScanner {
    client: Client,
    token: Option<String>,
    config: ScanConfig,
    progress: ProgressBar,
}

impl GitHubScanner {
    /// Create a new GitHubScanner. An empty token means unauthenticated requests.
    pub fn new(args: &Args, config: ScanConfig) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let token = Some(args.token.trim().to_string()).filter(|t| !t.is_empty());
        if token.is_none() {
            warn!("No GitHub token given, sending unauthenticated requests");
        }

        // Create HTTP client
        let client = Client::builder()
            .user_agent(concat!("github-overflow-scanner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Spinner for the repository and keyword being probed
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")?
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        Ok(GitHubScanner {
            client,
            token,
            config,
            progress,
        })
    }

    /// Search, probe and project: the flagged repositories as report entries.
    pub async fn run(&self, max_results: usize) -> Vec<ReportEntry> {
        self.progress.enable_steady_tick(Duration::from_millis(80));
        let flagged = self.search_repositories(max_results).await;
        self.progress.finish_and_clear();

        flagged.iter().map(ReportEntry::from).collect()
    }

    /// Page through the repository search and keep the repositories that
    /// use at least one unsafe function, up to `max_results`.
    ///
    /// Errors end the search early; whatever was collected so far is returned.
    pub async fn search_repositories(&self, max_results: usize) -> Vec<CandidateRepository> {
        let mut flagged = Vec::new();
        let mut page: u32 = 1;

        while flagged.len() < max_results {
            let query = SearchQuery::new(&self.config, page);
            self.progress.set_message(format!("Fetching repository page {}", page));

            // Transport failures and error statuses end the search
            let response = match self.fetch_page(&query).await {
                Ok(response) => response,
                Err(e) => {
                    error!("API error on page {}: {}", page, e);
                    break;
                }
            };

            let last_page = response.is_last_page(&query);
            if page == 1 {
                if let Some(total) = response.total_count {
                    info!("Search matched {} repositories", total);
                }
            }

            // A body without items is how GitHub reports a rejected query
            let items = match response.items {
                Some(items) => items,
                None => {
                    error!(
                        "API error: {}",
                        response.message.as_deref().unwrap_or("Unknown error")
                    );
                    break;
                }
            };

            info!("Page {}: {} candidate repositories", page, items.len());

            // Probe each candidate until enough repositories are flagged
            for repo in items {
                if self.has_potential_overflow(&repo).await {
                    flagged.push(repo);
                    if flagged.len() >= max_results {
                        break;
                    }
                }
            }

            if last_page {
                debug!("Page {} was the last page", page);
                break;
            }
            if flagged.len() >= max_results {
                break;
            }

            // Fixed pause before the next page
            page += 1;
            sleep(self.config.page_pause).await;
        }

        info!("Collected {} flagged repositories", flagged.len());
        flagged
    }

    /// Fetch one page of the repository search.
    async fn fetch_page(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse, Box<dyn Error + Send + Sync>> {
        let url = self.config.repository_search_url();
        debug!("Requesting {} page {}", url, query.page);

        let response = self.get(&url).query(&query.params()).send().await?;
        let status = response.status();
        // Read the body once so error statuses can still report GitHub's message
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<SearchResponse>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(match message {
                Some(message) => format!("{} ({})", status, message),
                None => status.to_string(),
            }
            .into());
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Probe the keywords in order and stop at the first one the code
    /// search finds in `repo`.
    pub async fn has_potential_overflow(&self, repo: &CandidateRepository) -> bool {
        let hits = stream::iter(self.config.keywords.iter())
            .filter(|keyword| self.keyword_hit(repo, keyword.as_str()));
        let mut hits = std::pin::pin!(hits);

        match hits.next().await {
            Some(keyword) => {
                info!("! Found: {} in {}", keyword, repo.full_name);
                true
            }
            None => false,
        }
    }

    /// Run one probe and apply the fixed pauses that follow it.
    async fn keyword_hit(&self, repo: &CandidateRepository, keyword: &str) -> bool {
        self.progress
            .set_message(format!("Probing {} for '{}'", repo.full_name, keyword));

        let outcome = self.probe_keyword(repo, keyword).await;
        if outcome == ProbeOutcome::RateLimited {
            warn!(
                "Rate limit exceeded while probing {}. Waiting {} seconds...",
                repo.full_name,
                self.config.rate_limit_pause.as_secs()
            );
            sleep(self.config.rate_limit_pause).await;
        }
        sleep(self.config.probe_pause).await;

        outcome.is_hit()
    }

    /// Ask the code search whether `keyword` occurs anywhere in `repo`.
    pub async fn probe_keyword(&self, repo: &CandidateRepository, keyword: &str) -> ProbeOutcome {
        let q = format!("{} repo:{}", keyword, repo.full_name);
        let response = match self
            .get(&self.config.code_search_url())
            .query(&[("q", q.as_str()), ("per_page", "1")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Search failed for '{}': {}", q, e);
                return ProbeOutcome::Failed;
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<CodeSearchResponse>().await {
                Ok(body) if body.total_count > 0 => ProbeOutcome::Hit(body.total_count),
                Ok(_) => ProbeOutcome::Miss,
                Err(e) => {
                    error!("Search failed for '{}': {}", q, e);
                    ProbeOutcome::Failed
                }
            },
            StatusCode::FORBIDDEN => ProbeOutcome::RateLimited,
            status => {
                debug!("Code search returned {} for '{}'", status, q);
                ProbeOutcome::Miss
            }
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}
