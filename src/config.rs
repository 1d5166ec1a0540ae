use chrono::{Duration as DateDuration, NaiveDate, Utc};
use tokio::time::Duration;

pub const GITHUB_API_URL: &str = "https://api.github.com";

pub const DEFAULT_MIN_STARS: u32 = 10;

/// Repositories must have been pushed to within this many days.
pub const ACTIVITY_WINDOW_DAYS: i64 = 365;

/// Functions whose use hints at buffer-overflow-prone code, in probe order.
pub const BUFFER_OVERFLOW_KEYWORDS: [&str; 10] = [
    "strcpy", "strcat", "gets", "sprintf", "scanf", "memcpy", "memmove", "strncpy", "strncat",
    "fscanf",
];

/// Settings shared by the repository search and the keyword probe.
///
/// Built once at startup and handed to [`crate::GitHubScanner`]. None of
/// these values are exposed on the command line.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Base URL of the GitHub REST API, without a trailing slash.
    pub api_base: String,
    pub min_stars: u32,
    /// Only repositories pushed strictly after this date are searched.
    pub pushed_after: NaiveDate,
    pub languages: Vec<String>,
    pub keywords: Vec<String>,
    /// Repositories requested per search page.
    pub page_size: u32,
    /// Pause between search pages.
    pub page_pause: Duration,
    /// Pause after every keyword probe, hit or not.
    pub probe_pause: Duration,
    /// Pause after the code search answers 403.
    pub rate_limit_pause: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            api_base: GITHUB_API_URL.to_string(),
            min_stars: DEFAULT_MIN_STARS,
            pushed_after: (Utc::now() - DateDuration::days(ACTIVITY_WINDOW_DAYS)).date_naive(),
            languages: vec!["C".to_string(), "C++".to_string()],
            keywords: BUFFER_OVERFLOW_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            page_size: 100,
            page_pause: Duration::from_secs(2),
            probe_pause: Duration::from_secs(2),
            rate_limit_pause: Duration::from_secs(60),
        }
    }
}

impl ScanConfig {
    /// The `q` filter for the repository search,
    /// e.g. `stars:>=10 pushed:>2024-01-31 language:C language:C++`.
    pub fn repository_filter(&self) -> String {
        let mut filter = format!(
            "stars:>={} pushed:>{}",
            self.min_stars,
            self.pushed_after.format("%Y-%m-%d")
        );
        for language in &self.languages {
            filter.push_str(" language:");
            filter.push_str(language);
        }
        filter
    }

    pub fn repository_search_url(&self) -> String {
        format!("{}/search/repositories", self.api_base.trim_end_matches('/'))
    }

    pub fn code_search_url(&self) -> String {
        format!("{}/search/code", self.api_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_search_syntax() {
        let config = ScanConfig {
            pushed_after: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            ..ScanConfig::default()
        };
        assert_eq!(
            config.repository_filter(),
            "stars:>=10 pushed:>2024-01-31 language:C language:C++"
        );
    }

    #[test]
    fn cutoff_is_one_year_back() {
        let config = ScanConfig::default();
        let days = (Utc::now().date_naive() - config.pushed_after).num_days();
        assert!((ACTIVITY_WINDOW_DAYS..=ACTIVITY_WINDOW_DAYS + 1).contains(&days));
    }

    #[test]
    fn keywords_keep_declared_order() {
        let config = ScanConfig::default();
        assert_eq!(config.keywords.len(), 10);
        assert_eq!(config.keywords.first().map(String::as_str), Some("strcpy"));
        assert_eq!(config.keywords.last().map(String::as_str), Some("fscanf"));
    }

    #[test]
    fn pauses_are_fixed() {
        let config = ScanConfig::default();
        assert_eq!(config.page_pause, Duration::from_secs(2));
        assert_eq!(config.probe_pause, Duration::from_secs(2));
        assert_eq!(config.rate_limit_pause, Duration::from_secs(60));
    }

    #[test]
    fn endpoint_urls_tolerate_trailing_slash() {
        let config = ScanConfig {
            api_base: "http://127.0.0.1:8080/".to_string(),
            ..ScanConfig::default()
        };
        assert_eq!(
            config.repository_search_url(),
            "http://127.0.0.1:8080/search/repositories"
        );
        assert_eq!(config.code_search_url(), "http://127.0.0.1:8080/search/code");
    }
}
