use clap::Parser;

/// Finds recently active C/C++ projects on GitHub whose code calls
/// functions that are prone to buffer overflows.
#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about,
    long_about = "Searches GitHub for active C/C++ repositories and flags those whose code uses unsafe string or memory functions such as strcpy, gets or sprintf."
)]
pub struct Args {
    /// GitHub API token used for both the repository and the code search.
    /// An empty value sends unauthenticated requests.
    #[clap(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Maximum number of flagged repositories to report.
    #[clap(
        short,
        long,
        value_name = "NUM",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub results: u32,
}
