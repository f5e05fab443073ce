use publication_core::approval::VotePolicy;
use publication_core::display::DEFAULT_DATETIME_FORMAT;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Handling of approval votes with out-of-range values (default: strict).
    pub vote_policy: VotePolicy,
    /// strftime pattern for approval and modification times.
    pub datetime_format: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `APPROVAL_VOTE_POLICY` | `strict`                   |
    /// | `DATETIME_FORMAT`      | `%d %B %Y, %I:%M %p`       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let vote_policy = VotePolicy::parse(
            &std::env::var("APPROVAL_VOTE_POLICY").unwrap_or_else(|_| "strict".into()),
        )
        .expect("APPROVAL_VOTE_POLICY must be 'strict' or 'lenient'");

        let datetime_format =
            std::env::var("DATETIME_FORMAT").unwrap_or_else(|_| DEFAULT_DATETIME_FORMAT.into());

        Self {
            host,
            port,
            request_timeout_secs,
            vote_policy,
            datetime_format,
        }
    }
}
