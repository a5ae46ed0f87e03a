use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// User cache TTL in seconds (default: 30)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "usersvc.db")
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// DynamoDB table holding the image index (default: "user-images")
    #[allow(dead_code)]
    pub dynamodb_table: String,
    /// Local secondary index sorted by capture time (default: "UserIDTakenAtIndex")
    #[allow(dead_code)]
    pub dynamodb_index: String,
    /// S3 bucket holding image blobs (default: "user-images")
    #[allow(dead_code)]
    pub s3_bucket: String,
    /// Custom AWS endpoint, e.g. LocalStack (default: unset)
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// Root directory for blob paths (default: "images")
    pub blob_directory: String,
    /// Accepted upload extensions (default: [".jpg"])
    pub allowed_extensions: Vec<String>,
    /// Maximum multipart body size in bytes (default: 10 MiB)
    pub max_upload_bytes: usize,
    /// Router request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Deadline for each parallel delete sub-task (default: none)
    pub delete_timeout_seconds: Option<u64>,
    /// Emit JSON logs instead of human-readable ones (default: false)
    pub json_logs: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numbers fall back to their defaults. See the field docs
    /// for the variable defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let string_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            cache_ttl_seconds: parsed(&lookup, "CACHE_TTL_SECONDS").unwrap_or(30),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(10_000),
            sqlite_path: string_or("SQLITE_PATH", "usersvc.db"),
            redis_url: string_or("REDIS_URL", "redis://localhost:6379"),
            dynamodb_table: string_or("DYNAMODB_TABLE", "user-images"),
            dynamodb_index: string_or("DYNAMODB_INDEX", "UserIDTakenAtIndex"),
            s3_bucket: string_or("S3_BUCKET", "user-images"),
            aws_endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
            blob_directory: string_or("BLOB_DIRECTORY", "images"),
            allowed_extensions: string_or("ALLOWED_EXTENSIONS", ".jpg")
                .split(',')
                .map(str::trim)
                .filter(|ext| !ext.is_empty())
                .map(str::to_string)
                .collect(),
            max_upload_bytes: parsed(&lookup, "MAX_UPLOAD_BYTES").unwrap_or(10 * 1024 * 1024),
            request_timeout_seconds: parsed(&lookup, "REQUEST_TIMEOUT_SECONDS").unwrap_or(10),
            delete_timeout_seconds: parsed(&lookup, "DELETE_TIMEOUT_SECONDS"),
            json_logs: lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn delete_timeout(&self) -> Option<Duration> {
        self.delete_timeout_seconds.map(Duration::from_secs)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
