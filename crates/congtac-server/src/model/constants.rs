//! Server configuration keys and defaults

/// Product version reported by the server
pub const CONGTAC_VERSION: &str = env!("CARGO_PKG_VERSION");

// Server keys
pub const SERVER_ADDRESS: &str = "congtac.server.address";
pub const SERVER_PORT: &str = "congtac.server.port";
pub const SERVER_CONTEXT_PATH: &str = "congtac.server.context-path";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SERVER_CONTEXT_PATH: &str = "/api";

// Auth keys
pub const TOKEN_SECRET_KEY: &str = "congtac.auth.token.secret.key";
pub const TOKEN_EXPIRE_SECONDS: &str = "congtac.auth.token.expire.seconds";

// Database keys
pub const DB_URL: &str = "db.url";
pub const DB_MAX_CONNECTIONS: &str = "db.pool.max-connections";
pub const DB_MIN_CONNECTIONS: &str = "db.pool.min-connections";
pub const DB_CONNECT_TIMEOUT_SECS: &str = "db.pool.connect-timeout-secs";

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 2;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 10;

// Locale keys
pub const DEFAULT_LANG: &str = "congtac.lang.default";

// Logging keys
pub const LOGS_PATH: &str = "congtac.logs.path";
pub const LOGS_LEVEL: &str = "congtac.logs.level";

// Search limits
pub const SEARCH_DEFAULT_LIMIT: u64 = 20;
pub const SEARCH_MAX_LIMIT: u64 = 100;

// Listing caps carried over from the web client
pub const MEMBER_PREVIEW_LIMIT: u64 = 5;
pub const PROFILE_PROJECTS_LIMIT: u64 = 10;
pub const PROFILE_REVIEWS_LIMIT: u64 = 10;
pub const FEATURED_PROFILES_LIMIT: usize = 4;
pub const FEATURED_FALLBACK_LIMIT: usize = 3;
pub const FEATURED_SKILLS_SHOWN: usize = 2;
pub const FEATURED_CANDIDATE_POOL: u64 = 100;

/// Avatar used when an account has not set one
pub const DEFAULT_AVATAR_URL: &str = "/assets/images/avatar-default-icon.png";
