pub const SUMMARY_MAX_COLUMNS: usize = 12;
pub const SUMMARY_MAX_VALUE_CHARS: usize = 40;
pub const SUMMARY_MAX_NUMERIC_COLUMNS: usize = 5;
pub const SUMMARY_MAX_CHARS: usize = 1800;
pub const ELLIPSIS: &str = "...";

pub const DEFAULT_MODEL_NAME: &str = "llama3.1:latest";
pub const DEFAULT_API_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const UPLOAD_FIELD_NAME: &str = "file";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub(crate) const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

pub const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const READ_TIMEOUT_SECS: u64 = 300;
pub const SERVER_HOST: &str = "0.0.0.0";
pub const SERVER_PORT: u16 = 8000;
