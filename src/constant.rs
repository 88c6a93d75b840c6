pub const AUTHORIZATION_KEY: &str = "Authorization";
pub const AMZ_DATE_KEY: &str = "X-Amz-Date";
pub const API_KEY_KEY: &str = "x-api-key";
pub const CONTENT_TYPE_KEY: &str = "Content-Type";
pub const CONTENT_TYPE_VALUE: &str = "application/json";

pub const ALGO_VALUE: &str = "AWS4-HMAC-SHA256";
pub const REGION: &str = "us-east-1";
pub const SERVICE: &str = "execute-api";
pub const TERMINATOR: &str = "aws4_request";
pub const SIGNED_HEADERS: &str = "host;x-amz-date;x-api-key";

/// Hex SHA-256 of the empty string.
pub const EMPTY_PAYLOAD_HEX: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
pub const DATE_FORMAT: &str = "%Y%m%d";

pub const API_BASE_URL: &str = "https://api.golfbert.com/v1";
pub const PROBE_ENDPOINT: &str = "/courses/4803/holes";

pub const API_TOKEN_ENV: &str = "GOLF_BERT_API_TOKEN";
pub const ACCESS_KEY_ENV: &str = "GOLF_BERT_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "GOLF_BERT_SECRET_KEY";
