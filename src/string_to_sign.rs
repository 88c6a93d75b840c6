use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use url::Url;

use crate::constant::*;

/// The order-sensitive request representation that gets hashed into the
/// string to sign.
///
/// Only `host`, `x-amz-date` and `x-api-key` are signed, always in that
/// order. The query string is taken verbatim; parameters are neither sorted
/// nor re-encoded, which is only correct while no endpoint takes query
/// parameters.
#[derive(Debug, Clone)]
pub struct CanonicalRequest<'a> {
    method: &'a str,
    host: String,
    path: &'a str,
    query: &'a str,
    timestamp: String,
    api_key: &'a str,
    payload_hex: String,
}

impl<'a> CanonicalRequest<'a> {
    pub fn new(
        method: &'a str,
        url: &'a Url,
        date: DateTime<Utc>,
        api_key: &'a str,
        payload: &str,
    ) -> Self {
        Self {
            method,
            host: authority(url),
            path: url.path(),
            query: url.query().unwrap_or(""),
            timestamp: date.format(TIMESTAMP_FORMAT).to_string(),
            api_key,
            payload_hex: payload_hex(payload),
        }
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn canonical_header(&self) -> String {
        let mut res = String::new();
        for (name, value) in [
            ("host", self.host.as_str()),
            ("x-amz-date", self.timestamp.as_str()),
            ("x-api-key", self.api_key),
        ] {
            res.push_str(&format!(
                "{headerName}:{headerValue}\n",
                headerName = name,
                headerValue = value,
            ));
        }

        res
    }

    pub fn canonical_string(&self) -> String {
        let mut canonical = String::new();
        canonical.push_str(&format!("{method}\n", method = self.method));
        canonical.push_str(&format!("{path}\n", path = self.path));
        canonical.push_str(&format!("{query}\n", query = self.query));
        canonical.push_str(&format!("{header}\n", header = self.canonical_header()));
        canonical.push_str(&format!("{signed_headers}\n", signed_headers = SIGNED_HEADERS));
        canonical.push_str(&self.payload_hex);

        canonical
    }

    pub fn canonical_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_string());
        hex::encode(hasher.finalize())
    }
}

#[inline]
pub fn payload_hex(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

#[inline]
pub fn scope(date: DateTime<Utc>) -> String {
    format!(
        "{date}/{region}/{service}/{terminator}",
        date = date.format(DATE_FORMAT),
        region = REGION,
        service = SERVICE,
        terminator = TERMINATOR,
    )
}

#[inline]
pub fn string_to_sign(canonical_hex: &str, date: DateTime<Utc>) -> String {
    let formatted_date = date.format(TIMESTAMP_FORMAT).to_string();

    let mut s = String::new();
    s.push_str(&format!("{}\n", ALGO_VALUE));
    s.push_str(&format!("{}\n", formatted_date));
    s.push_str(&format!("{}\n", scope(date)));
    s.push_str(canonical_hex);

    s
}

// Host as it appears on the wire: explicit non-default ports are kept.
fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
