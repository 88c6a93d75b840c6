use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

use crate::constant::*;
use crate::error::Result;
use crate::{scope, string_to_sign, CanonicalRequest, Credentials};

type HmacSha256 = Hmac<Sha256>;

/// Headers for exactly one outbound request.
///
/// The timestamp is part of the signature, so a `SignedRequest` must be
/// sent with the `X-Amz-Date` it was built with and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub headers: HashMap<String, String>,
    pub timestamp: DateTime<Utc>,
}

impl SignedRequest {
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

pub struct Signer<'s> {
    secret_key: &'s str,
}

impl<'s> Signer<'s> {
    #[inline]
    pub fn new(secret_key: &'s str) -> Self {
        Self { secret_key }
    }

    #[inline]
    pub fn sign(&self, date: DateTime<Utc>, string_to_sign: &str) -> Result<String> {
        let mut key = self.signing_hasher(date)?;
        key.update(string_to_sign.as_bytes());
        let msg = key.finalize().into_bytes();
        Ok(hex::encode(msg))
    }

    #[inline]
    fn signing_hasher(&self, date: DateTime<Utc>) -> Result<HmacSha256> {
        // Step 1: Sign Date
        let date = date.format(DATE_FORMAT).to_string();
        let mut h = HmacSha256::new_from_slice(format!("AWS4{}", self.secret_key).as_bytes())?;
        h.update(date.as_bytes());
        let date_key = h.finalize().into_bytes();

        // Step 2: Sign Date and Region
        let mut date_region_h = HmacSha256::new_from_slice(&date_key)?;
        date_region_h.update(REGION.as_bytes());
        let date_region_key = date_region_h.finalize().into_bytes();

        // Step 3: Sign Date and Region and Service
        let mut date_region_service_h = HmacSha256::new_from_slice(&date_region_key)?;
        date_region_service_h.update(SERVICE.as_bytes());
        let date_region_service_key = date_region_service_h.finalize().into_bytes();

        // Step 4: Final sign
        let mut signing_key_h = HmacSha256::new_from_slice(&date_region_service_key)?;
        signing_key_h.update(TERMINATOR.as_bytes());
        let signing_key = signing_key_h.finalize().into_bytes();

        Ok(HmacSha256::new_from_slice(&signing_key)?)
    }
}

/// Sign a request against the current wall clock.
#[inline]
pub fn sign_request(
    credentials: &Credentials,
    method: &str,
    url: &str,
    extra_headers: Option<&HashMap<String, String>>,
    payload: &str,
) -> Result<SignedRequest> {
    sign_request_at(credentials, method, url, extra_headers, payload, Utc::now())
}

/// Sign a request for a given instant.
///
/// `extra_headers` is accepted but never signed; only `host`, `x-amz-date`
/// and `x-api-key` take part in the signature.
pub fn sign_request_at(
    credentials: &Credentials,
    method: &str,
    url: &str,
    _extra_headers: Option<&HashMap<String, String>>,
    payload: &str,
    now: DateTime<Utc>,
) -> Result<SignedRequest> {
    let url = Url::parse(url)?;
    let canonical = CanonicalRequest::new(method, &url, now, credentials.api_key(), payload);
    let string_to_sign = string_to_sign(&canonical.canonical_hex(), now);
    let signature = Signer::new(credentials.secret_key()).sign(now, &string_to_sign)?;

    let authorization = format!(
        "{algo} Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={sign}",
        algo = ALGO_VALUE,
        access_key = credentials.access_key_id(),
        scope = scope(now),
        signed_headers = SIGNED_HEADERS,
        sign = signature,
    );

    let mut headers = HashMap::new();
    headers.insert(AUTHORIZATION_KEY.into(), authorization);
    headers.insert(AMZ_DATE_KEY.into(), now.format(TIMESTAMP_FORMAT).to_string());
    headers.insert(API_KEY_KEY.into(), credentials.api_key().to_string());
    headers.insert(CONTENT_TYPE_KEY.into(), CONTENT_TYPE_VALUE.into());

    Ok(SignedRequest {
        headers,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    const URL: &str = "https://api.golfbert.com/v1/courses/4803/holes";

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn creds() -> Credentials {
        Credentials::new("test-token", "test-access-key", "test-secret-key")
    }

    fn signature_of(req: &SignedRequest) -> &str {
        let auth = req.header(AUTHORIZATION_KEY).unwrap();
        auth.rsplit("Signature=").next().unwrap()
    }

    #[test]
    fn test_signature_golden() {
        let req = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();
        assert_eq!(
            signature_of(&req),
            "d2e071b21b668e7faca3c39d93220983ba1db7760ef5b7adb89ef82de8890e27"
        );
    }

    #[test]
    fn test_sign_emits_expected_headers() {
        let req = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();

        assert_eq!(req.headers.len(), 4);
        assert_eq!(req.timestamp, fixed_date());
        assert_eq!(req.header(AMZ_DATE_KEY), Some("20240309T140507Z"));
        assert_eq!(req.header(API_KEY_KEY), Some("test-token"));
        assert_eq!(req.header(CONTENT_TYPE_KEY), Some("application/json"));

        let auth = req.header(AUTHORIZATION_KEY).unwrap();
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=test-access-key/20240309/us-east-1/execute-api/aws4_request, \
             SignedHeaders=host;x-amz-date;x-api-key, Signature="
        ));
        let sig = signature_of(&req);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();
        let b = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.header(AUTHORIZATION_KEY), b.header(AUTHORIZATION_KEY));
    }

    #[test]
    fn test_signature_matches_manual_derivation() {
        let now = fixed_date();
        let url = Url::parse(URL).unwrap();
        let canonical = CanonicalRequest::new("GET", &url, now, "test-token", "");
        let sts = string_to_sign(&canonical.canonical_hex(), now);
        let expected = Signer::new("test-secret-key").sign(now, &sts).unwrap();

        let req = sign_request_at(&creds(), "GET", URL, None, "", now).unwrap();
        assert_eq!(signature_of(&req), expected);
    }

    #[test]
    fn test_signature_changes_with_each_input() {
        let base = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();

        let other_access = Credentials::new("test-token", "other-access-key", "test-secret-key");
        let other_secret = Credentials::new("test-token", "test-access-key", "other-secret-key");

        let by_access = sign_request_at(&other_access, "GET", URL, None, "", fixed_date()).unwrap();
        let by_secret = sign_request_at(&other_secret, "GET", URL, None, "", fixed_date()).unwrap();
        let by_time = sign_request_at(
            &creds(),
            "GET",
            URL,
            None,
            "",
            fixed_date() + Duration::seconds(1),
        )
        .unwrap();

        // The access key id is only part of the credential string.
        assert_eq!(signature_of(&by_access), signature_of(&base));
        assert_ne!(by_access.header(AUTHORIZATION_KEY), base.header(AUTHORIZATION_KEY));
        assert_ne!(signature_of(&by_secret), signature_of(&base));
        assert_ne!(signature_of(&by_time), signature_of(&base));

        for req in [&by_access, &by_secret] {
            assert_eq!(req.header(AMZ_DATE_KEY), base.header(AMZ_DATE_KEY));
            assert_eq!(req.header(API_KEY_KEY), base.header(API_KEY_KEY));
        }
        assert_ne!(by_time.header(AMZ_DATE_KEY), base.header(AMZ_DATE_KEY));
    }

    #[test]
    fn test_extra_headers_are_not_signed() {
        let mut extra = HashMap::new();
        extra.insert("X-Custom".to_string(), "value".to_string());

        let plain = sign_request_at(&creds(), "GET", URL, None, "", fixed_date()).unwrap();
        let with_extra =
            sign_request_at(&creds(), "GET", URL, Some(&extra), "", fixed_date()).unwrap();
        assert_eq!(plain, with_extra);
    }

    #[test]
    fn test_payload_changes_signature() {
        let empty = sign_request_at(&creds(), "POST", URL, None, "", fixed_date()).unwrap();
        let body =
            sign_request_at(&creds(), "POST", URL, None, r#"{"test": "data"}"#, fixed_date())
                .unwrap();
        assert_ne!(signature_of(&empty), signature_of(&body));
    }

    #[test]
    fn test_missing_credentials_still_sign() {
        let req =
            sign_request_at(&Credentials::default(), "GET", URL, None, "", fixed_date()).unwrap();
        assert_eq!(req.header(API_KEY_KEY), Some(""));
        assert!(req
            .header(AUTHORIZATION_KEY)
            .unwrap()
            .starts_with("AWS4-HMAC-SHA256 Credential=/20240309/"));
    }

    #[test]
    fn test_invalid_url_is_sign_error() {
        let err = sign_request_at(&creds(), "GET", "not a url", None, "", fixed_date())
            .unwrap_err();
        assert!(matches!(err, crate::Error::SignError(_)));
    }
}
