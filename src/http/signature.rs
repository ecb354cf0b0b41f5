use std::fmt::{Debug, Formatter};

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use log::warn;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

const SIGNATURE_VERSION: &str = "v0";
const MAX_REQUEST_AGE_SECONDS: i64 = 60 * 5;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// The signing secret of the slack app.
///
/// Slack signs every request it sends to the app with this secret, so that requests from bad
/// actors pretending to be slack can be rejected.
#[derive(Clone)]
pub struct SlackSigningSecret {
    secret: String,
}

impl Debug for SlackSigningSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SlackSigningSecret([REDACTED])")
    }
}

impl SlackSigningSecret {
    pub fn new(secret: &str) -> Self {
        Self { secret: secret.to_string() }
    }
}

impl SlackSigningSecret {
    /// Returns true if `signature` is the signature slack would compute for `body` sent at
    /// `timestamp`, and the timestamp is within 5 minutes of `now`.
    fn verify(&self, timestamp: &str, body: &[u8], signature: &str, now: i64) -> bool {
        let Ok(sent_at) = timestamp.parse::<i64>() else {
            return false;
        };
        if (now - sent_at).abs() > MAX_REQUEST_AGE_SECONDS {
            return false;
        }
        let Some(hex_signature) = signature.strip_prefix("v0=") else {
            return false;
        };
        let Ok(signature_bytes) = hex::decode(hex_signature) else {
            return false;
        };
        match self.mac(timestamp, body) {
            Some(mac) => mac.verify_slice(&signature_bytes).is_ok(),
            None => false,
        }
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
        mac.update(body);
        Some(mac)
    }

    /// Signs `body` the same way slack does.
    #[cfg(test)]
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> String {
        let mac = self.mac(timestamp, body).unwrap();
        format!("{}={}", SIGNATURE_VERSION, hex::encode(mac.finalize().into_bytes()))
    }
}

/// Middleware to check if the request was signed by slack with the `SlackSigningSecret`.
pub async fn check_slack_signature_middleware(
    req: Request,
    next: Next,
    secret: SlackSigningSecret,
) -> Result<Response, StatusCode> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;
    let timestamp = header_str(&parts.headers, TIMESTAMP_HEADER);
    let signature = header_str(&parts.headers, SIGNATURE_HEADER);
    if !secret.verify(timestamp, &bytes, signature, Utc::now().timestamp()) {
        warn!("Rejected a request to {} with an invalid slack signature.", parts.uri);
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> &'h str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Bytes,
        http::{HeaderName, HeaderValue},
        middleware::from_fn,
        response::IntoResponse,
        routing::post,
        Router,
    };
    use axum_test::TestServer;

    use super::*;

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const BODY: &str = "command=%2Fplane&text=maketkt+Engineering+Fix+login+bug";
    const RESPONSE_STR: &str = "signed";

    #[test]
    fn verifies_slack_documentation_example() {
        let secret = SlackSigningSecret::new(SECRET);
        let body = "token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";
        let signature = "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503";
        assert!(secret.verify("1531420618", body.as_bytes(), signature, 1531420618))
    }

    #[test]
    fn rejects_stale_timestamps() {
        let secret = SlackSigningSecret::new(SECRET);
        let signature = secret.sign("1531420618", BODY.as_bytes());
        assert!(secret.verify("1531420618", BODY.as_bytes(), &signature, 1531420618 + 60));
        assert!(!secret.verify("1531420618", BODY.as_bytes(), &signature, 1531420618 + 60 * 6))
    }

    #[test]
    fn rejects_malformed_signatures() {
        let secret = SlackSigningSecret::new(SECRET);
        assert!(!secret.verify("1531420618", BODY.as_bytes(), "", 1531420618));
        assert!(!secret.verify("1531420618", BODY.as_bytes(), "v0=not-hex", 1531420618));
        assert!(!secret.verify("yesterday", BODY.as_bytes(), "v0=abcd", 1531420618))
    }

    #[tokio::test]
    async fn responds_with_unauthorized_when_wrong_signature() {
        let server = test_server();
        let timestamp = Utc::now().timestamp().to_string();
        let signature = SlackSigningSecret::new("not the secret").sign(&timestamp, BODY.as_bytes());
        let resp = signed_post(&server, &timestamp, &signature).await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn responds_with_unauthorized_when_no_signature() {
        let server = test_server();
        let resp = server.post("/").bytes(Bytes::from(BODY)).await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn responds_with_200_when_correct_signature() {
        let server = test_server();
        let timestamp = Utc::now().timestamp().to_string();
        let signature = SlackSigningSecret::new(SECRET).sign(&timestamp, BODY.as_bytes());
        let resp = signed_post(&server, &timestamp, &signature).await;
        resp.assert_status_ok();
        resp.assert_text(RESPONSE_STR);
    }

    async fn signed_post(
        server: &TestServer,
        timestamp: &str,
        signature: &str,
    ) -> axum_test::TestResponse {
        server
            .post("/")
            .add_header(
                HeaderName::from_static(TIMESTAMP_HEADER),
                HeaderValue::from_str(timestamp).unwrap(),
            )
            .add_header(
                HeaderName::from_static(SIGNATURE_HEADER),
                HeaderValue::from_str(signature).unwrap(),
            )
            .bytes(Bytes::from(BODY))
            .await
    }

    fn test_server() -> TestServer {
        let secret = SlackSigningSecret::new(SECRET);
        let f = from_fn(move |req, next| check_slack_signature_middleware(req, next, secret.clone()));
        let router = Router::new().route("/", post(endpoint)).route_layer(f);
        TestServer::new(router).unwrap()
    }

    async fn endpoint(body: String) -> impl IntoResponse {
        assert_eq!(body, BODY);
        RESPONSE_STR
    }
}
