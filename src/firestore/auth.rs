use anyhow::{bail, Context, Error};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::credentials::ServiceAccountKey;

const FIRESTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the service-account key for a short-lived bearer token: sign a
/// JWT with the key's RSA private key and present it at the key's token
/// endpoint under the jwt-bearer grant.
pub fn fetch_access_token(client: &Client, key: &ServiceAccountKey) -> Result<String, Error> {
    let issued_at = Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: FIRESTORE_SCOPE,
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + TOKEN_TTL_SECS,
    };

    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("While trying to parse the service-account private key")?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
        .context("While trying to sign the token assertion")?;

    debug!("requesting access token from {}", key.token_uri);
    let response = client
        .post(&key.token_uri)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .context("While trying to reach the token endpoint")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        bail!("Token exchange failed: status='{status}' message='{body}'");
    }

    let token: TokenResponse = response
        .json()
        .context("While trying to parse the token response")?;
    Ok(token.access_token)
}
