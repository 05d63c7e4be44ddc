//! Authenticated GET for downloads
//!
//! With credentials a request is first sent with HTTP Basic auth. When the
//! server answers with anything but 200 and offers a Digest challenge, the
//! request is repeated exactly once with a Digest `Authorization` header.

use digest_auth::{AuthContext, WwwAuthenticateHeader};
use reqwest::header::{AUTHORIZATION, HeaderMap, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode};
use tracing::debug;
use url::Url;

use crate::session::{Credentials, Session};

/// Sends a GET for `url`, authenticating with `credentials` when given.
pub async fn transfer(
    session: &Session,
    url: &str,
    credentials: Option<&Credentials>,
) -> Result<Response, reqwest::Error> {
    let Some(credentials) = credentials else {
        return session.client().get(url).send().await;
    };

    let response = session
        .client()
        .get(url)
        .basic_auth(&credentials.username, Some(&credentials.password))
        .send()
        .await?;

    if response.status() == StatusCode::OK {
        return Ok(response);
    }

    let Some(mut challenge) = digest_challenge(response.headers()) else {
        debug!(
            "basic auth for {} returned {} without a digest challenge",
            url,
            response.status()
        );
        return Ok(response);
    };

    let target = response.url().clone();
    let Some(authorization) = answer(&mut challenge, credentials, &request_uri(&target), None)
    else {
        return Ok(response);
    };
    debug!("retrying {} with digest auth", target);

    session
        .client()
        .get(target)
        .header(AUTHORIZATION, authorization)
        .send()
        .await
}

/// The first Digest challenge among the `WWW-Authenticate` headers
fn digest_challenge(headers: &HeaderMap) -> Option<WwwAuthenticateHeader> {
    headers
        .get_all(WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| {
            value
                .trim_start()
                .get(..6)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("digest"))
        })
        .find_map(|value| digest_auth::parse(value).ok())
}

/// `Authorization` value answering `challenge` for a GET of `uri`.
///
/// `cnonce` is generated when not given.
fn answer(
    challenge: &mut WwwAuthenticateHeader,
    credentials: &Credentials,
    uri: &str,
    cnonce: Option<&str>,
) -> Option<String> {
    let mut context = AuthContext::new(
        credentials.username.as_str(),
        credentials.password.as_str(),
        uri,
    );
    if let Some(cnonce) = cnonce {
        context.set_custom_cnonce(cnonce);
    }

    match challenge.respond(&context) {
        Ok(header) => Some(header.to_header_string()),
        Err(e) => {
            debug!("cannot answer digest challenge for {}: {}", uri, e);
            None
        }
    }
}

/// Path and query of `url`, as used in the digest `uri` parameter
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    const RFC_2617_CHALLENGE: &str = r#"Digest realm="testrealm@host.com", qop="auth,auth-int", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", opaque="5ccc069c403ebaf9f0171e9517f40e41""#;

    fn challenge(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.append(WWW_AUTHENTICATE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn answer_matches_rfc_2617_example() {
        let mut challenge = digest_challenge(&challenge(RFC_2617_CHALLENGE)).unwrap();
        let credentials = Credentials::new("Mufasa", "Circle Of Life");

        let header = answer(&mut challenge, &credentials, "/dir/index.html", Some("0a4f113b")).unwrap();

        assert!(header.starts_with("Digest "));
        assert!(header.contains(r#"username="Mufasa""#));
        assert!(header.contains(r#"response="6629fae49393a05397450978507c4ef1""#));
        assert!(header.contains(r#"opaque="5ccc069c403ebaf9f0171e9517f40e41""#));
    }

    #[test]
    fn answer_without_qop_uses_legacy_form() {
        let mut challenge =
            digest_challenge(&challenge(r#"Digest realm="r", nonce="n", algorithm=SHA-256"#)).unwrap();

        let header = answer(&mut challenge, &Credentials::new("u", "p"), "/f", Some("c")).unwrap();

        assert!(header.contains(r#"uri="/f""#));
        assert!(!header.contains("qop="));
    }

    #[test]
    fn digest_challenge_skips_basic_challenge() {
        let mut headers = challenge(r#"Basic realm="files""#);
        headers.append(
            WWW_AUTHENTICATE,
            HeaderValue::from_static(r#"Digest realm="files", nonce="abc""#),
        );

        let challenge = digest_challenge(&headers).unwrap();
        assert_eq!(challenge.nonce, "abc");
        assert_eq!(challenge.realm, "files");
    }

    #[test]
    fn digest_challenge_ignores_other_schemes() {
        assert!(digest_challenge(&challenge(r#"Basic realm="files""#)).is_none());
        assert!(digest_challenge(&HeaderMap::new()).is_none());
    }

    #[test]
    fn request_uri_keeps_query() {
        let url = Url::parse("https://example.com/files/a.zip?token=1").unwrap();
        assert_eq!(request_uri(&url), "/files/a.zip?token=1");
    }
}
