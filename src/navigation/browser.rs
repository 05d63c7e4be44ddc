//! Page fetching with remembered login
//!
//! A [`Browser`] owns the run's [`Session`]. After a successful login it keeps
//! the login parameters, so an auth wall hit later (401 or 403) is answered by
//! rebuilding the session from scratch and logging in again.

use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::NavigatorError;
use crate::navigation::form::{FormDescriptor, LoginForm};
use crate::session::{Credentials, Session};

/// A fetched page
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects
    pub url: Url,
    pub status: u16,
    pub body: String,
}

impl Page {
    async fn from_response(response: reqwest::Response) -> Result<Self, NavigatorError> {
        let url = response.url().clone();
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self { url, status, body })
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

#[derive(Debug, Clone)]
struct LoginParams {
    root: String,
    credentials: Option<Credentials>,
    form: Option<FormDescriptor>,
    verbosity: u8,
}

#[derive(Debug)]
pub struct Browser {
    session: Session,
    login: Option<LoginParams>,
}

impl Browser {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            login: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.login.is_some()
    }

    /// Opens `root` and, with a form descriptor, submits the login form found there.
    ///
    /// Returns the last page of the procedure.
    pub async fn login(
        &mut self,
        root: &str,
        credentials: Option<Credentials>,
        form: Option<FormDescriptor>,
        verbosity: u8,
    ) -> Result<Page, NavigatorError> {
        let params = LoginParams {
            root: root.to_string(),
            credentials,
            form,
            verbosity,
        };

        let page = do_login(&self.session, &params).await?;
        self.login = Some(params);
        Ok(page)
    }

    /// Replaces the session with a fresh one and replays the remembered login.
    ///
    /// The replay never echoes pages, whatever the verbosity of the first login.
    pub async fn relogin(&mut self) -> Result<Page, NavigatorError> {
        let params = self.replay_params()?;
        info!("logging in again to {}", params.root);

        self.session = self.session.fresh()?;
        do_login(&self.session, &params).await
    }

    fn replay_params(&self) -> Result<LoginParams, NavigatorError> {
        let params = self.login.as_ref().ok_or(NavigatorError::NotLoggedIn)?;
        Ok(LoginParams {
            verbosity: 0,
            ..params.clone()
        })
    }

    /// GETs `url`, logging in again once if the server answers 401 or 403.
    pub async fn open(&mut self, url: &str) -> Result<Page, NavigatorError> {
        let page = fetch(&self.session, url).await?;

        let auth_wall = matches!(
            StatusCode::from_u16(page.status),
            Ok(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        );
        if auth_wall && self.is_logged_in() {
            warn!("{} answered {}, session may have expired", url, page.status);
            self.relogin().await?;
            return fetch(&self.session, url).await;
        }

        Ok(page)
    }
}

async fn fetch(session: &Session, url: &str) -> Result<Page, NavigatorError> {
    let response = session.client().get(url).send().await?;
    let page = Page::from_response(response).await?;
    debug!("GET {} -> {}", url, page.status);
    Ok(page)
}

async fn do_login(session: &Session, params: &LoginParams) -> Result<Page, NavigatorError> {
    let page = fetch(session, &params.root).await?;
    if params.verbosity > 1 {
        display_page(&page, "login-form");
    }
    if !page.is_ok() {
        return Err(NavigatorError::LoginPage {
            url: params.root.clone(),
            status: page.status,
        });
    }

    let Some(descriptor) = &params.form else {
        return Ok(page);
    };

    let form = LoginForm::parse(&page.body, &page.url, descriptor, params.credentials.as_ref())?;
    info!("submitting login form to {}", form.action);
    let response = form.request(session).send().await?;
    let result = Page::from_response(response).await?;

    if params.verbosity > 1 {
        display_page(&result, "login-response");
    }
    if !result.is_ok() {
        return Err(NavigatorError::LoginRejected {
            url: form.action.to_string(),
            status: result.status,
        });
    }

    Ok(result)
}

fn display_page(page: &Page, header: &str) {
    let text = html2md::rewrite_html(&page.body, false);
    println!("{}", banner(&text, header));
}

/// Frames `text` between dashed rules, `header` centered in the top one.
pub fn banner(text: &str, header: &str) -> String {
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    let mut padding = widest.saturating_sub(header.chars().count()).max(6);
    if padding % 2 == 1 {
        padding += 1;
    }
    let side = "-".repeat(padding / 2);
    let bottom = "-".repeat(padding + header.chars().count());

    format!("{side}{header}{side}\n\n{text}\n\n{bottom}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;
    use mockito::Server;
    use std::time::Duration;

    fn browser() -> Browser {
        Browser::new(
            Session::new(SessionOptions {
                user_agent: "checksum-url-test".to_string(),
                timeout: Duration::from_secs(5),
            })
            .unwrap(),
        )
    }

    #[test]
    fn banner_centers_header_over_text() {
        let framed = banner("0123456789abcdefghij", "resp");

        let lines: Vec<&str> = framed.lines().collect();
        assert_eq!(lines[0], "--------resp--------");
        assert_eq!(lines[2], "0123456789abcdefghij");
        assert_eq!(lines[4], "-".repeat(20));
    }

    #[test]
    fn banner_keeps_minimum_rule_for_short_text() {
        assert!(banner("x", "login-form").starts_with("---login-form---\n"));
    }

    #[tokio::test]
    async fn login_without_form_opens_root() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/downloads")
            .with_status(200)
            .with_body("<a href='a-1.0.zip'>a</a>")
            .create_async()
            .await;

        let mut browser = browser();
        let page = browser
            .login(&format!("{}/downloads", server.url()), None, None, 0)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(page.is_ok());
        assert!(browser.is_logged_in());
    }

    #[tokio::test]
    async fn login_fails_when_root_is_not_ok() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/login")
            .with_status(500)
            .create_async()
            .await;

        let mut browser = browser();
        let error = browser
            .login(&format!("{}/login", server.url()), None, None, 0)
            .await
            .unwrap_err();

        assert!(matches!(error, NavigatorError::LoginPage { status: 500, .. }));
        assert!(error.is_authentication());
        assert!(!browser.is_logged_in());
    }

    #[tokio::test]
    async fn relogin_replays_quietly() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/login")
            .with_status(200)
            .with_body("<p>welcome</p>")
            .expect(2)
            .create_async()
            .await;
        let root = format!("{}/login", server.url());

        let mut browser = browser();
        browser.login(&root, None, None, 2).await.unwrap();

        let replay = browser.replay_params().unwrap();
        assert_eq!(replay.verbosity, 0);
        assert_eq!(replay.root, root);
        assert_eq!(browser.login.as_ref().map(|params| params.verbosity), Some(2));

        let page = browser.relogin().await.unwrap();
        assert!(page.is_ok());
    }

    #[tokio::test]
    async fn relogin_requires_previous_login() {
        let error = browser().relogin().await.unwrap_err();
        assert!(matches!(error, NavigatorError::NotLoggedIn));
    }

    #[tokio::test]
    async fn open_without_login_returns_auth_wall_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/private")
            .with_status(403)
            .expect(1)
            .create_async()
            .await;

        let page = browser()
            .open(&format!("{}/private", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.status, 403);
    }
}
