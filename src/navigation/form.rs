//! Login form discovery and submission

use std::sync::LazyLock;

use reqwest::{Method, RequestBuilder};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::NavigatorError;
use crate::session::{Credentials, Session};

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(FORM_SELECTOR, "form");
selector!(CONTROL_SELECTOR, "input, select, textarea, button");
selector!(OPTION_SELECTOR, "option");

/// Which form to fill and the names of its fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDescriptor {
    /// CSS selector; empty means the first form, a number selects by index
    pub selector: String,
    pub username_field: String,
    pub password_field: String,
    /// Name of the submit control to include in the submission, if present
    pub submit_field: String,
}

impl FormDescriptor {
    pub fn new(
        selector: impl Into<String>,
        username_field: impl Into<String>,
        password_field: impl Into<String>,
        submit_field: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            username_field: username_field.into(),
            password_field: password_field.into(),
            submit_field: submit_field.into(),
        }
    }
}

/// A filled-in form ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub action: Url,
    pub method: Method,
    pub fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Selects the form described by `descriptor` in `html` and fills in `credentials`.
    ///
    /// Existing successful controls, hidden ones included, are kept with their values.
    pub fn parse(
        html: &str,
        page_url: &Url,
        descriptor: &FormDescriptor,
        credentials: Option<&Credentials>,
    ) -> Result<Self, NavigatorError> {
        let document = Html::parse_document(html);
        let form = select_form(&document, &descriptor.selector)?;

        let action = match form.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => {
                page_url
                    .join(action)
                    .map_err(|e| NavigatorError::InvalidUrl {
                        url: action.to_string(),
                        reason: e.to_string(),
                    })?
            }
            _ => page_url.clone(),
        };

        let method = match form.value().attr("method") {
            Some(method) if method.eq_ignore_ascii_case("post") => Method::POST,
            _ => Method::GET,
        };

        let mut fields = collect_controls(form, &descriptor.submit_field);
        if let Some(credentials) = credentials {
            set_field(&mut fields, &descriptor.username_field, &credentials.username);
            set_field(&mut fields, &descriptor.password_field, &credentials.password);
        }

        Ok(Self {
            action,
            method,
            fields,
        })
    }

    pub fn request(&self, session: &Session) -> RequestBuilder {
        let request = session
            .client()
            .request(self.method.clone(), self.action.clone());

        if self.method == Method::POST {
            request.form(&self.fields)
        } else {
            request.query(&self.fields)
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn select_form<'a>(document: &'a Html, selector: &str) -> Result<ElementRef<'a>, NavigatorError> {
    let selector = selector.trim();

    if selector.is_empty() {
        return document
            .select(&FORM_SELECTOR)
            .next()
            .ok_or_else(|| NavigatorError::FormNotFound("page has no form".to_string()));
    }

    if let Ok(index) = selector.parse::<usize>() {
        return document
            .select(&FORM_SELECTOR)
            .nth(index)
            .ok_or_else(|| NavigatorError::FormNotFound(format!("no form at index {index}")));
    }

    let parsed = Selector::parse(selector).map_err(|e| {
        NavigatorError::FormNotFound(format!("invalid selector {selector:?}: {e}"))
    })?;

    document
        .select(&parsed)
        .find(|element| element.value().name() == "form")
        .ok_or_else(|| NavigatorError::FormNotFound(format!("no form matches {selector:?}")))
}

fn collect_controls(form: ElementRef<'_>, submit_field: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    for control in form.select(&CONTROL_SELECTOR) {
        let element = control.value();
        let Some(name) = element.attr("name").filter(|name| !name.is_empty()) else {
            continue;
        };
        if element.attr("disabled").is_some() {
            continue;
        }

        let value = element.attr("value").unwrap_or_default();

        match element.name() {
            "input" => {
                let kind = element.attr("type").unwrap_or("text").to_ascii_lowercase();
                match kind.as_str() {
                    "checkbox" | "radio" => {
                        if element.attr("checked").is_some() {
                            let value = element.attr("value").unwrap_or("on");
                            fields.push((name.to_string(), value.to_string()));
                        }
                    }
                    "submit" | "image" | "button" => {
                        if name == submit_field {
                            fields.push((name.to_string(), value.to_string()));
                        }
                    }
                    "reset" | "file" => {}
                    _ => fields.push((name.to_string(), value.to_string())),
                }
            }
            "button" => {
                let kind = element.attr("type").unwrap_or("submit");
                if kind.eq_ignore_ascii_case("submit") && name == submit_field {
                    fields.push((name.to_string(), value.to_string()));
                }
            }
            "select" => {
                let options: Vec<ElementRef<'_>> = control.select(&OPTION_SELECTOR).collect();
                let chosen = options
                    .iter()
                    .find(|option| option.value().attr("selected").is_some())
                    .or_else(|| options.first());
                if let Some(option) = chosen {
                    let value = option
                        .value()
                        .attr("value")
                        .map(str::to_string)
                        .unwrap_or_else(|| option.text().collect::<String>().trim().to_string());
                    fields.push((name.to_string(), value));
                }
            }
            "textarea" => fields.push((name.to_string(), control.text().collect())),
            _ => {}
        }
    }

    fields
}

fn set_field(fields: &mut Vec<(String, String)>, name: &str, value: &str) {
    match fields.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => fields.push((name.to_string(), value.to_string())),
    }
}
