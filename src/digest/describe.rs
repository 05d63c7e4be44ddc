//! Short, human-readable causes for transport failures
//!
//! Only used for display; nothing branches on the produced text.

/// PascalCase-ish name for the class of a reqwest failure
pub fn transport_error_name(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "ReadTimeout"
    } else if error.is_connect() {
        "ConnectionError"
    } else if error.is_redirect() {
        "TooManyRedirects"
    } else if error.is_body() {
        "ChunkedEncodingError"
    } else if error.is_decode() {
        "ContentDecodingError"
    } else if error.is_builder() {
        "InvalidURL"
    } else if error.is_request() {
        "RequestError"
    } else {
        "TransportError"
    }
}

/// Splits a PascalCase identifier into lowercase words.
///
/// A word ends before an uppercase letter that follows a lowercase one, and
/// before the last capital of an acronym that starts a new word, so
/// `HTTPError` becomes `http error`.
pub fn humanize_identifier(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (index, &ch) in chars.iter().enumerate() {
        if index > 0 {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|c| c.is_lowercase());
            let boundary = (previous.is_lowercase() && ch.is_uppercase())
                || (previous.is_uppercase() && ch.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(ch.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words.join(" ")
}

/// The humanized cause attached to a failed download
pub fn describe_transport_error(error: &reqwest::Error) -> String {
    humanize_identifier(transport_error_name(error))
}
