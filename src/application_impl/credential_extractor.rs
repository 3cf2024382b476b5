use crate::application_port::{Credentials, RequestAuth};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// The request carried something that looks like credentials but cannot be
/// parsed as any: wrong scheme, bad Base64, no colon after decoding, or a
/// fallback username with no password. Strictly an error, never a silent
/// fall-through to the next source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed credentials")]
pub struct MalformedCredentials;

/// Pulls a `(username, password)` pair out of the request, or `None` when no
/// credentials were supplied anywhere.
///
/// The `Authorization` header wins; `username`/`password` in the query
/// string, then in form fields, are a legacy fallback. A present header is
/// always parsed strictly, it never falls through to the params.
pub fn extract_credentials(
    request: &RequestAuth,
) -> Result<Option<Credentials>, MalformedCredentials> {
    if let Some(header) = request.authorization.as_deref() {
        return parse_basic_header(header).map(Some);
    }

    let username = request
        .query
        .get("username")
        .or_else(|| request.form.get("username"));
    if let Some(username) = username {
        let password = request
            .query
            .get("password")
            .or_else(|| request.form.get("password"))
            .ok_or(MalformedCredentials)?;
        return Ok(Some(Credentials {
            username: username.clone(),
            password: password.clone(),
        }));
    }

    Ok(None)
}

fn parse_basic_header(header: &str) -> Result<Credentials, MalformedCredentials> {
    let (scheme, payload) = header.split_once(' ').ok_or(MalformedCredentials)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(MalformedCredentials);
    }

    let decoded = STANDARD.decode(payload).map_err(|_| MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| MalformedCredentials)?;

    // Only the first colon delimits; the password may contain more.
    let (username, password) = decoded.split_once(':').ok_or(MalformedCredentials)?;
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn basic(payload: &str) -> RequestAuth {
        RequestAuth {
            authorization: Some(format!("Basic {}", STANDARD.encode(payload))),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_basic_header() {
        let creds = extract_credentials(&basic("alice:correct-pw")).unwrap().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "correct-pw");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let mut request = basic("alice:pw");
        let encoded = request.authorization.take().unwrap();
        request.authorization = Some(encoded.replace("Basic", "bAsIc"));
        assert!(extract_credentials(&request).unwrap().is_some());
    }

    #[test]
    fn only_first_colon_delimits() {
        let creds = extract_credentials(&basic("alice:pw:with:colons")).unwrap().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "pw:with:colons");
    }

    #[test]
    fn empty_password_is_valid() {
        let creds = extract_credentials(&basic("alice:")).unwrap().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn wrong_scheme_is_malformed() {
        let request = RequestAuth {
            authorization: Some("Bearer abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_credentials(&request), Err(MalformedCredentials));
    }

    #[test]
    fn missing_space_is_malformed() {
        let request = RequestAuth {
            authorization: Some("Basic".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_credentials(&request), Err(MalformedCredentials));
    }

    #[test]
    fn invalid_base64_is_malformed() {
        let request = RequestAuth {
            authorization: Some("Basic !!not-base64!!".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_credentials(&request), Err(MalformedCredentials));
    }

    #[test]
    fn missing_colon_is_malformed() {
        assert_eq!(extract_credentials(&basic("alice")), Err(MalformedCredentials));
    }

    #[test]
    fn malformed_header_never_falls_through_to_params() {
        let mut request = RequestAuth {
            authorization: Some("Bearer abc123".to_string()),
            ..Default::default()
        };
        request.query.insert("username".to_string(), "alice".to_string());
        request.query.insert("password".to_string(), "pw".to_string());
        assert_eq!(extract_credentials(&request), Err(MalformedCredentials));
    }

    #[test]
    fn falls_back_to_query_params() {
        let mut request = RequestAuth::default();
        request.query.insert("username".to_string(), "alice".to_string());
        request.query.insert("password".to_string(), "pw".to_string());
        let creds = extract_credentials(&request).unwrap().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "pw");
    }

    #[test]
    fn falls_back_to_form_fields() {
        let mut request = RequestAuth::default();
        request.form.insert("username".to_string(), "bob".to_string());
        request.form.insert("password".to_string(), "pw".to_string());
        let creds = extract_credentials(&request).unwrap().unwrap();
        assert_eq!(creds.username, "bob");
    }

    #[test]
    fn header_wins_over_params() {
        let mut request = basic("alice:header-pw");
        request.query.insert("username".to_string(), "mallory".to_string());
        request.query.insert("password".to_string(), "query-pw".to_string());
        let creds = extract_credentials(&request).unwrap().unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "header-pw");
    }

    #[test]
    fn fallback_username_without_password_is_malformed() {
        let mut request = RequestAuth::default();
        request.query.insert("username".to_string(), "alice".to_string());
        assert_eq!(extract_credentials(&request), Err(MalformedCredentials));
    }

    #[test]
    fn nothing_supplied_is_none() {
        let request = RequestAuth {
            authorization: None,
            query: HashMap::new(),
            form: HashMap::new(),
        };
        assert_eq!(extract_credentials(&request), Ok(None));
    }
}
