//! Salesforce SOAP partner login (username + password + security token)

use quick_xml::escape::escape;

use crate::api::error::ApiError;
use crate::config::SalesforceCredentials;

/// An authenticated Salesforce session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    /// Instance base URL, e.g. `https://acme.my.salesforce.com`
    pub instance_url: String,
}

/// Log in against `{login_url}/services/Soap/u/{api_version}`
pub async fn login(
    http: &reqwest::Client,
    login_url: &str,
    api_version: &str,
    credentials: &SalesforceCredentials,
) -> Result<Session, ApiError> {
    let url = format!(
        "{}/services/Soap/u/{}",
        login_url.trim_end_matches('/'),
        api_version
    );
    log::debug!("Salesforce login as {} via {}", credentials.username, url);

    let response = http
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, "text/xml; charset=UTF-8")
        .header("SOAPAction", "login")
        .body(build_login_envelope(credentials))
        .send()
        .await?;

    // Login faults come back as HTTP 500 with a SOAP fault body
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        if let Some(fault) = parse_fault(&body) {
            return Err(ApiError::Auth(fault));
        }
        return Err(ApiError::from_status(status.as_u16(), &body, None));
    }

    parse_login_response(&body)
}

/// SOAP envelope for the partner `login` call; the security token is appended to the password
pub fn build_login_envelope(credentials: &SalesforceCredentials) -> String {
    let password = format!("{}{}", credentials.password, credentials.security_token);

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8" ?>"#,
            r#"<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:env="http://schemas.xmlsoap.org/soap/envelope/" "#,
            r#"xmlns:urn="urn:partner.soap.sforce.com">"#,
            r#"<env:Header><urn:CallOptions><urn:client>sf2hs</urn:client></urn:CallOptions></env:Header>"#,
            r#"<env:Body><n1:login xmlns:n1="urn:partner.soap.sforce.com">"#,
            r#"<n1:username>{}</n1:username><n1:password>{}</n1:password>"#,
            r#"</n1:login></env:Body></env:Envelope>"#
        ),
        escape(credentials.username.as_str()),
        escape(password.as_str())
    )
}

/// Extract session id and instance URL from a successful login response
pub fn parse_login_response(body: &str) -> Result<Session, ApiError> {
    let doc = roxmltree::Document::parse(body)
        .map_err(|e| ApiError::Auth(format!("unreadable login response: {}", e)))?;

    if let Some(fault) = find_text(&doc, "faultstring") {
        return Err(ApiError::Auth(fault));
    }

    let session_id = find_text(&doc, "sessionId")
        .ok_or_else(|| ApiError::Auth("login response has no sessionId".to_string()))?;
    let server_url = find_text(&doc, "serverUrl")
        .ok_or_else(|| ApiError::Auth("login response has no serverUrl".to_string()))?;

    Ok(Session {
        session_id,
        instance_url: instance_url_from_server_url(&server_url),
    })
}

fn parse_fault(body: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(body).ok()?;
    find_text(&doc, "faultstring")
}

fn find_text(doc: &roxmltree::Document<'_>, local_name: &str) -> Option<String> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == local_name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// `https://host/services/Soap/u/57.0/00D...` -> `https://host`
fn instance_url_from_server_url(server_url: &str) -> String {
    match server_url.find("/services/") {
        Some(idx) => server_url[..idx].to_string(),
        None => server_url.trim_end_matches('/').to_string(),
    }
}
