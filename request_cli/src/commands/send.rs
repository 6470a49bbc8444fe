//! The request subcommands (`get`, `post`, `put`, `patch`, `delete`).

use anyhow::{anyhow, Result};
use clap::Args;
use request_api::{Body, Client, Method, RequestConfig};

use crate::output::{print_payload, OutputFormat};

/// Arguments shared by every request subcommand.
#[derive(Args)]
pub struct SendArgs {
    /// URL relative to the base URL, or an absolute URL
    pub url: String,

    /// Header in `Name: value` form (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Query pair in `key=value` form (repeatable)
    #[arg(short, long)]
    pub query: Vec<String>,

    /// Request body; sent as JSON when it parses as JSON, otherwise as text
    #[arg(short, long)]
    pub data: Option<String>,
}

pub fn build_request(method: Method, args: &SendArgs) -> Result<RequestConfig> {
    let mut request = RequestConfig::new(method, &args.url);

    for raw in &args.headers {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid header {:?}, expected `Name: value`", raw))?;
        request = request.with_header(name.trim(), value.trim());
    }

    for raw in &args.query {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid query pair {:?}, expected `key=value`", raw))?;
        request = request.with_query(key, value);
    }

    if let Some(data) = &args.data {
        request.body = Some(match serde_json::from_str(data) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(data.clone()),
        });
    }

    Ok(request)
}

pub async fn run(
    method: Method,
    args: &SendArgs,
    client: &Client,
    format: &OutputFormat,
) -> Result<()> {
    let request = build_request(method, args)?;
    let payload = client.request(request).await?;
    print_payload(payload, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: &str) -> SendArgs {
        SendArgs {
            url: url.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            data: None,
        }
    }

    #[test]
    fn parses_headers_and_query() {
        let mut a = args("/search");
        a.headers = vec!["Authorization: Bearer t0k3n".to_string()];
        a.query = vec!["q=a=b".to_string(), "page=2".to_string()];
        let req = build_request(Method::GET, &a).unwrap();
        assert_eq!(
            req.headers,
            vec![("Authorization".to_string(), "Bearer t0k3n".to_string())]
        );
        assert_eq!(
            req.query,
            vec![
                ("q".to_string(), "a=b".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn rejects_malformed_header() {
        let mut a = args("/x");
        a.headers = vec!["no-colon".to_string()];
        assert!(build_request(Method::GET, &a).is_err());
    }

    #[test]
    fn json_data_becomes_json_body() {
        let mut a = args("/items");
        a.data = Some(r#"{"name":"widget"}"#.to_string());
        let req = build_request(Method::POST, &a).unwrap();
        assert_eq!(
            req.body,
            Some(Body::Json(serde_json::json!({"name": "widget"})))
        );
    }

    #[test]
    fn plain_data_becomes_text_body() {
        let mut a = args("/notes");
        a.data = Some("hello there".to_string());
        let req = build_request(Method::PUT, &a).unwrap();
        assert_eq!(req.body, Some(Body::Text("hello there".to_string())));
    }
}
