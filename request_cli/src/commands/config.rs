//! The `config` subcommand: show the configuration requests would use.

use request_api::ClientConfig;
use serde::Serialize;

use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct ConfigView<'a> {
    base_url: &'a str,
    timeout_ms: u128,
    with_credentials: bool,
}

pub fn run(config: &ClientConfig, format: &OutputFormat) {
    let view = ConfigView {
        base_url: config.base_url(),
        timeout_ms: config.timeout().as_millis(),
        with_credentials: config.sends_credentials(),
    };
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            println!("base_url:         {}", view.base_url);
            println!("timeout_ms:       {}", view.timeout_ms);
            println!("with_credentials: {}", view.with_credentials);
        }
    }
}
