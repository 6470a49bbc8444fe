use request_api::Payload;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Renders a response body. JSON output always emits valid JSON, so a text
/// body becomes a JSON string; text output prints text bodies verbatim.
pub fn render_payload(payload: Payload, format: &OutputFormat) -> String {
    match (payload, format) {
        (payload, OutputFormat::Json) => {
            let value = payload.into_value();
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        }
        (Payload::Json(value), OutputFormat::Text) => value.to_string(),
        (Payload::Text(text), OutputFormat::Text) => text,
    }
}

pub fn print_payload(payload: Payload, format: &OutputFormat) {
    println!("{}", render_payload(payload, format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_quotes_text_bodies() {
        let out = render_payload(Payload::Text("plain".to_string()), &OutputFormat::Json);
        assert_eq!(out, "\"plain\"");
    }

    #[test]
    fn json_output_pretty_prints_objects() {
        let out = render_payload(
            Payload::Json(serde_json::json!({"id": 1})),
            &OutputFormat::Json,
        );
        assert_eq!(out, "{\n  \"id\": 1\n}");
    }

    #[test]
    fn text_output_keeps_bodies_compact() {
        let out = render_payload(
            Payload::Json(serde_json::json!({"id": 1})),
            &OutputFormat::Text,
        );
        assert_eq!(out, "{\"id\":1}");
        let out = render_payload(Payload::Text("plain".to_string()), &OutputFormat::Text);
        assert_eq!(out, "plain");
    }
}
