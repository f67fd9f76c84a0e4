pub mod frame;

use crate::signal::Signal;

pub use frame::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Explicit format first, then the file extension, then text.
pub fn resolve_format(explicit: Option<&str>, path: &str) -> OutputFormat {
    explicit
        .and_then(OutputFormat::parse)
        .or_else(|| infer_format_from_path(path))
        .unwrap_or(OutputFormat::Text)
}

pub fn render_text(columns: &[String], rows: &[Signal]) -> Vec<u8> {
    Renderer::plain().table(columns, rows).into_bytes()
}

pub fn render_json(rows: &[Signal]) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(rows).unwrap_or_else(|_| b"[]".to_vec());
    out.push(b'\n');
    out
}

pub fn render_export(format: OutputFormat, columns: &[String], rows: &[Signal]) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(columns, rows),
        OutputFormat::Json => render_json(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_resolution_prefers_explicit_value() {
        assert_eq!(resolve_format(Some("json"), "out.txt"), OutputFormat::Json);
        assert_eq!(resolve_format(None, "out.JSON"), OutputFormat::Json);
        assert_eq!(resolve_format(Some("yaml"), "out"), OutputFormat::Text);
    }

    #[test]
    fn json_export_keeps_full_records() {
        let rows: Vec<Signal> = vec![serde_json::from_value(json!({
            "Company Name": "Acme",
            "Rank": 1,
            "Extra": "kept"
        }))
        .unwrap()];
        let out: serde_json::Value = serde_json::from_slice(&render_json(&rows)).unwrap();
        assert_eq!(out, json!([{"Company Name": "Acme", "Rank": 1, "Extra": "kept"}]));
    }

    #[test]
    fn json_export_keeps_record_key_order() {
        let rows = crate::loader::parse_collection(
            br#"[{"Rank":1,"Company Name":"Acme","Domain":"acme.io"}]"#,
            "inline",
        )
        .unwrap();
        let out = String::from_utf8(render_json(rows.as_slice())).unwrap();
        let rank = out.find("\"Rank\"").unwrap();
        let name = out.find("\"Company Name\"").unwrap();
        let domain = out.find("\"Domain\"").unwrap();
        assert!(rank < name && name < domain, "keys reordered: {out}");
    }
}
