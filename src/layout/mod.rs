use serde::{Deserialize, Serialize};

const TABLE_COLUMNS_JSON: &str = include_str!("../../static/table_columns.json");
const DETAIL_ATTRIBUTES_JSON: &str = include_str!("../../static/detail_attributes.json");

/// Column and detail attribute names, fixed at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub columns: Vec<String>,
    pub detail_attributes: Vec<String>,
}

impl TableLayout {
    pub fn embedded() -> Result<Self, String> {
        let columns = parse_names(TABLE_COLUMNS_JSON)
            .map_err(|e| format!("invalid embedded table columns: {e}"))?;
        let detail_attributes = parse_names(DETAIL_ATTRIBUTES_JSON)
            .map_err(|e| format!("invalid embedded detail attributes: {e}"))?;
        Ok(Self {
            columns,
            detail_attributes,
        })
    }
}

fn parse_names(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str::<Vec<String>>(raw)
}
