//! Raw scalar cells as they arrive from the backing table or a request body.

use serde_json::Value;

use crate::models::inventory::Column;

static EMPTY: RawValue = RawValue::Empty;

#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Table cells are always text; blank cells are empty.
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().is_empty() {
            RawValue::Empty
        } else {
            RawValue::Text(cell.to_string())
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Empty,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
            Value::String(s) => RawValue::from_cell(s),
            // Arrays and objects have no scalar meaning here
            Value::Array(_) | Value::Object(_) => RawValue::Empty,
        }
    }

    /// Trimmed text form; `None` for empty cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// Finite decimal value, accepting a comma as decimal separator in text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => n.is_finite().then_some(*n),
            RawValue::Text(s) => s
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite()),
            RawValue::Empty | RawValue::Bool(_) => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            RawValue::Empty => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "y" | "1"
            ),
        }
    }
}

/// One raw row: column name to raw scalar, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, RawValue)>,
}

impl RawRow {
    /// Pairs a header record with one data record from the table.
    pub fn from_cells<'a>(
        headers: impl IntoIterator<Item = &'a str>,
        cells: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let cells = headers
            .into_iter()
            .zip(cells)
            .map(|(h, c)| (h.to_string(), RawValue::from_cell(c)))
            .collect();
        Self { cells }
    }

    /// Builds a row from a JSON object; anything else yields an empty row.
    pub fn from_json(value: &Value) -> Self {
        let cells = value
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(k, v)| (k.clone(), RawValue::from_json(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self { cells }
    }

    /// First non-empty cell whose key names `column`.
    pub fn get(&self, column: Column) -> &RawValue {
        self.cells
            .iter()
            .filter(|(k, _)| column.matches(k))
            .map(|(_, v)| v)
            .find(|v| **v != RawValue::Empty)
            .unwrap_or(&EMPTY)
    }
}
