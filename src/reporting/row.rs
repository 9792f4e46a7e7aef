use serde::{Deserialize, Serialize};

use crate::ledger::Amount;

/// One display line of a financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Amount>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_total: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_title: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlight: bool,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Row {
    pub fn title(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            is_total: false,
            is_title: true,
            highlight: false,
            reference: None,
        }
    }

    pub fn line(label: impl Into<String>, value: Amount) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
            is_total: false,
            is_title: false,
            highlight: false,
            reference: None,
        }
    }

    pub fn total(label: impl Into<String>, value: Amount) -> Self {
        Self {
            is_total: true,
            ..Self::line(label, value)
        }
    }

    pub fn with_ref(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// Finds the value of the first row with the given label.
pub fn row_value(rows: &[Row], label: &str) -> Option<Amount> {
    rows.iter()
        .find(|row| row.label == label)
        .and_then(|row| row.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_serialize_with_the_display_contract() {
        let rows = vec![
            Row::title("ACTIF"),
            Row::total("Total Actif", 10).with_ref("BZ").highlighted(),
        ];
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "label": "ACTIF", "isTitle": true },
                { "label": "Total Actif", "value": 10, "isTotal": true, "highlight": true, "ref": "BZ" }
            ])
        );
        let back: Vec<Row> = serde_json::from_value(json).unwrap();
        assert_eq!(back, rows);
    }
}
