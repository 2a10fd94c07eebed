pub mod budget;
pub mod record;

pub use budget::{Budget, BudgetProgress};
pub use record::{NewRecord, Record, RecordPatch, RecordType};

use serde::{Deserialize, Deserializer};

/// Deserialize an amount from either a JSON number or a numeric string.
/// Form-based clients submit amounts as strings.
pub(crate) fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {}", s))),
    }
}
