use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remaining stock per distinct prize label. Counts are unsigned, and every
/// write from a signed or untrusted source goes through a clamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stock the booth starts the day with.
    pub fn baseline() -> Self {
        [
            ("Sticker", 50),
            ("Pen", 40),
            ("Towel", 5),
            ("Pouch", 10),
            ("Keychain", 20),
            ("Tote Bag", 8),
        ]
        .into_iter()
        .collect()
    }

    /// Unknown labels have nothing left.
    pub fn count(&self, label: &str) -> u32 {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn set_count(&mut self, label: impl Into<String>, count: i64) {
        let clamped = count.clamp(0, u32::MAX as i64) as u32;
        self.0.insert(label.into(), clamped);
    }

    /// Takes one unit of `label`, bottoming out at zero. Returns what is left.
    pub fn decrement(&mut self, label: &str) -> u32 {
        let remaining = self.count(label).saturating_sub(1);
        self.0.insert(label.to_string(), remaining);
        remaining
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|&c| c as u64).sum()
    }

    pub fn any_in_stock(&self) -> bool {
        self.0.values().any(|&c| c > 0)
    }

    /// Overlays `other` on top of `self`; labels only in `self` keep their count.
    pub fn merge(&mut self, other: Inventory) {
        self.0.extend(other.0);
    }

    /// Builds an inventory from a persisted JSON object, coercing whatever
    /// values it finds. Returns `None` when the blob is not an object at all.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(
            map.iter()
                .map(|(label, raw)| (label.clone(), coerce_count(raw)))
                .collect(),
        )
    }

    pub fn to_draft(&self) -> InventoryDraft {
        InventoryDraft(
            self.0
                .iter()
                .map(|(label, count)| (label.clone(), count.to_string()))
                .collect(),
        )
    }
}

impl<L: Into<String>> FromIterator<(L, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (L, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(l, c)| (l.into(), c)).collect())
    }
}

/// Floors a float into a stock count. NaN, infinities and negatives become 0.
pub fn clamp_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(u32::MAX as f64) as u32
}

/// Lenient parse for text typed into the admin panel.
pub fn parse_count(raw: &str) -> u32 {
    raw.trim().parse::<f64>().map(clamp_count).unwrap_or(0)
}

pub fn coerce_count(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n.as_f64().map(clamp_count).unwrap_or(0),
        Value::String(s) => parse_count(s),
        _ => 0,
    }
}

/// Raw, unvalidated edits from the admin panel, one text field per label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryDraft(BTreeMap<String, String>);

impl InventoryDraft {
    pub fn set(&mut self, label: impl Into<String>, raw: impl Into<String>) {
        self.0.insert(label.into(), raw.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }

    pub fn resolve(&self) -> Inventory {
        self.0
            .iter()
            .map(|(label, raw)| (label.clone(), parse_count(raw)))
            .collect()
    }
}
