use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// One wedge on the wheel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prize {
    pub label: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Prize {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), weight: default_weight() }
    }

    pub fn weighted(label: impl Into<String>, weight: f64) -> Self {
        Self { label: label.into(), weight }
    }
}

/// Ordered wedges. Labels may repeat: a repeated label shows up on more of
/// the wheel but still draws from a single stock count.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Catalog(Vec<Prize>);

impl Catalog {
    pub fn new(prizes: Vec<Prize>) -> Self {
        Self(prizes)
    }

    /// The booth wheel. Sticker and Pen appear twice on purpose.
    pub fn booth_default() -> Self {
        Self::new(
            ["Sticker", "Pen", "Towel", "Sticker", "Pouch", "Pen", "Keychain", "Tote Bag"]
                .into_iter()
                .map(Prize::new)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prize> {
        self.0.iter()
    }

    /// Labels in first-seen order, without repeats.
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for prize in &self.0 {
            if !labels.contains(&prize.label.as_str()) {
                labels.push(&prize.label);
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let raw = r#"[{"label":"Pen"},{"label":"Towel","weight":3}]"#;
        let catalog: Catalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.get(0).unwrap().weight, 1.0);
        assert_eq!(catalog.get(1).unwrap().weight, 3.0);
    }

    #[test]
    fn test_distinct_labels_drops_repeats() {
        let catalog = Catalog::booth_default();
        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.distinct_labels(),
            vec!["Sticker", "Pen", "Towel", "Pouch", "Keychain", "Tote Bag"]
        );
    }
}
