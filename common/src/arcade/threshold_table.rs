use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold<T> {
    pub up_to: u32,
    pub value: T,
}

/// Ordered `(upper bound, value)` pairs. Lookup saturates: any score beyond
/// the last bound maps to the last entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable<T> {
    entries: Vec<Threshold<T>>,
}

impl<T> ThresholdTable<T> {
    pub fn new(entries: Vec<Threshold<T>>) -> Result<Self, String> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, T)>) -> Result<Self, String> {
        Self::new(
            pairs
                .into_iter()
                .map(|(up_to, value)| Threshold { up_to, value })
                .collect(),
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.entries.is_empty() {
            return Err("Threshold table must have at least one entry".to_string());
        }
        for pair in self.entries.windows(2) {
            if pair[1].up_to <= pair[0].up_to {
                return Err(format!(
                    "Threshold bounds must be strictly ascending ({} followed by {})",
                    pair[0].up_to, pair[1].up_to
                ));
            }
        }
        Ok(())
    }

    pub fn index_of(&self, score: u32) -> usize {
        self.entries
            .iter()
            .position(|t| score <= t.up_to)
            .unwrap_or(self.entries.len().saturating_sub(1))
    }

    pub fn lookup(&self, score: u32) -> &T {
        &self.entries[self.index_of(score)].value
    }

    pub fn first(&self) -> &T {
        &self.entries[0].value
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|t| &t.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
