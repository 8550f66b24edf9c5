//! Image labels and the per-invocation label batch.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantic tag detected in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Label name (e.g., "Cat")
    #[serde(rename = "Name")]
    pub name: String,

    /// Detection confidence in percent (0-100)
    #[serde(rename = "Confidence")]
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.name, self.confidence)
    }
}

/// Labels accumulated across every image of one invocation.
///
/// Appending never deduplicates; the same name may appear once per image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelBatch {
    labels: Vec<Label>,
}

impl LabelBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one image's labels to the end of the batch.
    pub fn extend(&mut self, labels: impl IntoIterator<Item = Label>) {
        self.labels.extend(labels);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Distinct label names in order of first occurrence.
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.labels
            .iter()
            .map(|label| label.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

impl From<Vec<Label>> for LabelBatch {
    fn from(labels: Vec<Label>) -> Self {
        Self { labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_keeps_duplicates() {
        let mut batch = LabelBatch::new();
        batch.extend(vec![Label::new("Cat", 95.0), Label::new("Pet", 90.0)]);
        batch.extend(vec![Label::new("Cat", 88.0)]);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_distinct_names_first_occurrence_order() {
        let batch = LabelBatch::from(vec![
            Label::new("Outdoor", 81.0),
            Label::new("Cat", 95.0),
            Label::new("Outdoor", 99.0),
            Label::new("Grass", 85.0),
            Label::new("Cat", 90.0),
        ]);
        assert_eq!(batch.distinct_names(), vec!["Outdoor", "Cat", "Grass"]);
    }

    #[test]
    fn test_label_wire_names() {
        let label: Label = serde_json::from_str(r#"{"Name":"Cat","Confidence":95.2}"#).unwrap();
        assert_eq!(label.name, "Cat");
        assert!((label.confidence - 95.2).abs() < f32::EPSILON);
    }
}
