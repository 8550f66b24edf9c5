// src/services/event_reader.rs

//! Selects image uploads from a notification batch.

use crate::models::{EventConfig, UploadEvent, UploadRecord};

/// Filters upload records by file extension.
#[derive(Debug, Clone)]
pub struct EventReader {
    /// Lowercased extensions, each with a leading dot
    suffixes: Vec<String>,
}

impl EventReader {
    pub fn new(config: &EventConfig) -> Self {
        let suffixes = config
            .image_extensions
            .iter()
            .map(|ext| format!(".{}", ext.trim_start_matches('.').to_lowercase()))
            .collect();
        Self { suffixes }
    }

    /// Whether the key ends in an accepted extension, ignoring case.
    pub fn is_image_key(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.suffixes.iter().any(|suffix| key.ends_with(suffix))
    }

    /// Accepted records in event order. Skipped keys are logged, never errors.
    pub fn image_records(&self, event: &UploadEvent) -> Vec<UploadRecord> {
        event
            .upload_records()
            .filter(|record| {
                log::info!("New image uploaded: {}", record);
                if self.is_image_key(&record.object_path) {
                    true
                } else {
                    log::info!("Skipped non-image file: {}", record.object_path);
                    false
                }
            })
            .collect()
    }
}

impl Default for EventReader {
    fn default() -> Self {
        Self::new(&EventConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_case_insensitive_extensions() {
        let reader = EventReader::default();
        assert!(reader.is_image_key("photo.JPG"));
        assert!(reader.is_image_key("dir/Shot.Png"));
        assert!(reader.is_image_key("scan.jpeg"));
    }

    #[test]
    fn test_rejects_other_extensions() {
        let reader = EventReader::default();
        assert!(!reader.is_image_key("anim.gif"));
        assert!(!reader.is_image_key("notes.txt"));
        assert!(!reader.is_image_key("README"));
        assert!(!reader.is_image_key("photo.jpg.bak"));
        assert!(!reader.is_image_key("jpg"));
    }

    #[test]
    fn test_image_records_preserve_order() {
        let event = UploadEvent::from_objects([
            ("b", "one.png"),
            ("b", "doc.pdf"),
            ("c", "two.JPEG"),
        ]);
        let records = EventReader::default().image_records(&event);
        assert_eq!(
            records,
            vec![UploadRecord::new("b", "one.png"), UploadRecord::new("c", "two.JPEG")]
        );
    }

    #[test]
    fn test_empty_event_yields_nothing() {
        assert!(EventReader::default().image_records(&UploadEvent::default()).is_empty());
    }

    #[test]
    fn test_configured_extensions_normalized() {
        let reader = EventReader::new(&EventConfig {
            image_extensions: vec![".WEBP".into()],
        });
        assert!(reader.is_image_key("x.webp"));
        assert!(!reader.is_image_key("x.jpg"));
    }
}
