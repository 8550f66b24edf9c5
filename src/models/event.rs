//! Upload notification payloads.
//!
//! Mirrors the S3 event notification shape delivered to the function:
//!
//! ```json
//! { "Records": [ { "s3": { "bucket": { "name": "b" }, "object": { "key": "photo.jpg" } } } ] }
//! ```
//!
//! Only the fields the pipeline reads are modeled; anything else in the
//! notification is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A batch of upload notifications for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadEvent {
    /// Notification records, possibly absent in the payload
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

impl UploadEvent {
    /// Build an event from `(bucket, key)` pairs.
    pub fn from_objects<I, B, K>(objects: I) -> Self
    where
        I: IntoIterator<Item = (B, K)>,
        B: Into<String>,
        K: Into<String>,
    {
        Self {
            records: objects
                .into_iter()
                .map(|(bucket, key)| EventRecord::new(bucket, key))
                .collect(),
        }
    }

    /// Flatten the wire records into upload records, preserving order.
    pub fn upload_records(&self) -> impl Iterator<Item = UploadRecord> + '_ {
        self.records.iter().map(EventRecord::to_upload_record)
    }
}

/// One entry of the `Records` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

impl EventRecord {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            s3: S3Entity {
                bucket: S3Bucket {
                    name: bucket.into(),
                },
                object: S3Object { key: key.into() },
            },
        }
    }

    fn to_upload_record(&self) -> UploadRecord {
        UploadRecord {
            container: self.s3.bucket.name.clone(),
            object_path: self.s3.object.key.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Object {
    pub key: String,
}

/// Identifies one uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadRecord {
    /// Bucket holding the object
    pub container: String,
    /// Object key inside the bucket
    pub object_path: String,
}

impl UploadRecord {
    pub fn new(container: impl Into<String>, object_path: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            object_path: object_path.into(),
        }
    }
}

impl fmt::Display for UploadRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.container, self.object_path)
    }
}
