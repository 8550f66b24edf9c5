//! Production implementations of the service seams.

pub mod openai;
#[cfg(feature = "rekognition")]
pub mod rekognition;

pub use openai::OpenAiClient;
#[cfg(feature = "rekognition")]
pub use rekognition::RekognitionDetector;
