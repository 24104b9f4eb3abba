//! External collaborators: the classification service and the document
//! renderer. The traits they implement live in `crate::core`.

pub mod gemini;
pub mod json_render;

pub use gemini::GeminiClassifier;
pub use json_render::JsonRenderer;
