// Adapters layer: concrete implementations for external systems (classifier, upload staging).

pub mod gemini;
pub mod staging;
