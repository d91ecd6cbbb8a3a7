//! Remote video generation clients.

mod veo;

pub use veo::{VeoClient, VeoClientBuilder, GEMINI_API_BASE};
