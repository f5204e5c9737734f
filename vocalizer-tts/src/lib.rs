pub mod catalog;
pub mod config;
mod dispatch;
pub mod engine;
pub mod listener;
pub mod platform;
pub mod session;
pub mod synthesis;
pub mod vocalizer;

pub use catalog::{Language, SpeechDatabase, Voice};
pub use config::{SessionOptions, VocalizerConfig};
pub use engine::Engine;
pub use listener::{AudioChunk, Flow, Mark, Outcome, SpeechListener};
pub use platform::Platform;
pub use session::{Param, Session};
pub use synthesis::{Collector, Synthesis};
pub use vocalizer::Vocalizer;

pub use vocalizer_ffi as ffi;
