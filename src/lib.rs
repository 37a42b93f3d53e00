//! Professional headshot generation on top of Gemini image models.
//!
//! A photo plus one of six [`HeadshotStyle`] presets yields up to three
//! [`GeneratedImage`]s, one per [`Variation`].

pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod session;
pub mod validation;

pub use config::{
    ChainedCredentials, CredentialProvider, DispatchMode, EnvCredentials, GeminiConfig,
    KeyStoreCredentials, StaticCredentials,
};
pub use error::{HeadshotError, Result};
pub use gemini::{GeminiImageClient, HeadshotClient, HeadshotGenerator, ImageGenerationApi};
pub use models::{
    GenerateContentRequest, GenerateContentResponse, GeneratedImage, HeadshotStyle, SourceImage,
    Variation,
};
pub use session::{HeadshotSession, Step};
