pub mod headshot;
pub mod image_client;

use crate::{
    config::{ChainedCredentials, CredentialProvider, GeminiConfig},
    error::{HeadshotError, Result},
    models::{GeneratedImage, HeadshotStyle},
    session::HeadshotSession,
};
use std::sync::Arc;

pub use headshot::HeadshotGenerator;
pub use image_client::{GeminiImageClient, ImageGenerationApi};

#[derive(Clone)]
pub struct HeadshotClient {
    config: GeminiConfig,
    generator: HeadshotGenerator,
}

impl HeadshotClient {
    /// Uses the standard credential chain: `GEMINI_API_KEY`, then the local key store.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Self::with_credentials(config, ChainedCredentials::standard())
    }

    pub fn with_credentials(
        config: GeminiConfig,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self> {
        let api = GeminiImageClient::new(&config)?;
        Ok(Self::with_api(config, Arc::new(api), Arc::new(credentials)))
    }

    pub fn with_api(
        config: GeminiConfig,
        api: Arc<dyn ImageGenerationApi>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let generator = HeadshotGenerator::new(&config, api, credentials);
        Self { config, generator }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn generator(&self) -> &HeadshotGenerator {
        &self.generator
    }

    /// Generates with the style's own base prompt.
    pub async fn generate_headshots(
        &self,
        source_image: &str,
        style: HeadshotStyle,
    ) -> Result<Vec<GeneratedImage>> {
        self.generator
            .generate(source_image, style, style.base_prompt())
            .await
    }

    /// Runs generation for the session's photo and style and stores the
    /// results in it. On error the session's previous results are kept.
    pub async fn generate_for_session<'a>(
        &self,
        session: &'a mut HeadshotSession,
    ) -> Result<&'a [GeneratedImage]> {
        let original = session
            .original()
            .ok_or_else(|| HeadshotError::InvalidImage("No photo uploaded".into()))?
            .to_string();

        let images = self.generate_headshots(&original, session.style()).await?;
        session.set_results(images);
        Ok(session.results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticCredentials;
    use crate::models::{GenerateContentRequest, GenerateContentResponse, Variation};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoApi {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageGenerationApi for EchoApi {
        async fn generate_content(
            &self,
            _model: &str,
            _api_key: &str,
            request: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse> {
            self.prompts
                .lock()
                .unwrap()
                .push(request.prompt().unwrap_or_default().to_string());
            Ok(GenerateContentResponse::with_image("QUJD"))
        }
    }

    fn client(api: Arc<EchoApi>) -> HeadshotClient {
        HeadshotClient::with_api(
            GeminiConfig::new().sequential(),
            api,
            Arc::new(StaticCredentials::new("key")),
        )
    }

    #[tokio::test]
    async fn test_generate_headshots_uses_style_prompt() {
        let api = Arc::new(EchoApi::default());
        let images = client(api.clone())
            .generate_headshots("XYZ", HeadshotStyle::Editorial)
            .await
            .unwrap();
        assert_eq!(images.len(), 3);

        let prompts = api.prompts.lock().unwrap().clone();
        for (prompt, variation) in prompts.iter().zip(Variation::ALL) {
            assert_eq!(
                *prompt,
                variation.compose(HeadshotStyle::Editorial.base_prompt())
            );
        }
    }

    #[tokio::test]
    async fn test_generate_for_session() {
        let api = Arc::new(EchoApi::default());
        let client = client(api);

        let mut session = HeadshotSession::new();
        assert!(client.generate_for_session(&mut session).await.is_err());

        session.load_original("data:image/png;base64,XYZ");
        session.select_style(HeadshotStyle::Artistic);
        let results = client.generate_for_session(&mut session).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(session.selected_index(), 0);
    }
}
