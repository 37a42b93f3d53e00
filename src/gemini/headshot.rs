use crate::{
    config::{CredentialProvider, DispatchMode, GeminiConfig},
    error::{HeadshotError, Result},
    gemini::image_client::ImageGenerationApi,
    logger,
    models::{GenerateContentRequest, GeneratedImage, HeadshotStyle, SourceImage, Variation},
};
use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;

/// Produces the three headshot variations for one photo.
///
/// Holds no per-call state: every `generate` call parses its own input,
/// issues one request per [`Variation`] and returns a fresh result list.
/// A transport or API failure on any variation aborts the whole call and
/// images already received are dropped. A response without an inline image
/// is skipped; only an empty overall result is an error.
#[derive(Clone)]
pub struct HeadshotGenerator {
    api: Arc<dyn ImageGenerationApi>,
    credentials: Arc<dyn CredentialProvider>,
    model: String,
    aspect_ratio: String,
    dispatch: DispatchMode,
}

impl HeadshotGenerator {
    pub fn new(
        config: &GeminiConfig,
        api: Arc<dyn ImageGenerationApi>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            api,
            credentials,
            model: config.model.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
            dispatch: config.dispatch,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn dispatch(&self) -> DispatchMode {
        self.dispatch
    }

    pub async fn generate(
        &self,
        source_image: &str,
        style: HeadshotStyle,
        base_prompt: &str,
    ) -> Result<Vec<GeneratedImage>> {
        let api_key = self.credentials.resolve()?;
        let source = SourceImage::parse(source_image);
        let run_id = Uuid::new_v4();

        log::info!(
            "Generating {} headshot variations [run:{}] style={} model={} mime={} dispatch={:?}",
            Variation::ALL.len(),
            run_id,
            style,
            self.model,
            source.mime_type,
            self.dispatch
        );
        let _timer = logger::timer(&format!("headshots {}", run_id));

        let outcomes = match self.dispatch {
            DispatchMode::Concurrent => {
                try_join_all(
                    Variation::ALL
                        .iter()
                        .map(|v| self.generate_variation(&api_key, &source, base_prompt, *v)),
                )
                .await?
            }
            DispatchMode::Sequential => {
                let mut outcomes = Vec::with_capacity(Variation::ALL.len());
                for variation in Variation::ALL {
                    outcomes.push(
                        self.generate_variation(&api_key, &source, base_prompt, variation)
                            .await?,
                    );
                }
                outcomes
            }
        };

        let images: Vec<GeneratedImage> = outcomes.into_iter().flatten().collect();
        if images.is_empty() {
            log::error!("No variation returned an image [run:{}]", run_id);
            return Err(HeadshotError::GenerationFailure(
                "Failed to generate any images.".into(),
            ));
        }

        log::info!(
            "Generated {}/{} headshots [run:{}]",
            images.len(),
            Variation::ALL.len(),
            run_id
        );
        Ok(images)
    }

    async fn generate_variation(
        &self,
        api_key: &str,
        source: &SourceImage,
        base_prompt: &str,
        variation: Variation,
    ) -> Result<Option<GeneratedImage>> {
        let request = GenerateContentRequest::image_edit(
            &source.mime_type,
            &source.data,
            variation.compose(base_prompt),
            &self.aspect_ratio,
        );

        let response = self
            .api
            .generate_content(&self.model, api_key, &request)
            .await?;

        match response.first_inline_image() {
            Some(payload) => {
                log::debug!(
                    "Variation {} ({}) returned an image",
                    variation.index() + 1,
                    variation.label()
                );
                Ok(Some(GeneratedImage::from_payload(variation, payload)))
            }
            None => {
                log::warn!(
                    "Variation {} ({}) returned no image{}",
                    variation.index() + 1,
                    variation.label(),
                    response
                        .text()
                        .map(|t| format!(": {}", t))
                        .unwrap_or_default()
                );
                Ok(None)
            }
        }
    }
}
