use crate::error::{HeadshotError, Result};
use crate::models::{GeneratedImage, HeadshotStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Upload,
    ChooseStyle,
    Results,
}

/// State of one upload → style → results cycle.
#[derive(Debug, Clone, Default)]
pub struct HeadshotSession {
    original: Option<String>,
    style: HeadshotStyle,
    results: Vec<GeneratedImage>,
    selected: usize,
}

impl HeadshotSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new photo invalidates any previous results.
    pub fn load_original(&mut self, data_url: impl Into<String>) {
        self.original = Some(data_url.into());
        self.results.clear();
        self.selected = 0;
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn select_style(&mut self, style: HeadshotStyle) {
        self.style = style;
    }

    pub fn style(&self) -> HeadshotStyle {
        self.style
    }

    pub fn set_results(&mut self, results: Vec<GeneratedImage>) {
        self.results = results;
        self.selected = 0;
    }

    pub fn results(&self) -> &[GeneratedImage] {
        &self.results
    }

    pub fn select_image(&mut self, index: usize) -> Result<()> {
        if index >= self.results.len() {
            return Err(HeadshotError::InvalidImage(format!(
                "No generated image at position {} ({} available)",
                index + 1,
                self.results.len()
            )));
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&GeneratedImage> {
        self.results.get(self.selected)
    }

    /// Original photo next to the currently selected result.
    pub fn comparison(&self) -> Option<(&str, &GeneratedImage)> {
        Some((self.original()?, self.selected()?))
    }

    pub fn step(&self) -> Step {
        match (&self.original, self.results.is_empty()) {
            (None, _) => Step::Upload,
            (Some(_), true) => Step::ChooseStyle,
            (Some(_), false) => Step::Results,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variation;

    fn results(n: usize) -> Vec<GeneratedImage> {
        Variation::ALL[..n]
            .iter()
            .map(|v| GeneratedImage::from_payload(*v, "AAA"))
            .collect()
    }

    #[test]
    fn test_steps() {
        let mut session = HeadshotSession::new();
        assert_eq!(session.step(), Step::Upload);
        session.load_original("data:image/png;base64,XYZ");
        assert_eq!(session.step(), Step::ChooseStyle);
        session.set_results(results(3));
        assert_eq!(session.step(), Step::Results);
    }

    #[test]
    fn test_new_upload_clears_results() {
        let mut session = HeadshotSession::new();
        session.load_original("first");
        session.set_results(results(2));
        session.select_image(1).unwrap();

        session.load_original("second");
        assert!(session.results().is_empty());
        assert_eq!(session.selected_index(), 0);
        assert_eq!(session.original(), Some("second"));
    }

    #[test]
    fn test_results_replaced_wholesale() {
        let mut session = HeadshotSession::new();
        session.load_original("photo");
        session.set_results(results(3));
        session.select_image(2).unwrap();

        session.set_results(results(1));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.selected_index(), 0);
        assert!(session.select_image(1).is_err());
    }

    #[test]
    fn test_comparison_and_reset() {
        let mut session = HeadshotSession::new();
        assert!(session.comparison().is_none());

        session.load_original("photo");
        session.select_style(HeadshotStyle::Editorial);
        session.set_results(results(2));
        session.select_image(1).unwrap();
        let (original, selected) = session.comparison().unwrap();
        assert_eq!(original, "photo");
        assert_eq!(selected.variation, Variation::Elevated);

        session.reset();
        assert_eq!(session.step(), Step::Upload);
        assert_eq!(session.style(), HeadshotStyle::Corporate);
        assert!(session.results().is_empty());
    }
}
