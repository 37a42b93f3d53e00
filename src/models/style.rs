use crate::error::HeadshotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadshotStyle {
    #[default]
    Corporate,
    Creative,
    Editorial,
    TechVisionary,
    Celebrity,
    Artistic,
}

impl HeadshotStyle {
    pub const ALL: [HeadshotStyle; 6] = [
        HeadshotStyle::Corporate,
        HeadshotStyle::Creative,
        HeadshotStyle::Editorial,
        HeadshotStyle::TechVisionary,
        HeadshotStyle::Celebrity,
        HeadshotStyle::Artistic,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => "corporate",
            HeadshotStyle::Creative => "creative",
            HeadshotStyle::Editorial => "editorial",
            HeadshotStyle::TechVisionary => "techvisionary",
            HeadshotStyle::Celebrity => "celebrity",
            HeadshotStyle::Artistic => "artistic",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => "Corporate Classic",
            HeadshotStyle::Creative => "Creative Professional",
            HeadshotStyle::Editorial => "Editorial Portrait",
            HeadshotStyle::TechVisionary => "Tech Visionary",
            HeadshotStyle::Celebrity => "Celebrity Glamour",
            HeadshotStyle::Artistic => "Artistic Rebel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => "Standard LinkedIn-style headshot with neutral background",
            HeadshotStyle::Creative => "Close-up with soft bokeh background and natural lighting",
            HeadshotStyle::Editorial => "Dramatic black and white portrait with artistic lighting",
            HeadshotStyle::TechVisionary => {
                "Silicon Valley innovator with modern tech-forward aesthetic"
            }
            HeadshotStyle::Celebrity => "High-end magazine quality with star power and luxury",
            HeadshotStyle::Artistic => "Bold creative edge with authentic individuality",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => "💼",
            HeadshotStyle::Creative => "✨",
            HeadshotStyle::Editorial => "🎨",
            HeadshotStyle::TechVisionary => "🚀",
            HeadshotStyle::Celebrity => "⭐",
            HeadshotStyle::Artistic => "🎭",
        }
    }

    /// Base prompt sent ahead of every variation block for this style.
    pub fn base_prompt(&self) -> &'static str {
        match self {
            HeadshotStyle::Corporate => CORPORATE_PROMPT,
            HeadshotStyle::Creative => CREATIVE_PROMPT,
            HeadshotStyle::Editorial => EDITORIAL_PROMPT,
            HeadshotStyle::TechVisionary => TECH_VISIONARY_PROMPT,
            HeadshotStyle::Celebrity => CELEBRITY_PROMPT,
            HeadshotStyle::Artistic => ARTISTIC_PROMPT,
        }
    }
}

impl fmt::Display for HeadshotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HeadshotStyle {
    type Err = HeadshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        HeadshotStyle::ALL
            .into_iter()
            .find(|style| style.tag() == wanted)
            .ok_or_else(|| {
                HeadshotError::InvalidStyle(format!(
                    "'{}' (expected one of: {})",
                    s,
                    HeadshotStyle::ALL.map(|style| style.tag()).join(", ")
                ))
            })
    }
}

macro_rules! identity_rules {
    () => {
        "Keep the person's identity exactly: same facial structure, skin tone, eye color, hairstyle and distinguishing features. Do not beautify beyond subtle professional retouching. Output a single photorealistic square portrait."
    };
}

const CORPORATE_PROMPT: &str = concat!(
    "Transform this photo into a classic corporate headshot suitable for LinkedIn and company websites. Subject wears polished business attire. Plain neutral light-grey studio background with a soft gradient. Clean three-point studio lighting, sharp focus on the eyes, shallow depth of field. ",
    identity_rules!()
);

const CREATIVE_PROMPT: &str = concat!(
    "Transform this photo into a creative professional close-up headshot. Smart-casual clothing. Background is a warm, softly blurred environment with creamy bokeh. Natural window-style daylight with a gentle golden tone, relaxed and approachable feel. ",
    identity_rules!()
);

const EDITORIAL_PROMPT: &str = concat!(
    "Transform this photo into a dramatic black and white editorial portrait. Rich tonal range with deep blacks and luminous highlights. Directional low-key lighting sculpting the face, dark seamless background, fine film-like grain. ",
    identity_rules!()
);

const TECH_VISIONARY_PROMPT: &str = concat!(
    "Transform this photo into a modern tech-founder headshot with a Silicon Valley aesthetic. Minimal premium casual wear such as a dark crew-neck or open-collar shirt. Clean contemporary background with subtle cool blue accents and soft architectural blur. Crisp, bright lighting with a slight cinematic rim light. ",
    identity_rules!()
);

const CELEBRITY_PROMPT: &str = concat!(
    "Transform this photo into a high-end magazine cover quality glamour headshot. Elegant, luxurious styling and wardrobe. Rich, softly lit backdrop with tasteful depth. Beauty-dish key light with luminous skin and sparkling catchlights in the eyes, polished red-carpet finish. ",
    identity_rules!()
);

const ARTISTIC_PROMPT: &str = concat!(
    "Transform this photo into a bold artistic portrait with an independent, rebellious edge. Expressive wardrobe true to the subject's personality. Saturated color-gel lighting in complementary tones against a textured backdrop, confident and striking composition. ",
    identity_rules!()
);
