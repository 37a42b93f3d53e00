use serde::{Deserialize, Serialize};

/// The three fixed camera/lighting/expression treatments applied on top of a
/// style's base prompt. Declaration order is the result order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variation {
    FrontFacing,
    Elevated,
    LowerAuthoritative,
}

impl Variation {
    pub const ALL: [Variation; 3] = [
        Variation::FrontFacing,
        Variation::Elevated,
        Variation::LowerAuthoritative,
    ];

    pub fn index(&self) -> usize {
        match self {
            Variation::FrontFacing => 0,
            Variation::Elevated => 1,
            Variation::LowerAuthoritative => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variation::FrontFacing => "front-facing engaging",
            Variation::Elevated => "elevated confident",
            Variation::LowerAuthoritative => "lower authoritative",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Variation::FrontFacing => FRONT_FACING,
            Variation::Elevated => ELEVATED,
            Variation::LowerAuthoritative => LOWER_AUTHORITATIVE,
        }
    }

    /// Base prompt followed by this variation's instruction block.
    pub fn compose(&self, base_prompt: &str) -> String {
        let mut prompt = String::with_capacity(base_prompt.len() + self.instructions().len());
        prompt.push_str(base_prompt);
        prompt.push_str(self.instructions());
        prompt
    }
}

const FRONT_FACING: &str = "\n\n=== VARIATION 1 SPECIFIC INSTRUCTIONS ===
Camera Angle: Positioned at exact eye level, creating a direct, equal connection with the viewer.
Face Centering: CRITICAL - The subject's face must be horizontally centered in the frame with their nose aligned to the vertical center line. Eyes positioned one-third from the top. Keep headroom minimal (8-10% of frame height) for this tighter composition.
Expression: PRESERVE THE SUBJECT'S NATURAL EXPRESSION from the original photo. If they're smiling in the original, show a warm, genuine smile with natural warmth in the eyes. If they're neutral or serious in the original, maintain that authentic demeanor. DO NOT add a smile if the original doesn't show teeth or isn't smiling - respect their natural expression. The key is enhancing their authentic energy, not changing it.
Lighting: Bright, even illumination with a slightly stronger key light creating gentle dimension. Shadows are soft and flattering.
Framing: Slightly tighter composition - the face fills more of the frame with less headroom above, creating intimacy and engagement. Ensure the entire head including top of hair is visible - no cropping.
Head Position: Subject's head is turned very subtly (approximately 5-8 degrees) to their left, creating gentle asymmetry while maintaining centered face positioning.
Mood: Approachable, warm, and engaging with bright, optimistic energy.";

const ELEVATED: &str = "\n\n=== VARIATION 2 SPECIFIC INSTRUCTIONS ===
Camera Angle: Positioned slightly above eye level (12-15 degrees), creating a universally flattering downward angle that enhances facial structure.
Face Centering: CRITICAL - Perfect horizontal centering with the subject's nose aligned exactly to the vertical center line of the frame. Eyes positioned precisely one-third down from the top edge. Standard professional headroom (10-12% of frame height).
Expression: MATCH AND HONOR the subject's authentic expression from the original photo. If they're showing warmth or happiness in the original, capture confident, professional warmth - perhaps a more subtle or refined version (closed-mouth if appropriate). If they're serious or contemplative in the original, enhance that with composed confidence and direct engagement. Never force an expression that contradicts their natural energy. Their eyes should be engaged and full of presence.
Lighting: More dramatic contrast with the key light stronger and fill light softer, creating defined but gentle shadows that sculpt the face beautifully. The interplay of light and shadow adds sophistication.
Framing: Classic, balanced professional composition with proper headroom - the gold standard of portrait framing. Full head visible with no cropping at edges.
Head Position: Subject faces directly toward the camera, head perfectly straight and aligned with the frame's center - strong, confident, direct.
Mood: Polished, confident, and sophisticated with professional gravitas.";

const LOWER_AUTHORITATIVE: &str = "\n\n=== VARIATION 3 SPECIFIC INSTRUCTIONS ===
Camera Angle: Positioned slightly below eye level (8-12 degrees), creating a powerful, commanding perspective that conveys authority and presence.
Face Centering: CRITICAL - Subject's face horizontally centered in the frame with nose on the vertical center line. Eyes positioned one-third from top. More generous headroom (12-15% of frame height) to accommodate the wider composition.
Expression: COMPLETELY RESPECT the subject's original expression and energy. If the original shows reserved, serious, or contemplative qualities, amplify that with composed, thoughtful intensity - professional and authoritative without coldness. If the original shows any warmth, maintain subtle warmth in the eyes while keeping the overall demeanor more composed and serious. The expression should feel authentic to who they are, just elevated to editorial quality. Never artificially impose seriousness if it contradicts their natural energy.
Lighting: Softer overall with beautiful wraparound quality - the light seems to envelop the subject gently. Shadows are present but very soft, creating dimension without drama.
Framing: Slightly wider composition showing more of the shoulders and upper body, creating a sense of presence and groundedness. Entire head and hair fully visible within frame.
Head Position: Subject's head is turned very subtly (approximately 5-8 degrees) to their right, creating asymmetry that mirrors Variation 1 but from the opposite direction, while face remains centered.
Mood: Powerful, thoughtful, and substantial with quiet confidence and depth.";
