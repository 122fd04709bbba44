//! Typed options derived from a slash-command text
//!
//! Every field has a default and every invalid value falls back to that
//! default. A command is never rejected because of its options.

/// Default number of inference steps (the `--detailed_level` fallback)
pub const DEFAULT_INFERENCE_STEPS: u32 = 28;

/// Default LoRA style scale (the `--mascot_style` fallback)
pub const DEFAULT_STYLE_SCALE: f64 = 1.0;

/// Accepted range for the style scale
pub const STYLE_SCALE_RANGE: std::ops::RangeInclusive<f64> = 0.8..=1.0;

/// Aspect ratio of the generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Wide,
    Tall,
    UltraWide,
    UltraTall,
}

impl AspectRatio {
    /// Parse a flag value; `None` for anything outside the accepted set
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "1:1" => Some(Self::Square),
            "16:9" => Some(Self::Wide),
            "9:16" => Some(Self::Tall),
            "21:9" => Some(Self::UltraWide),
            "9:21" => Some(Self::UltraTall),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Wide => "16:9",
            Self::Tall => "9:16",
            Self::UltraWide => "21:9",
            Self::UltraTall => "9:21",
        }
    }
}

/// Number of images produced per command; the service only supports 1 or 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputCount {
    Single,
    #[default]
    Batch,
}

impl OutputCount {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.parse::<u32>() {
            Ok(1) => Some(Self::Single),
            Ok(4) => Some(Self::Batch),
            _ => None,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Batch => 4,
        }
    }
}

/// Detail level, mapped onto inference step counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    Low,
    Medium,
    High,
}

impl DetailLevel {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn inference_steps(&self) -> u32 {
        match self {
            Self::Low => 28,
            Self::Medium => 40,
            Self::High => 50,
        }
    }
}

/// A fully validated generation request parsed from one slash-command text
#[derive(Debug, Clone, PartialEq)]
pub struct SlashRequest {
    /// Free-text prompt (everything before the first flag)
    pub prompt: String,
    /// Aspect ratio of the generated images
    pub aspect_ratio: AspectRatio,
    /// Number of images to generate
    pub num_outputs: OutputCount,
    /// Inference step count
    pub inference_steps: u32,
    /// LoRA style scale, always inside [0.8, 1.0]
    pub style_scale: f64,
    /// Literal text to render inside the image, when requested
    pub render_text: Option<String>,
}

impl Default for SlashRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            aspect_ratio: AspectRatio::default(),
            num_outputs: OutputCount::default(),
            inference_steps: DEFAULT_INFERENCE_STEPS,
            style_scale: DEFAULT_STYLE_SCALE,
            render_text: None,
        }
    }
}
