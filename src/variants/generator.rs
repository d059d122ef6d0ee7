//! Variant Generation
//!
//! Builds the three styled variants for a product, either through an
//! external design service or locally and deterministically.

use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

use crate::error::Result;
use crate::variants::{LayoutEmphasis, ProductData, Variant};

/// Templates rendered locally; the design service is never asked for these.
pub const BUILTIN_TEMPLATE_IDS: [&str; 16] = [
    "ThreePanelVertical",
    "ModernGradient",
    "VibrantOrange",
    "TwoPanelHorizontal",
    "CorporateBlue",
    "ElegantPurple",
    "MinimalWhite",
    "BoldRed",
    "NatureGreen",
    "TechDark",
    "OrangeBlackTrifold",
    "TealYellowTrifold",
    "HealthNetwork",
    "VantageConstruction",
    "EdupathLearning",
    "CreativeSolutions",
];

pub fn is_builtin_template(template_id: &str) -> bool {
    let template_id = template_id.trim();
    BUILTIN_TEMPLATE_IDS.iter().any(|id| *id == template_id)
}

// == Style ==
/// The three looks every generation produces, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Professional,
    Creative,
    Minimal,
}

pub const STYLES: [Style; 3] = [Style::Professional, Style::Creative, Style::Minimal];

const CREATIVE_KEYWORDS: [&str; 7] = [
    "experience",
    "feel",
    "enjoy",
    "love",
    "comfort",
    "style",
    "beautiful",
];

const MINIMAL_KEYWORDS: [&str; 7] = [
    "spec",
    "performance",
    "technology",
    "advanced",
    "power",
    "speed",
    "capacity",
];

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::Professional => "professional",
            Style::Creative => "creative",
            Style::Minimal => "minimal",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Style::Professional => "Professional",
            Style::Creative => "Creative",
            Style::Minimal => "Minimal",
        }
    }

    /// `variant-A` for the first style, and so on.
    pub fn variant_id(self) -> String {
        let letter = match self {
            Style::Professional => 'A',
            Style::Creative => 'B',
            Style::Minimal => 'C',
        };
        format!("variant-{}", letter)
    }

    pub fn accent_color(self) -> &'static str {
        match self {
            Style::Professional => "#4F46E5",
            Style::Creative => "#10B981",
            Style::Minimal => "#8B5CF6",
        }
    }

    pub fn emphasis(self) -> LayoutEmphasis {
        match self {
            Style::Professional => LayoutEmphasis::Features,
            Style::Creative => LayoutEmphasis::Benefits,
            Style::Minimal => LayoutEmphasis::Specs,
        }
    }

    fn local_copy(self) -> (&'static str, &'static str) {
        match self {
            Style::Professional => (
                "Professional Excellence",
                "Delivering superior quality and reliability",
            ),
            Style::Creative => (
                "Creative Innovation",
                "Pushing boundaries with innovative solutions",
            ),
            Style::Minimal => ("Minimal Elegance", "Simple, clean, and effective"),
        }
    }

    /// Moves the features this style cares about to the front, keeping the
    /// relative order of both groups.
    pub fn reorder_features(self, features: &[String]) -> Vec<String> {
        let keywords: &[&str] = match self {
            Style::Professional => return features.to_vec(),
            Style::Creative => &CREATIVE_KEYWORDS,
            Style::Minimal => &MINIMAL_KEYWORDS,
        };

        let (mut front, back): (Vec<String>, Vec<String>) =
            features.iter().cloned().partition(|feature| {
                let lower = feature.to_lowercase();
                keywords.iter().any(|kw| lower.contains(kw))
            });
        front.extend(back);
        front
    }

    fn variant(
        self,
        template_id: &str,
        product: &ProductData,
        headline: String,
        tagline: String,
    ) -> Variant {
        let mut data = product.clone();
        data.features = self.reorder_features(&product.features);

        Variant {
            id: self.variant_id(),
            headline,
            tagline,
            template: template_id.to_string(),
            data,
            accent_color: self.accent_color().to_string(),
            layout_emphasis: self.emphasis(),
            design_id: None,
            preview_url: None,
        }
    }
}

// == Design Source ==
/// A design customized by the external service.
#[derive(Debug, Clone, PartialEq)]
pub struct Design {
    pub id: String,
    pub preview_url: Option<String>,
}

/// External service that customizes a template for a product in a style.
#[async_trait]
pub trait DesignSource: Send + Sync {
    async fn customize(
        &self,
        template_id: &str,
        product: &ProductData,
        style: Style,
    ) -> Result<Design>;
}

// == Generation ==
/// Variants A, B and C built without any external call.
pub fn fallback_variants(template_id: &str, product: &ProductData) -> Vec<Variant> {
    let template_id = template_id.trim();
    STYLES
        .iter()
        .map(|&style| {
            let (headline, tagline) = style.local_copy();
            style.variant(
                template_id,
                product,
                format!("{}: {}", product.product_name, headline),
                tagline.to_string(),
            )
        })
        .collect()
}

/// Asks `source` for one design per style, concurrently.
///
/// Styles whose call fails are left out; an empty result means every call
/// failed.
pub async fn remote_variants(
    source: &dyn DesignSource,
    template_id: &str,
    product: &ProductData,
) -> Vec<Variant> {
    let template_id = template_id.trim();
    let calls = STYLES.iter().map(|&style| async move {
        match source.customize(template_id, product, style).await {
            Ok(design) => {
                let mut variant = style.variant(
                    template_id,
                    product,
                    format!("{}: {} Design", product.product_name, style.title()),
                    format!("Delivering {} excellence", style.name()),
                );
                variant.design_id = Some(design.id);
                variant.preview_url = design.preview_url;
                Some(variant)
            }
            Err(err) => {
                warn!(style = style.name(), template_id, "Design source failed: {}", err);
                None
            }
        }
    });

    join_all(calls).await.into_iter().flatten().collect()
}
