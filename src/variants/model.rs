//! Variant Data Model
//!
//! Product data entered by the user and the styled variants generated from it.

use serde::{Deserialize, Serialize};

// == Product Data ==
/// Everything known about the product a onepager is generated for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

impl ProductData {
    /// Product data carrying only a name.
    pub fn named(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

// == Layout Emphasis ==
/// Which block of the layout a variant puts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutEmphasis {
    Features,
    Benefits,
    Specs,
}

// == Variant ==
/// One styled rendition of a onepager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// `variant-A`, `variant-B`, ...
    pub id: String,
    pub headline: String,
    pub tagline: String,
    /// Template the variant renders with
    pub template: String,
    /// Product data, features reordered for this variant
    pub data: ProductData,
    pub accent_color: String,
    pub layout_emphasis: LayoutEmphasis,
    /// Design id assigned by the external design service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

// == Fingerprint ==
/// Cache key for the variants of `product_name` rendered with `template_id`.
///
/// The template id is trimmed; the product name is used as given.
pub fn fingerprint(template_id: &str, product_name: &str) -> String {
    format!("variants-{}-{}", template_id.trim(), product_name)
}
