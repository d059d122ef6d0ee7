//! Variants Module
//!
//! Generation of styled onepager variants, memoized in an expiring cache.

mod generator;
mod model;
mod service;

pub use generator::{
    fallback_variants, is_builtin_template, remote_variants, Design, DesignSource, Style,
    BUILTIN_TEMPLATE_IDS, STYLES,
};
pub use model::{fingerprint, LayoutEmphasis, ProductData, SocialMedia, Variant};
pub use service::{Generated, VariantCache, VariantService};
