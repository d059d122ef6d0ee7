//! Variant Service
//!
//! Check the cache, otherwise generate once per fingerprint and remember the
//! result for the configured TTL.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{Clock, SharedCache, SingleFlight, SystemClock};
use crate::error::{CacheError, Result};
use crate::variants::{
    fallback_variants, fingerprint, is_builtin_template, remote_variants, DesignSource,
    ProductData, Variant,
};

/// Cache of generated variant lists, keyed by fingerprint.
pub type VariantCache<C = SystemClock> = SharedCache<Arc<Vec<Variant>>, C>;

/// Result of a generation request.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Whether the variants came straight from the cache
    pub cached: bool,
    pub variants: Arc<Vec<Variant>>,
}

// == Variant Service ==
pub struct VariantService<C: Clock = SystemClock> {
    cache: VariantCache<C>,
    in_flight: SingleFlight<Arc<Vec<Variant>>>,
    source: Option<Arc<dyn DesignSource>>,
    ttl: Duration,
}

impl<C: Clock> VariantService<C> {
    /// Creates a service generating locally and caching for `ttl`.
    pub fn new(cache: VariantCache<C>, ttl: Duration) -> Self {
        Self {
            cache,
            in_flight: SingleFlight::new(),
            source: None,
            ttl,
        }
    }

    /// Consults `source` for templates that are not built in.
    pub fn with_source(mut self, source: Arc<dyn DesignSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn cache(&self) -> &VariantCache<C> {
        &self.cache
    }

    // == Generate ==
    /// Returns the variants of `product` rendered with `template_id`.
    ///
    /// Concurrent misses on the same fingerprint share one generation.
    ///
    /// # Errors
    /// `InvalidArgument` if the template id or the product name is blank.
    pub async fn generate(&self, template_id: &str, product: &ProductData) -> Result<Generated> {
        let template_id = template_id.trim();
        if template_id.is_empty() {
            return Err(CacheError::InvalidArgument(
                "Template id cannot be empty".to_string(),
            ));
        }
        if product.product_name.trim().is_empty() {
            return Err(CacheError::InvalidArgument(
                "Product name cannot be empty".to_string(),
            ));
        }

        let key = fingerprint(template_id, &product.product_name);

        if let Some(variants) = self.cache.write().await.get(&key) {
            debug!(key = %key, "Using cached variants");
            return Ok(Generated {
                cached: true,
                variants,
            });
        }

        let variants = self
            .in_flight
            .run(&key, || async {
                // Another flight may have stored the result since our lookup.
                if let Some(variants) = self.cache.write().await.peek(&key) {
                    return Ok::<_, CacheError>(variants);
                }

                let variants = Arc::new(self.build(template_id, product).await);
                if let Err(err) = self
                    .cache
                    .write()
                    .await
                    .set(key.clone(), variants.clone(), self.ttl)
                {
                    warn!(key = %key, "Variants not cached: {}", err);
                }

                info!(
                    key = %key,
                    count = variants.len(),
                    "Generated variants"
                );
                Ok(variants)
            })
            .await?;

        Ok(Generated {
            cached: false,
            variants,
        })
    }

    async fn build(&self, template_id: &str, product: &ProductData) -> Vec<Variant> {
        if let Some(source) = &self.source {
            if !is_builtin_template(template_id) {
                let variants = remote_variants(source.as_ref(), template_id, product).await;
                if !variants.is_empty() {
                    return variants;
                }
                warn!(template_id, "Design source produced no variants, generating locally");
            }
        }
        fallback_variants(template_id, product)
    }
}
