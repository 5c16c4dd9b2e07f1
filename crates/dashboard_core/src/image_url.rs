use crate::config::ApiConfig;

/// Served when a product has no image of its own.
pub const DEFAULT_PRODUCT_IMAGE: &str = "storage/products/default.png";

const STORAGE_PREFIX: &str = "storage/";
const PASSTHROUGH_PREFIXES: [&str; 4] = ["http://", "https://", "data:", "blob:"];

/// True when `value` is already directly usable as an image source.
/// Case-sensitive prefix match, not a URL parse.
pub fn is_resolved_url(value: &str) -> bool {
    PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| value.starts_with(prefix))
}

pub fn default_image_url(config: &ApiConfig) -> String {
    qualify(config, DEFAULT_PRODUCT_IMAGE)
}

/// Turns a stored image reference into a URL an `<img>` can load. Total and
/// pure for a given config: every input produces a non-empty string.
pub fn resolve_product_image_url(config: &ApiConfig, path: Option<&str>) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return default_image_url(config);
    };

    if is_resolved_url(path) {
        return path.to_string();
    }

    let relative = path.trim_start_matches('/');
    if relative.starts_with(STORAGE_PREFIX) {
        qualify(config, relative)
    } else {
        qualify(config, &format!("{STORAGE_PREFIX}{relative}"))
    }
}

fn qualify(config: &ApiConfig, relative: &str) -> String {
    match config.origin() {
        Some(origin) => format!("{origin}/{relative}"),
        None => format!("/{relative}"),
    }
}

/// Resolver bound to the process configuration.
#[derive(Debug, Clone, Default)]
pub struct ImageUrlResolver {
    config: ApiConfig,
}

impl ImageUrlResolver {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn resolve(&self, path: Option<&str>) -> String {
        resolve_product_image_url(&self.config, path)
    }

    pub fn default_image(&self) -> String {
        default_image_url(&self.config)
    }
}

#[cfg(test)]
#[path = "tests/image_url_tests.rs"]
mod tests;
