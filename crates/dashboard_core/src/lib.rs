//! Presentation-layer helpers for the POS dashboard: product image URL
//! resolution and the in-page toast bus.

pub mod config;
pub mod image_url;
pub mod toast;
mod toast_tray;

pub use config::{load_settings, ApiConfig, Settings};
pub use image_url::{resolve_product_image_url, ImageUrlResolver, DEFAULT_PRODUCT_IMAGE};
pub use toast::{ToastBus, ToastEmitter, ToastSubscription};
pub use toast_tray::{ActiveToast, SharedToastTray, ToastTray};
