pub mod client;
pub mod config;
pub mod modal;
pub mod platform;

pub use client::SignClientAdapter;
pub use config::{LinkConfig, ModalConfig};
pub use modal::QrModalAdapter;
pub use platform::{NativePlatformAdapter, ScriptedPlatformAdapter};
