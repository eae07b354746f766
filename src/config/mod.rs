// Configuration module
// Public interface for configuration loading

mod loader;
mod provider;
mod settings;

pub use loader::{default_config_path, load_config, try_load_from_file};
pub use provider::{ProviderConfig, ProviderKind};
pub use settings::{ClassifierConfig, Config, FeatureFlags, MetricsConfig, ServerConfig};
