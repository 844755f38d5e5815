//! Configuration module.
//!
//! - [`loader`]: TOML config file, env vars and CLI overrides
//! - [`keybindings`]: key event to [`KeyAction`](crate::model::KeyAction) map

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    ConfigError, ConfigFile, ResolvedConfig, apply_cli_overrides, apply_env_overrides,
    load_config_with_precedence, merge_config,
};

/// Resolve the full configuration: defaults, then file, then env, then CLI.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    api_url_override: Option<String>,
    timeout_override: Option<u64>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_env_overrides(merge_config(file));
    Ok(apply_cli_overrides(config, api_url_override, timeout_override))
}
