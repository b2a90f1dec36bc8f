//! Configuration module.
//!
//! Settings resolve through the chain defaults → config file → environment
//! → command line; see [`loader`].

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};

/// Resolve the full configuration.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    Ok(apply_cli_overrides(
        apply_env_overrides(merge_config(file)),
        cli,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_with_missing_explicit_file_uses_defaults_plus_cli() {
        let resolved = resolve(
            Some(std::path::PathBuf::from("/nonexistent/rowscope.toml")),
            CliOverrides {
                row_height: Some(12.0),
                ..CliOverrides::default()
            },
        )
        .expect("missing file is not an error");
        assert_eq!(resolved.row_height, 12.0);
        assert_eq!(resolved.wheel_rows, loader::DEFAULT_WHEEL_ROWS);
    }
}
