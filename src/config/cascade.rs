use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig, RuleWithSource};
use crate::error::{PreprocessError, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in each directory.
pub const CONFIG_FILE_NAME: &str = ".preprocess.toml";

/// Environment variable that, if truthy, skips ~/.preprocess.toml.
pub const NO_USER_CONFIG_ENV: &str = "PREPROCESS_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// Walks up from `start_dir` collecting `.preprocess.toml` files until one
/// sets `root = true` or the filesystem root is reached, then appends
/// ~/.preprocess.toml unless disabled.
///
/// Returns configs nearest-first, which is also rule application order.
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let user_path = dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME));

	for dir in start_dir.ancestors() {
		let config_path = dir.join(CONFIG_FILE_NAME);
		if !config_path.is_file() {
			continue;
		}
		// The home directory's file is picked up as the user config below.
		if user_path.as_deref() == Some(config_path.as_path()) {
			continue;
		}

		let config = parse_config_file(&config_path)?;
		info!(
			"loaded {} ({} rules)",
			config_path.display(),
			config.rules.len()
		);
		let is_root = config.root;
		configs.push(LoadedConfig {
			config,
			path: config_path,
		});

		if is_root {
			debug!("root config reached, stopping directory walk");
			break;
		}
	}

	if let Some(user_config) = load_user_config(user_path)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load ~/.preprocess.toml if it exists and isn't disabled.
///
/// `None` means there is no home directory, so there is no user config.
fn load_user_config(user_path: Option<PathBuf>) -> Result<Option<LoadedConfig>> {
	if is_env_truthy(NO_USER_CONFIG_ENV) {
		debug!("{NO_USER_CONFIG_ENV} set, skipping user config");
		return Ok(None);
	}

	let Some(user_config_path) = user_path else {
		debug!("no home directory, skipping user config");
		return Ok(None);
	};
	if !user_config_path.is_file() {
		return Ok(None);
	}

	let config = parse_config_file(&user_config_path)?;
	info!(
		"loaded user config {} ({} rules)",
		user_config_path.display(),
		config.rules.len()
	);
	Ok(Some(LoadedConfig {
		config,
		path: user_config_path,
	}))
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Flatten configs into one rule list, keeping each rule's source.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let rules = configs
		.iter()
		.flat_map(|loaded| {
			loaded.config.rules.iter().map(|rule| RuleWithSource {
				rule: rule.clone(),
				source: loaded.path.clone(),
			})
		})
		.collect();

	MergedConfig { rules }
}

/// Discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(PreprocessError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
