use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nlp_preprocessor::config::{
	LoadedConfig, discover_configs, merge_configs, parse_config_file, user_config_path,
};
use nlp_preprocessor::rules::{CompiledRule, compile_rules, parse_expression};

#[derive(Parser)]
#[command(name = "preprocess")]
#[command(
	author,
	version,
	about = "Apply regex preprocessing rules to text before tokenization"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Use this config file instead of discovering .preprocess.toml files
	#[arg(long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Extra rule in sed form (s/pattern/replacement/flags), applied after configured rules
	#[arg(short, long = "expr", value_name = "EXPR")]
	exprs: Vec<String>,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Input file (reads stdin when omitted or "-")
	file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// List config files and their rules in application order
	Show,
	/// Parse and compile every rule without processing any text
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Some(command) = cli.command {
		if cli.file.is_some() || !cli.exprs.is_empty() {
			anyhow::bail!("FILE and --expr only apply when processing text, not with a subcommand");
		}
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(cli.config.as_deref()),
			},
		};
	}

	handle_apply(cli.config.as_deref(), &cli.exprs, cli.file.as_deref())
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
		.format_timestamp(None)
		.init();
}

/// Load configs from an explicit file, or from the cascade above the cwd.
fn load_configs(explicit: Option<&Path>) -> Result<Vec<LoadedConfig>> {
	if let Some(path) = explicit {
		let config = parse_config_file(path)
			.with_context(|| format!("Failed to load config {}", path.display()))?;
		return Ok(vec![LoadedConfig {
			config,
			path: path.to_path_buf(),
		}]);
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	discover_configs(&cwd).context("Failed to discover config files")
}

fn load_rules(explicit: Option<&Path>, exprs: &[String]) -> Result<Vec<CompiledRule>> {
	let merged = merge_configs(&load_configs(explicit)?);
	let mut rules = compile_rules(&merged).context("Failed to compile rules")?;

	for expr in exprs {
		let rule = parse_expression(expr).with_context(|| format!("Invalid --expr: {expr}"))?;
		rules.push(CompiledRule {
			rule,
			source: PathBuf::from("<command line>"),
		});
	}

	Ok(rules)
}

fn read_input(file: Option<&Path>) -> Result<String> {
	match file {
		Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read {}", path.display())),
		_ => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
	}
}

fn handle_apply(
	config: Option<&Path>,
	exprs: &[String],
	file: Option<&Path>,
) -> Result<ExitCode> {
	let rules = load_rules(config, exprs)?;
	if rules.is_empty() {
		log::warn!("no rules configured, passing input through unchanged");
	}

	let input = read_input(file)?;

	// Rules run in configured order, each on the previous rule's output.
	let output = rules
		.iter()
		.fold(input, |text, compiled| compiled.rule.apply(&text));

	let mut stdout = std::io::stdout().lock();
	stdout
		.write_all(output.as_bytes())
		.and_then(|()| stdout.flush())
		.context("Failed to write output")?;

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: Option<&Path>) -> Result<ExitCode> {
	let configs = load_configs(config)?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in application order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for (i, rule) in loaded.config.rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			if let Some(ref description) = rule.description {
				println!("    description: {}", description);
			}
			if let Some(ref pattern) = rule.pattern {
				println!("    pattern: {}", pattern);
				println!("    replacement: {:?}", rule.replacement);
			}
			if let Some(ref expression) = rule.expression {
				println!("    expression: {}", expression);
			}
			if rule.case_insensitive {
				println!("    case_insensitive: true");
			}
			println!();
		}
	}

	if config.is_none()
		&& let Ok(user_path) = user_config_path()
	{
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(config: Option<&Path>) -> Result<ExitCode> {
	let checked = load_configs(config).and_then(|configs| {
		compile_rules(&merge_configs(&configs)).context("Failed to compile rules")?;
		Ok(configs)
	});

	match checked {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} rules)",
						loaded.path.display(),
						loaded.config.rules.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}
