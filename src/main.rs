use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hsv_config::config::parser::config_to_string;
use hsv_config::config::{ConfigFileInfo, ConfigState, Configuration, write_config_file};
use hsv_config::logging::init_logging;
use hsv_config::provider::ConfigProvider;
use hsv_config::settings::FileSettingsStore;
use hsv_config::{PLUGIN_VERSION, Version, paths};

#[derive(Parser)]
#[command(name = "hsv")]
#[command(
	author,
	version,
	about = "Manage HitScoreVisualizer judgment configs: list, validate, migrate, and select"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Directory holding judgment config files
	#[arg(long, global = true, value_name = "DIR")]
	config_dir: Option<PathBuf>,

	/// Settings file that remembers the selected config
	#[arg(long, global = true, value_name = "FILE")]
	settings: Option<PathBuf>,

	/// Plugin version to classify and migrate configs against
	#[arg(long, global = true, value_name = "MAJOR.MINOR.PATCH")]
	plugin_version: Option<Version>,

	/// Increase log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// List every config file with its state
	List,
	/// Select a config by name or path, migrating it if needed
	Select {
		/// Config name (file name with or without extension) or path
		config: String,
	},
	/// Show the active config after restoring the remembered selection
	Current,
	/// Check whether a config file can be selected
	Validate {
		/// Config name or path
		config: String,
	},
	/// Migrate an outdated config to the current schema
	Migrate {
		/// Config name or path
		config: String,

		/// Rewrite the file in place instead of printing the result
		#[arg(long)]
		write: bool,
	},
	/// Write the built-in default config into the config directory
	Init {
		/// File name (without extension) for the new config
		#[arg(default_value = "default")]
		name: String,

		/// Overwrite an existing file
		#[arg(long)]
		force: bool,
	},
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: Cli) -> Result<ExitCode> {
	let mut provider = open_provider(&cli)?;

	match cli.command {
		Commands::List => handle_list(&provider),
		Commands::Select { config } => handle_select(&mut provider, &config),
		Commands::Current => handle_current(&mut provider),
		Commands::Validate { config } => handle_validate(&provider, &config),
		Commands::Migrate { config, write } => handle_migrate(&provider, &config, write),
		Commands::Init { name, force } => handle_init(&provider, &name, force),
	}
}

fn open_provider(cli: &Cli) -> Result<ConfigProvider<FileSettingsStore>> {
	let config_dir = match &cli.config_dir {
		Some(dir) => dir.clone(),
		None => paths::default_config_dir().context("Failed to locate config directory")?,
	};
	let settings_path = match &cli.settings {
		Some(path) => path.clone(),
		None => paths::default_settings_path().context("Failed to locate settings file")?,
	};

	let settings = FileSettingsStore::open(&settings_path);
	let plugin_version = cli.plugin_version.unwrap_or(PLUGIN_VERSION);

	ConfigProvider::new(&config_dir, plugin_version, settings)
		.with_context(|| format!("Failed to open config directory {}", config_dir.display()))
}

fn find_config(
	provider: &ConfigProvider<FileSettingsStore>,
	config: &str,
) -> Result<ConfigFileInfo> {
	let path = provider
		.resolve_config_path(config)
		.ok_or_else(|| anyhow::anyhow!("Config not found: {}", config))?;
	Ok(provider.load_file_info(&path))
}

fn describe(info: &ConfigFileInfo) -> String {
	match &info.configuration {
		Some(configuration) => format!("{} ({}, version {})", info.name, info.state, configuration.version),
		None => format!("{} ({})", info.name, info.state),
	}
}

fn handle_list(provider: &ConfigProvider<FileSettingsStore>) -> Result<ExitCode> {
	let configs = provider
		.list_available_configs()
		.context("Failed to list configs")?;

	if configs.is_empty() {
		println!("No config files found in {}", provider.config_dir().display());
		return Ok(ExitCode::SUCCESS);
	}

	let selected = provider.current_config_path();
	for info in &configs {
		let marker = if selected.as_deref() == Some(info.path.as_path()) {
			"*"
		} else {
			" "
		};
		let version = info
			.configuration
			.as_ref()
			.map(|c| c.version.to_string())
			.unwrap_or_else(|| "-".to_string());
		let selectable = if info.is_selectable() { "yes" } else { "no" };

		println!(
			"{} {:<24} {:<18} {:<10} selectable: {}",
			marker, info.name, info.state, version, selectable
		);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_select(
	provider: &mut ConfigProvider<FileSettingsStore>,
	config: &str,
) -> Result<ExitCode> {
	let info = find_config(provider, config)?;
	let description = describe(&info);
	let migrate = info.state == ConfigState::NeedsMigration;

	if !provider.select_config(info).context("Failed to select config")? {
		eprintln!("Config is not selectable: {}", description);
		return Ok(ExitCode::FAILURE);
	}

	println!("Selected {}", description);
	if migrate {
		println!("Migrated to version {}", provider.plugin_version());
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_current(provider: &mut ConfigProvider<FileSettingsStore>) -> Result<ExitCode> {
	provider.initialize();

	match (provider.current_config(), provider.current_config_path()) {
		(Some(_), Some(path)) => println!("# Source: {}", path.display()),
		_ => println!("# Source: built-in default"),
	}

	let configuration = provider.current_or_default();
	println!("{}", config_to_string(&configuration, Path::new("<current>"))?);
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(provider: &ConfigProvider<FileSettingsStore>, config: &str) -> Result<ExitCode> {
	let info = find_config(provider, config)?;

	if info.is_selectable() {
		println!("Config is valid: {}", describe(&info));
		Ok(ExitCode::SUCCESS)
	} else {
		println!("Config is not usable: {}", describe(&info));
		Ok(ExitCode::FAILURE)
	}
}

fn handle_migrate(
	provider: &ConfigProvider<FileSettingsStore>,
	config: &str,
	write: bool,
) -> Result<ExitCode> {
	let info = find_config(provider, config)?;

	if info.state != ConfigState::NeedsMigration {
		println!("Nothing to migrate: {}", describe(&info));
		let code = if info.is_selectable() {
			ExitCode::SUCCESS
		} else {
			ExitCode::FAILURE
		};
		return Ok(code);
	}

	if write {
		provider
			.upgrade_file(&info)
			.with_context(|| format!("Failed to upgrade {}", info.path.display()))?;
		println!(
			"Migrated {} to version {}",
			info.path.display(),
			provider.plugin_version()
		);
		return Ok(ExitCode::SUCCESS);
	}

	let Some(configuration) = provider.upgraded_configuration(&info) else {
		anyhow::bail!("Config has no content: {}", info.path.display());
	};
	println!("{}", config_to_string(&configuration, &info.path)?);
	Ok(ExitCode::SUCCESS)
}

fn handle_init(
	provider: &ConfigProvider<FileSettingsStore>,
	name: &str,
	force: bool,
) -> Result<ExitCode> {
	let config_path = provider.config_dir().join(format!("{name}.json"));

	if config_path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			config_path.display()
		);
	}

	let configuration = Configuration::default_config(provider.plugin_version());
	write_config_file(&config_path, &configuration)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {}", config_path.display());
	Ok(ExitCode::SUCCESS)
}
