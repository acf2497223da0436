//! Argument handling, logging setup and construction of the sources shared by every command.

use super::Host;
use crate::Result;
use crate::api::Api;
use crate::config::Config;
use crate::facts::{MetadataRegistry, ecdc, grafana, health_ministry, mathdro, ministry};
use crate::health::{Exporter, HealthAggregator};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::bail;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "    common";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command that talks to the sources
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is one of `cov19.[toml|yml|yaml|json]`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Every enabled source, constructed once and shared.
#[derive(Debug, Default)]
pub struct Sources {
    pub ministry: Option<Arc<ministry::Provider>>,
    pub health_ministry: Option<Arc<health_ministry::Provider>>,
    pub grafana: Option<Arc<grafana::Provider>>,
    pub ecdc: Option<Arc<ecdc::Provider>>,
    pub mathdro: Option<Arc<mathdro::Provider>>,
    pub provinces: Arc<MetadataRegistry>,
}

impl Sources {
    /// Load the registries and build the providers the configuration enables.
    pub fn new(config: &Config) -> Result<Self> {
        let provinces = Arc::new(load_registry(&config.metadata_path)?);
        let districts = Arc::new(load_registry(&config.districts_path)?);

        let mut sources = Self {
            provinces: Arc::clone(&provinces),
            ..Self::default()
        };

        if config.ministry.enabled {
            sources.ministry = Some(Arc::new(ministry::Provider::new(&config.ministry, Arc::clone(&provinces))?));
        }

        if config.health_ministry.enabled {
            sources.health_ministry = Some(Arc::new(health_ministry::Provider::new(
                &config.health_ministry,
                Arc::clone(&provinces),
                Arc::clone(&districts),
            )?));
        }

        if config.grafana.enabled {
            sources.grafana = Some(Arc::new(grafana::Provider::new(&config.grafana, Arc::clone(&districts))?));
        }

        if config.ecdc.enabled {
            sources.ecdc = Some(Arc::new(ecdc::Provider::new(&config.ecdc, Arc::clone(&provinces))?));
        }

        if config.mathdro.enabled {
            sources.mathdro = Some(Arc::new(mathdro::Provider::new(&config.mathdro)?));
        }

        Ok(sources)
    }

    /// An aggregator over every enabled source, in a fixed order.
    #[must_use]
    pub fn aggregator(&self) -> HealthAggregator {
        let mut aggregator = HealthAggregator::default();

        if let Some(p) = &self.ministry {
            aggregator.register(Arc::clone(p) as Arc<dyn Exporter>);
        }

        if let Some(p) = &self.health_ministry {
            aggregator.register(Arc::clone(p) as Arc<dyn Exporter>);
        }

        if let Some(p) = &self.grafana {
            aggregator.register(Arc::clone(p) as Arc<dyn Exporter>);
        }

        if let Some(p) = &self.ecdc {
            aggregator.register(Arc::clone(p) as Arc<dyn Exporter>);
        }

        if let Some(p) = &self.mathdro {
            aggregator.register(Arc::clone(p) as Arc<dyn Exporter>);
        }

        aggregator
    }

    /// The JSON views, which need both ministries.
    pub fn api(&self) -> Result<Api> {
        let (Some(ministry), Some(health_ministry)) = (&self.ministry, &self.health_ministry) else {
            bail!("the JSON views need both the ministry and the health_ministry sources to be enabled");
        };

        Ok(Api::new(Arc::clone(ministry), Arc::clone(health_ministry), Arc::clone(&self.provinces)))
    }
}

fn load_registry(path: &Utf8Path) -> Result<MetadataRegistry> {
    if path.as_str().is_empty() {
        return Ok(MetadataRegistry::default());
    }

    MetadataRegistry::load(path)
}

pub struct Common<'a, H: Host> {
    pub config: Config,
    pub sources: Sources,
    pub use_colors: bool,
    host: &'a mut H,
}

impl<'a, H: Host> Common<'a, H> {
    /// Set up logging, load the configuration and build the sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or a metadata file cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let (config, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        if !warnings.is_empty() {
            let _ = writeln!(host.error(), "⚠️  Configuration validation warnings:");
            for warning in &warnings {
                let _ = writeln!(host.error(), "   {warning}");
            }
            let _ = writeln!(host.error());
        }

        let sources = Sources::new(&config)?;
        log::info!(
            target: LOG_TARGET,
            "Loaded {} places, {} sources enabled",
            sources.provinces.len(),
            sources.aggregator().exporters().len()
        );

        Ok(Self {
            config,
            sources,
            use_colors: args.color.use_colors(),
            host,
        })
    }

    pub fn host(&mut self) -> &mut H {
        self.host
    }

    fn init_logging(log_level: LogLevel) {
        let level = match log_level {
            LogLevel::None => return,
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        // try_init: the commands may run more than once in one process under test
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
            .try_init();
    }
}
