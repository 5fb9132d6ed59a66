//! Per-invocation application context.

use std::path::{Path, PathBuf};

use crate::cli::{Cli, ColorMode, OutputFormat};
use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::error::{MatrixError, Result};

/// Where the catalog for this run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl CatalogSource {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Builtin => "builtin".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<Catalog> {
        match self {
            Self::Builtin => Catalog::builtin(),
            Self::File(path) => Catalog::load(path),
        }
    }
}

pub struct AppContext {
    pub config: Config,
    pub root: PathBuf,
    pub output_format: OutputFormat,
    /// JSON or JSONL output
    pub robot_mode: bool,
    /// Primary catalog followed by extra catalogs
    pub catalog_sources: Vec<CatalogSource>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = project_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;

        let output_format = resolve_output_format(cli, &config);
        let robot_mode = output_format.is_json();
        apply_color_mode(cli, output_format);

        let primary = cli
            .catalog
            .clone()
            .or_else(|| config.catalog.primary_path())
            .map_or(CatalogSource::Builtin, CatalogSource::File);
        let mut catalog_sources = vec![primary];
        catalog_sources.extend(config.catalog.extra_paths().into_iter().map(CatalogSource::File));

        Ok(Self {
            config,
            root,
            output_format,
            robot_mode,
            catalog_sources,
        })
    }

    /// Load every catalog source and merge them in order.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut sources = self.catalog_sources.iter();
        let Some(first) = sources.next() else {
            return Catalog::builtin();
        };
        let mut catalog = first.load()?;
        for source in sources {
            catalog = catalog.extend(source.load()?)?;
        }
        Ok(catalog)
    }

    /// Label for the merged catalog, e.g. `builtin + extra.toml`
    #[must_use]
    pub fn catalog_label(&self) -> String {
        self.catalog_sources
            .iter()
            .map(CatalogSource::label)
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Machine output keeps the status/timestamp envelope
    #[must_use]
    pub const fn include_metadata(&self) -> bool {
        self.config.robot.include_metadata
    }
}

fn project_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("SKILLMATRIX_ROOT") {
        return Ok(PathBuf::from(root));
    }
    std::env::current_dir().map_err(MatrixError::from)
}

fn resolve_output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if cli.plain || cli.output_format.is_some() || cli.machine || cli.robot {
        return cli.output_format();
    }
    if config.robot.enabled {
        // `Config::load` has already rejected anything but json and jsonl
        return OutputFormat::from_robot_setting(&config.robot.format);
    }
    OutputFormat::Human
}

fn apply_color_mode(cli: &Cli, format: OutputFormat) {
    let enabled = match cli.color {
        Some(ColorMode::Always) => Some(true),
        Some(ColorMode::Never) => Some(false),
        Some(ColorMode::Auto) | None => None,
    };
    let enabled = if format.use_colors() { enabled } else { Some(false) };
    if let Some(enabled) = enabled {
        colored::control::set_override(enabled);
        console::set_colors_enabled(enabled);
    }
}

/// Resolve a user-supplied path against the project root.
#[must_use]
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
