//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_cache::{Cache, SessionId};
use storefront_commerce::catalog::InMemoryCatalog;
use storefront_commerce::session::ShopSession;
use storefront_observability::LogTrackingSink;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative config paths are resolved against.
    pub base_dir: PathBuf,
    /// The config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            // Try to find config in current directory or parent directories
            None => find_config(&cwd),
        };

        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        let base_dir = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
            config_path,
        })
    }

    /// Resolve a configured path relative to the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }

    /// Load the product catalog.
    pub fn load_catalog(&self) -> Result<InMemoryCatalog> {
        let path = self.resolve_path(&self.config.catalog.path);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = InMemoryCatalog::from_json_in(&json, self.config.currency()?)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        self.output
            .debug(&format!("Loaded {} products from {}", catalog.len(), path.display()));
        Ok(catalog)
    }

    /// Open the on-disk store.
    pub fn open_cache(&self) -> Result<Cache> {
        let dir = self.resolve_path(&self.config.session.store_dir);
        Cache::open(&dir).with_context(|| format!("Failed to open store: {}", dir.display()))
    }

    /// Open the shopper session, restoring its cart and wish list.
    pub fn open_session(&self) -> Result<ShopSession> {
        let catalog = Arc::new(self.load_catalog()?);
        let session = ShopSession::new(catalog)
            .with_currency(self.config.currency()?)
            .with_tracking(Arc::new(LogTrackingSink::new()))
            .with_storage(SessionId::new(&self.config.session.id), self.open_cache()?)
            .context("Failed to restore session")?;
        self.output.debug(&format!("Session: {}", session.id()));
        Ok(session)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_commerce::{ProductId, Size};

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".storefront.toml"), "").unwrap();

        assert_eq!(
            find_config(&nested),
            Some(dir.path().join(".storefront.toml"))
        );
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("storefront.toml");
        std::fs::write(&config_path, "[catalog]\npath = \"data/products.json\"\n").unwrap();

        let ctx = Context::load(config_path.to_str(), Output::new(false, true)).unwrap();
        assert_eq!(
            ctx.resolve_path(&ctx.config.catalog.path),
            dir.path().join("data/products.json")
        );
    }

    #[test]
    fn test_session_survives_reopening() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"id": 1, "name": "Шарф", "price": 250,
                 "quantityAvailable": 3, "category": 1}]"#,
        )
        .unwrap();
        let config_path = dir.path().join("storefront.toml");
        std::fs::write(&config_path, "").unwrap();

        let ctx = Context::load(config_path.to_str(), Output::new(false, true)).unwrap();
        let mut session = ctx.open_session().unwrap();
        session
            .add_to_cart(ProductId::new(1), Size::NONE)
            .unwrap();

        let reopened = ctx.open_session().unwrap();
        assert_eq!(reopened.cart().item_count(), 1);
    }
}
