//! Plugin lifecycle contract and the harness that drives it.
//!
//! Content plugins get exactly two hooks, in this order:
//!
//! 1. **pre-load** — before the database exists: image routes, config
//!    objects, trader registry.
//! 2. **post-database-load** — after the database tables are built: trader
//!    records, assorts, locale text.
//!
//! Both hooks run synchronously on the loader thread, once per plugin. A
//! hook failure aborts that plugin (its later hook is skipped) but leaves
//! every other plugin untouched.

use std::collections::HashSet;

use tracing::{debug, error};

use crate::config::{RagfairConfig, TraderConfig};
use crate::database::DatabaseTables;
use crate::ids::{IdGenerator, Sha2IdGenerator, TraderId};
use crate::image::ImageRouter;
use crate::locale::LocaleTables;

/// Result type for plugin hooks.
///
/// Hooks report arbitrary plugin-defined failures, so the harness only needs
/// a uniform dynamic error to log and isolate.
pub type HookResult = anyhow::Result<()>;

/// The set of trader ids the host knows about.
///
/// Traders must be registered during pre-load so the host can route trading
/// requests; a duplicate registration is always a plugin bug.
#[derive(Clone, Debug, Default)]
pub struct TraderRegistry {
    known: HashSet<TraderId>,
}

/// Two plugins (or one plugin twice) registered the same trader id.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("trader {0} is already registered")]
pub struct AlreadyRegistered(pub TraderId);

impl TraderRegistry {
    pub fn register(&mut self, trader: TraderId) -> Result<(), AlreadyRegistered> {
        if !self.known.insert(trader.clone()) {
            return Err(AlreadyRegistered(trader));
        }
        Ok(())
    }

    pub fn contains(&self, trader: &TraderId) -> bool {
        self.known.contains(trader)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// Host state reachable from the pre-load hook.
pub struct PreLoadContext<'a> {
    pub image_router: &'a mut ImageRouter,
    pub trader_config: &'a mut TraderConfig,
    pub ragfair_config: &'a mut RagfairConfig,
    pub traders: &'a mut TraderRegistry,
}

/// Host state reachable from the post-database-load hook.
pub struct PostDbLoadContext<'a> {
    pub database: &'a mut DatabaseTables,
    pub ids: &'a mut dyn IdGenerator,
}

/// A content plugin. Both hooks default to no-ops so a plugin only
/// implements the phases it needs.
pub trait Plugin {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    fn pre_load(&mut self, ctx: &mut PreLoadContext<'_>) -> HookResult {
        let _ = ctx;
        Ok(())
    }

    fn post_db_load(&mut self, ctx: &mut PostDbLoadContext<'_>) -> HookResult {
        let _ = ctx;
        Ok(())
    }
}

/// Owns the host-side state and runs plugins through both lifecycle hooks.
pub struct PluginHost {
    database: DatabaseTables,
    trader_config: TraderConfig,
    ragfair_config: RagfairConfig,
    image_router: ImageRouter,
    traders: TraderRegistry,
    ids: Box<dyn IdGenerator>,
}

impl PluginHost {
    /// A host with the stock locale languages and the default id generator.
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(Sha2IdGenerator::default()))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            database: DatabaseTables::with_locales(LocaleTables::with_default_languages()),
            trader_config: TraderConfig::default(),
            ragfair_config: RagfairConfig::default(),
            image_router: ImageRouter::default(),
            traders: TraderRegistry::default(),
            ids,
        }
    }

    /// Runs every plugin through pre-load, then every surviving plugin
    /// through post-database-load.
    ///
    /// A plugin whose pre-load hook fails is skipped in the second phase;
    /// its partial registrations stay in place (rollback is not a host
    /// guarantee). Returns the number of fully loaded plugins.
    pub fn load(&mut self, plugins: &mut [Box<dyn Plugin>]) -> usize {
        let mut failed = vec![false; plugins.len()];

        for (index, plugin) in plugins.iter_mut().enumerate() {
            debug!(target: "host::plugins", plugin = plugin.name(), "running pre-load hook");
            let mut ctx = PreLoadContext {
                image_router: &mut self.image_router,
                trader_config: &mut self.trader_config,
                ragfair_config: &mut self.ragfair_config,
                traders: &mut self.traders,
            };
            if let Err(e) = plugin.pre_load(&mut ctx) {
                error!(
                    target: "host::plugins",
                    plugin = plugin.name(),
                    error = ?e,
                    "pre-load hook failed, skipping plugin"
                );
                failed[index] = true;
            }
        }

        let mut loaded = 0;
        for (index, plugin) in plugins.iter_mut().enumerate() {
            if failed[index] {
                continue;
            }
            debug!(target: "host::plugins", plugin = plugin.name(), "running post-db-load hook");
            let mut ctx = PostDbLoadContext {
                database: &mut self.database,
                ids: self.ids.as_mut(),
            };
            match plugin.post_db_load(&mut ctx) {
                Ok(()) => loaded += 1,
                Err(e) => error!(
                    target: "host::plugins",
                    plugin = plugin.name(),
                    error = ?e,
                    "post-db-load hook failed, plugin data may be incomplete"
                ),
            }
        }

        loaded
    }

    pub fn database(&self) -> &DatabaseTables {
        &self.database
    }

    pub fn trader_config(&self) -> &TraderConfig {
        &self.trader_config
    }

    pub fn ragfair_config(&self) -> &RagfairConfig {
        &self.ragfair_config
    }

    pub fn image_router(&self) -> &ImageRouter {
        &self.image_router
    }

    pub fn traders(&self) -> &TraderRegistry {
        &self.traders
    }
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new()
    }
}
