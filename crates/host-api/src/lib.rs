//! Host-side contract surface for content plugins.
//!
//! `host-api` defines everything a trader plugin compiles against: the
//! in-memory database tables, the config objects, the image router, the
//! locale tables, the id generator, and the two-hook plugin lifecycle.
//! It also ships [`PluginHost`], a minimal harness that owns this state and
//! drives registered plugins through both hooks; embedders and integration
//! tests use it in place of a full game server.

pub mod config;
pub mod currency;
pub mod database;
pub mod ids;
pub mod image;
pub mod locale;
pub mod plugin;

pub use config::{RagfairConfig, RefreshInterval, TraderConfig};
pub use currency::Currency;
pub use database::{
    AssortTable, BuyRestriction, CostComponent, DatabaseError, DatabaseTables, ItemRecord,
    TraderBase, TraderRecord,
};
pub use ids::{IdGenerator, OfferId, Sha2IdGenerator, TemplateId, TraderId};
pub use image::ImageRouter;
pub use locale::{DEFAULT_LANGUAGES, LocaleTables};
pub use plugin::{
    AlreadyRegistered, HookResult, Plugin, PluginHost, PostDbLoadContext, PreLoadContext,
    TraderRegistry,
};
