//! Iona — a custom trader plugin.
//!
//! Registers a new vendor with the host during its two lifecycle hooks:
//! pre-load wires up the avatar route, restock interval, trader registry
//! entry, and flea-market eligibility; post-database-load inserts the trader
//! record, builds every catalog offer through [`AssortBuilder`], and writes
//! the locale text. All vendor data comes from the embedded fixtures in
//! `db/`.

pub mod assort;
pub mod catalog;
pub mod registration;

pub use assort::{AssortBuilder, AssortError};
pub use catalog::{AssortCatalog, CostSpec, OfferSpec};

use anyhow::Context;
use host_api::{HookResult, Plugin, PostDbLoadContext, PreLoadContext, TraderBase, TraderId};
use tracing::{debug, info};

/// The plugin: fixture data plus the registration sequence.
pub struct IonaTrader {
    base: TraderBase,
    catalog: AssortCatalog,
}

impl IonaTrader {
    /// Builds the plugin from the fixtures compiled into the crate.
    pub fn from_embedded_fixtures() -> anyhow::Result<Self> {
        Ok(Self {
            base: catalog::trader_base()?,
            catalog: catalog::assort_catalog()?,
        })
    }

    /// Builds the plugin from explicit data, mainly for tests and tooling.
    pub fn from_parts(base: TraderBase, catalog: AssortCatalog) -> Self {
        Self { base, catalog }
    }

    pub fn trader_id(&self) -> &TraderId {
        &self.base.id
    }
}

impl Plugin for IonaTrader {
    fn name(&self) -> &str {
        "iona-trader"
    }

    fn pre_load(&mut self, ctx: &mut PreLoadContext<'_>) -> HookResult {
        debug!(target: "trader", "pre-load starting");
        info!(target: "trader", "Iona is saving her game and will be with you shortly.");

        registration::register_profile_image(ctx.image_router, &self.base);
        registration::set_refresh_interval(ctx.trader_config, &self.base);
        ctx.traders
            .register(self.base.id.clone())
            .context("registering trader id")?;
        registration::enable_flea_listings(ctx.ragfair_config, &self.base);

        info!(target: "trader", "Iona is ready to sell you all your degen needs.");
        debug!(target: "trader", "pre-load finished");
        Ok(())
    }

    fn post_db_load(&mut self, ctx: &mut PostDbLoadContext<'_>) -> HookResult {
        debug!(target: "trader", "post-db-load starting");

        ctx.database
            .insert_trader(self.base.clone())
            .context("inserting trader record")?;

        let record = ctx.database.trader_mut(&self.base.id)?;
        for offer in &self.catalog.offers {
            let mut builder = AssortBuilder::new(offer.template.clone());
            builder.stack_count(offer.stack).loyalty_level(offer.loyalty);
            if let Some(limit) = offer.buy_limit {
                builder.buy_restriction(limit);
            }
            for cost in &offer.cost {
                builder.add_cost(cost.reference(), cost.amount());
            }
            builder
                .finalize(ctx.ids, &mut record.assort)
                .with_context(|| format!("registering offer for {}", offer.template))?;
        }
        debug!(
            target: "trader",
            offers = record.assort.len(),
            "assort registered"
        );

        registration::write_locales(&mut ctx.database.locales, &self.base);

        debug!(target: "trader", "post-db-load finished");
        Ok(())
    }
}
