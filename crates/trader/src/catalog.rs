//! Embedded fixtures: vendor metadata and the sale catalog.
//!
//! Both files are compiled into the plugin with `include_str!` so a broken
//! install cannot lose them; parse failures still go through the normal
//! error path because a bad edit should fail the plugin, not the process.

use anyhow::Context;
use host_api::{Currency, TemplateId, TraderBase};
use serde::{Deserialize, Serialize};

const BASE_JSON: &str = include_str!("../db/base.json");
const ASSORT_RON: &str = include_str!("../db/assort.ron");

/// One cost component as written in the catalog file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostSpec {
    /// Money price in one of the host currencies.
    Money(Currency, u32),
    /// Barter price: an item template and the amount of it required.
    Barter(TemplateId, u32),
}

impl CostSpec {
    pub fn reference(&self) -> TemplateId {
        match self {
            CostSpec::Money(currency, _) => currency.template_id(),
            CostSpec::Barter(template, _) => template.clone(),
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            CostSpec::Money(_, amount) | CostSpec::Barter(_, amount) => *amount,
        }
    }
}

/// One catalog entry, fed through the assort builder at load time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSpec {
    pub template: TemplateId,
    pub stack: u32,
    #[serde(default)]
    pub buy_limit: Option<u32>,
    pub loyalty: u8,
    pub cost: Vec<CostSpec>,
}

/// Top-level structure of `db/assort.ron`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssortCatalog {
    pub offers: Vec<OfferSpec>,
}

/// Parses the embedded vendor metadata.
pub fn trader_base() -> anyhow::Result<TraderBase> {
    serde_json::from_str(BASE_JSON).context("Failed to parse embedded db/base.json")
}

/// Parses the embedded sale catalog.
pub fn assort_catalog() -> anyhow::Result<AssortCatalog> {
    ron::from_str(ASSORT_RON).context("Failed to parse embedded db/assort.ron")
}
