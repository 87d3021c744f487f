//! In-memory database tables a content plugin writes into.
//!
//! The host owns one [`DatabaseTables`] instance for the whole process.
//! Plugins receive a mutable reference during the post-database-load hook
//! and register their traders and sale offers here; the host's trading code
//! reads the same tables afterwards.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::RefreshInterval;
use crate::currency::Currency;
use crate::ids::{OfferId, TemplateId, TraderId};
use crate::locale::LocaleTables;

/// Errors raised by database table mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    /// An offer id was inserted twice into the same assort sub-table.
    ///
    /// Under a correct id generator this cannot happen; when it does, the
    /// write is refused and the caller must treat it as fatal.
    #[error("offer {offer} already present in {record} records")]
    DuplicateOffer { offer: OfferId, record: &'static str },

    #[error("trader {0} already present in the database")]
    DuplicateTrader(TraderId),

    #[error("trader {0} is not in the database")]
    UnknownTrader(TraderId),
}

/// Static vendor metadata, consumed verbatim from a plugin's fixture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraderBase {
    pub id: TraderId,
    pub name: String,
    pub first_name: String,
    pub nickname: String,
    pub location: String,
    pub avatar: PathBuf,
    pub currency: Currency,
    pub refresh: RefreshInterval,
    pub description: String,
}

/// One item instance offered for sale: the template it instantiates and the
/// quantity available per restock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub template: TemplateId,
    pub stack_count: u32,
}

/// Per-buyer purchase cap for one offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyRestriction {
    /// No cap; a buyer may take the whole stack.
    Unlimited,
    /// At most this many units per buyer before the next restock.
    MaxPerBuyer(u32),
}

/// One component of an offer's price: a template reference (currency or
/// barter item) and the amount of it required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostComponent {
    pub reference: TemplateId,
    pub amount: u32,
}

impl CostComponent {
    pub fn new(reference: impl Into<TemplateId>, amount: u32) -> Self {
        Self {
            reference: reference.into(),
            amount,
        }
    }
}

/// A trader's full sale catalog: four parallel record sets keyed by offer id.
///
/// Every complete offer occupies exactly one slot in each set. Inserts refuse
/// duplicate ids rather than overwrite, so a misbehaving id generator cannot
/// silently corrupt an existing offer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssortTable {
    items: HashMap<OfferId, ItemRecord>,
    restrictions: HashMap<OfferId, BuyRestriction>,
    loyalty: HashMap<OfferId, u8>,
    prices: HashMap<OfferId, Vec<CostComponent>>,
}

impl AssortTable {
    pub fn insert_item_record(
        &mut self,
        offer: OfferId,
        template: TemplateId,
        stack_count: u32,
    ) -> Result<(), DatabaseError> {
        if self.items.contains_key(&offer) {
            return Err(DatabaseError::DuplicateOffer {
                offer,
                record: "item",
            });
        }
        self.items.insert(
            offer,
            ItemRecord {
                template,
                stack_count,
            },
        );
        Ok(())
    }

    pub fn insert_restriction_record(
        &mut self,
        offer: OfferId,
        restriction: BuyRestriction,
    ) -> Result<(), DatabaseError> {
        if self.restrictions.contains_key(&offer) {
            return Err(DatabaseError::DuplicateOffer {
                offer,
                record: "restriction",
            });
        }
        self.restrictions.insert(offer, restriction);
        Ok(())
    }

    pub fn insert_loyalty_record(&mut self, offer: OfferId, tier: u8) -> Result<(), DatabaseError> {
        if self.loyalty.contains_key(&offer) {
            return Err(DatabaseError::DuplicateOffer {
                offer,
                record: "loyalty",
            });
        }
        self.loyalty.insert(offer, tier);
        Ok(())
    }

    pub fn insert_price_record(
        &mut self,
        offer: OfferId,
        components: Vec<CostComponent>,
    ) -> Result<(), DatabaseError> {
        if self.prices.contains_key(&offer) {
            return Err(DatabaseError::DuplicateOffer {
                offer,
                record: "price",
            });
        }
        self.prices.insert(offer, components);
        Ok(())
    }

    pub fn item_record(&self, offer: &OfferId) -> Option<&ItemRecord> {
        self.items.get(offer)
    }

    pub fn restriction_record(&self, offer: &OfferId) -> Option<BuyRestriction> {
        self.restrictions.get(offer).copied()
    }

    pub fn loyalty_record(&self, offer: &OfferId) -> Option<u8> {
        self.loyalty.get(offer).copied()
    }

    pub fn price_record(&self, offer: &OfferId) -> Option<&[CostComponent]> {
        self.prices.get(offer).map(Vec::as_slice)
    }

    /// Iterates over all offer ids with an item record.
    pub fn offer_ids(&self) -> impl Iterator<Item = &OfferId> + '_ {
        self.items.keys()
    }

    /// Number of offers (item records) in the table.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when every offer id has a record in all four sets.
    pub fn is_consistent(&self) -> bool {
        self.items.keys().all(|id| {
            self.restrictions.contains_key(id)
                && self.loyalty.contains_key(id)
                && self.prices.contains_key(id)
        }) && self.restrictions.len() == self.items.len()
            && self.loyalty.len() == self.items.len()
            && self.prices.len() == self.items.len()
    }
}

/// One trader's database entry: base metadata plus its assort.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraderRecord {
    pub base: TraderBase,
    pub assort: AssortTable,
}

impl TraderRecord {
    /// A fresh record with no offers yet.
    pub fn new(base: TraderBase) -> Self {
        Self {
            base,
            assort: AssortTable::default(),
        }
    }
}

/// The host's in-memory database, as visible to content plugins.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DatabaseTables {
    traders: HashMap<TraderId, TraderRecord>,
    pub locales: LocaleTables,
}

impl DatabaseTables {
    pub fn with_locales(locales: LocaleTables) -> Self {
        Self {
            traders: HashMap::new(),
            locales,
        }
    }

    /// Inserts a new trader record. The trader must not already exist.
    pub fn insert_trader(&mut self, base: TraderBase) -> Result<(), DatabaseError> {
        if self.traders.contains_key(&base.id) {
            return Err(DatabaseError::DuplicateTrader(base.id));
        }
        self.traders.insert(base.id.clone(), TraderRecord::new(base));
        Ok(())
    }

    pub fn trader(&self, id: &TraderId) -> Option<&TraderRecord> {
        self.traders.get(id)
    }

    pub fn trader_mut(&mut self, id: &TraderId) -> Result<&mut TraderRecord, DatabaseError> {
        self.traders
            .get_mut(id)
            .ok_or_else(|| DatabaseError::UnknownTrader(id.clone()))
    }

    pub fn trader_ids(&self) -> impl Iterator<Item = &TraderId> + '_ {
        self.traders.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: &str) -> OfferId {
        OfferId::new(id)
    }

    #[test]
    fn duplicate_item_record_is_refused() {
        let mut assort = AssortTable::default();
        assort
            .insert_item_record(offer("a"), TemplateId::new("tpl"), 1)
            .unwrap();

        let err = assort
            .insert_item_record(offer("a"), TemplateId::new("other"), 5)
            .unwrap_err();
        assert!(matches!(err, DatabaseError::DuplicateOffer { .. }));

        // The original record survives the refused write.
        assert_eq!(
            assort.item_record(&offer("a")).unwrap().template,
            TemplateId::new("tpl")
        );
    }

    #[test]
    fn consistency_requires_all_four_records() {
        let mut assort = AssortTable::default();
        assort
            .insert_item_record(offer("a"), TemplateId::new("tpl"), 1)
            .unwrap();
        assert!(!assort.is_consistent());

        assort
            .insert_restriction_record(offer("a"), BuyRestriction::Unlimited)
            .unwrap();
        assert!(!assort.is_consistent());

        assort.insert_loyalty_record(offer("a"), 1).unwrap();
        assort
            .insert_price_record(offer("a"), vec![CostComponent::new(Currency::Roubles, 100)])
            .unwrap();
        assert!(assort.is_consistent());
    }

    #[test]
    fn duplicate_trader_is_refused() {
        let base = TraderBase {
            id: TraderId::new("trader"),
            name: "Trader".into(),
            first_name: "T".into(),
            nickname: "T".into(),
            location: "Somewhere".into(),
            avatar: PathBuf::from("trader.jpg"),
            currency: Currency::Roubles,
            refresh: RefreshInterval::new(600, 1200),
            description: "A trader.".into(),
        };

        let mut db = DatabaseTables::default();
        db.insert_trader(base.clone()).unwrap();
        assert_eq!(
            db.insert_trader(base),
            Err(DatabaseError::DuplicateTrader(TraderId::new("trader")))
        );
    }
}
