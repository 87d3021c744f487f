//! Fluent construction of sale offers.
//!
//! One [`AssortBuilder`] builds one offer: chain the configuration methods,
//! then call [`AssortBuilder::finalize`] to write the offer's four records
//! (item, restriction, loyalty, price) into a trader's [`AssortTable`] under
//! a single freshly generated id.
//!
//! The configuration methods return `&mut Self` so a whole offer reads as
//! one expression:
//!
//! ```
//! use host_api::{AssortTable, Currency, Sha2IdGenerator};
//! use iona_trader::AssortBuilder;
//!
//! let mut ids = Sha2IdGenerator::default();
//! let mut assort = AssortTable::default();
//!
//! AssortBuilder::new("factory-key")
//!     .stack_count(200)
//!     .buy_restriction(10)
//!     .add_cost(Currency::Roubles, 2000)
//!     .loyalty_level(1)
//!     .finalize(&mut ids, &mut assort)
//!     .unwrap();
//! ```
//!
//! Because fluent setters cannot return `Result` without breaking the
//! chain, an invalid argument (a zero count or amount) is latched and
//! reported by `finalize` instead of being applied.

use host_api::{
    AssortTable, BuyRestriction, CostComponent, DatabaseError, IdGenerator, OfferId, TemplateId,
};

/// Errors surfaced when finalizing an offer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssortError {
    /// A setter received a zero count, amount, or tier.
    #[error("offer for {template}: {field} must be positive")]
    NonPositive {
        template: TemplateId,
        field: &'static str,
    },

    /// `finalize` was called before any cost component was added.
    #[error("offer for {template} has no cost component")]
    MissingCost { template: TemplateId },

    /// `finalize` was called before a loyalty level was set.
    #[error("offer for {template} has no loyalty level")]
    MissingLoyaltyLevel { template: TemplateId },

    /// The builder was used again after a successful `finalize`.
    #[error("offer for {template} was already finalized")]
    AlreadyFinalized { template: TemplateId },

    /// The generated offer id was already present in the target table.
    /// Fatal: the id generator contract is broken.
    #[error(transparent)]
    Collision(#[from] DatabaseError),
}

/// Accumulates one offer's attributes, then emits the normalized records.
///
/// State machine: configuring until `finalize` succeeds, finalized and inert
/// afterwards. Builders are independent; nothing is shared between two
/// in-progress offers.
#[derive(Debug)]
pub struct AssortBuilder {
    template: TemplateId,
    stack_count: Option<u32>,
    buy_restriction: Option<u32>,
    costs: Vec<CostComponent>,
    loyalty_level: Option<u8>,
    finalized: bool,
    defect: Option<AssortError>,
}

impl AssortBuilder {
    /// Starts an offer for the given item template.
    ///
    /// The template is taken as-is; whether it names a real item is the
    /// host's concern.
    pub fn new(template: impl Into<TemplateId>) -> Self {
        Self {
            template: template.into(),
            stack_count: None,
            buy_restriction: None,
            costs: Vec::new(),
            loyalty_level: None,
            finalized: false,
            defect: None,
        }
    }

    /// Quantity available per restock. Defaults to 1 when never set.
    pub fn stack_count(&mut self, count: u32) -> &mut Self {
        if self.open() && self.positive(count.into(), "stack count") {
            self.stack_count = Some(count);
        }
        self
    }

    /// Caps how many units one buyer may purchase before the next restock.
    /// Offers without a cap are unlimited.
    pub fn buy_restriction(&mut self, max_per_buyer: u32) -> &mut Self {
        if self.open() && self.positive(max_per_buyer.into(), "buy restriction") {
            self.buy_restriction = Some(max_per_buyer);
        }
        self
    }

    /// Adds one price component. Call repeatedly for multi-component prices
    /// (money plus barter items); components accumulate as a list and are
    /// never summed.
    pub fn add_cost(&mut self, reference: impl Into<TemplateId>, amount: u32) -> &mut Self {
        if self.open() && self.positive(amount.into(), "cost amount") {
            self.costs.push(CostComponent::new(reference, amount));
        }
        self
    }

    /// Loyalty tier a buyer needs before the offer is visible.
    pub fn loyalty_level(&mut self, tier: u8) -> &mut Self {
        if self.open() && self.positive(tier.into(), "loyalty level") {
            self.loyalty_level = Some(tier);
        }
        self
    }

    /// Validates the offer, derives a fresh id, and writes the four records
    /// into `assort`.
    ///
    /// On success the builder is finalized and must not be reused. On a
    /// validation or state error nothing is written. A duplicate generated
    /// id fails partway through the four inserts; the builder does not roll
    /// back, the collision propagates to the caller as fatal.
    pub fn finalize(
        &mut self,
        ids: &mut dyn IdGenerator,
        assort: &mut AssortTable,
    ) -> Result<OfferId, AssortError> {
        if self.finalized {
            return Err(AssortError::AlreadyFinalized {
                template: self.template.clone(),
            });
        }
        if let Some(defect) = &self.defect {
            return Err(defect.clone());
        }
        if self.costs.is_empty() {
            return Err(AssortError::MissingCost {
                template: self.template.clone(),
            });
        }
        let Some(loyalty) = self.loyalty_level else {
            return Err(AssortError::MissingLoyaltyLevel {
                template: self.template.clone(),
            });
        };

        let offer = ids.next_id();
        self.finalized = true;

        assort.insert_item_record(
            offer.clone(),
            self.template.clone(),
            self.stack_count.unwrap_or(1),
        )?;
        let restriction = match self.buy_restriction {
            Some(max) => BuyRestriction::MaxPerBuyer(max),
            None => BuyRestriction::Unlimited,
        };
        assort.insert_restriction_record(offer.clone(), restriction)?;
        assort.insert_loyalty_record(offer.clone(), loyalty)?;
        assort.insert_price_record(offer.clone(), std::mem::take(&mut self.costs))?;

        Ok(offer)
    }

    /// True while the builder still accepts configuration. A call on a
    /// finalized builder latches a state defect instead of mutating.
    fn open(&mut self) -> bool {
        if self.finalized {
            self.latch(AssortError::AlreadyFinalized {
                template: self.template.clone(),
            });
            return false;
        }
        true
    }

    fn positive(&mut self, value: u64, field: &'static str) -> bool {
        if value == 0 {
            self.latch(AssortError::NonPositive {
                template: self.template.clone(),
                field,
            });
            return false;
        }
        true
    }

    // First defect wins; later ones would only obscure the root cause.
    fn latch(&mut self, defect: AssortError) {
        if self.defect.is_none() {
            self.defect = Some(defect);
        }
    }
}
