//! Host money currencies.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::ids::TemplateId;

/// The three money currencies the host understands.
///
/// Each currency is itself an item template; a money price is just a cost
/// component whose reference is one of these templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Currency {
    Roubles,
    Dollars,
    Euros,
}

impl Currency {
    /// The fixed template id the host assigns to this currency.
    pub fn template_id(self) -> TemplateId {
        let id = match self {
            Currency::Roubles => "5449016a4bdc2d6f028b456f",
            Currency::Dollars => "5696686a4bdc2da3298b456a",
            Currency::Euros => "569668774bdc2da2298b4568",
        };
        TemplateId::new(id)
    }
}

impl From<Currency> for TemplateId {
    fn from(currency: Currency) -> Self {
        currency.template_id()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn currency_templates_are_distinct() {
        let templates: std::collections::HashSet<_> =
            Currency::iter().map(Currency::template_id).collect();
        assert_eq!(templates.len(), 3);
    }
}
