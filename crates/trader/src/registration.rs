//! Registration calls against the injected host interfaces.
//!
//! Each function does one registration step for a trader described by a
//! [`TraderBase`]; the plugin entry point sequences them across the two
//! lifecycle hooks.

use host_api::{ImageRouter, LocaleTables, RagfairConfig, TraderBase, TraderConfig};
use tracing::debug;

/// Binds the trader's portrait to its avatar route, keyed by trader id.
pub fn register_profile_image(router: &mut ImageRouter, base: &TraderBase) {
    let route = format!("/files/trader/avatar/{}", base.id);
    debug!(target: "trader::registration", trader = %base.id, route, "registering avatar route");
    router.register(route, base.avatar.clone());
}

/// Copies the fixture's restock interval bounds into the host trader config.
pub fn set_refresh_interval(config: &mut TraderConfig, base: &TraderBase) {
    config.set_update_interval(base.id.clone(), base.refresh);
}

/// Allows the trader's offers to be listed on the flea market.
pub fn enable_flea_listings(config: &mut RagfairConfig, base: &TraderBase) {
    config.set_trader_eligible(base.id.clone(), true);
}

/// Writes the trader's display text under every seeded language.
///
/// The same untranslated text goes into all languages; players on non-English
/// clients see English rather than a missing-key placeholder.
pub fn write_locales(locales: &mut LocaleTables, base: &TraderBase) {
    let languages: Vec<String> = locales.languages().map(str::to_owned).collect();
    for language in &languages {
        locales.set(language, format!("{} FullName", base.id), base.name.clone());
        locales.set(
            language,
            format!("{} FirstName", base.id),
            base.first_name.clone(),
        );
        locales.set(
            language,
            format!("{} Nickname", base.id),
            base.nickname.clone(),
        );
        locales.set(
            language,
            format!("{} Location", base.id),
            base.location.clone(),
        );
        locales.set(
            language,
            format!("{} Description", base.id),
            base.description.clone(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use host_api::{Currency, RefreshInterval, TraderId};

    use super::*;

    fn base() -> TraderBase {
        TraderBase {
            id: TraderId::new("aabbccddeeff001122334455"),
            name: "Test Trader".into(),
            first_name: "Test".into(),
            nickname: "Tester".into(),
            location: "Nowhere".into(),
            avatar: PathBuf::from("res/tester.jpg"),
            currency: Currency::Roubles,
            refresh: RefreshInterval::new(600, 1200),
            description: "Sells tests.".into(),
        }
    }

    #[test]
    fn avatar_route_is_keyed_by_trader_id() {
        let mut router = ImageRouter::default();
        register_profile_image(&mut router, &base());
        assert_eq!(
            router.file_for("/files/trader/avatar/aabbccddeeff001122334455"),
            Some(Path::new("res/tester.jpg"))
        );
    }

    #[test]
    fn locales_cover_every_language() {
        let mut locales = LocaleTables::with_languages(["en", "fr", "ge"]);
        let base = base();
        write_locales(&mut locales, &base);

        let key = format!("{} Description", base.id);
        for language in ["en", "fr", "ge"] {
            assert_eq!(locales.get(language, &key), Some("Sells tests."));
        }
    }

    #[test]
    fn refresh_interval_lands_in_config() {
        let mut config = TraderConfig::default();
        let base = base();
        set_refresh_interval(&mut config, &base);
        assert_eq!(
            config.update_interval(&base.id),
            Some(RefreshInterval::new(600, 1200))
        );
    }
}
