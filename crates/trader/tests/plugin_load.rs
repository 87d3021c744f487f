//! End-to-end load: run the plugin through both host hooks and inspect
//! everything it registered.

use host_api::{
    BuyRestriction, Currency, Plugin, PluginHost, RefreshInterval, TraderId,
};
use iona_trader::IonaTrader;

fn loaded_host() -> (PluginHost, TraderId) {
    // Surface plugin logs while debugging test failures.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let plugin = IonaTrader::from_embedded_fixtures().expect("fixtures should parse");
    let trader_id = plugin.trader_id().clone();

    let mut plugins: Vec<Box<dyn Plugin>> = vec![Box::new(plugin)];
    let mut host = PluginHost::new();
    assert_eq!(host.load(&mut plugins), 1, "plugin should load cleanly");

    (host, trader_id)
}

#[test]
fn pre_load_registers_trader_with_the_host() {
    let (host, trader_id) = loaded_host();

    assert!(host.traders().contains(&trader_id));
    assert!(host.ragfair_config().is_trader_eligible(&trader_id));
    assert_eq!(
        host.trader_config().update_interval(&trader_id),
        Some(RefreshInterval::new(1800, 3600))
    );

    let route = format!("/files/trader/avatar/{trader_id}");
    assert!(
        host.image_router().file_for(&route).is_some(),
        "avatar route should be bound"
    );
}

#[test]
fn post_db_load_builds_the_full_assort() {
    let (host, trader_id) = loaded_host();

    let record = host
        .database()
        .trader(&trader_id)
        .expect("trader record should exist");
    let assort = &record.assort;

    assert_eq!(assort.len(), 16);
    assert!(assort.is_consistent(), "every offer needs all four records");

    for offer in assort.offer_ids() {
        let item = assort.item_record(offer).unwrap();
        assert_eq!(item.stack_count, 200);
        assert_eq!(
            assort.restriction_record(offer),
            Some(BuyRestriction::MaxPerBuyer(10))
        );
        assert_eq!(assort.loyalty_record(offer), Some(1));

        let price = assort.price_record(offer).unwrap();
        assert_eq!(price[0].reference, Currency::Roubles.template_id());
        assert_eq!(price[0].amount, 2000);
    }

    // Exactly one offer carries the extra barter component.
    let multi_component = assort
        .offer_ids()
        .filter(|offer| assort.price_record(offer).unwrap().len() == 2)
        .count();
    assert_eq!(multi_component, 1);
}

#[test]
fn locale_text_is_written_under_every_language() {
    let (host, trader_id) = loaded_host();
    let locales = &host.database().locales;

    let nickname_key = format!("{trader_id} Nickname");
    let description_key = format!("{trader_id} Description");
    for language in host_api::DEFAULT_LANGUAGES {
        assert_eq!(
            locales.get(language, &nickname_key),
            Some("Iona"),
            "missing nickname for language {language}"
        );
        assert!(
            locales.get(language, &description_key).is_some(),
            "missing description for language {language}"
        );
    }
}

#[test]
fn loading_the_plugin_twice_fails_the_second_copy() {
    let first = IonaTrader::from_embedded_fixtures().unwrap();
    let second = IonaTrader::from_embedded_fixtures().unwrap();
    let trader_id = first.trader_id().clone();

    let mut plugins: Vec<Box<dyn Plugin>> = vec![Box::new(first), Box::new(second)];
    let mut host = PluginHost::new();

    // The duplicate registration fails the second copy's pre-load; the first
    // copy still loads completely.
    assert_eq!(host.load(&mut plugins), 1);
    assert_eq!(host.database().trader(&trader_id).unwrap().assort.len(), 16);
}
