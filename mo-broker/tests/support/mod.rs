#![allow(dead_code)]

use mo_broker::{
    Attribute, AttributeType, Broker, DeliveryQos, DomainPath, EntityFilter, EntityKey,
    KeySchema, OperationIdentity, Publication, PublisherScopeKey, QosLevel, ScopeKey,
    SubscriberScopeKey, SubscriptionId, UpdateHeader, UpdateType,
};
use std::sync::Once;

pub(crate) const CONSUMER_URI: &str = "mal:consumer";
pub(crate) const PROVIDER_URI: &str = "mal:provider";

static TRACING: Once = Once::new();

/// Routes broker events through the libtest capture writer, once per test binary.
pub(crate) fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub(crate) fn make_broker(name: &str) -> Broker {
    init_tracing();
    Broker::new(name)
}

pub(crate) fn scope(domain: &str) -> ScopeKey {
    ScopeKey::new(OperationIdentity::new(4, 2, 1, 1), DomainPath::parse(domain))
}

pub(crate) fn subscriber(domain: &str) -> SubscriberScopeKey {
    SubscriberScopeKey::new(CONSUMER_URI, scope(domain))
}

pub(crate) fn publisher(domain: &str) -> PublisherScopeKey {
    PublisherScopeKey::new(PROVIDER_URI, scope(domain))
}

pub(crate) fn name_schema() -> KeySchema {
    KeySchema::from_pairs([("name", AttributeType::String)])
}

pub(crate) fn register_filters(
    broker: &Broker,
    key: &SubscriberScopeKey,
    id: &str,
    filters: Vec<EntityFilter>,
) {
    broker.register(
        key,
        1,
        SubscriptionId::from(id),
        filters,
        DeliveryQos::new(QosLevel::Assured, 1),
    );
}

pub(crate) fn register_pattern(broker: &Broker, key: &SubscriberScopeKey, id: &str, name: &str) {
    register_filters(broker, key, id, vec![EntityFilter::new(EntityKey::named(name))]);
}

pub(crate) fn register_name_publisher(broker: &Broker, key: &PublisherScopeKey) {
    broker.register_publisher(key, 1, QosLevel::Assured, 1, name_schema());
}

/// Update header keyed `(name, 0, 0, 0)` with a matching `name` key value.
pub(crate) fn named_update(name: &str, update_type: UpdateType) -> UpdateHeader {
    UpdateHeader::new(EntityKey::named(name), update_type)
        .with_key_values(vec![Some(Attribute::string(name))])
}

pub(crate) fn publication(domain: &str, names: &[&str]) -> Publication {
    names
        .iter()
        .fold(Publication::new(PROVIDER_URI, scope(domain)), |publication, name| {
            publication.with_update(named_update(name, UpdateType::Update), Vec::new())
        })
}

pub(crate) fn update_names(headers: &[UpdateHeader]) -> Vec<String> {
    headers
        .iter()
        .filter_map(|header| header.key.first_sub_key.clone())
        .collect()
}
