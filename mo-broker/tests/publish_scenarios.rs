mod support;

use mo_broker::{
    Attribute, DeliveryQos, DomainPath, EntityFilter, EntityKey, OperationIdentity,
    Publication, PublishError, PublisherScopeKey, QosLevel, SessionType, SubscriberScopeKey,
    SubscriptionId, UpdateType, ValidationFailure,
};
use serde_json::json;
use support::{
    make_broker, named_update, publication, publisher, register_filters, register_name_publisher,
    register_pattern, scope, subscriber, update_names, PROVIDER_URI,
};

#[test]
fn battery_update_reaches_battery_subscription_only() {
    let broker = make_broker("power-scenario");
    register_pattern(&broker, &subscriber("sat1.power"), "sub-A", "battery");
    register_name_publisher(&broker, &publisher("sat1.power"));

    let notifications = broker
        .publish(&publication("sat1.power", &["battery"]))
        .expect("battery update should validate");
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.subscriber_uri.as_str(), support::CONSUMER_URI);
    assert_eq!(notification.domain, DomainPath::parse("sat1.power"));
    assert_eq!(notification.updates.len(), 1);
    assert_eq!(notification.updates[0].subscription_id.as_str(), "sub-A");
    assert_eq!(update_names(&notification.updates[0].update_headers), ["battery"]);

    let silent = broker
        .publish(&publication("sat1.power", &["solar"]))
        .expect("solar update should validate");
    assert!(silent.is_empty());
}

#[test]
fn unknown_publisher_is_rejected_without_notifications() {
    let broker = make_broker("unknown-publisher");
    register_pattern(&broker, &subscriber("sat1"), "sub-A", "*");

    let error = broker
        .publish(&publication("sat1", &["battery"]))
        .expect_err("publisher was never registered");

    assert!(matches!(error, PublishError::UnknownPublisher { .. }));
    assert!(error.notifications().is_empty());
}

#[test]
fn rejected_updates_leave_the_valid_ones_deliverable() {
    let broker = make_broker("partial-failure");
    register_filters(
        &broker,
        &subscriber("sat1"),
        "sub-all",
        vec![EntityFilter::new(EntityKey::wildcard())],
    );
    register_name_publisher(&broker, &publisher("sat1"));

    let wrong_type = named_update("heater", UpdateType::Update)
        .with_key_values(vec![Some(Attribute::Long(7))]);
    let wrong_count = named_update("gyro", UpdateType::Update).with_key_values(Vec::new());
    let publication = Publication::new(PROVIDER_URI, scope("sat1"))
        .with_update(named_update("battery", UpdateType::Update), vec![json!(1)])
        .with_update(wrong_type, vec![json!(2)])
        .with_update(named_update("solar", UpdateType::Update), vec![json!(3)])
        .with_update(wrong_count, vec![json!(4)]);

    let Err(PublishError::UnknownEntity {
        failed,
        notifications,
    }) = broker.publish(&publication)
    else {
        panic!("two updates should fail schema validation");
    };

    let failed_indices: Vec<usize> = failed.iter().map(|failure| failure.index).collect();
    assert_eq!(failed_indices, [1, 3]);
    assert!(matches!(
        failed[0].reason,
        ValidationFailure::KeyTypeMismatch { position: 0, .. }
    ));
    assert_eq!(
        failed[1].reason,
        ValidationFailure::KeyCountMismatch {
            expected: 1,
            actual: 0
        }
    );

    assert_eq!(notifications.len(), 1);
    let update = &notifications[0].updates[0];
    assert_eq!(update_names(&update.update_headers), ["battery", "solar"]);
    assert_eq!(update.update_payload_columns, [vec![json!(1), json!(3)]]);
}

#[test]
fn overlapping_filters_deliver_each_update_once() {
    let broker = make_broker("dedup");
    register_filters(
        &broker,
        &subscriber("sat1"),
        "sub-A",
        vec![
            EntityFilter::new(EntityKey::named("battery")),
            EntityFilter::new(EntityKey::new(Some("battery"), Some(1), None, None)),
            EntityFilter::new(EntityKey::wildcard()).changes_only(),
        ],
    );
    register_name_publisher(&broker, &publisher("sat1"));

    let publication = Publication::new(PROVIDER_URI, scope("sat1"))
        .with_update(named_update("battery", UpdateType::Modification), Vec::new());
    let notifications = broker.publish(&publication).expect("update should validate");

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].update_count(), 1);
}

#[test]
fn updates_keep_publication_order_and_subscribers_are_sorted() {
    let broker = make_broker("ordering");
    let late = SubscriberScopeKey::new("mal:consumer-b", scope("sat1"));
    let early = SubscriberScopeKey::new("mal:consumer-a", scope("sat1"));
    register_pattern(&broker, &late, "sub-2", "*");
    register_pattern(&broker, &late, "sub-1", "panel");
    register_pattern(&broker, &early, "sub-1", "*");
    register_name_publisher(&broker, &publisher("sat1"));

    let notifications = broker
        .publish(&publication("sat1", &["solar", "battery", "panel"]))
        .expect("updates should validate");

    let subscribers: Vec<&str> = notifications
        .iter()
        .map(|notification| notification.subscriber_uri.as_str())
        .collect();
    assert_eq!(subscribers, ["mal:consumer-a", "mal:consumer-b"]);

    let late_updates = &notifications[1].updates;
    let ids: Vec<&str> = late_updates
        .iter()
        .map(|update| update.subscription_id.as_str())
        .collect();
    assert_eq!(ids, ["sub-1", "sub-2"]);
    assert_eq!(update_names(&late_updates[0].update_headers), ["panel"]);
    assert_eq!(
        update_names(&late_updates[1].update_headers),
        ["solar", "battery", "panel"]
    );
}

#[test]
fn deeper_publications_need_a_matching_sub_domain() {
    let broker = make_broker("sub-domains");
    let consumer = subscriber("sat1");
    register_pattern(&broker, &consumer, "exact", "*");
    register_filters(
        &broker,
        &consumer,
        "power-only",
        vec![EntityFilter::new(EntityKey::wildcard()).with_sub_domain(DomainPath::parse("power"))],
    );
    register_filters(
        &broker,
        &consumer,
        "everything-below",
        vec![EntityFilter::new(EntityKey::wildcard()).with_sub_domain(DomainPath::parse("*"))],
    );
    register_name_publisher(&broker, &publisher("sat1.power.cells"));
    register_name_publisher(&broker, &publisher("sat1.power"));
    register_name_publisher(&broker, &publisher("sat2"));

    let ids_for = |domain: &str| -> Vec<String> {
        broker
            .publish(&publication(domain, &["battery"]))
            .expect("update should validate")
            .iter()
            .flat_map(|notification| notification.updates.iter())
            .map(|update| update.subscription_id.to_string())
            .collect()
    };

    assert_eq!(ids_for("sat1.power"), ["everything-below", "power-only"]);
    assert_eq!(ids_for("sat1.power.cells"), ["everything-below"]);
    assert!(ids_for("sat2").is_empty());
}

#[test]
fn notification_carries_subscriber_delivery_settings() {
    let broker = make_broker("delivery");
    let consumer = SubscriberScopeKey::new(
        "mal:consumer",
        scope("sat1")
            .with_network_zone("ground")
            .with_session(SessionType::Replay, "pass-42"),
    );
    broker.register(
        &consumer,
        9,
        SubscriptionId::from("sub-A"),
        vec![EntityFilter::new(EntityKey::wildcard())],
        DeliveryQos::new(QosLevel::Queued, 5).with_property("ttl", "30"),
    );
    broker.register_publisher(
        &PublisherScopeKey::new(
            PROVIDER_URI,
            scope("sat1").with_session(SessionType::Replay, "pass-42"),
        ),
        1,
        QosLevel::Assured,
        1,
        support::name_schema(),
    );

    let publication = Publication::new(
        PROVIDER_URI,
        scope("sat1").with_session(SessionType::Replay, "pass-42"),
    )
    .with_update(named_update("battery", UpdateType::Update), Vec::new());
    let notifications = broker.publish(&publication).expect("update should validate");

    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.transaction_id, 9);
    assert_eq!(notification.network_zone, "ground");
    assert_eq!(notification.session_type, SessionType::Replay);
    assert_eq!(notification.session_name, "pass-42");
    assert_eq!(notification.qos_level, QosLevel::Queued);
    assert_eq!(notification.priority, 5);
    assert_eq!(
        notification.qos_properties.get("ttl").map(String::as_str),
        Some("30")
    );
    assert_eq!(notification.operation, OperationIdentity::new(4, 2, 1, 1));

    // Live publisher of the same domain never reaches the replay session.
    register_name_publisher(&broker, &publisher("sat1"));
    assert!(broker
        .publish(&support::publication("sat1", &["battery"]))
        .expect("update should validate")
        .is_empty());
}

#[test]
fn key_count_mismatch_in_the_middle_keeps_its_neighbours() {
    let broker = make_broker("middle-failure");
    register_pattern(&broker, &subscriber("sat1"), "sub-all", "*");
    register_name_publisher(&broker, &publisher("sat1"));

    let publication = Publication::new(PROVIDER_URI, scope("sat1"))
        .with_update(named_update("battery", UpdateType::Update), Vec::new())
        .with_update(
            named_update("solar", UpdateType::Update).with_key_values(Vec::new()),
            Vec::new(),
        )
        .with_update(named_update("panel", UpdateType::Update), Vec::new());

    let Err(PublishError::UnknownEntity {
        failed,
        notifications,
    }) = broker.publish(&publication)
    else {
        panic!("the second update has no key values");
    };

    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].index, 1);
    assert_eq!(
        failed[0].reason,
        ValidationFailure::KeyCountMismatch {
            expected: 1,
            actual: 0
        }
    );
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        update_names(&notifications[0].updates[0].update_headers),
        ["battery", "panel"]
    );
}

#[test]
fn wider_payload_after_narrower_one_is_delivered_to_its_own_update() {
    let broker = make_broker("payload-widths");
    register_pattern(&broker, &subscriber("sat1"), "sub-battery", "battery");
    register_pattern(&broker, &subscriber("sat1"), "sub-solar", "solar");
    register_name_publisher(&broker, &publisher("sat1"));

    let publication = Publication::new(PROVIDER_URI, scope("sat1"))
        .with_update(named_update("battery", UpdateType::Update), vec![json!("b0")])
        .with_update(
            named_update("solar", UpdateType::Update),
            vec![json!("s0"), json!("s1")],
        );

    let notifications = broker
        .publish(&publication)
        .expect("both updates carry a full payload row");

    assert_eq!(notifications.len(), 1);
    let battery = notifications[0]
        .subscription_update(&SubscriptionId::from("sub-battery"))
        .expect("battery subscription is notified");
    assert_eq!(
        battery.update_payload_columns,
        [vec![json!("b0")], vec![json!(null)]]
    );
    let solar = notifications[0]
        .subscription_update(&SubscriptionId::from("sub-solar"))
        .expect("solar subscription is notified");
    assert_eq!(update_names(&solar.update_headers), ["solar"]);
    assert_eq!(
        solar.update_payload_columns,
        [vec![json!("s0")], vec![json!("s1")]]
    );
}

#[test]
fn notification_carries_the_latest_register_transaction_of_the_scope() {
    let broker = make_broker("transactions");
    let consumer = subscriber("sat1");
    for (transaction_id, id) in [(1, "sub-A"), (2, "sub-B")] {
        broker.register(
            &consumer,
            transaction_id,
            SubscriptionId::from(id),
            vec![EntityFilter::new(EntityKey::named("battery"))],
            DeliveryQos::default(),
        );
    }
    register_name_publisher(&broker, &publisher("sat1"));

    let notifications = broker
        .publish(&publication("sat1", &["battery"]))
        .expect("update should validate");

    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].transaction_id, 2);
    assert_eq!(notifications[0].updates.len(), 2);
    let first = broker
        .subscription(&consumer, &SubscriptionId::from("sub-A"))
        .expect("sub-A is registered");
    assert_eq!(first.transaction_id(), 1);
}
