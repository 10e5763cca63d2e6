/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Deterministic benchmark fixtures for the Criterion harness.

use crate::broker::Broker;
use crate::error::PublishError;
use crate::matching::domain_matcher::DomainPath;
use crate::matching::entity_key::EntityKey;
use crate::model::attribute::{Attribute, AttributeType};
use crate::model::entity_filter::EntityFilter;
use crate::model::publication::{Publication, UpdateHeader, UpdateType};
use crate::model::publisher::KeySchema;
use crate::model::scope_key::{
    OperationIdentity, PublisherScopeKey, ScopeKey, SubscriberScopeKey,
};
use crate::model::subscription::{DeliveryQos, QosLevel, SubscriptionId};
use serde_json::json;

const ENTITY_NAMES: [&str; 8] = [
    "battery", "solar", "panel", "heater", "wheel", "gyro", "antenna", "thruster",
];
const PUBLISHER_URI: &str = "mal:bench-provider";

fn scope(operation: u16, domain: &str) -> ScopeKey {
    ScopeKey::new(OperationIdentity::new(4, 2, operation, 1), DomainPath::parse(domain))
}

fn subscriber_key(index: usize) -> SubscriberScopeKey {
    SubscriberScopeKey::new(format!("mal:bench-consumer-{index}").as_str(), scope(1, "sat1"))
}

fn filter_for(index: usize) -> EntityFilter {
    match index % 4 {
        0 => EntityFilter::new(EntityKey::wildcard()),
        1 => EntityFilter::new(EntityKey::named(ENTITY_NAMES[index % ENTITY_NAMES.len()])),
        2 => EntityFilter::new(EntityKey::wildcard()).with_sub_domain(DomainPath::parse("*")),
        _ => EntityFilter::new(EntityKey::named(ENTITY_NAMES[index % ENTITY_NAMES.len()]))
            .changes_only(),
    }
}

fn name_schema() -> KeySchema {
    KeySchema::from_pairs([("name", AttributeType::String)])
}

/// Fixed fixture for `publish/*` benchmark IDs.
pub struct PublishFanoutFixture {
    broker: Broker,
    publication: Publication,
}

impl PublishFanoutFixture {
    /// `subscribers` registrations with two subscriptions each, one publisher and a
    /// publication of `updates` updates cycling through a fixed set of entity names.
    pub fn new(subscribers: usize, updates: usize) -> Self {
        let broker = Broker::new("bench-publish");
        let subscriber_count = subscribers.max(1);

        for index in 0..subscriber_count {
            let key = subscriber_key(index);
            for (slot, offset) in ["sub-A", "sub-B"].into_iter().zip([0, 1]) {
                broker.register(
                    &key,
                    index as u64,
                    SubscriptionId::from(slot),
                    vec![filter_for(index + offset), filter_for(index + offset + 2)],
                    DeliveryQos::new(QosLevel::BestEffort, 0),
                );
            }
        }

        broker.register_publisher(
            &PublisherScopeKey::new(PUBLISHER_URI, scope(1, "sat1")),
            1,
            QosLevel::BestEffort,
            0,
            name_schema(),
        );

        let publication = (0..updates.max(1)).fold(
            Publication::new(PUBLISHER_URI, scope(1, "sat1")),
            |publication, index| {
                let name = ENTITY_NAMES[index % ENTITY_NAMES.len()];
                let update_type = if index % 2 == 0 {
                    UpdateType::Update
                } else {
                    UpdateType::Modification
                };
                publication.with_update(
                    UpdateHeader::new(
                        EntityKey::new(Some(name), Some(index as i64 + 1), Some(1), Some(1)),
                        update_type,
                    )
                    .with_key_values(vec![Some(Attribute::string(name))]),
                    vec![json!(index)],
                )
            },
        );

        Self {
            broker,
            publication,
        }
    }

    /// Total updates delivered across all notifications of one publish call.
    pub fn delivered_update_count(&self) -> Result<usize, PublishError> {
        Ok(self
            .broker
            .publish(&self.publication)?
            .iter()
            .map(|notification| notification.update_count())
            .sum())
    }
}

/// Fixed fixture for `registration/*` benchmark IDs.
pub struct RegistrationChurnFixture {
    broker: Broker,
    subscriber: SubscriberScopeKey,
    publisher: PublisherScopeKey,
}

impl RegistrationChurnFixture {
    /// A broker preloaded with `publishers` publishers across several operations and
    /// domains, plus as many subscriptions.
    pub fn new(publishers: usize) -> Self {
        let broker = Broker::new("bench-registration");
        let publisher_count = publishers.max(1);

        for index in 0..publisher_count {
            let operation = (index % 16) as u16 + 1;
            let domain = format!("sat{}.bus{}", index % 4, index % 8);
            broker.register_publisher(
                &PublisherScopeKey::new(
                    format!("mal:bench-provider-{index}").as_str(),
                    scope(operation, &domain),
                ),
                index as u64,
                QosLevel::Assured,
                1,
                name_schema(),
            );
            broker.register(
                &subscriber_key(index),
                index as u64,
                SubscriptionId::from("sub-preloaded"),
                vec![filter_for(index)],
                DeliveryQos::default(),
            );
        }

        Self {
            broker,
            subscriber: SubscriberScopeKey::new(
                "mal:bench-churn-consumer",
                scope(1, "sat0").with_network_zone("bench"),
            ),
            publisher: PublisherScopeKey::new("mal:bench-churn-provider", scope(1, "sat0.bus0")),
        }
    }

    /// Registers and removes one all-operations subscription. Returns `true` when
    /// the removal found it.
    pub fn churn_subscription(&self) -> bool {
        self.broker.register(
            &self.subscriber,
            1,
            SubscriptionId::from("sub-churn"),
            vec![EntityFilter::new(EntityKey::wildcard())
                .with_all_operations()
                .with_sub_domain(DomainPath::parse("*"))],
            DeliveryQos::default(),
        );
        self.broker
            .deregister(&self.subscriber, Some(&[SubscriptionId::from("sub-churn")]))
            .is_ok()
    }

    /// Registers and removes one publisher. Returns `true` when the removal found it.
    pub fn churn_publisher(&self) -> bool {
        self.broker
            .register_publisher(&self.publisher, 1, QosLevel::Assured, 1, name_schema());
        self.broker.deregister_publisher(&self.publisher).is_some()
    }
}

/// Fixed fixture for `matching/*` benchmark IDs.
pub struct PatternMatchFixture {
    keys: Vec<EntityKey>,
    patterns: Vec<EntityKey>,
}

impl PatternMatchFixture {
    pub fn new(rows: usize) -> Self {
        let total_rows = rows.max(1);
        let keys = (0..total_rows)
            .map(|index| {
                EntityKey::new(
                    Some(ENTITY_NAMES[index % ENTITY_NAMES.len()]),
                    Some(index as i64 % 5),
                    Some(1),
                    None,
                )
            })
            .collect();
        let patterns = (0..ENTITY_NAMES.len())
            .map(|index| {
                if index % 2 == 0 {
                    EntityKey::named(ENTITY_NAMES[index])
                } else {
                    EntityKey::new(Some("*"), Some(index as i64), Some(0), None)
                }
            })
            .collect();

        Self { keys, patterns }
    }

    pub fn match_count(&self) -> usize {
        self.keys
            .iter()
            .map(|key| {
                self.patterns
                    .iter()
                    .filter(|pattern| key.matches(pattern))
                    .count()
            })
            .sum()
    }
}
