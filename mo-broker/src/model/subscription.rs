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

//! Subscriptions and the subscriber registration owning them.

use crate::model::entity_filter::EntityFilter;
use crate::model::scope_key::SubscriberScopeKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub type TransactionId = u64;

/// Subscription identifier, unique within one subscriber registration.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubscriptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QosLevel {
    #[default]
    BestEffort,
    Assured,
    Queued,
    Timely,
}

/// Delivery hints carried through to notifications, never interpreted by the broker.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryQos {
    #[serde(default)]
    pub qos_level: QosLevel,
    #[serde(default)]
    pub qos_properties: BTreeMap<String, String>,
    #[serde(default)]
    pub priority: u32,
}

impl DeliveryQos {
    pub fn new(qos_level: QosLevel, priority: u32) -> Self {
        Self {
            qos_level,
            qos_properties: BTreeMap::new(),
            priority,
        }
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.qos_properties
            .insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Subscription {
    id: SubscriptionId,
    transaction_id: TransactionId,
    filters: Vec<EntityFilter>,
}

impl Subscription {
    /// Builds a subscription; identical filters collapse to one.
    pub fn new(
        id: SubscriptionId,
        transaction_id: TransactionId,
        filters: impl IntoIterator<Item = EntityFilter>,
    ) -> Self {
        let mut unique: Vec<EntityFilter> = Vec::new();
        for filter in filters {
            if !unique.contains(&filter) {
                unique.push(filter);
            }
        }

        Self {
            id,
            transaction_id,
            filters: unique,
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transaction id of the REGISTER that created or last replaced this subscription.
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn filters(&self) -> &[EntityFilter] {
        &self.filters
    }

    /// Indices of filters not subsumed by another filter of this subscription.
    ///
    /// For two mutually subsuming filters the earlier one is kept.
    pub(crate) fn effective_filter_indices(&self) -> Vec<usize> {
        (0..self.filters.len())
            .filter(|&index| {
                let candidate = &self.filters[index];
                !self.filters.iter().enumerate().any(|(other_index, other)| {
                    other_index != index
                        && other.subsumes(candidate)
                        && (!candidate.subsumes(other) || other_index < index)
                })
            })
            .collect()
    }
}

/// All subscriptions sharing one subscriber scope key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SubscriberRegistration {
    key: SubscriberScopeKey,
    transaction_id: TransactionId,
    delivery: DeliveryQos,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
}

impl SubscriberRegistration {
    pub(crate) fn new(
        key: SubscriberScopeKey,
        transaction_id: TransactionId,
        delivery: DeliveryQos,
    ) -> Self {
        Self {
            key,
            transaction_id,
            delivery,
            subscriptions: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> &SubscriberScopeKey {
        &self.key
    }

    /// Transaction id of the most recent REGISTER on this scope.
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn delivery(&self) -> &DeliveryQos {
        &self.delivery
    }

    pub fn subscription(&self, id: &SubscriptionId) -> Option<&Subscription> {
        self.subscriptions.get(id)
    }

    pub fn subscriptions(&self) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.values()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Refreshes delivery settings from the latest REGISTER.
    pub(crate) fn refresh(&mut self, transaction_id: TransactionId, delivery: DeliveryQos) {
        self.transaction_id = transaction_id;
        self.delivery = delivery;
    }

    /// Inserts or replaces a subscription, returning the replaced one.
    pub(crate) fn upsert(&mut self, subscription: Subscription) -> Option<Subscription> {
        self.subscriptions
            .insert(subscription.id.clone(), subscription)
    }

    pub(crate) fn remove(&mut self, id: &SubscriptionId) -> Option<Subscription> {
        self.subscriptions.remove(id)
    }

    pub(crate) fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.subscriptions.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeliveryQos, QosLevel, SubscriberRegistration, Subscription, SubscriptionId};
    use crate::matching::domain_matcher::DomainPath;
    use crate::matching::entity_key::EntityKey;
    use crate::model::entity_filter::EntityFilter;
    use crate::model::scope_key::{OperationIdentity, ScopeKey, SubscriberScopeKey};

    fn registration() -> SubscriberRegistration {
        SubscriberRegistration::new(
            SubscriberScopeKey::new(
                "mal:consumer",
                ScopeKey::new(OperationIdentity::new(4, 2, 1, 1), DomainPath::parse("sat1")),
            ),
            1,
            DeliveryQos::default(),
        )
    }

    #[test]
    fn identical_filters_collapse() {
        let filter = EntityFilter::new(EntityKey::named("battery"));
        let subscription = Subscription::new(
            SubscriptionId::from("sub-A"),
            1,
            vec![filter.clone(), filter.clone(), filter],
        );

        assert_eq!(subscription.filters().len(), 1);
    }

    #[test]
    fn effective_filters_skip_subsumed_patterns() {
        let subscription = Subscription::new(
            SubscriptionId::from("sub-A"),
            1,
            vec![
                EntityFilter::new(EntityKey::new(Some("battery"), Some(2), Some(0), Some(0))),
                EntityFilter::new(EntityKey::named("battery")),
                EntityFilter::new(EntityKey::named("solar")).changes_only(),
            ],
        );

        assert_eq!(subscription.filters().len(), 3);
        assert_eq!(subscription.effective_filter_indices(), vec![1, 2]);
    }

    #[test]
    fn upsert_replaces_existing_subscription() {
        let mut registration = registration();
        let first = Subscription::new(
            SubscriptionId::from("sub-A"),
            1,
            vec![EntityFilter::new(EntityKey::named("battery"))],
        );
        let second = Subscription::new(
            SubscriptionId::from("sub-A"),
            2,
            vec![EntityFilter::new(EntityKey::named("solar"))],
        );

        assert!(registration.upsert(first.clone()).is_none());
        assert_eq!(registration.upsert(second.clone()), Some(first));
        assert_eq!(registration.subscription_count(), 1);
        assert_eq!(
            registration.subscription(&SubscriptionId::from("sub-A")),
            Some(&second)
        );
    }

    #[test]
    fn refresh_updates_delivery_settings() {
        let mut registration = registration();
        registration.refresh(9, DeliveryQos::new(QosLevel::Timely, 3).with_property("k", "v"));

        assert_eq!(registration.transaction_id(), 9);
        assert_eq!(registration.delivery().qos_level, QosLevel::Timely);
        assert_eq!(registration.delivery().priority, 3);
        assert_eq!(
            registration.delivery().qos_properties.get("k").map(String::as_str),
            Some("v")
        );
    }
}
