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

//! Versioned read-only snapshot of broker registrations.

use crate::matching::entity_key::EntityKey;
use crate::model::publisher::PublisherRegistration;
use crate::model::scope_key::{PublisherScopeKey, SubscriberScopeKey};
use crate::model::subscription::{SubscriberRegistration, SubscriptionId};
use arc_swap::ArcSwap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Immutable copy of every registration at one broker state version.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DirectorySnapshot {
    version: u64,
    subscribers: Vec<SubscriberRegistration>,
    publishers: Vec<PublisherRegistration>,
}

impl DirectorySnapshot {
    pub(crate) fn new(
        version: u64,
        subscribers: Vec<SubscriberRegistration>,
        publishers: Vec<PublisherRegistration>,
    ) -> Self {
        Self {
            version,
            subscribers,
            publishers,
        }
    }

    /// Broker state version the snapshot was taken at. Every registration change
    /// advances it by one.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscriber registrations in subscriber key order.
    pub fn subscribers(&self) -> &[SubscriberRegistration] {
        &self.subscribers
    }

    /// Publisher registrations in publisher key order.
    pub fn publishers(&self) -> &[PublisherRegistration] {
        &self.publishers
    }

    pub fn subscriber(&self, key: &SubscriberScopeKey) -> Option<&SubscriberRegistration> {
        self.subscribers
            .binary_search_by(|registration| registration.key().cmp(key))
            .ok()
            .and_then(|index| self.subscribers.get(index))
    }

    pub fn publisher(&self, key: &PublisherScopeKey) -> Option<&PublisherRegistration> {
        self.publishers
            .binary_search_by(|registration| registration.key().cmp(key))
            .ok()
            .and_then(|index| self.publishers.get(index))
    }

    /// Total subscriptions across all subscriber registrations.
    pub fn subscription_count(&self) -> usize {
        self.subscribers
            .iter()
            .map(SubscriberRegistration::subscription_count)
            .sum()
    }

    /// Subscriptions holding at least one filter that could match an update keyed
    /// by a key matching `pattern`.
    ///
    /// The check is optimistic: it ignores scopes and may list subscriptions that
    /// would never receive such an update, but never omits one that would.
    pub fn subscriptions_overlapping(
        &self,
        pattern: &EntityKey,
    ) -> Vec<(SubscriberScopeKey, SubscriptionId)> {
        self.subscribers
            .iter()
            .flat_map(|registration| {
                registration
                    .subscriptions()
                    .filter(|subscription| {
                        subscription
                            .filters()
                            .iter()
                            .any(|filter| filter.pattern.potentially_matches(pattern))
                    })
                    .map(|subscription| (registration.key().clone(), subscription.id().clone()))
            })
            .collect()
    }
}

/// Holder of the latest snapshot plus the broker state version it must match.
pub(crate) struct RegistrationDirectory {
    snapshot: ArcSwap<DirectorySnapshot>,
    state_version: AtomicU64,
}

impl Default for RegistrationDirectory {
    fn default() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(DirectorySnapshot::default()),
            state_version: AtomicU64::new(0),
        }
    }
}

impl RegistrationDirectory {
    /// Records one registration change. Must be called while the broker state
    /// lock is held.
    pub(crate) fn mark_changed(&self) -> u64 {
        self.state_version.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn current_version(&self) -> u64 {
        self.state_version.load(Ordering::Acquire)
    }

    /// The stored snapshot if it still reflects the current state.
    pub(crate) fn load(&self) -> Option<Arc<DirectorySnapshot>> {
        let snapshot = self.snapshot.load_full();
        (snapshot.version == self.current_version()).then_some(snapshot)
    }

    pub(crate) fn store(&self, snapshot: DirectorySnapshot) -> Arc<DirectorySnapshot> {
        let snapshot = Arc::new(snapshot);
        self.snapshot.store(Arc::clone(&snapshot));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectorySnapshot, RegistrationDirectory};
    use crate::control_plane::subscriber_table::SubscriberTable;
    use crate::matching::domain_matcher::DomainPath;
    use crate::matching::entity_key::EntityKey;
    use crate::model::entity_filter::EntityFilter;
    use crate::model::scope_key::{OperationIdentity, ScopeKey, SubscriberScopeKey};
    use crate::model::subscription::{DeliveryQos, Subscription, SubscriptionId};

    fn subscriber(uri: &str) -> SubscriberScopeKey {
        SubscriberScopeKey::new(
            uri,
            ScopeKey::new(OperationIdentity::new(4, 2, 1, 1), DomainPath::parse("sat1")),
        )
    }

    fn snapshot() -> DirectorySnapshot {
        let mut table = SubscriberTable::default();
        for (uri, id, name) in [
            ("mal:a", "sub-A", "battery"),
            ("mal:a", "sub-B", "solar"),
            ("mal:b", "sub-C", "*"),
        ] {
            table.upsert(
                &subscriber(uri),
                1,
                DeliveryQos::default(),
                Subscription::new(
                    SubscriptionId::from(id),
                    1,
                    vec![EntityFilter::new(EntityKey::named(name))],
                ),
            );
        }
        DirectorySnapshot::new(3, table.iter().cloned().collect(), Vec::new())
    }

    #[test]
    fn snapshot_counts_and_lookups() {
        let snapshot = snapshot();

        assert_eq!(snapshot.version(), 3);
        assert_eq!(snapshot.subscribers().len(), 2);
        assert_eq!(snapshot.subscription_count(), 3);
        assert!(snapshot.subscriber(&subscriber("mal:b")).is_some());
        assert!(snapshot.subscriber(&subscriber("mal:c")).is_none());
    }

    #[test]
    fn overlapping_lists_wildcard_and_exact_subscriptions() {
        let snapshot = snapshot();

        let ids: Vec<String> = snapshot
            .subscriptions_overlapping(&EntityKey::named("battery"))
            .into_iter()
            .map(|(_, id)| id.to_string())
            .collect();

        assert_eq!(ids, vec!["sub-A".to_string(), "sub-C".to_string()]);
    }

    #[test]
    fn stored_snapshot_goes_stale_after_change() {
        let directory = RegistrationDirectory::default();
        assert!(directory.load().is_some());

        let version = directory.mark_changed();
        assert_eq!(version, 1);
        assert!(directory.load().is_none());

        directory.store(DirectorySnapshot::new(version, Vec::new(), Vec::new()));
        assert_eq!(directory.load().map(|snapshot| snapshot.version()), Some(1));
    }
}
