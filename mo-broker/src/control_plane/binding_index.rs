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

//! Cached scope-level bindings between subscriptions and publisher registrations.
//!
//! A binding records which filters of a subscription are scope-compatible with a
//! publisher scope. The publish path only evaluates entity keys against bound
//! filters, so both directions of every registration change must keep this index
//! current.

use crate::model::scope_key::{PublisherScopeKey, SubscriberScopeKey};
use crate::model::subscription::{SubscriberRegistration, Subscription, SubscriptionId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Stable address of one subscription inside the subscriber table.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct SubscriptionRef {
    pub(crate) subscriber: SubscriberScopeKey,
    pub(crate) subscription_id: SubscriptionId,
}

impl SubscriptionRef {
    pub(crate) fn new(subscriber: &SubscriberScopeKey, subscription_id: &SubscriptionId) -> Self {
        Self {
            subscriber: subscriber.clone(),
            subscription_id: subscription_id.clone(),
        }
    }
}

#[derive(Default)]
pub(crate) struct BindingIndex {
    by_publisher: HashMap<PublisherScopeKey, BTreeMap<SubscriptionRef, Vec<usize>>>,
    by_subscription: HashMap<SubscriptionRef, HashSet<PublisherScopeKey>>,
}

/// Effective filters of `subscription` whose scope fields bind to `publisher`.
fn bound_filters(
    subscriber: &SubscriberScopeKey,
    subscription: &Subscription,
    publisher: &PublisherScopeKey,
) -> Vec<usize> {
    subscription
        .effective_filter_indices()
        .into_iter()
        .filter(|&index| {
            subscription
                .filters()
                .get(index)
                .is_some_and(|filter| filter.binds(&subscriber.scope, &publisher.scope))
        })
        .collect()
}

impl BindingIndex {
    fn insert(
        &mut self,
        subscription: SubscriptionRef,
        publisher: &PublisherScopeKey,
        filters: Vec<usize>,
    ) {
        self.by_subscription
            .entry(subscription.clone())
            .or_default()
            .insert(publisher.clone());
        self.by_publisher
            .entry(publisher.clone())
            .or_default()
            .insert(subscription, filters);
    }

    /// Rebinds one subscription against every registered publisher.
    /// Returns the number of publishers it is now bound to.
    pub(crate) fn bind_subscription<'p>(
        &mut self,
        subscriber: &SubscriberScopeKey,
        subscription: &Subscription,
        publishers: impl IntoIterator<Item = &'p PublisherScopeKey>,
    ) -> usize {
        let subscription_ref = SubscriptionRef::new(subscriber, subscription.id());
        self.release_subscription(&subscription_ref);

        let mut bound = 0;
        for publisher in publishers {
            let filters = bound_filters(subscriber, subscription, publisher);
            if filters.is_empty() {
                continue;
            }
            self.insert(subscription_ref.clone(), publisher, filters);
            bound += 1;
        }
        bound
    }

    /// Rebinds one publisher against every registered subscription.
    /// Returns the number of subscriptions now bound to it.
    pub(crate) fn bind_publisher<'s>(
        &mut self,
        publisher: &PublisherScopeKey,
        subscribers: impl IntoIterator<Item = &'s SubscriberRegistration>,
    ) -> usize {
        self.release_publisher(publisher);

        let mut bound = 0;
        for registration in subscribers {
            for subscription in registration.subscriptions() {
                let filters = bound_filters(registration.key(), subscription, publisher);
                if filters.is_empty() {
                    continue;
                }
                self.insert(
                    SubscriptionRef::new(registration.key(), subscription.id()),
                    publisher,
                    filters,
                );
                bound += 1;
            }
        }
        bound
    }

    /// Drops every binding of one subscription. Returns how many publishers lost it.
    pub(crate) fn release_subscription(&mut self, subscription: &SubscriptionRef) -> usize {
        let Some(publishers) = self.by_subscription.remove(subscription) else {
            return 0;
        };

        for publisher in &publishers {
            if let Some(bound) = self.by_publisher.get_mut(publisher) {
                bound.remove(subscription);
                if bound.is_empty() {
                    self.by_publisher.remove(publisher);
                }
            }
        }
        publishers.len()
    }

    /// Drops every binding of one publisher. Returns how many subscriptions lost it.
    pub(crate) fn release_publisher(&mut self, publisher: &PublisherScopeKey) -> usize {
        let Some(bound) = self.by_publisher.remove(publisher) else {
            return 0;
        };

        for subscription in bound.keys() {
            if let Some(publishers) = self.by_subscription.get_mut(subscription) {
                publishers.remove(publisher);
                if publishers.is_empty() {
                    self.by_subscription.remove(subscription);
                }
            }
        }
        bound.len()
    }

    /// Subscriptions bound to `publisher` with their bound filter indices, in
    /// subscriber key then subscription id order.
    pub(crate) fn bound(
        &self,
        publisher: &PublisherScopeKey,
    ) -> impl Iterator<Item = (&SubscriptionRef, &[usize])> + '_ {
        self.by_publisher
            .get(publisher)
            .into_iter()
            .flat_map(|bound| {
                bound
                    .iter()
                    .map(|(subscription, filters)| (subscription, filters.as_slice()))
            })
    }

    #[cfg(test)]
    pub(crate) fn publisher_count(&self, subscription: &SubscriptionRef) -> usize {
        self.by_subscription
            .get(subscription)
            .map_or(0, HashSet::len)
    }
}
