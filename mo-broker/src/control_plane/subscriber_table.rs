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

//! Subscriber-scope table and storage owner for subscriber registrations.

use crate::model::scope_key::SubscriberScopeKey;
use crate::model::subscription::{
    DeliveryQos, SubscriberRegistration, Subscription, SubscriptionId, TransactionId,
};
use std::collections::BTreeMap;

/// Result of removing subscriptions from one subscriber scope.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct Deregistration {
    pub(crate) removed: Vec<SubscriptionId>,
    pub(crate) unknown: Vec<SubscriptionId>,
    pub(crate) scope_dropped: bool,
}

/// Registrations keyed by subscriber scope; a registration exists only while it
/// holds at least one subscription.
#[derive(Default)]
pub(crate) struct SubscriberTable {
    registrations: BTreeMap<SubscriberScopeKey, SubscriberRegistration>,
}

impl SubscriberTable {
    /// Inserts `subscription` under `key`, creating the registration on first use.
    /// Returns the subscription it replaced.
    pub(crate) fn upsert(
        &mut self,
        key: &SubscriberScopeKey,
        transaction_id: TransactionId,
        delivery: DeliveryQos,
        subscription: Subscription,
    ) -> Option<Subscription> {
        match self.registrations.get_mut(key) {
            Some(registration) => {
                registration.refresh(transaction_id, delivery);
                registration.upsert(subscription)
            }
            None => {
                let mut registration =
                    SubscriberRegistration::new(key.clone(), transaction_id, delivery);
                registration.upsert(subscription);
                self.registrations.insert(key.clone(), registration);
                None
            }
        }
    }

    /// Removes the named subscriptions, or the whole scope when `ids` is `None`.
    ///
    /// Unknown ids are reported but do not stop the remaining removals.
    pub(crate) fn remove(
        &mut self,
        key: &SubscriberScopeKey,
        ids: Option<&[SubscriptionId]>,
    ) -> Deregistration {
        let Some(ids) = ids else {
            return match self.registrations.remove(key) {
                Some(registration) => Deregistration {
                    removed: registration.subscription_ids(),
                    unknown: Vec::new(),
                    scope_dropped: true,
                },
                None => Deregistration::default(),
            };
        };

        let Some(registration) = self.registrations.get_mut(key) else {
            return Deregistration {
                unknown: ids.to_vec(),
                ..Default::default()
            };
        };

        let mut outcome = Deregistration::default();
        for id in ids {
            match registration.remove(id) {
                Some(_) => outcome.removed.push(id.clone()),
                None if !outcome.removed.contains(id) => outcome.unknown.push(id.clone()),
                None => {}
            }
        }

        if registration.is_empty() {
            self.registrations.remove(key);
            outcome.scope_dropped = true;
        }

        outcome
    }

    pub(crate) fn get(&self, key: &SubscriberScopeKey) -> Option<&SubscriberRegistration> {
        self.registrations.get(key)
    }

    pub(crate) fn subscription(
        &self,
        key: &SubscriberScopeKey,
        id: &SubscriptionId,
    ) -> Option<&Subscription> {
        self.registrations
            .get(key)
            .and_then(|registration| registration.subscription(id))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &SubscriberRegistration> {
        self.registrations.values()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}
