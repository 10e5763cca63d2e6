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

//! Groups matched updates into one notification per subscriber registration.

use crate::control_plane::binding_index::SubscriptionRef;
use crate::control_plane::subscriber_table::SubscriberTable;
use crate::model::notification::{Notification, SubscriptionUpdate};
use crate::model::publication::Publication;
use crate::model::scope_key::SubscriberScopeKey;
use crate::model::subscription::SubscriptionId;
use std::collections::{BTreeMap, BTreeSet};

/// Collects `(subscription, update index)` hits for one publish call.
///
/// A hit recorded twice, e.g. by two filters of the same subscription, is kept once.
#[derive(Debug, Default)]
pub(crate) struct NotificationBatcher {
    hits: BTreeMap<SubscriberScopeKey, BTreeMap<SubscriptionId, BTreeSet<usize>>>,
}

impl NotificationBatcher {
    /// Returns `false` when the hit was already recorded.
    pub(crate) fn record(&mut self, subscription: &SubscriptionRef, update_index: usize) -> bool {
        self.hits
            .entry(subscription.subscriber.clone())
            .or_default()
            .entry(subscription.subscription_id.clone())
            .or_default()
            .insert(update_index)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Builds notifications in subscriber key order; updates keep publication order.
    pub(crate) fn build(
        self,
        publication: &Publication,
        subscribers: &SubscriberTable,
    ) -> Vec<Notification> {
        self.hits
            .into_iter()
            .filter_map(|(subscriber, subscriptions)| {
                let registration = subscribers.get(&subscriber)?;
                let delivery = registration.delivery();
                let updates = subscriptions
                    .into_iter()
                    .map(|(subscription_id, indices)| {
                        subscription_update(publication, subscription_id, &indices)
                    })
                    .collect();

                Some(Notification {
                    subscriber_uri: subscriber.subscriber_uri.clone(),
                    transaction_id: registration.transaction_id(),
                    domain: publication.scope.domain.clone(),
                    network_zone: subscriber.scope.network_zone.clone(),
                    session_type: subscriber.scope.session_type,
                    session_name: subscriber.scope.session_name.clone(),
                    qos_level: delivery.qos_level,
                    qos_properties: delivery.qos_properties.clone(),
                    priority: delivery.priority,
                    operation: publication.scope.operation,
                    updates,
                })
            })
            .collect()
    }
}

fn subscription_update(
    publication: &Publication,
    subscription_id: SubscriptionId,
    indices: &BTreeSet<usize>,
) -> SubscriptionUpdate {
    let update_headers = indices
        .iter()
        .filter_map(|&index| publication.update_headers.get(index).cloned())
        .collect();
    let update_payload_columns = publication
        .update_payload_columns
        .iter()
        .map(|column| {
            indices
                .iter()
                .filter_map(|&index| column.get(index).cloned())
                .collect()
        })
        .collect();

    SubscriptionUpdate {
        subscription_id,
        update_headers,
        update_payload_columns,
    }
}
