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

//! Registration lifecycle orchestration across the subscriber table, the publisher
//! table and the binding index.

use crate::control_plane::binding_index::{BindingIndex, SubscriptionRef};
use crate::control_plane::publisher_table::PublisherTable;
use crate::control_plane::subscriber_table::SubscriberTable;
use crate::error::DeregisterError;
use crate::model::entity_filter::EntityFilter;
use crate::model::publisher::{KeySchema, PublisherRegistration};
use crate::model::scope_key::{PublisherScopeKey, SubscriberScopeKey};
use crate::model::subscription::{
    DeliveryQos, QosLevel, Subscription, SubscriptionId, TransactionId,
};
use crate::observability::{events, fields};
use tracing::{debug, info, warn};

const COMPONENT: &str = "registration_lifecycle";

/// Applies one registration change to every owner and keeps their bindings aligned.
pub(crate) struct RegistrationLifecycle<'a> {
    subscribers: &'a mut SubscriberTable,
    publishers: &'a mut PublisherTable,
    bindings: &'a mut BindingIndex,
    broker: &'a str,
}

impl<'a> RegistrationLifecycle<'a> {
    pub(crate) fn new(
        subscribers: &'a mut SubscriberTable,
        publishers: &'a mut PublisherTable,
        bindings: &'a mut BindingIndex,
        broker: &'a str,
    ) -> Self {
        Self {
            subscribers,
            publishers,
            bindings,
            broker,
        }
    }

    /// Inserts or replaces one subscription, then binds it against every
    /// registered publisher.
    pub(crate) fn register(
        &mut self,
        key: &SubscriberScopeKey,
        transaction_id: TransactionId,
        subscription_id: SubscriptionId,
        filters: Vec<EntityFilter>,
        delivery: DeliveryQos,
    ) {
        let subscriber = key.to_string();
        debug!(
            event = events::REGISTER_START,
            component = COMPONENT,
            broker = self.broker,
            subscriber = %subscriber,
            subscription_id = %subscription_id,
            filter_count = filters.len(),
            "registering subscription"
        );

        let subscription = Subscription::new(subscription_id.clone(), transaction_id, filters);
        let filter_count = subscription.filters().len();
        if self
            .subscribers
            .upsert(key, transaction_id, delivery, subscription)
            .is_some()
        {
            debug!(
                event = events::SUBSCRIPTION_REPLACED,
                component = COMPONENT,
                broker = self.broker,
                subscriber = %subscriber,
                subscription_id = %subscription_id,
                "replaced existing subscription filters"
            );
        }

        let bound_count = match self.subscribers.subscription(key, &subscription_id) {
            Some(subscription) => {
                self.bindings
                    .bind_subscription(key, subscription, self.publishers.keys())
            }
            None => 0,
        };

        info!(
            event = events::REGISTER_OK,
            component = COMPONENT,
            broker = self.broker,
            subscriber = %subscriber,
            subscription_id = %subscription_id,
            filter_count,
            bound_count,
            "subscription registered"
        );
        debug!(
            event = events::BINDINGS_SUBSCRIPTION_SUMMARY,
            component = COMPONENT,
            broker = self.broker,
            subscriber = %subscriber,
            subscription_id = %subscription_id,
            bound_count,
            "subscription bindings refreshed"
        );
    }

    /// Removes the named subscriptions, or the whole scope when `ids` is `None`.
    ///
    /// Known ids are removed even when the call also names unknown ones.
    pub(crate) fn deregister(
        &mut self,
        key: &SubscriberScopeKey,
        ids: Option<&[SubscriptionId]>,
    ) -> Result<(), DeregisterError> {
        let outcome = self.subscribers.remove(key, ids);

        for id in &outcome.removed {
            self.bindings
                .release_subscription(&SubscriptionRef::new(key, id));
        }

        let subscriber = key.to_string();
        info!(
            event = events::DEREGISTER_OK,
            component = COMPONENT,
            broker = self.broker,
            subscriber = %subscriber,
            subscription_ids = %fields::format_requested_ids(ids),
            removed = %fields::format_subscription_ids(&outcome.removed),
            "subscriptions deregistered"
        );

        if outcome.scope_dropped {
            debug!(
                event = events::SUBSCRIBER_SCOPE_DROPPED,
                component = COMPONENT,
                broker = self.broker,
                subscriber = %subscriber,
                "subscriber registration has no subscriptions left"
            );
        }

        if outcome.unknown.is_empty() {
            return Ok(());
        }

        warn!(
            event = events::DEREGISTER_UNKNOWN_IDS,
            component = COMPONENT,
            broker = self.broker,
            subscriber = %subscriber,
            subscription_ids = %fields::format_subscription_ids(&outcome.unknown),
            "deregister named unknown subscriptions"
        );
        Err(DeregisterError::UnknownSubscriptions {
            subscriber: key.clone(),
            ids: outcome.unknown,
        })
    }

    /// Creates a publisher registration or replaces its schema in place.
    ///
    /// Only a new registration is bound against existing subscriptions; a schema
    /// replacement keeps the bindings already computed for the scope.
    pub(crate) fn register_publisher(
        &mut self,
        key: &PublisherScopeKey,
        transaction_id: TransactionId,
        qos_level: QosLevel,
        priority: u32,
        schema: KeySchema,
    ) -> PublisherRegistration {
        let publisher = key.to_string();
        if !schema.is_consistent() {
            warn!(
                event = events::PUBLISHER_SCHEMA_INCONSISTENT,
                component = COMPONENT,
                broker = self.broker,
                publisher = %publisher,
                key_names = schema.key_names.len(),
                key_types = schema.key_types.len(),
                "declared key names and key types differ in length"
            );
        }

        let (registration, created) = self
            .publishers
            .upsert(key, transaction_id, qos_level, priority, schema);

        if !created {
            info!(
                event = events::PUBLISHER_SCHEMA_REPLACED,
                component = COMPONENT,
                broker = self.broker,
                publisher = %publisher,
                key_count = registration.schema().key_count(),
                "publisher schema replaced"
            );
            return registration;
        }

        let bound_count = self.bindings.bind_publisher(key, self.subscribers.iter());
        info!(
            event = events::PUBLISHER_REGISTER_OK,
            component = COMPONENT,
            broker = self.broker,
            publisher = %publisher,
            key_count = registration.schema().key_count(),
            bound_count,
            "publisher registered"
        );
        debug!(
            event = events::BINDINGS_PUBLISHER_SUMMARY,
            component = COMPONENT,
            broker = self.broker,
            publisher = %publisher,
            bound_count,
            "publisher bindings refreshed"
        );
        registration
    }

    /// Removes a publisher registration and releases every binding that referenced it.
    pub(crate) fn deregister_publisher(
        &mut self,
        key: &PublisherScopeKey,
    ) -> Option<PublisherRegistration> {
        let publisher = key.to_string();
        let Some(previous) = self.publishers.remove(key) else {
            debug!(
                event = events::PUBLISHER_DEREGISTER_ABSENT,
                component = COMPONENT,
                broker = self.broker,
                publisher = %publisher,
                "publisher was not registered"
            );
            return None;
        };

        let released = self.bindings.release_publisher(key);
        info!(
            event = events::PUBLISHER_DEREGISTER_OK,
            component = COMPONENT,
            broker = self.broker,
            publisher = %publisher,
            bound_count = released,
            "publisher deregistered"
        );
        Some(previous)
    }
}
