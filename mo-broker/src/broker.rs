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

use crate::control_plane::binding_index::BindingIndex;
use crate::control_plane::publisher_table::PublisherTable;
use crate::control_plane::registration_lifecycle::RegistrationLifecycle;
use crate::control_plane::subscriber_table::SubscriberTable;
use crate::data_plane::publish_pipeline::PublishPipeline;
use crate::error::{DeregisterError, PublishError};
use crate::introspection::registration_directory::{DirectorySnapshot, RegistrationDirectory};
use crate::model::entity_filter::EntityFilter;
use crate::model::notification::Notification;
use crate::model::publication::Publication;
use crate::model::publisher::{KeySchema, PublisherRegistration};
use crate::model::scope_key::{PublisherScopeKey, SubscriberScopeKey};
use crate::model::subscription::{
    DeliveryQos, QosLevel, Subscription, SubscriptionId, TransactionId,
};
use crate::observability::events;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "broker";

#[derive(Default)]
struct BrokerState {
    subscribers: SubscriberTable,
    publishers: PublisherTable,
    bindings: BindingIndex,
}

impl BrokerState {
    fn lifecycle<'a>(&'a mut self, broker: &'a str) -> RegistrationLifecycle<'a> {
        RegistrationLifecycle::new(
            &mut self.subscribers,
            &mut self.publishers,
            &mut self.bindings,
            broker,
        )
    }
}

/// In-memory MO publish/subscribe broker.
///
/// All operations take one exclusive lock for their whole duration, so a publish
/// never observes a half-applied registration change. The broker performs no I/O
/// and every call returns synchronously.
pub struct Broker {
    name: String,
    state: Mutex<BrokerState>,
    directory: RegistrationDirectory,
}

impl Broker {
    /// Creates an empty broker. `name` tags every log event it emits.
    pub fn new(name: &str) -> Self {
        debug!(
            event = events::BROKER_CREATED,
            component = COMPONENT,
            broker = name,
            "broker created"
        );
        Self {
            name: name.to_string(),
            state: Mutex::new(BrokerState::default()),
            directory: RegistrationDirectory::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers or replaces subscription `subscription_id` under `key`.
    ///
    /// Replacing a subscription discards its previous filters and bindings. The new
    /// filters are bound against every publisher already registered.
    pub fn register(
        &self,
        key: &SubscriberScopeKey,
        transaction_id: TransactionId,
        subscription_id: SubscriptionId,
        filters: Vec<EntityFilter>,
        delivery: DeliveryQos,
    ) {
        let mut state = self.state.lock();
        state
            .lifecycle(&self.name)
            .register(key, transaction_id, subscription_id, filters, delivery);
        self.directory.mark_changed();
    }

    /// Removes the named subscriptions, or every subscription of `key` when `ids`
    /// is `None`.
    ///
    /// Naming an id that is not registered is an error, reported after the other
    /// named ids have been removed. Removing a whole scope never fails.
    pub fn deregister(
        &self,
        key: &SubscriberScopeKey,
        ids: Option<&[SubscriptionId]>,
    ) -> Result<(), DeregisterError> {
        let mut state = self.state.lock();
        let result = state.lifecycle(&self.name).deregister(key, ids);
        self.directory.mark_changed();
        result
    }

    /// Creates the publisher registration for `key` or replaces its schema in place.
    pub fn register_publisher(
        &self,
        key: &PublisherScopeKey,
        transaction_id: TransactionId,
        qos_level: QosLevel,
        priority: u32,
        schema: KeySchema,
    ) -> PublisherRegistration {
        let mut state = self.state.lock();
        let registration = state.lifecycle(&self.name).register_publisher(
            key,
            transaction_id,
            qos_level,
            priority,
            schema,
        );
        self.directory.mark_changed();
        registration
    }

    /// Removes the publisher registration for `key`, returning it if it existed.
    pub fn deregister_publisher(&self, key: &PublisherScopeKey) -> Option<PublisherRegistration> {
        let mut state = self.state.lock();
        let previous = state.lifecycle(&self.name).deregister_publisher(key);
        if previous.is_some() {
            self.directory.mark_changed();
        }
        previous
    }

    /// Validates and matches one publication, returning one notification per
    /// subscriber registration that has at least one matching update.
    ///
    /// An empty list means the publication was accepted and nobody listens.
    pub fn publish(&self, publication: &Publication) -> Result<Vec<Notification>, PublishError> {
        let state = self.state.lock();
        PublishPipeline::new(
            &state.subscribers,
            &state.publishers,
            &state.bindings,
            &self.name,
        )
        .run(publication)
    }

    pub fn subscription(
        &self,
        key: &SubscriberScopeKey,
        id: &SubscriptionId,
    ) -> Option<Subscription> {
        self.state.lock().subscribers.subscription(key, id).cloned()
    }

    pub fn publisher(&self, key: &PublisherScopeKey) -> Option<PublisherRegistration> {
        self.state.lock().publishers.get(key).cloned()
    }

    /// Read-only copy of all registrations, rebuilt only after a change.
    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        if let Some(snapshot) = self.directory.load() {
            return snapshot;
        }

        let state = self.state.lock();
        if let Some(snapshot) = self.directory.load() {
            return snapshot;
        }

        let version = self.directory.current_version();
        let snapshot = DirectorySnapshot::new(
            version,
            state.subscribers.iter().cloned().collect(),
            state.publishers.iter().cloned().collect(),
        );
        debug!(
            event = events::SNAPSHOT_REBUILD,
            component = COMPONENT,
            broker = self.name.as_str(),
            snapshot_version = version,
            subscriber_count = snapshot.subscribers().len(),
            publisher_count = snapshot.publishers().len(),
            "registration snapshot rebuilt"
        );
        self.directory.store(snapshot)
    }
}
