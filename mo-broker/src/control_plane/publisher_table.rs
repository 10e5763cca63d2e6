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

//! Publisher-scope table and storage owner for publisher registrations.

use crate::model::publisher::{KeySchema, PublisherRegistration};
use crate::model::scope_key::PublisherScopeKey;
use crate::model::subscription::{QosLevel, TransactionId};
use std::collections::BTreeMap;

#[derive(Default)]
pub(crate) struct PublisherTable {
    registrations: BTreeMap<PublisherScopeKey, PublisherRegistration>,
}

impl PublisherTable {
    /// Creates the registration or replaces its schema in place.
    /// Returns the current registration and whether it was created by this call.
    pub(crate) fn upsert(
        &mut self,
        key: &PublisherScopeKey,
        transaction_id: TransactionId,
        qos_level: QosLevel,
        priority: u32,
        schema: KeySchema,
    ) -> (PublisherRegistration, bool) {
        if let Some(registration) = self.registrations.get_mut(key) {
            registration.replace(transaction_id, qos_level, priority, schema);
            return (registration.clone(), false);
        }

        let registration =
            PublisherRegistration::new(key.clone(), transaction_id, qos_level, priority, schema);
        self.registrations.insert(key.clone(), registration.clone());
        (registration, true)
    }

    pub(crate) fn remove(&mut self, key: &PublisherScopeKey) -> Option<PublisherRegistration> {
        self.registrations.remove(key)
    }

    pub(crate) fn get(&self, key: &PublisherScopeKey) -> Option<&PublisherRegistration> {
        self.registrations.get(key)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &PublisherScopeKey> {
        self.registrations.keys()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PublisherRegistration> {
        self.registrations.values()
    }
}
