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

//! Publisher registrations and the key schema every published update must satisfy.

use crate::error::ValidationFailure;
use crate::model::attribute::AttributeType;
use crate::model::publication::UpdateHeader;
use crate::model::scope_key::PublisherScopeKey;
use crate::model::subscription::{QosLevel, TransactionId};
use serde::{Deserialize, Serialize};

/// Ordered key names with their expected value types.
///
/// The declared key count is the number of names. A position without a declared
/// type accepts a value of any type.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeySchema {
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<AttributeType>,
}

impl KeySchema {
    pub fn new(key_names: Vec<String>, key_types: Vec<AttributeType>) -> Self {
        Self {
            key_names,
            key_types,
        }
    }

    /// Convenience for `(name, type)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, AttributeType)>) -> Self {
        let (key_names, key_types) = pairs
            .into_iter()
            .map(|(name, attribute_type)| (name.to_string(), attribute_type))
            .unzip();
        Self {
            key_names,
            key_types,
        }
    }

    pub fn key_count(&self) -> usize {
        self.key_names.len()
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.key_names.len() == self.key_types.len()
    }

    /// Checks the key values of one update header against this schema.
    pub fn validate(&self, header: &UpdateHeader) -> Result<(), ValidationFailure> {
        if header.key_values.len() != self.key_count() {
            return Err(ValidationFailure::KeyCountMismatch {
                expected: self.key_count(),
                actual: header.key_values.len(),
            });
        }

        for (position, value) in header.key_values.iter().enumerate() {
            let (Some(value), Some(expected)) = (value, self.key_types.get(position)) else {
                continue;
            };
            let actual = value.attribute_type();
            if actual != *expected {
                return Err(ValidationFailure::KeyTypeMismatch {
                    position,
                    expected: *expected,
                    actual,
                });
            }
        }

        Ok(())
    }
}

/// Declared schema and defaults of one publisher scope.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PublisherRegistration {
    key: PublisherScopeKey,
    transaction_id: TransactionId,
    qos_level: QosLevel,
    priority: u32,
    schema: KeySchema,
}

impl PublisherRegistration {
    pub(crate) fn new(
        key: PublisherScopeKey,
        transaction_id: TransactionId,
        qos_level: QosLevel,
        priority: u32,
        schema: KeySchema,
    ) -> Self {
        Self {
            key,
            transaction_id,
            qos_level,
            priority,
            schema,
        }
    }

    pub fn key(&self) -> &PublisherScopeKey {
        &self.key
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn qos_level(&self) -> QosLevel {
        self.qos_level
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn schema(&self) -> &KeySchema {
        &self.schema
    }

    /// Replaces schema and defaults in place; the key is unchanged.
    pub(crate) fn replace(
        &mut self,
        transaction_id: TransactionId,
        qos_level: QosLevel,
        priority: u32,
        schema: KeySchema,
    ) {
        self.transaction_id = transaction_id;
        self.qos_level = qos_level;
        self.priority = priority;
        self.schema = schema;
    }

    pub fn validate(&self, header: &UpdateHeader) -> Result<(), ValidationFailure> {
        self.schema.validate(header)
    }
}
