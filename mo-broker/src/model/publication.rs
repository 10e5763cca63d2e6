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

//! In-memory form of a PUBLISH request.

use crate::matching::entity_key::EntityKey;
use crate::model::attribute::Attribute;
use crate::model::scope_key::{PublisherScopeKey, ScopeKey, Uri};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Creation,
    #[default]
    Update,
    Modification,
    Deletion,
}

/// Opaque payload element; encoding to bytes belongs to the transport layer.
pub type UpdateValue = serde_json::Value;

/// One column of update payloads, parallel to the publication's update headers.
pub type UpdatePayloadColumn = Vec<UpdateValue>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateHeader {
    pub key: EntityKey,
    #[serde(default)]
    pub update_type: UpdateType,
    #[serde(default)]
    pub source_uri: Option<Uri>,
    /// Values for the publisher's declared key names, in declaration order.
    /// `None` is an absent value.
    #[serde(default)]
    pub key_values: Vec<Option<Attribute>>,
}

impl UpdateHeader {
    pub fn new(key: EntityKey, update_type: UpdateType) -> Self {
        Self {
            key,
            update_type,
            source_uri: None,
            key_values: Vec::new(),
        }
    }

    pub fn with_key_values(mut self, key_values: Vec<Option<Attribute>>) -> Self {
        self.key_values = key_values;
        self
    }

    pub fn with_source_uri(mut self, source_uri: impl Into<Uri>) -> Self {
        self.source_uri = Some(source_uri.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Publication {
    pub from_uri: Uri,
    pub scope: ScopeKey,
    pub update_headers: Vec<UpdateHeader>,
    #[serde(default)]
    pub update_payload_columns: Vec<UpdatePayloadColumn>,
}

impl Publication {
    pub fn new(from_uri: impl Into<Uri>, scope: ScopeKey) -> Self {
        Self {
            from_uri: from_uri.into(),
            scope,
            update_headers: Vec::new(),
            update_payload_columns: Vec::new(),
        }
    }

    /// Appends one update; `payload` holds one element per payload column.
    ///
    /// Every column keeps one element per update: a column opened by a wider
    /// payload is back-filled with `null` for the earlier updates, and a
    /// narrower payload leaves `null` in the columns it does not reach.
    pub fn with_update(mut self, header: UpdateHeader, payload: Vec<UpdateValue>) -> Self {
        let index = self.update_headers.len();
        if self.update_payload_columns.len() < payload.len() {
            self.update_payload_columns
                .resize_with(payload.len(), || vec![UpdateValue::Null; index]);
        }
        let mut values = payload.into_iter();
        for column in &mut self.update_payload_columns {
            if column.len() < index {
                column.resize(index, UpdateValue::Null);
            }
            column.push(values.next().unwrap_or(UpdateValue::Null));
        }
        self.update_headers.push(header);
        self
    }

    /// Registration key the publication is validated against.
    pub fn publisher_key(&self) -> PublisherScopeKey {
        PublisherScopeKey::new(self.from_uri.clone(), self.scope.clone())
    }

    /// Payload elements of update `index`, one per column, or the first column
    /// lacking an element for it.
    pub(crate) fn payload_row(&self, index: usize) -> Result<Vec<UpdateValue>, usize> {
        self.update_payload_columns
            .iter()
            .enumerate()
            .map(|(column_index, column)| column.get(index).cloned().ok_or(column_index))
            .collect()
    }
}
