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

//! Per-subscriber output of a publish call.

use crate::matching::domain_matcher::DomainPath;
use crate::model::publication::{UpdateHeader, UpdatePayloadColumn};
use crate::model::scope_key::{OperationIdentity, SessionType, Uri};
use crate::model::subscription::{QosLevel, SubscriptionId, TransactionId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Updates selected for one subscription, in publication order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriptionUpdate {
    pub subscription_id: SubscriptionId,
    pub update_headers: Vec<UpdateHeader>,
    pub update_payload_columns: Vec<UpdatePayloadColumn>,
}

/// One NOTIFY worth of updates addressed to a single subscriber registration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notification {
    pub subscriber_uri: Uri,
    /// Transaction id of the latest REGISTER on the subscriber scope, shared by
    /// every subscription in `updates`.
    pub transaction_id: TransactionId,
    pub domain: DomainPath,
    pub network_zone: String,
    pub session_type: SessionType,
    pub session_name: String,
    pub qos_level: QosLevel,
    pub qos_properties: BTreeMap<String, String>,
    pub priority: u32,
    pub operation: OperationIdentity,
    pub updates: Vec<SubscriptionUpdate>,
}

impl Notification {
    pub fn subscription_update(&self, id: &SubscriptionId) -> Option<&SubscriptionUpdate> {
        self.updates
            .iter()
            .find(|update| &update.subscription_id == id)
    }

    /// Total update headers across all subscriptions of this notification.
    pub fn update_count(&self) -> usize {
        self.updates
            .iter()
            .map(|update| update.update_headers.len())
            .sum()
    }
}
