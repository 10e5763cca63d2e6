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

//! Canonical structured field keys and value-format helpers.

use crate::model::subscription::SubscriptionId;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const BROKER: &str = "broker";
pub const SUBSCRIBER: &str = "subscriber";
pub const PUBLISHER: &str = "publisher";
pub const SUBSCRIPTION_ID: &str = "subscription_id";
pub const SUBSCRIPTION_IDS: &str = "subscription_ids";
pub const FILTER_COUNT: &str = "filter_count";
pub const UPDATE_COUNT: &str = "update_count";
pub const REJECTED_COUNT: &str = "rejected_count";
pub const NOTIFICATION_COUNT: &str = "notification_count";
pub const BOUND_COUNT: &str = "bound_count";
pub const REMOVED: &str = "removed";
pub const KEY_COUNT: &str = "key_count";
pub const SNAPSHOT_VERSION: &str = "snapshot_version";
pub const SUBSCRIBER_COUNT: &str = "subscriber_count";
pub const PUBLISHER_COUNT: &str = "publisher_count";

pub const NONE: &str = "none";
pub const ALL: &str = "all";

/// Renders an id list as `a,b,c`, or [`NONE`] when empty.
pub fn format_subscription_ids(ids: &[SubscriptionId]) -> String {
    if ids.is_empty() {
        return NONE.to_string();
    }
    ids.iter()
        .map(SubscriptionId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders an optional explicit id list; `None` stands for every subscription.
pub fn format_requested_ids(ids: Option<&[SubscriptionId]>) -> String {
    ids.map_or_else(|| ALL.to_string(), format_subscription_ids)
}
