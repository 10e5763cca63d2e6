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

//! Errors reported by broker operations.

use crate::model::attribute::AttributeType;
use crate::model::notification::Notification;
use crate::model::publication::UpdateHeader;
use crate::model::scope_key::{PublisherScopeKey, SubscriberScopeKey};
use crate::model::subscription::SubscriptionId;
use serde::Serialize;
use thiserror::Error;

/// Why a single update was rejected by its publisher's key schema.
#[derive(Clone, Debug, Eq, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("expected {expected} key values, got {actual}")]
    KeyCountMismatch { expected: usize, actual: usize },
    #[error("key value {position} has type {actual}, declared {expected}")]
    KeyTypeMismatch {
        position: usize,
        expected: AttributeType,
        actual: AttributeType,
    },
    #[error("payload column {column} has no element for this update")]
    MissingPayload { column: usize },
}

/// An update removed from the notify set, with its index in the publication.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedUpdate {
    pub index: usize,
    pub header: UpdateHeader,
    pub reason: ValidationFailure,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PublishError {
    /// Nothing was notified.
    #[error("unknown publisher {publisher}")]
    UnknownPublisher { publisher: PublisherScopeKey },
    /// Partial failure: `notifications` were built from the valid updates and must
    /// still be delivered.
    #[error("{} update(s) rejected by the publisher key schema", failed.len())]
    UnknownEntity {
        failed: Vec<FailedUpdate>,
        notifications: Vec<Notification>,
    },
}

impl PublishError {
    /// Notifications that remain deliverable despite the error.
    pub fn notifications(&self) -> &[Notification] {
        match self {
            PublishError::UnknownPublisher { .. } => &[],
            PublishError::UnknownEntity { notifications, .. } => notifications,
        }
    }
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DeregisterError {
    /// Raised after every known id of the same call has been removed.
    #[error("unknown subscription(s) {ids:?} for {subscriber}")]
    UnknownSubscriptions {
        subscriber: SubscriberScopeKey,
        ids: Vec<SubscriptionId>,
    },
}
