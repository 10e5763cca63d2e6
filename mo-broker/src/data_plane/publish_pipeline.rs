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

//! Publish pipeline: publisher resolution, schema validation, matching and batching.

use crate::control_plane::binding_index::BindingIndex;
use crate::control_plane::publisher_table::PublisherTable;
use crate::control_plane::subscriber_table::SubscriberTable;
use crate::data_plane::notification_batcher::NotificationBatcher;
use crate::data_plane::update_validation::validate_updates;
use crate::error::PublishError;
use crate::model::notification::Notification;
use crate::model::publication::Publication;
use crate::observability::events;
use tracing::{debug, info, warn};

const COMPONENT: &str = "publish_pipeline";

/// Read-only view over the registration owners for one publish call.
pub(crate) struct PublishPipeline<'a> {
    subscribers: &'a SubscriberTable,
    publishers: &'a PublisherTable,
    bindings: &'a BindingIndex,
    broker: &'a str,
}

impl<'a> PublishPipeline<'a> {
    pub(crate) fn new(
        subscribers: &'a SubscriberTable,
        publishers: &'a PublisherTable,
        bindings: &'a BindingIndex,
        broker: &'a str,
    ) -> Self {
        Self {
            subscribers,
            publishers,
            bindings,
            broker,
        }
    }

    /// Runs one publication through the pipeline.
    ///
    /// An unknown publisher fails the whole call. Updates rejected by the schema are
    /// reported through [`PublishError::UnknownEntity`], which still carries the
    /// notifications built from the accepted ones.
    pub(crate) fn run(
        &self,
        publication: &Publication,
    ) -> Result<Vec<Notification>, PublishError> {
        let publisher_key = publication.publisher_key();
        let publisher = publisher_key.to_string();
        debug!(
            event = events::PUBLISH_START,
            component = COMPONENT,
            broker = self.broker,
            publisher = %publisher,
            update_count = publication.update_headers.len(),
            "publish received"
        );

        let Some(registration) = self.publishers.get(&publisher_key) else {
            warn!(
                event = events::PUBLISH_UNKNOWN_PUBLISHER,
                component = COMPONENT,
                broker = self.broker,
                publisher = %publisher,
                "publish from unregistered publisher scope"
            );
            return Err(PublishError::UnknownPublisher {
                publisher: publisher_key,
            });
        };

        let validated = validate_updates(registration, publication);
        if !validated.failed.is_empty() {
            warn!(
                event = events::PUBLISH_UPDATES_REJECTED,
                component = COMPONENT,
                broker = self.broker,
                publisher = %publisher,
                rejected_count = validated.failed.len(),
                update_count = publication.update_headers.len(),
                "updates rejected by publisher key schema"
            );
        }

        let mut batcher = NotificationBatcher::default();
        for (target, filter_indices) in self.bindings.bound(&publisher_key) {
            let Some(subscription) = self
                .subscribers
                .subscription(&target.subscriber, &target.subscription_id)
            else {
                continue;
            };

            for &index in &validated.accepted {
                let Some(header) = publication.update_headers.get(index) else {
                    continue;
                };
                let matched = filter_indices
                    .iter()
                    .filter_map(|&filter| subscription.filters().get(filter))
                    .any(|filter| filter.accepts(&header.key, header.update_type));
                if matched {
                    batcher.record(target, index);
                }
            }
        }

        let notifications = if batcher.is_empty() {
            Vec::new()
        } else {
            batcher.build(publication, self.subscribers)
        };

        info!(
            event = events::PUBLISH_DONE,
            component = COMPONENT,
            broker = self.broker,
            publisher = %publisher,
            update_count = validated.accepted.len(),
            rejected_count = validated.failed.len(),
            notification_count = notifications.len(),
            "publish matched"
        );

        if validated.failed.is_empty() {
            Ok(notifications)
        } else {
            Err(PublishError::UnknownEntity {
                failed: validated.failed,
                notifications,
            })
        }
    }
}
