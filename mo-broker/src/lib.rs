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

//! # mo-broker
//!
//! `mo-broker` is the in-memory publish/subscribe core of a CCSDS MO provider. It keeps
//! subscriber and publisher registrations, validates published updates against the
//! publisher's declared key schema and matches them against subscription filters,
//! returning one [`Notification`] per subscriber registration.
//!
//! Wire transports, payload encoding and the interaction state machines live outside
//! this crate; callers hand in decoded values and turn notifications into NOTIFY
//! messages themselves.
//!
//! ## Quick start
//!
//! ```
//! use mo_broker::{
//!     Attribute, AttributeType, Broker, DeliveryQos, DomainPath, EntityFilter, EntityKey,
//!     KeySchema, OperationIdentity, Publication, PublisherScopeKey, QosLevel, ScopeKey,
//!     SubscriberScopeKey, SubscriptionId, UpdateHeader, UpdateType,
//! };
//!
//! let broker = Broker::new("quick-start");
//! let operation = OperationIdentity::new(4, 2, 1, 1);
//! let domain = DomainPath::parse("sat1.power");
//!
//! broker.register(
//!     &SubscriberScopeKey::new("mal:consumer", ScopeKey::new(operation, domain.clone())),
//!     1,
//!     SubscriptionId::from("sub-A"),
//!     vec![EntityFilter::new(EntityKey::named("battery"))],
//!     DeliveryQos::new(QosLevel::Assured, 1),
//! );
//! broker.register_publisher(
//!     &PublisherScopeKey::new("mal:provider", ScopeKey::new(operation, domain.clone())),
//!     2,
//!     QosLevel::Assured,
//!     1,
//!     KeySchema::from_pairs([("name", AttributeType::String)]),
//! );
//!
//! let battery = Publication::new("mal:provider", ScopeKey::new(operation, domain.clone()))
//!     .with_update(
//!         UpdateHeader::new(EntityKey::named("battery"), UpdateType::Update)
//!             .with_key_values(vec![Some(Attribute::string("battery"))]),
//!         Vec::new(),
//!     );
//! let notifications = broker.publish(&battery).unwrap();
//! assert_eq!(notifications.len(), 1);
//! assert_eq!(notifications[0].subscriber_uri.as_str(), "mal:consumer");
//! assert_eq!(notifications[0].updates[0].subscription_id.as_str(), "sub-A");
//!
//! let solar = Publication::new("mal:provider", ScopeKey::new(operation, domain))
//!     .with_update(
//!         UpdateHeader::new(EntityKey::named("solar"), UpdateType::Update)
//!             .with_key_values(vec![Some(Attribute::string("solar"))]),
//!         Vec::new(),
//!     );
//! assert!(broker.publish(&solar).unwrap().is_empty());
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: [`Broker`] and the value types re-exported below
//! - Matching: entity key wildcard algebra and the hierarchical domain matcher
//! - Model: scope keys, filters, subscriptions, publisher schemas, publications
//! - Control plane: registration tables, binding index and registration lifecycle
//! - Data plane: update validation, matching and notification batching
//! - Introspection: versioned read-only registration snapshot
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod broker;
pub use broker::Broker;

mod control_plane;
mod data_plane;

mod error;
pub use error::{DeregisterError, FailedUpdate, PublishError, ValidationFailure};

mod introspection;
pub use introspection::registration_directory::DirectorySnapshot;

mod matching;
pub use matching::domain_matcher::{domain_matches, DomainPath, DOMAIN_WILDCARD};
pub use matching::entity_key::{EntityKey, WILDCARD_NAME, WILDCARD_NUMBER};

mod model;
pub use model::attribute::{Attribute, AttributeType};
pub use model::entity_filter::EntityFilter;
pub use model::notification::{Notification, SubscriptionUpdate};
pub use model::publication::{
    Publication, UpdateHeader, UpdatePayloadColumn, UpdateType, UpdateValue,
};
pub use model::publisher::{KeySchema, PublisherRegistration};
pub use model::scope_key::{
    OperationIdentity, PublisherScopeKey, ScopeKey, SessionType, SubscriberScopeKey, Uri,
};
pub use model::subscription::{
    DeliveryQos, QosLevel, SubscriberRegistration, Subscription, SubscriptionId, TransactionId,
};

#[doc(hidden)]
pub mod observability;

#[doc(hidden)]
pub mod benchmark_support;
