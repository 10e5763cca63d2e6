//! Data-plane layer.
//!
//! Owns the publish path: resolving the publisher registration, validating each
//! update against its key schema, matching accepted updates against the filters
//! bound to that publisher and batching the hits into one notification per
//! subscriber registration.
//!
//! ```
//! use mo_broker::{
//!     Attribute, AttributeType, Broker, DeliveryQos, DomainPath, EntityFilter, EntityKey,
//!     KeySchema, OperationIdentity, Publication, PublishError, PublisherScopeKey, QosLevel,
//!     ScopeKey, SubscriberScopeKey, SubscriptionId, UpdateHeader, UpdateType,
//! };
//!
//! let broker = Broker::new("data-plane-doc");
//! let scope = ScopeKey::new(OperationIdentity::new(4, 2, 1, 1), DomainPath::parse("sat1"));
//! broker.register(
//!     &SubscriberScopeKey::new("mal:consumer", scope.clone()),
//!     1,
//!     SubscriptionId::from("sub-A"),
//!     vec![EntityFilter::new(EntityKey::wildcard())],
//!     DeliveryQos::default(),
//! );
//! broker.register_publisher(
//!     &PublisherScopeKey::new("mal:provider", scope.clone()),
//!     2,
//!     QosLevel::Assured,
//!     1,
//!     KeySchema::from_pairs([("name", AttributeType::String)]),
//! );
//!
//! let publication = Publication::new("mal:provider", scope)
//!     .with_update(
//!         UpdateHeader::new(EntityKey::named("battery"), UpdateType::Update)
//!             .with_key_values(vec![Some(Attribute::string("battery"))]),
//!         Vec::new(),
//!     )
//!     .with_update(
//!         UpdateHeader::new(EntityKey::named("solar"), UpdateType::Update)
//!             .with_key_values(vec![Some(Attribute::Long(7))]),
//!         Vec::new(),
//!     );
//!
//! // The badly typed update is rejected; the valid one is still notified.
//! let error = broker.publish(&publication).unwrap_err();
//! assert!(matches!(error, PublishError::UnknownEntity { .. }));
//! assert_eq!(error.notifications().len(), 1);
//! assert_eq!(error.notifications()[0].update_count(), 1);
//! ```

pub(crate) mod notification_batcher;
pub(crate) mod publish_pipeline;
pub(crate) mod update_validation;
