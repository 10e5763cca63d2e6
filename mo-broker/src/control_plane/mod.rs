//! Control-plane layer.
//!
//! Owns subscriber and publisher registrations plus the binding index that links
//! them. Every registration change goes through one lifecycle transition that
//! rebinds the affected side, so a subscription registered after its publisher
//! and a publisher registered after its subscriptions end up with the same
//! bindings.
//!
//! ```
//! use mo_broker::{
//!     Broker, DeliveryQos, DomainPath, EntityFilter, EntityKey, KeySchema, OperationIdentity,
//!     PublisherScopeKey, QosLevel, ScopeKey, SubscriberScopeKey, SubscriptionId,
//! };
//!
//! let broker = Broker::new("control-plane-doc");
//! let scope = ScopeKey::new(OperationIdentity::new(4, 2, 1, 1), DomainPath::parse("sat1"));
//! let subscriber = SubscriberScopeKey::new("mal:consumer", scope.clone());
//! let publisher = PublisherScopeKey::new("mal:provider", scope);
//!
//! broker.register(
//!     &subscriber,
//!     1,
//!     SubscriptionId::from("sub-A"),
//!     vec![EntityFilter::new(EntityKey::wildcard())],
//!     DeliveryQos::default(),
//! );
//! broker.register_publisher(&publisher, 2, QosLevel::Assured, 1, KeySchema::default());
//!
//! // Whole-scope deregistration is idempotent; naming an unknown id is reported.
//! broker.deregister(&subscriber, None).unwrap();
//! broker.deregister(&subscriber, None).unwrap();
//! assert!(broker
//!     .deregister(&subscriber, Some(&[SubscriptionId::from("sub-A")]))
//!     .is_err());
//! assert!(broker.deregister_publisher(&publisher).is_some());
//! assert!(broker.deregister_publisher(&publisher).is_none());
//! ```

pub(crate) mod binding_index;
pub(crate) mod publisher_table;
pub(crate) mod registration_lifecycle;
pub(crate) mod subscriber_table;
