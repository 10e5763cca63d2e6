//! Canonical structured event names used across `mo-broker`.

pub const BROKER_CREATED: &str = "broker_created";

// Subscriber registration lifecycle events.
pub const REGISTER_START: &str = "register_start";
pub const REGISTER_OK: &str = "register_ok";
pub const SUBSCRIPTION_REPLACED: &str = "subscription_replaced";
pub const DEREGISTER_OK: &str = "deregister_ok";
pub const DEREGISTER_UNKNOWN_IDS: &str = "deregister_unknown_ids";
pub const SUBSCRIBER_SCOPE_DROPPED: &str = "subscriber_scope_dropped";

// Publisher registration lifecycle events.
pub const PUBLISHER_REGISTER_OK: &str = "publisher_register_ok";
pub const PUBLISHER_SCHEMA_REPLACED: &str = "publisher_schema_replaced";
pub const PUBLISHER_SCHEMA_INCONSISTENT: &str = "publisher_schema_inconsistent";
pub const PUBLISHER_DEREGISTER_OK: &str = "publisher_deregister_ok";
pub const PUBLISHER_DEREGISTER_ABSENT: &str = "publisher_deregister_absent";

// Binding index events.
pub const BINDINGS_SUBSCRIPTION_SUMMARY: &str = "bindings_subscription_summary";
pub const BINDINGS_PUBLISHER_SUMMARY: &str = "bindings_publisher_summary";

// Publish pipeline events.
pub const PUBLISH_START: &str = "publish_start";
pub const PUBLISH_UNKNOWN_PUBLISHER: &str = "publish_unknown_publisher";
pub const PUBLISH_UPDATES_REJECTED: &str = "publish_updates_rejected";
pub const PUBLISH_DONE: &str = "publish_done";

// Introspection events.
pub const SNAPSHOT_REBUILD: &str = "snapshot_rebuild";
