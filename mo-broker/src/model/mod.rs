//! Value types of the broker: scope keys, filters, subscriptions, publisher schemas,
//! publications and notifications.

pub(crate) mod attribute;
pub(crate) mod entity_filter;
pub(crate) mod notification;
pub(crate) mod publication;
pub(crate) mod publisher;
pub(crate) mod scope_key;
pub(crate) mod subscription;
