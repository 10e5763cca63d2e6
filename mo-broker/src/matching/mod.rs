//! Matching layer.
//!
//! Pure, side-effect free relations used by the broker to decide which updates reach
//! which subscriptions: the entity key wildcard algebra and the hierarchical domain
//! matcher.
//!
//! ```
//! use mo_broker::{domain_matches, DomainPath, EntityKey};
//!
//! let pattern = EntityKey::named("battery");
//! let update = EntityKey::new(Some("battery"), Some(4), Some(1), Some(9));
//! assert!(update.matches(&pattern));
//! assert!(EntityKey::wildcard().includes(&pattern));
//!
//! let scope = DomainPath::parse("sat1");
//! let sub_domain = DomainPath::parse("*");
//! assert!(domain_matches(&DomainPath::parse("sat1.power"), &scope, Some(&sub_domain)));
//! assert!(!domain_matches(&DomainPath::parse("sat1.power"), &scope, None));
//! ```

pub(crate) mod domain_matcher;
pub(crate) mod entity_key;
