//! Read-only registration introspection.
//!
//! Registration changes only advance a version counter. The snapshot is rebuilt on
//! the first read after a change and shared through `arc-swap` until the next one,
//! so monitoring reads never walk the live tables more than once per change.

pub(crate) mod registration_directory;
