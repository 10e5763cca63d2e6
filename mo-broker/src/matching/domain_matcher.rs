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

//! Hierarchical domain paths and the publication-to-subscription domain matcher.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Segment that, in the last position of a sub-domain, absorbs any remaining suffix.
pub const DOMAIN_WILDCARD: &str = "*";

/// Ordered sequence of domain segments, e.g. `sat1.power`.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainPath(Vec<String>);

impl DomainPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parses a dot separated path. An empty string yields the empty path.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        Self::new(path.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_single_wildcard(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only == DOMAIN_WILDCARD)
    }
}

impl Display for DomainPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for DomainPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Decides whether a publication on `publication` reaches a subscription scoped to
/// `scope`, optionally extended by a filter's `sub_domain`.
///
/// `scope` must be a prefix of `publication`. When the publication is deeper than the
/// scope, the remaining tail is compared against the sub-domain; a trailing `*` in the
/// sub-domain absorbs a tail of any length.
pub fn domain_matches(
    publication: &DomainPath,
    scope: &DomainPath,
    sub_domain: Option<&DomainPath>,
) -> bool {
    let publication = publication.segments();
    let prefix = scope.segments();

    if prefix.len() > publication.len() || !publication.starts_with(prefix) {
        return false;
    }

    let sub_domain = sub_domain.filter(|sub_domain| !sub_domain.is_empty());

    if publication.len() == prefix.len() {
        return sub_domain.map_or(true, DomainPath::is_single_wildcard);
    }

    let Some(sub_domain) = sub_domain else {
        return false;
    };

    let tail = &publication[prefix.len()..];
    let pattern = sub_domain.segments();
    let last = pattern.len() - 1;

    for (index, segment) in tail.iter().enumerate() {
        let Some(expected) = pattern.get(index) else {
            return false;
        };
        if index == last && expected == DOMAIN_WILDCARD {
            return true;
        }
        if expected != segment {
            return false;
        }
    }

    true
}
