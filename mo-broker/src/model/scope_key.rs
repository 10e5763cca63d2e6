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

//! Immutable compound keys identifying subscriber and publisher scopes.

use crate::matching::domain_matcher::DomainPath;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Address of a consumer or provider endpoint.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Area, service, operation and area version of an interaction.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct OperationIdentity {
    pub area: u16,
    pub service: u16,
    pub operation: u16,
    pub area_version: u8,
}

impl OperationIdentity {
    pub fn new(area: u16, service: u16, operation: u16, area_version: u8) -> Self {
        Self {
            area,
            service,
            operation,
            area_version,
        }
    }
}

impl Display for OperationIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/v{}",
            self.area, self.service, self.operation, self.area_version
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Live,
    Simulation,
    Replay,
}

/// Shape shared by subscriber and publisher scopes.
///
/// All fields participate in equality. The network zone is part of the identity but
/// plays no role when matching publications to subscriptions.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeKey {
    pub operation: OperationIdentity,
    #[serde(default)]
    pub domain: DomainPath,
    #[serde(default)]
    pub network_zone: String,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default = "default_session_name")]
    pub session_name: String,
}

pub(crate) fn default_session_name() -> String {
    "LIVE".to_string()
}

impl ScopeKey {
    /// Creates a scope on the `LIVE` live session with an empty network zone.
    pub fn new(operation: OperationIdentity, domain: DomainPath) -> Self {
        Self {
            operation,
            domain,
            network_zone: String::new(),
            session_type: SessionType::Live,
            session_name: default_session_name(),
        }
    }

    pub fn with_network_zone(mut self, network_zone: &str) -> Self {
        self.network_zone = network_zone.to_string();
        self
    }

    pub fn with_session(mut self, session_type: SessionType, session_name: &str) -> Self {
        self.session_type = session_type;
        self.session_name = session_name.to_string();
        self
    }

    pub(crate) fn same_session(&self, other: &ScopeKey) -> bool {
        self.session_type == other.session_type && self.session_name == other.session_name
    }
}

impl Display for ScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}[zone={}, session={:?}:{}]",
            self.operation, self.domain, self.network_zone, self.session_type, self.session_name
        )
    }
}

/// Identity of a subscriber registration: consumer URI plus scope.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriberScopeKey {
    pub subscriber_uri: Uri,
    pub scope: ScopeKey,
}

impl SubscriberScopeKey {
    pub fn new(subscriber_uri: impl Into<Uri>, scope: ScopeKey) -> Self {
        Self {
            subscriber_uri: subscriber_uri.into(),
            scope,
        }
    }
}

impl Display for SubscriberScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.subscriber_uri, self.scope)
    }
}

/// Identity of a publisher registration: provider URI plus scope.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublisherScopeKey {
    pub publisher_uri: Uri,
    pub scope: ScopeKey,
}

impl PublisherScopeKey {
    pub fn new(publisher_uri: impl Into<Uri>, scope: ScopeKey) -> Self {
        Self {
            publisher_uri: publisher_uri.into(),
            scope,
        }
    }
}

impl Display for PublisherScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.publisher_uri, self.scope)
    }
}
