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

//! One matching rule of a subscription.

use crate::matching::domain_matcher::{domain_matches, DomainPath};
use crate::matching::entity_key::EntityKey;
use crate::model::publication::UpdateType;
use crate::model::scope_key::{OperationIdentity, ScopeKey};
use serde::{Deserialize, Serialize};

/// Sub-domain, operation wildcards, key pattern and change-only rule.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityFilter {
    #[serde(default)]
    pub sub_domain: Option<DomainPath>,
    #[serde(default)]
    pub all_areas: bool,
    #[serde(default)]
    pub all_services: bool,
    #[serde(default)]
    pub all_operations: bool,
    pub pattern: EntityKey,
    #[serde(default)]
    pub only_on_change: bool,
}

impl EntityFilter {
    pub fn new(pattern: EntityKey) -> Self {
        Self {
            sub_domain: None,
            all_areas: false,
            all_services: false,
            all_operations: false,
            pattern,
            only_on_change: false,
        }
    }

    pub fn with_sub_domain(mut self, sub_domain: DomainPath) -> Self {
        self.sub_domain = Some(sub_domain);
        self
    }

    pub fn with_all_areas(mut self) -> Self {
        self.all_areas = true;
        self
    }

    pub fn with_all_services(mut self) -> Self {
        self.all_services = true;
        self
    }

    pub fn with_all_operations(mut self) -> Self {
        self.all_operations = true;
        self
    }

    /// Restricts the filter to updates that are not plain periodic `Update`s.
    pub fn changes_only(mut self) -> Self {
        self.only_on_change = true;
        self
    }

    fn accepts_operation(
        &self,
        subscriber: &OperationIdentity,
        publisher: &OperationIdentity,
    ) -> bool {
        (self.all_areas
            || (subscriber.area == publisher.area
                && subscriber.area_version == publisher.area_version))
            && (self.all_services || subscriber.service == publisher.service)
            && (self.all_operations || subscriber.operation == publisher.operation)
    }

    /// Scope-level compatibility between a subscriber scope and a publisher scope.
    ///
    /// Independent of individual updates, so the result can be cached per
    /// publisher registration.
    pub fn binds(&self, subscriber: &ScopeKey, publisher: &ScopeKey) -> bool {
        self.accepts_operation(&subscriber.operation, &publisher.operation)
            && subscriber.same_session(publisher)
            && domain_matches(
                &publisher.domain,
                &subscriber.domain,
                self.sub_domain.as_ref(),
            )
    }

    pub fn accepts_update_type(&self, update_type: UpdateType) -> bool {
        !self.only_on_change || update_type != UpdateType::Update
    }

    /// Update-level check, assuming [`EntityFilter::binds`] already holds.
    pub fn accepts(&self, key: &EntityKey, update_type: UpdateType) -> bool {
        self.accepts_update_type(update_type) && key.matches(&self.pattern)
    }

    /// `true` when every update accepted by `other` is accepted by `self`.
    pub fn subsumes(&self, other: &EntityFilter) -> bool {
        self.sub_domain == other.sub_domain
            && self.all_areas == other.all_areas
            && self.all_services == other.all_services
            && self.all_operations == other.all_operations
            && (!self.only_on_change || other.only_on_change)
            && self.pattern.includes(&other.pattern)
    }
}
