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

use mo_broker::{
    DeliveryQos, EntityFilter, KeySchema, Publication, PublisherScopeKey, QosLevel,
    SubscriberScopeKey, SubscriptionId, TransactionId,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) broker: BrokerConfig,
    #[serde(default)]
    pub(crate) publishers: Vec<PublisherConfig>,
    #[serde(default)]
    pub(crate) subscribers: Vec<SubscriberConfig>,
    #[serde(default)]
    pub(crate) publications: Vec<Publication>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    pub(crate) name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PublisherConfig {
    pub(crate) key: PublisherScopeKey,
    #[serde(default)]
    pub(crate) transaction_id: TransactionId,
    #[serde(default)]
    pub(crate) qos_level: QosLevel,
    #[serde(default)]
    pub(crate) priority: u32,
    pub(crate) schema: KeySchema,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SubscriberConfig {
    pub(crate) key: SubscriberScopeKey,
    #[serde(default)]
    pub(crate) transaction_id: TransactionId,
    pub(crate) subscription_id: SubscriptionId,
    pub(crate) filters: Vec<EntityFilter>,
    #[serde(default)]
    pub(crate) delivery: DeliveryQos,
}
