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

//! Attribute values carried as update key values, and their declared types.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Type tag a publisher declares for each position of its key schema.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Blob,
    Boolean,
    Duration,
    Float,
    Double,
    Identifier,
    Octet,
    UOctet,
    Short,
    UShort,
    Integer,
    UInteger,
    Long,
    ULong,
    String,
    Time,
    FineTime,
    Uri,
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Runtime attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Attribute {
    Blob(Vec<u8>),
    Boolean(bool),
    /// Seconds.
    Duration(f64),
    Float(f32),
    Double(f64),
    Identifier(String),
    Octet(i8),
    UOctet(u8),
    Short(i16),
    UShort(u16),
    Integer(i32),
    UInteger(u32),
    Long(i64),
    ULong(u64),
    String(String),
    /// Milliseconds since the Unix epoch.
    Time(u64),
    /// Nanoseconds since the Unix epoch.
    FineTime(u64),
    Uri(String),
}

impl Attribute {
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Attribute::Blob(_) => AttributeType::Blob,
            Attribute::Boolean(_) => AttributeType::Boolean,
            Attribute::Duration(_) => AttributeType::Duration,
            Attribute::Float(_) => AttributeType::Float,
            Attribute::Double(_) => AttributeType::Double,
            Attribute::Identifier(_) => AttributeType::Identifier,
            Attribute::Octet(_) => AttributeType::Octet,
            Attribute::UOctet(_) => AttributeType::UOctet,
            Attribute::Short(_) => AttributeType::Short,
            Attribute::UShort(_) => AttributeType::UShort,
            Attribute::Integer(_) => AttributeType::Integer,
            Attribute::UInteger(_) => AttributeType::UInteger,
            Attribute::Long(_) => AttributeType::Long,
            Attribute::ULong(_) => AttributeType::ULong,
            Attribute::String(_) => AttributeType::String,
            Attribute::Time(_) => AttributeType::Time,
            Attribute::FineTime(_) => AttributeType::FineTime,
            Attribute::Uri(_) => AttributeType::Uri,
        }
    }

    pub fn string(value: &str) -> Self {
        Attribute::String(value.to_string())
    }
}
