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

//! Four-level entity key and the wildcard relations defined over it.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Wildcard value of the textual sub-key.
pub const WILDCARD_NAME: &str = "*";
/// Wildcard value of the numeric sub-keys.
pub const WILDCARD_NUMBER: i64 = 0;

/// Key attached to every published update and to every filter pattern.
///
/// `None` means the sub-key is absent and only matches another absent sub-key.
/// `"*"` (first sub-key) and `0` (numeric sub-keys) are wildcards when the key is
/// used as a pattern.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EntityKey {
    #[serde(default)]
    pub first_sub_key: Option<String>,
    #[serde(default)]
    pub second_sub_key: Option<i64>,
    #[serde(default)]
    pub third_sub_key: Option<i64>,
    #[serde(default)]
    pub fourth_sub_key: Option<i64>,
}

/// Classification of one sub-key when read as a pattern.
enum SubKey<'a, T: ?Sized> {
    Wildcard,
    Absent,
    Concrete(&'a T),
}

fn name_sub_key(value: Option<&str>) -> SubKey<'_, str> {
    match value {
        None => SubKey::Absent,
        Some(WILDCARD_NAME) => SubKey::Wildcard,
        Some(name) => SubKey::Concrete(name),
    }
}

fn number_sub_key(value: &Option<i64>) -> SubKey<'_, i64> {
    match value {
        None => SubKey::Absent,
        Some(WILDCARD_NUMBER) => SubKey::Wildcard,
        Some(number) => SubKey::Concrete(number),
    }
}

/// `key` is taken literally, only `pattern` may carry wildcards.
fn sub_key_matches<T: PartialEq + ?Sized>(key: Option<&T>, pattern: SubKey<'_, T>) -> bool {
    match pattern {
        SubKey::Wildcard => true,
        SubKey::Absent => key.is_none(),
        SubKey::Concrete(expected) => key == Some(expected),
    }
}

fn sub_key_includes<T: PartialEq + ?Sized>(outer: SubKey<'_, T>, inner: SubKey<'_, T>) -> bool {
    match (outer, inner) {
        (SubKey::Wildcard, _) => true,
        (SubKey::Absent, SubKey::Absent) => true,
        (SubKey::Concrete(outer), SubKey::Concrete(inner)) => outer == inner,
        _ => false,
    }
}

fn sub_key_overlaps<T: PartialEq + ?Sized>(left: SubKey<'_, T>, right: SubKey<'_, T>) -> bool {
    match (left, right) {
        (SubKey::Wildcard, _) | (_, SubKey::Wildcard) => true,
        (SubKey::Absent, SubKey::Absent) => true,
        (SubKey::Concrete(left), SubKey::Concrete(right)) => left == right,
        _ => false,
    }
}

impl EntityKey {
    pub fn new(
        first_sub_key: Option<&str>,
        second_sub_key: Option<i64>,
        third_sub_key: Option<i64>,
        fourth_sub_key: Option<i64>,
    ) -> Self {
        Self {
            first_sub_key: first_sub_key.map(str::to_string),
            second_sub_key,
            third_sub_key,
            fourth_sub_key,
        }
    }

    /// `("*", 0, 0, 0)`, matching every key.
    pub fn wildcard() -> Self {
        Self::new(
            Some(WILDCARD_NAME),
            Some(WILDCARD_NUMBER),
            Some(WILDCARD_NUMBER),
            Some(WILDCARD_NUMBER),
        )
    }

    /// `(name, 0, 0, 0)`.
    pub fn named(name: &str) -> Self {
        Self::new(
            Some(name),
            Some(WILDCARD_NUMBER),
            Some(WILDCARD_NUMBER),
            Some(WILDCARD_NUMBER),
        )
    }

    fn numbers(&self) -> [&Option<i64>; 3] {
        [
            &self.second_sub_key,
            &self.third_sub_key,
            &self.fourth_sub_key,
        ]
    }

    /// Returns `true` when this (concrete) key satisfies `pattern`.
    pub fn matches(&self, pattern: &EntityKey) -> bool {
        sub_key_matches(
            self.first_sub_key.as_deref(),
            name_sub_key(pattern.first_sub_key.as_deref()),
        ) && self
            .numbers()
            .into_iter()
            .zip(pattern.numbers())
            .all(|(key, expected)| sub_key_matches(key.as_ref(), number_sub_key(expected)))
    }

    /// Returns `true` when every key matched by `inner` is also matched by `self`.
    pub fn includes(&self, inner: &EntityKey) -> bool {
        sub_key_includes(
            name_sub_key(self.first_sub_key.as_deref()),
            name_sub_key(inner.first_sub_key.as_deref()),
        ) && self
            .numbers()
            .into_iter()
            .zip(inner.numbers())
            .all(|(outer, inner)| sub_key_includes(number_sub_key(outer), number_sub_key(inner)))
    }

    /// Optimistic overlap test between two patterns.
    ///
    /// Never `false` for two patterns that are both matched by some concrete key.
    pub fn potentially_matches(&self, other: &EntityKey) -> bool {
        sub_key_overlaps(
            name_sub_key(self.first_sub_key.as_deref()),
            name_sub_key(other.first_sub_key.as_deref()),
        ) && self
            .numbers()
            .into_iter()
            .zip(other.numbers())
            .all(|(left, right)| sub_key_overlaps(number_sub_key(left), number_sub_key(right)))
    }
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn number(value: &Option<i64>) -> String {
            value.map_or_else(|| "null".to_string(), |value| value.to_string())
        }

        write!(
            f,
            "[{}.{}.{}.{}]",
            self.first_sub_key.as_deref().unwrap_or("null"),
            number(&self.second_sub_key),
            number(&self.third_sub_key),
            number(&self.fourth_sub_key),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKey;

    fn key(
        first: Option<&str>,
        second: Option<i64>,
        third: Option<i64>,
        fourth: Option<i64>,
    ) -> EntityKey {
        EntityKey::new(first, second, third, fourth)
    }

    #[test]
    fn concrete_pattern_requires_equal_sub_keys() {
        let update = key(Some("battery"), Some(3), Some(7), Some(11));

        assert!(update.matches(&key(Some("battery"), Some(3), Some(7), Some(11))));
        assert!(!update.matches(&key(Some("battery"), Some(3), Some(7), Some(12))));
        assert!(!update.matches(&key(Some("solar"), Some(3), Some(7), Some(11))));
    }

    #[test]
    fn wildcard_sub_keys_match_anything_including_absent() {
        let pattern = key(Some("*"), Some(0), Some(0), Some(0));

        assert!(key(Some("battery"), Some(3), None, Some(11)).matches(&pattern));
        assert!(key(None, None, None, None).matches(&pattern));
    }

    #[test]
    fn absent_pattern_sub_key_only_matches_absent_key() {
        let pattern = key(Some("battery"), None, Some(0), Some(0));

        assert!(key(Some("battery"), None, Some(4), Some(5)).matches(&pattern));
        assert!(!key(Some("battery"), Some(2), Some(4), Some(5)).matches(&pattern));
    }

    #[test]
    fn wildcard_in_update_key_is_literal() {
        let update = key(Some("*"), Some(1), Some(1), Some(1));

        assert!(!update.matches(&key(Some("battery"), Some(1), Some(1), Some(1))));
    }

    #[test]
    fn includes_is_subset_of_matched_keys() {
        let everything = EntityKey::wildcard();
        let battery = EntityKey::named("battery");
        let battery_cell = key(Some("battery"), Some(2), Some(0), Some(0));

        assert!(everything.includes(&battery));
        assert!(battery.includes(&battery_cell));
        assert!(!battery_cell.includes(&battery));
        assert!(!battery.includes(&everything));
        assert!(battery.includes(&battery));
    }

    #[test]
    fn absent_sub_key_is_only_included_by_absent_or_wildcard() {
        let inner = key(Some("battery"), None, Some(0), Some(0));

        assert!(EntityKey::named("battery").includes(&inner));
        assert!(key(Some("battery"), None, Some(0), Some(0)).includes(&inner));
        assert!(!key(Some("battery"), Some(4), Some(0), Some(0)).includes(&inner));
    }

    #[test]
    fn potential_match_detects_contradicting_sub_keys() {
        let battery = key(Some("battery"), Some(1), Some(0), Some(0));
        let any_second = key(Some("*"), Some(1), Some(5), Some(0));
        let solar = key(Some("solar"), Some(0), Some(0), Some(0));
        let absent = key(Some("battery"), None, Some(0), Some(0));

        assert!(battery.potentially_matches(&any_second));
        assert!(any_second.potentially_matches(&battery));
        assert!(!battery.potentially_matches(&solar));
        assert!(!battery.potentially_matches(&absent));
    }

    #[test]
    fn display_renders_absent_sub_keys_as_null() {
        let rendered = key(Some("battery"), None, Some(2), Some(0)).to_string();

        assert_eq!(rendered, "[battery.null.2.0]");
    }
}
