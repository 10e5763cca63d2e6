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

//! Schema validation of the updates carried by one publication.

use crate::error::{FailedUpdate, ValidationFailure};
use crate::model::publication::Publication;
use crate::model::publisher::PublisherRegistration;

/// Split of a publication's updates into those that may be notified and those
/// rejected by the publisher schema.
#[derive(Debug, Default)]
pub(crate) struct ValidatedUpdates {
    /// Indices into the publication, ascending.
    pub(crate) accepted: Vec<usize>,
    pub(crate) failed: Vec<FailedUpdate>,
}

pub(crate) fn validate_updates(
    registration: &PublisherRegistration,
    publication: &Publication,
) -> ValidatedUpdates {
    let mut validated = ValidatedUpdates::default();

    for (index, header) in publication.update_headers.iter().enumerate() {
        let verdict = registration.validate(header).and_then(|()| {
            publication
                .payload_row(index)
                .map(|_| ())
                .map_err(|column| ValidationFailure::MissingPayload { column })
        });

        match verdict {
            Ok(()) => validated.accepted.push(index),
            Err(reason) => validated.failed.push(FailedUpdate {
                index,
                header: header.clone(),
                reason,
            }),
        }
    }

    validated
}
