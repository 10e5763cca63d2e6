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

mod config;

use crate::config::Config;
use anyhow::Context;
use clap::Parser;
use mo_broker::{Broker, FailedUpdate, Notification, PublishError};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command()]
struct BrokerArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

/// Outcome of one configured publication.
#[derive(Serialize, Debug)]
struct PublicationReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    notifications: Vec<Notification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failed: Vec<FailedUpdate>,
}

impl PublicationReport {
    fn new(index: usize, outcome: Result<Vec<Notification>, PublishError>) -> Self {
        match outcome {
            Ok(notifications) => Self {
                index,
                error: None,
                notifications,
                failed: Vec::new(),
            },
            Err(error) => {
                let message = error.to_string();
                match error {
                    PublishError::UnknownPublisher { .. } => Self {
                        index,
                        error: Some(message),
                        notifications: Vec::new(),
                        failed: Vec::new(),
                    },
                    PublishError::UnknownEntity {
                        failed,
                        notifications,
                    } => Self {
                        index,
                        error: Some(message),
                        notifications,
                        failed,
                    },
                }
            }
        }
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read config file {path}"))?;
    json5::from_str(&contents).with_context(|| format!("Unable to parse config file {path}"))
}

/// Applies the static registrations, then publishes every configured publication in order.
fn replay(config: Config) -> Vec<PublicationReport> {
    let broker = Broker::new(&config.broker.name);

    for publisher in config.publishers {
        broker.register_publisher(
            &publisher.key,
            publisher.transaction_id,
            publisher.qos_level,
            publisher.priority,
            publisher.schema,
        );
    }

    for subscriber in config.subscribers {
        broker.register(
            &subscriber.key,
            subscriber.transaction_id,
            subscriber.subscription_id,
            subscriber.filters,
            subscriber.delivery,
        );
    }

    config
        .publications
        .iter()
        .enumerate()
        .map(|(index, publication)| {
            let outcome = broker.publish(publication);
            if let Err(error) = &outcome {
                warn!(publication = index, %error, "publication not fully accepted");
            }
            PublicationReport::new(index, outcome)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    info!("Started configurable-broker");

    let args = BrokerArgs::parse();
    let config = load_config(&args.config)?;
    let reports = replay(config);

    let output = if args.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    }
    .context("Unable to serialize publication reports")?;
    println!("{output}");

    Ok(())
}
