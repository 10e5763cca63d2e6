mod support;

use mo_broker::{Broker, SubscriberScopeKey, SubscriptionId};
use std::sync::Arc;
use support::{
    make_broker, publication, publisher, register_name_publisher, register_pattern, scope,
};

const WORKERS: usize = 8;
const ROUNDS: usize = 50;

fn consumer(worker: usize) -> SubscriberScopeKey {
    SubscriberScopeKey::new(format!("mal:consumer-{worker}").as_str(), scope("sat1"))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registrations_and_publishes_stay_consistent() {
    let broker: Arc<Broker> = Arc::new(make_broker("concurrent"));
    register_name_publisher(&broker, &publisher("sat1"));

    let mut handles = Vec::with_capacity(WORKERS * 2);
    for worker in 0..WORKERS {
        let registrar = Arc::clone(&broker);
        handles.push(tokio::task::spawn_blocking(move || {
            let key = consumer(worker);
            for round in 0..ROUNDS {
                register_pattern(&registrar, &key, &format!("sub-{round}"), "*");
                if round % 2 == 1 {
                    registrar
                        .deregister(&key, Some(&[SubscriptionId::new(format!("sub-{round}"))]))
                        .expect("subscription was just registered");
                }
            }
        }));

        let publisher_side = Arc::clone(&broker);
        handles.push(tokio::task::spawn_blocking(move || {
            for _ in 0..ROUNDS {
                let notifications = publisher_side
                    .publish(&publication("sat1", &["battery"]))
                    .expect("publisher stays registered");
                for notification in notifications {
                    assert_eq!(notification.update_count(), notification.updates.len());
                }
            }
        }));
    }

    for handle in handles {
        handle.await.expect("worker should not panic");
    }

    let snapshot = broker.snapshot();
    assert_eq!(snapshot.subscribers().len(), WORKERS);
    assert_eq!(snapshot.subscription_count(), WORKERS * ROUNDS / 2);

    let notifications = broker
        .publish(&publication("sat1", &["battery"]))
        .expect("publisher stays registered");
    assert_eq!(notifications.len(), WORKERS);
    assert!(notifications
        .iter()
        .all(|notification| notification.updates.len() == ROUNDS / 2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn snapshots_taken_concurrently_are_monotonic() {
    let broker = Arc::new(make_broker("snapshots"));

    let writer = {
        let broker = Arc::clone(&broker);
        tokio::task::spawn_blocking(move || {
            for round in 0..ROUNDS {
                register_pattern(&broker, &consumer(0), &format!("sub-{round}"), "battery");
            }
        })
    };
    let reader = {
        let broker = Arc::clone(&broker);
        tokio::task::spawn_blocking(move || {
            let mut last = 0;
            for _ in 0..ROUNDS {
                let snapshot = broker.snapshot();
                assert!(snapshot.version() >= last);
                last = snapshot.version();
            }
        })
    };

    writer.await.expect("writer should not panic");
    reader.await.expect("reader should not panic");

    assert_eq!(broker.snapshot().subscription_count(), ROUNDS);
}
