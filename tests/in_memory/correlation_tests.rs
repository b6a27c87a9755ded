//! In-memory integration tests for aggregation and resequencing.

use super::helpers::{clock, drain, queue, sequenced, texts};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use switchyard::channel::{
    adapters::SubscribableChannel,
    ports::{MessageChannel, MessageHandler},
};
use switchyard::correlation::{
    adapters::SequenceSizeCompletion, services::CorrelationHandler,
};
use switchyard::message::domain::{CorrelationId, Payload};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn aggregator_behind_a_channel_releases_complete_groups(clock: Arc<DefaultClock>) {
    let output = queue("batches", 8);
    let aggregator = Arc::new(CorrelationHandler::aggregator(
        "aggregator",
        Arc::clone(&output) as Arc<dyn MessageChannel>,
        Arc::new(SequenceSizeCompletion),
        clock,
    ));
    let input = SubscribableChannel::direct("parts");
    input.subscribe(Arc::clone(&aggregator) as Arc<dyn MessageHandler>);

    for message in [
        sequenced("order-1", 2, 3),
        sequenced("order-2", 1, 1),
        sequenced("order-1", 1, 3),
        sequenced("order-1", 3, 3),
        sequenced("order-1", 3, 3),
    ] {
        assert!(input.send(message, None).await.expect("aggregator accepts"));
    }

    let batches = drain(&output).await;
    let summary: Vec<_> = batches
        .iter()
        .map(|batch| {
            (
                batch.correlation_id().map(CorrelationId::as_str).map(str::to_owned),
                batch.payload().as_list().map(<[Payload]>::len),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (Some("order-2".to_owned()), Some(1)),
            (Some("order-1".to_owned()), Some(3)),
        ]
    );
}

#[rstest]
#[case::whole_sequences(false, vec![vec![], vec![], vec![], vec!["s-1", "s-2", "s-3", "s-4"]])]
#[case::partial_runs(true, vec![vec![], vec!["s-1", "s-2"], vec![], vec!["s-3", "s-4"]])]
#[tokio::test(flavor = "multi_thread")]
async fn resequencer_release_modes(
    clock: Arc<DefaultClock>,
    #[case] release_partial: bool,
    #[case] expected: Vec<Vec<&str>>,
) {
    let output = queue("ordered", 8);
    let resequencer = CorrelationHandler::resequencer(
        "resequencer",
        Arc::clone(&output) as Arc<dyn MessageChannel>,
        release_partial,
        clock,
    );

    let mut observed = Vec::new();
    for number in [2, 1, 4, 3] {
        assert!(resequencer.handle(&sequenced("s", number, 4)).await.is_accepted());
        observed.push(texts(&drain(&output).await));
    }

    assert_eq!(observed, expected);
}
