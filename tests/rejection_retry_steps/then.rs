//! Then steps for rejection retry BDD scenarios.

use super::world::RetryWorld;
use rstest_bdd_macros::then;
use switchyard::channel::error::{ChannelError, ChannelResult, DeliveryError};

fn last_send(world: &RetryWorld) -> Result<&ChannelResult<bool>, eyre::Report> {
    world
        .last_send
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing send result in scenario world"))
}

#[then("sending fails with a rejection limit error naming {count:usize} subscribers")]
fn fails_with_rejection_limit(world: &RetryWorld, count: usize) -> Result<(), eyre::Report> {
    match last_send(world)? {
        Err(ChannelError::Delivery(DeliveryError::RejectionLimitExceeded { exhausted, .. }))
            if exhausted.len() == count =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected rejection limit error naming {count} subscribers, got {other:?}"
        )),
    }
}

#[then("the message is reported as not sent")]
fn reported_not_sent(world: &RetryWorld) -> Result<(), eyre::Report> {
    match last_send(world)? {
        Ok(false) => Ok(()),
        other => Err(eyre::eyre!("expected Ok(false), got {other:?}")),
    }
}

#[then("the message is reported as sent")]
fn reported_sent(world: &RetryWorld) -> Result<(), eyre::Report> {
    match last_send(world)? {
        Ok(true) => Ok(()),
        other => Err(eyre::eyre!("expected Ok(true), got {other:?}")),
    }
}

#[then("the subscribers saw {count:usize} rejections in total")]
fn total_rejections(world: &RetryWorld, count: usize) -> Result<(), eyre::Report> {
    let rejections: usize = world
        .subscribers
        .values()
        .filter(|subscriber| !subscriber.accepts())
        .map(|subscriber| subscriber.offered())
        .sum();
    if rejections != count {
        return Err(eyre::eyre!("expected {count} rejections, saw {rejections}"));
    }
    Ok(())
}

#[then(r#"the subscriber "{name}" received {count:usize} message"#)]
fn subscriber_received(world: &RetryWorld, name: String, count: usize) -> Result<(), eyre::Report> {
    let subscriber = world
        .subscribers
        .get(&name)
        .ok_or_else(|| eyre::eyre!("unknown subscriber '{name}'"))?;
    if subscriber.offered() != count {
        return Err(eyre::eyre!(
            "expected '{name}' to receive {count} message(s), saw {}",
            subscriber.offered()
        ));
    }
    Ok(())
}
