//! Given steps for rejection retry BDD scenarios.

use super::world::{FixedSubscriber, NoPause, RetryWorld};
use rstest_bdd_macros::given;
use std::sync::Arc;
use std::time::Duration;
use switchyard::channel::{
    adapters::SubscribableChannel, domain::DispatcherPolicy, ports::MessageHandler,
};

fn configure(world: &mut RetryWorld, limit: u32, fail_on_limit: bool) {
    let policy = DispatcherPolicy::unicast()
        .with_rejection_limit(limit)
        .with_retry_interval(Duration::from_millis(1))
        .with_fail_on_rejection_limit(fail_on_limit);
    world.channel = Some(SubscribableChannel::new("work", policy, Arc::new(NoPause)));
}

#[given("a direct channel with a rejection limit of {limit:u32} that fails on the limit")]
fn failing_channel(world: &mut RetryWorld, limit: u32) {
    configure(world, limit, true);
}

#[given("a direct channel with a rejection limit of {limit:u32} that tolerates the limit")]
fn tolerant_channel(world: &mut RetryWorld, limit: u32) {
    configure(world, limit, false);
}

fn subscribe(world: &mut RetryWorld, name: String, accepts: bool) -> Result<(), eyre::Report> {
    let subscriber = FixedSubscriber::new(name.clone(), accepts);
    world
        .channel()?
        .subscribe(Arc::clone(&subscriber) as Arc<dyn MessageHandler>);
    world.subscribers.insert(name, subscriber);
    Ok(())
}

#[given(r#"a subscriber named "{name}" that always rejects"#)]
fn rejecting_subscriber(world: &mut RetryWorld, name: String) -> Result<(), eyre::Report> {
    subscribe(world, name, false)
}

#[given(r#"a subscriber named "{name}" that always accepts"#)]
fn accepting_subscriber(world: &mut RetryWorld, name: String) -> Result<(), eyre::Report> {
    subscribe(world, name, true)
}
