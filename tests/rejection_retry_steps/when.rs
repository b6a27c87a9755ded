//! When steps for rejection retry BDD scenarios.

use super::world::{RetryWorld, run_async};
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use switchyard::channel::ports::MessageChannel;
use switchyard::message::domain::{Message, Payload};

#[when("a message is sent to the channel")]
fn send_message(world: &mut RetryWorld) -> Result<(), eyre::Report> {
    let message = Message::new(Payload::text("job"), &DefaultClock);
    let result = run_async(world.channel()?.send(message, None));
    world.last_send = Some(result);
    Ok(())
}
