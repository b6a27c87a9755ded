//! Resolution of route strategy output into channels, and delivery.

use crate::channel::{
    domain::HandlerOutcome,
    error::HandlerFailure,
    ports::{ChannelResolver, MessageChannel, MessageHandler},
};
use crate::message::domain::{CorrelationId, Message, SequenceDetails};
use crate::routing::{
    domain::{Destination, RouterOptions},
    error::{ConfigurationError, RoutingError},
    ports::RouteStrategy,
};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Channel lookup fixed at build time.
struct StaticMappings(HashMap<String, Arc<dyn MessageChannel>>);

impl ChannelResolver for StaticMappings {
    fn resolve(&self, name: &str) -> Option<Arc<dyn MessageChannel>> {
        self.0.get(name).cloned()
    }
}

/// Builder for [`Router`].
///
/// Channel names are resolved either through a shared
/// [`ChannelResolver`] or through channels mapped on the builder, never
/// both.
pub struct RouterBuilder {
    name: String,
    strategy: Arc<dyn RouteStrategy>,
    options: RouterOptions,
    resolver: Option<Arc<dyn ChannelResolver>>,
    mappings: Vec<Arc<dyn MessageChannel>>,
    default_output: Option<Arc<dyn MessageChannel>>,
    send_timeout: Option<Duration>,
}

impl RouterBuilder {
    /// Starts building a router named `name` around `strategy`.
    #[must_use]
    pub fn new(name: impl Into<String>, strategy: Arc<dyn RouteStrategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
            options: RouterOptions::default(),
            resolver: None,
            mappings: Vec::new(),
            default_output: None,
            send_timeout: None,
        }
    }

    /// Replaces the resolution options.
    #[must_use]
    pub fn with_options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolves channel names through `resolver`.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ChannelResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Maps `channel` under its own name.
    #[must_use]
    pub fn with_channel(mut self, channel: Arc<dyn MessageChannel>) -> Self {
        self.mappings.push(channel);
        self
    }

    /// Sends messages that resolve to no channel to `channel`.
    #[must_use]
    pub fn with_default_output(mut self, channel: Arc<dyn MessageChannel>) -> Self {
        self.default_output = Some(channel);
        self
    }

    /// Bounds how long each send may wait.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = Some(timeout);
        self
    }

    /// Validates the configuration and builds the router.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::ConflictingResolvers`] when both a resolver
    ///   and mapped channels were supplied.
    /// - [`ConfigurationError::DuplicateMapping`] when two mapped channels
    ///   share a name.
    pub fn build<C>(self, clock: Arc<C>) -> Result<Router<C>, ConfigurationError>
    where
        C: Clock + Send + Sync,
    {
        let resolver = match (self.resolver, self.mappings.is_empty()) {
            (Some(_), false) => {
                return Err(ConfigurationError::ConflictingResolvers { router: self.name });
            }
            (Some(resolver), true) => Some(resolver),
            (None, true) => None,
            (None, false) => {
                let mut table = HashMap::with_capacity(self.mappings.len());
                for channel in self.mappings {
                    let channel_name = channel.name().to_owned();
                    if table.insert(channel_name.clone(), channel).is_some() {
                        return Err(ConfigurationError::DuplicateMapping {
                            router: self.name,
                            channel: channel_name,
                        });
                    }
                }
                Some(Arc::new(StaticMappings(table)) as Arc<dyn ChannelResolver>)
            }
        };

        Ok(Router {
            name: self.name,
            strategy: self.strategy,
            options: self.options,
            resolver,
            default_output: self.default_output,
            send_timeout: self.send_timeout,
            clock,
        })
    }
}

/// Resolves destinations for messages and sends them on.
///
/// Resolution flattens the strategy's [`Destination`] depth first. Names get
/// the configured prefix and suffix before lookup. When nothing resolves,
/// the default output channel is used if set; otherwise the message is an
/// error when resolution is required and silently dropped when it is not.
pub struct Router<C>
where
    C: Clock + Send + Sync,
{
    name: String,
    strategy: Arc<dyn RouteStrategy>,
    options: RouterOptions,
    resolver: Option<Arc<dyn ChannelResolver>>,
    default_output: Option<Arc<dyn MessageChannel>>,
    send_timeout: Option<Duration>,
    clock: Arc<C>,
}

impl<C> Router<C>
where
    C: Clock + Send + Sync,
{
    /// Returns the router name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resolution options.
    #[must_use]
    pub const fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolves the ordered list of channels `message` should reach.
    ///
    /// An empty list means the message is dropped.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::Configuration`] when the strategy output has an
    ///   unsupported shape.
    /// - [`RoutingError::UnresolvedChannel`] when a name cannot be resolved
    ///   and resolution is required.
    /// - [`RoutingError::ResolutionRequired`] when nothing resolved, no
    ///   default output is set, and resolution is required.
    pub fn resolve(&self, message: &Message) -> Result<Vec<Arc<dyn MessageChannel>>, RoutingError> {
        let mut channels = Vec::new();
        if let Some(destination) = self.strategy.route(message)? {
            self.flatten(destination, &mut channels)?;
        }
        if !channels.is_empty() {
            return Ok(channels);
        }

        if let Some(default_output) = &self.default_output {
            debug!(
                router = %self.name,
                message_id = %message.id(),
                channel = default_output.name(),
                "routing to default output channel"
            );
            return Ok(vec![Arc::clone(default_output)]);
        }
        if self.options.resolution_required() {
            return Err(RoutingError::ResolutionRequired {
                router: self.name.clone(),
                message_id: message.id(),
            });
        }
        debug!(router = %self.name, message_id = %message.id(), "no route, dropping message");
        Ok(channels)
    }

    /// Resolves `message` and sends it to every resolved channel in order.
    ///
    /// Returns the number of channels the message was sent to.
    ///
    /// # Errors
    ///
    /// Returns the resolution errors of [`Self::resolve`], plus
    /// [`RoutingError::SendRejected`] or [`RoutingError::Channel`] for the
    /// first channel that does not take the message. Channels earlier in
    /// the list have already received it.
    pub async fn route(&self, message: &Message) -> Result<usize, RoutingError> {
        let channels = self.resolve(message)?;
        let total = channels.len();
        for (index, channel) in channels.iter().enumerate() {
            let outbound = self.outbound(message, index, total);
            if !channel.send(outbound, self.send_timeout).await? {
                return Err(RoutingError::SendRejected {
                    router: self.name.clone(),
                    channel: channel.name().to_owned(),
                    message_id: message.id(),
                });
            }
            debug!(
                router = %self.name,
                channel = channel.name(),
                message_id = %message.id(),
                "routed message"
            );
        }
        Ok(total)
    }

    fn outbound(&self, message: &Message, index: usize, total: usize) -> Message {
        if !self.options.apply_sequence() {
            return message.clone();
        }
        let (Ok(number), Ok(size)) = (u32::try_from(index + 1), u32::try_from(total)) else {
            return message.clone();
        };
        let Ok(sequence) = SequenceDetails::new(number, size) else {
            return message.clone();
        };
        message
            .derive()
            .with_correlation_id(CorrelationId::from(message.id()))
            .with_sequence(sequence)
            .build(&*self.clock)
    }

    fn flatten(
        &self,
        destination: Destination,
        channels: &mut Vec<Arc<dyn MessageChannel>>,
    ) -> Result<(), RoutingError> {
        match destination {
            Destination::Channel(channel) => channels.push(channel),
            Destination::Name(name) => {
                let full_name = self.options.channel_name(&name);
                match self
                    .resolver
                    .as_ref()
                    .and_then(|resolver| resolver.resolve(&full_name))
                {
                    Some(channel) => channels.push(channel),
                    None if self.options.resolution_required() => {
                        return Err(RoutingError::UnresolvedChannel {
                            router: self.name.clone(),
                            channel: full_name,
                        });
                    }
                    None => warn!(
                        router = %self.name,
                        channel = %full_name,
                        "skipping unresolvable channel"
                    ),
                }
            }
            Destination::Many(destinations) => {
                for nested in destinations {
                    self.flatten(nested, channels)?;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<C> MessageHandler for Router<C>
where
    C: Clock + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, message: &Message) -> HandlerOutcome {
        match self.route(message).await {
            Ok(_) => HandlerOutcome::Accepted,
            Err(err) => {
                warn!(
                    router = %self.name,
                    message_id = %message.id(),
                    error = %err,
                    "routing failed"
                );
                HandlerOutcome::Failed(HandlerFailure::new(err))
            }
        }
    }
}
