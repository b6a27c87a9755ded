//! Unit tests for the routing module.
