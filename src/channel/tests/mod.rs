//! Unit tests for the channel module.
