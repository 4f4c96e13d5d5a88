//! Scripted sessions against the solar explorer dispatcher.
//!
//! Each scenario drives the real dispatcher (catalog, validator, cache,
//! composer) through a sequence of requests and prints what a host would
//! receive.

pub mod walkthrough;
