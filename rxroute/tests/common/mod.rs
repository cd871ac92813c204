#![allow(dead_code)]

use rxroute::{
    RouterRx,
    testing::{MockParams, MockRouter},
};
use std::sync::Arc;

// ============================================================================
// Test Router Types
// ============================================================================

pub type TestRouter = MockRouter<&'static str>;

pub const HOME: &str = "home";
pub const ABOUT: &str = "about";

// ============================================================================
// Helpers
// ============================================================================

/// Build a router holding `states` and attach the stream adapter to it.
pub fn attach(states: Vec<&'static str>) -> (Arc<TestRouter>, RouterRx<TestRouter>) {
    let router = Arc::new(MockRouter::with_states(states));
    let rx = RouterRx::new(&router).unwrap();
    (router, rx)
}

pub fn params(pairs: &[(&str, &str)]) -> MockParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
