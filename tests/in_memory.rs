//! Service integration tests over the scripted in-memory transport.
//!
//! Tests are organized into modules by functionality:
//! - `pipeline_tests`: Task lookup, backfill, reply expansion, strategies
//! - `listing_tests`: Paged task listing and its filters

mod in_memory {
    pub mod helpers;

    mod listing_tests;
    mod pipeline_tests;
}
