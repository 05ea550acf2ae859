//! Integration tests for pactlens-api
//!
//! Uses wiremock to simulate the PactLens backend and verifies
//! end-to-end behavior of the authenticated client, the session flows
//! built on top of it, and the unauthenticated sharing client.

mod common;

mod test_contracts;
mod test_session;
mod test_shared_view;
