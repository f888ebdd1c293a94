//! Integration Tests Module
//!
//! End-to-end tests for the quiz session state machine, the recommendation
//! gateway and the quiz flow. Remote calls go to scripted providers.

// Shared scripted provider
mod support;

// Session state machine properties
mod quiz_session_test;

// Gateway parsing, validation and fallback
mod gateway_test;

// Flow orchestration: input lock, restart, results hand-off
mod quiz_flow_test;
