//! Tests for authentication service and gate

mod service_tests;
