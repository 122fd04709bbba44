//! Integration tests

mod command_flow_tests;
