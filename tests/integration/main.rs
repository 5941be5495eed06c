//! Integration tests

mod api_tests;
