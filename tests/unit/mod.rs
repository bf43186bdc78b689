/// Unit tests for the public library API
mod basic_tests;
