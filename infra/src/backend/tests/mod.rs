//! Unit tests for OTP backends

mod http_backend_tests;
