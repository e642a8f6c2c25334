//! Tests for the OTP channel


mod adapter_tests;
