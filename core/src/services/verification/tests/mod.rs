//! Tests for the verification module
