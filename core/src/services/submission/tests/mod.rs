//! Tests for the submission coordinator
