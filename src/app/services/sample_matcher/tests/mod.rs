//! Tests for the sample matcher
