//! Tests for the ASTM decoder

pub mod decoder_tests;
