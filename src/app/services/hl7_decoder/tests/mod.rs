//! Tests for the HL7 decoder
