//! Parameter code extraction from compound observation identifiers
//!
//! Instruments report analyte codes as `^`-joined compounds; the rule for
//! pulling the human-matchable code out differs by protocol. ASTM
//! instruments scatter the code across components, so all non-empty
//! components are joined. HL7 places the readable mnemonic in the second
//! component, falling back to the first. The asymmetry reflects observed
//! instrument conventions and is intentionally not unified.

use crate::app::models::Protocol;
use crate::constants::COMPONENT_DELIMITER;

/// Extract the matchable parameter code from a compound observation
/// identifier
pub fn extract_code(observation_identifier: &str, protocol: Protocol) -> String {
    let components: Vec<&str> = observation_identifier.split(COMPONENT_DELIMITER).collect();

    match protocol {
        Protocol::Astm => components
            .iter()
            .filter(|c| !c.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
        Protocol::Hl7 => {
            let second = components.get(1).copied().unwrap_or("");
            if second.is_empty() {
                components.first().copied().unwrap_or("").to_string()
            } else {
                second.to_string()
            }
        }
    }
}
