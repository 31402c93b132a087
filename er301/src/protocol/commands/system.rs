// er301-rs/er301/src/protocol/commands/system.rs

use crate::types::{AntennaStatus, BaudRate, BeepDuration, LedColor, NodeId};

/// INIT_PORT parameters: baud selector(1)
pub fn encode_init_port(baud: BaudRate) -> Vec<u8> {
    vec![baud as u8]
}

/// SET_DEVICE_NODE_NO parameters: node id(2, LE)
pub fn encode_set_node_number(node: NodeId) -> Vec<u8> {
    node.to_le_bytes().to_vec()
}

/// SET_BUZZER_BEEP parameters: duration in 10 ms units(1)
pub fn encode_beep(duration: BeepDuration) -> Vec<u8> {
    vec![duration as u8]
}

/// SET_LED_COLOR parameters: color(1)
pub fn encode_led(color: LedColor) -> Vec<u8> {
    vec![color as u8]
}

/// SET_ANTENNA_STATUS parameters: status(1)
pub fn encode_antenna(status: AntennaStatus) -> Vec<u8> {
    vec![status as u8]
}
