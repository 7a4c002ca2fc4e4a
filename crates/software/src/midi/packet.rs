//! USB carries MIDI in 32-bit event packets: a header byte (cable number and code index number) followed by up to
//! three bytes of MIDI message.

use wmidi::MidiMessage;

/// Size of a USB-MIDI Event Packet in bytes.
pub const PACKET_SIZE: usize = 4;

/// A single USB-MIDI Event Packet.
pub type Packet = [u8; PACKET_SIZE];

/// Splits data received over USB into packets, dropping any trailing bytes which don't make up a whole packet.
pub fn packets(data: &[u8]) -> impl Iterator<Item = Packet> + '_ {
    data.chunks(PACKET_SIZE).filter_map(|potential_packet| {
        match Packet::try_from(potential_packet) {
            Ok(packet) => Some(packet),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::error!("USB-MIDI Event Packets must always be 32 bits long");
                None
            }
        }
    })
}

/// Extracts the MIDI message from a packet, if it holds a valid one.
pub fn decode(packet: &Packet) -> Option<MidiMessage<'_>> {
    // the zeroth byte is intentionally ignored because the Packet Header is not of interest;
    // the remaining three bytes contain the actual MIDI event
    MidiMessage::from_bytes(&packet[1..]).ok()
}

/// Wraps a MIDI message in a packet for the given virtual cable.
///
/// Only channel voice messages and system real-time messages fit in a single packet; anything else returns `None`.
pub fn encode(msg: &MidiMessage, cable: u8) -> Option<Packet> {
    let mut data = [0_u8; 3];
    msg.copy_to_slice(&mut data).ok()?;
    let code_index_number = match data[0] {
        status @ 0x80..=0xEF => status >> 4,
        0xF8..=0xFF => 0xF,
        _ => return None,
    };
    Some([(cable << 4) | code_index_number, data[0], data[1], data[2]])
}
