//! Tasks and types which carry MIDI between USB and the control loop.
//!
//! The USB class is split so that reading never waits on writing. Packets travel through bounded channels; when the
//! control loop falls behind, new packets are dropped rather than stalling USB.

use crate::UsbDriver;
use defmt::{info, panic, warn};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};
use embassy_usb::{
    UsbDevice,
    class::midi::{Receiver, Sender},
    driver::EndpointError,
};
use uncertainty_lib::midi::{Packet, packets};

const MIDI_IN_CAPACITY: usize = 32;
/// Packets received from the host, waiting for the control loop.
pub static MIDI_IN: Channel<CriticalSectionRawMutex, Packet, MIDI_IN_CAPACITY> = Channel::new();

const MIDI_OUT_CAPACITY: usize = 8;
/// Packets produced by the control loop, waiting to be sent to the host.
pub static MIDI_OUT: Channel<CriticalSectionRawMutex, Packet, MIDI_OUT_CAPACITY> = Channel::new();

#[embassy_executor::task]
pub async fn usb_task(mut usb: UsbDevice<'static, UsbDriver>) -> ! {
    usb.run().await
}

/// Receives MIDI from the host for as long as it stays connected, then waits for it to come back.
#[embassy_executor::task]
pub async fn midi_in(mut receiver: Receiver<'static, UsbDriver>) -> ! {
    loop {
        receiver.wait_connection().await;
        info!("USB connected");
        let _ = receive_midi(&mut receiver).await;
        info!("USB disconnected");
    }
}

/// Sends queued MIDI to the host whenever it is connected.
#[embassy_executor::task]
pub async fn midi_out(mut sender: Sender<'static, UsbDriver>) -> ! {
    loop {
        sender.wait_connection().await;
        let _ = send_midi(&mut sender).await;
    }
}

#[doc(hidden)]
struct Disconnected {}

impl From<EndpointError> for Disconnected {
    fn from(val: EndpointError) -> Self {
        match val {
            EndpointError::BufferOverflow => panic!("Buffer overflow"),
            EndpointError::Disabled => Disconnected {},
        }
    }
}

/// Helper function which splits data received over USB into packets and queues them for the control loop.
async fn receive_midi(receiver: &mut Receiver<'static, UsbDriver>) -> Result<(), Disconnected> {
    let mut buf = [0; 64];
    loop {
        let n = receiver.read_packet(&mut buf).await?;
        for packet in packets(&buf[..n]) {
            if MIDI_IN.try_send(packet).is_err() {
                warn!("MIDI input queue full; dropping {:x}", packet);
            }
        }
    }
}

async fn send_midi(sender: &mut Sender<'static, UsbDriver>) -> Result<(), Disconnected> {
    loop {
        let packet = MIDI_OUT.receive().await;
        sender.write_packet(&packet).await?;
    }
}
