//! The control loop: samples the CV input, runs the selected program, and drives the outputs.

use crate::{
    io::Jacks,
    midi::{MIDI_IN, MIDI_OUT},
    program::ProgramReceiver,
};
use defmt::{debug, info};
use embassy_stm32::{peripherals::RNG, rng::Rng};
use embassy_time::{Instant, Timer};
use uncertainty_lib::{
    midi::{decode, encode},
    output::Board,
    program::{Behavior, Engine, EngineConfig},
};

/// Pause between iterations, leaving the executor room for USB and the user interface.
const POLL_INTERVAL_US: u64 = 100;

/// USB-MIDI virtual cable used for everything the module sends.
const CABLE: u8 = 0;

/// Task which owns the jacks and runs the selected program against them, rebuilding it whenever the selection changes.
#[embassy_executor::task]
pub async fn control(
    mut jacks: Jacks,
    mut rng: Rng<'static, RNG>,
    config: EngineConfig,
    mut program: ProgramReceiver<'static>,
) -> ! {
    let mut engine = Engine::new(program.get().await, &config);
    jacks.lights_out(engine.output_mode());
    info!("Running {}", engine.program());

    loop {
        if let Some(selected) = program.try_changed() {
            engine = Engine::new(selected, &config);
            jacks.lights_out(engine.output_mode());
            info!("Running {}", selected);
        }

        // drain everything that arrived since the last tick so a chord or a burst of clock lands together
        while let Ok(packet) = MIDI_IN.try_receive() {
            match decode(&packet) {
                Some(msg) => engine.receive_midi(&msg),
                None => debug!("Skipping malformed packet {:x}", packet),
            }
        }

        engine.step(&mut jacks, Instant::now(), &mut rng);

        if let Some(msg) = engine.take_midi() {
            match encode(&msg, CABLE) {
                Some(packet) => {
                    if MIDI_OUT.try_send(packet).is_err() {
                        debug!("MIDI output queue full; dropping {:x}", packet);
                    }
                }
                None => debug!("Message does not fit a single USB-MIDI packet"),
            }
        }

        Timer::after_micros(POLL_INTERVAL_US).await;
    }
}
