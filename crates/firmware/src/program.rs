//! Tasks and types related to selecting the active [`Program`].

use embassy_stm32::{exti::ExtiInput, gpio::Output};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    watch::{Receiver, Sender, Watch},
};
use embassy_time::Timer;
use uncertainty_lib::configuration::{CycleConfig, Program};

const PROGRAM_RECEIVER_CNT: usize = 2;
/// Syncs the selected program across tasks.
pub static PROGRAM_SYNC: Watch<CriticalSectionRawMutex, Program, PROGRAM_RECEIVER_CNT> =
    Watch::new_with(Program::Uncertainty);
pub type ProgramSender<'a> = Sender<'a, CriticalSectionRawMutex, Program, PROGRAM_RECEIVER_CNT>;
pub type ProgramReceiver<'a> =
    Receiver<'a, CriticalSectionRawMutex, Program, PROGRAM_RECEIVER_CNT>;

/// Handles button presses, cycling through the [`Program`]s.
#[embassy_executor::task]
pub async fn select_program(
    mut button: ExtiInput<'static>,
    program: ProgramSender<'static>,
) -> ! {
    loop {
        button.wait_for_rising_edge().await;

        let new_state = program
            .try_get()
            .expect("Program should never be uninitialized")
            .cycle();
        defmt::info!("Switching to {}", new_state);
        program.send(new_state);
    }
}

/// Provides a quick and dirty status indicator for the selected [`Program`].
///
/// Each cycle is divided in half. The LED remains dark for one half. For the other, the
/// LED lights up N times (where N is one more than the index of the selected program).
#[embassy_executor::task]
pub async fn display_program(
    mut led: Output<'static>,
    mut program: ProgramReceiver<'static>,
) -> ! {
    const BLINK_SLEEP_US: u64 = 1_000_000;

    loop {
        led.set_low();
        Timer::after_micros(BLINK_SLEEP_US).await;

        // since the index starts with 0, 1 is added or else the LED wouldn't blink at all for the zeroth program
        let blink_cnt = { program.get().await as u8 }.saturating_add(1);
        // mult by two to account for the "off" periods, sub 1 so the LED always starts and ends lit
        let animation_frames = blink_cnt * 2 - 1;
        let mut counter = animation_frames;
        while counter > 0 {
            led.toggle();
            Timer::after_micros(BLINK_SLEEP_US / u64::from(animation_frames)).await;
            counter -= 1;
        }
    }
}
