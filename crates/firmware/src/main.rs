//! Uncertainty is [Embassy](https://embassy.dev)-based firmware for a [Eurorack](https://en.wikipedia.org/wiki/Eurorack)
//! module with one CV input and eight gate/CV outputs. The firmware runs on the [Nucleo-F767ZI development
//! board](https://www.st.com/en/evaluation-tools/nucleo-f767zi.html), which is powered by an F7-series
//! STM32 microcontroller.
//!
//! The module interprets its input according to one of several programs: probabilistic gate fan-out, random walks, a
//! voltage-controlled gate selector and clock divider, a free-running sweep, and three programs which bridge USB-MIDI
//! and the modular. The user button on the board cycles through the programs; the red LED blinks the index of the
//! active one.

#![no_std]
#![no_main]

mod control;
mod io;
mod midi;
mod program;

use crate::{
    control::control,
    io::{Jacks, Outputs},
    midi::{midi_in, midi_out, usb_task},
    program::{PROGRAM_SYNC, display_program, select_program},
};
use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    Config,
    adc::{Adc, AdcChannel},
    bind_interrupts,
    exti::ExtiInput,
    gpio::{Level, Output, OutputType, Pull, Speed},
    peripherals, rng,
    rng::Rng,
    time::{Hertz, khz},
    timer::{
        low_level::CountingMode,
        simple_pwm::{PwmPin, SimplePwm},
    },
    usb,
};
use embassy_usb::{Builder, class::midi::MidiClass};
use static_cell::StaticCell;
use uncertainty_lib::{
    configuration::{BoundaryPolicy, Release, Thresholds},
    pattern::{DEFAULT_RANGES, DEFAULT_WEIGHTS, Probability, RandomWalks},
    program::EngineConfig,
};

use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(
    #[doc(hidden)]
    struct Irqs {
        OTG_FS => usb::InterruptHandler<peripherals::USB_OTG_FS>;
        RNG => rng::InterruptHandler<peripherals::RNG>;
    }
);

type UsbDriver = usb::Driver<'static, peripherals::USB_OTG_FS>;

/// Frequency of the output PWM; high enough for a simple RC filter to turn duty cycle into a steady voltage.
const PWM_FREQUENCY_KHZ: u32 = 10;

/// Hysteresis band for gates at the CV input, in normalized 16-bit units.
const LOW_THRESHOLD: u16 = 40_000;
const HIGH_THRESHOLD: u16 = 50_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Initializing Uncertainty");

    let mut config = Config::default();
    {
        use embassy_stm32::rcc::*;
        // hse: high-speed external clock
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Bypass,
        });

        // pll: phase-locked loop, crucial for dividing clock
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL216,
            divp: Some(PllPDiv::DIV2), // 8mhz / 4 * 216 / 2 = 216Mhz
            // per section 5.2 of RM0410: USB OTG FS and the RNG both run from the 48MHz clock, which is derived
            // from main PLL VCO (PLLQ clock) or PLLSAI VCO (PLLSAI clock)
            divq: Some(PllQDiv::DIV9), // 8mhz / 4 * 216 / 9 = 48Mhz
            divr: None,
        });
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV4;
        config.rcc.apb2_pre = APBPrescaler::DIV2;
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.mux.clk48sel = mux::Clk48sel::PLL1_Q;
    }
    let p = embassy_stm32::init(config);

    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::None);
    unwrap!(spawner.spawn(select_program(button, PROGRAM_SYNC.sender())));

    let red_led = Output::new(p.PB14, Level::Low, Speed::Low);
    let program = PROGRAM_SYNC
        .receiver()
        .expect("Program synchronizer should have a receiver available");
    unwrap!(spawner.spawn(display_program(red_led, program)));

    // Create the driver, from the HAL.
    static ENDPOINT_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();
    let mut config = embassy_stm32::usb::Config::default();

    // USB devices which are self-powered (i.e., that can stay powered on if unplugged from the host)
    // need to enable vbus_detection to comply with the USB spec. The module runs from the Eurorack
    // bus, so the USB port never powers it.
    config.vbus_detection = true;

    let driver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        ENDPOINT_OUT_BUFFER.init([0; 256]),
        config,
    );

    // per https://pid.codes, FOSS projects can apply to be listed under the vendor ID owned by InterBiometrics
    let vendor_id = 0x1209;
    // TODO: replace the pid.codes test PID once a product ID has been allocated
    let product_id = 0x0001;

    let mut config = embassy_usb::Config::new(vendor_id, product_id);
    config.manufacturer = Some("Olivia Artz Modular");
    config.product = Some("Uncertainty");
    config.self_powered = true;
    config.max_power = 0;

    // Create embassy-usb DeviceBuilder using the driver and config.
    // It needs some buffers for building the descriptors.
    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        &mut [], // no msos descriptors
        CONTROL_BUFFER.init([0; 64]),
    );

    // Create classes on the builder.
    let class = MidiClass::new(&mut builder, 1, 1, 64);

    // Build the builder.
    let usb = builder.build();
    unwrap!(spawner.spawn(usb_task(usb)));

    let (sender, receiver) = class.split();
    unwrap!(spawner.spawn(midi_in(receiver)));
    unwrap!(spawner.spawn(midi_out(sender)));

    // the CV input arrives on ADC1 channel 3 after the front end scales it into the ADC's range
    let adc = Adc::new(p.ADC1);
    let cv_in = p.PA3.degrade_adc();

    // outputs 1-4 are TIM3 channels 1-4 on PC6-PC9, outputs 5-8 are TIM4 channels 1-4 on PD12-PD15
    let tim3 = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PC6, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PC7, OutputType::PushPull)),
        Some(PwmPin::new_ch3(p.PC8, OutputType::PushPull)),
        Some(PwmPin::new_ch4(p.PC9, OutputType::PushPull)),
        khz(PWM_FREQUENCY_KHZ),
        CountingMode::EdgeAlignedUp,
    );
    let tim4 = SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new_ch1(p.PD12, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PD13, OutputType::PushPull)),
        Some(PwmPin::new_ch3(p.PD14, OutputType::PushPull)),
        Some(PwmPin::new_ch4(p.PD15, OutputType::PushPull)),
        khz(PWM_FREQUENCY_KHZ),
        CountingMode::EdgeAlignedUp,
    );
    let jacks = Jacks::new(adc, cv_in, Outputs::new(tim3, tim4));

    let rng = Rng::new(p.RNG, Irqs);

    let engine_config = EngineConfig {
        thresholds: unwrap!(Thresholds::new(LOW_THRESHOLD, HIGH_THRESHOLD)),
        probability: unwrap!(Probability::new(DEFAULT_WEIGHTS, Release::Hold)),
        walks: unwrap!(RandomWalks::new(DEFAULT_RANGES, BoundaryPolicy::Clip)),
    };
    info!("Engine configuration: {}", engine_config);

    let program = PROGRAM_SYNC
        .receiver()
        .expect("Program synchronizer should have a receiver available");
    unwrap!(spawner.spawn(control(jacks, rng, engine_config, program)));
}
