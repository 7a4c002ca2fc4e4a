//! The module's jacks: the CV input on ADC1 and the eight outputs on the channels of two PWM timers.
//!
//! Gates are written as 0% or 100% duty, so every output can also carry a filtered, continuous voltage without
//! reconfiguring pins when the program changes.

use embassy_stm32::{
    adc::{Adc, AnyAdcChannel},
    peripherals::{ADC1, TIM3, TIM4},
    timer::simple_pwm::{SimplePwm, SimplePwmChannels},
};
use uncertainty_lib::{
    configuration::OutputMode,
    cv::CvSample,
    output::{Board, Level},
};

/// Resolution of the F767's ADC as configured by default.
const ADC_BITS: u8 = 12;

/// The eight outputs, in panel order: TIM3 channels 1-4 followed by TIM4 channels 1-4.
pub struct Outputs {
    tim3: SimplePwmChannels<'static, TIM3>,
    tim4: SimplePwmChannels<'static, TIM4>,
}

impl Outputs {
    /// Takes over both timers and enables all of their channels, starting dark.
    pub fn new(tim3: SimplePwm<'static, TIM3>, tim4: SimplePwm<'static, TIM4>) -> Self {
        let mut outputs = Self {
            tim3: tim3.split(),
            tim4: tim4.split(),
        };
        outputs.tim3.ch1.enable();
        outputs.tim3.ch2.enable();
        outputs.tim3.ch3.enable();
        outputs.tim3.ch4.enable();
        outputs.tim4.ch1.enable();
        outputs.tim4.ch2.enable();
        outputs.tim4.ch3.enable();
        outputs.tim4.ch4.enable();
        for index in 0..8 {
            outputs.set_duty(index, 0);
        }
        outputs
    }

    /// Sets the duty cycle of an output, where `u16::MAX` is always on. Indices past the last output are ignored.
    pub fn set_duty(&mut self, index: usize, duty: u16) {
        match index {
            0 => self.tim3.ch1.set_duty_cycle_fraction(duty, u16::MAX),
            1 => self.tim3.ch2.set_duty_cycle_fraction(duty, u16::MAX),
            2 => self.tim3.ch3.set_duty_cycle_fraction(duty, u16::MAX),
            3 => self.tim3.ch4.set_duty_cycle_fraction(duty, u16::MAX),
            4 => self.tim4.ch1.set_duty_cycle_fraction(duty, u16::MAX),
            5 => self.tim4.ch2.set_duty_cycle_fraction(duty, u16::MAX),
            6 => self.tim4.ch3.set_duty_cycle_fraction(duty, u16::MAX),
            7 => self.tim4.ch4.set_duty_cycle_fraction(duty, u16::MAX),
            _ => defmt::warn!("No output {}", index),
        }
    }
}

/// Everything a program touches, gathered behind [`Board`].
pub struct Jacks {
    adc: Adc<'static, ADC1>,
    cv_in: AnyAdcChannel<ADC1>,
    outputs: Outputs,
}

impl Jacks {
    /// Constructs [`Jacks`].
    pub fn new(adc: Adc<'static, ADC1>, cv_in: AnyAdcChannel<ADC1>, outputs: Outputs) -> Self {
        Self {
            adc,
            cv_in,
            outputs,
        }
    }
}

impl Board for Jacks {
    fn read_sample(&mut self) -> CvSample {
        CvSample::from_adc(self.adc.blocking_read(&mut self.cv_in), ADC_BITS)
    }

    fn write_output(&mut self, index: usize, level: Level, mode: OutputMode) {
        self.outputs.set_duty(index, mode.duty(level));
    }
}
