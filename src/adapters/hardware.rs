//! Hardware adapter — bridges the SoC GPIO matrix to [`GpioPort`].
//!
//! This is the only module in the system that touches actual pins.
//! On device builds (`espidf` feature) the calls go straight to the
//! ESP-IDF GPIO/ADC driver; return codes are deliberately ignored,
//! matching the port contract that pin I/O is silently tolerant of bad
//! pin numbers. On host targets the adapter is an in-memory simulation.

use crate::app::ports::{GpioPort, PinMode};

#[cfg(feature = "espidf")]
mod esp {
    use crate::app::ports::PinMode;

    /// ADC1 channel for a given ESP32 pin, if the pin is ADC-capable.
    fn adc1_channel(pin: u8) -> Option<esp_idf_sys::adc1_channel_t> {
        // ESP32 classic mapping: GPIO 32..=39 → ADC1 channels 4..=7, 0..=3.
        match pin {
            36 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_0),
            37 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_1),
            38 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_2),
            39 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_3),
            32 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_4),
            33 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_5),
            34 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_6),
            35 => Some(esp_idf_sys::adc1_channel_t_ADC1_CHANNEL_7),
            _ => None,
        }
    }

    pub fn set_mode(pin: u8, mode: PinMode) {
        let gpio = i32::from(pin);
        unsafe {
            match mode {
                PinMode::Output => {
                    let _ = esp_idf_sys::gpio_set_direction(
                        gpio,
                        esp_idf_sys::gpio_mode_t_GPIO_MODE_OUTPUT,
                    );
                }
                PinMode::Input => {
                    let _ = esp_idf_sys::gpio_set_direction(
                        gpio,
                        esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT,
                    );
                    let _ = esp_idf_sys::gpio_set_pull_mode(
                        gpio,
                        esp_idf_sys::gpio_pull_mode_t_GPIO_FLOATING,
                    );
                }
                PinMode::InputPullup => {
                    let _ = esp_idf_sys::gpio_set_direction(
                        gpio,
                        esp_idf_sys::gpio_mode_t_GPIO_MODE_INPUT,
                    );
                    let _ = esp_idf_sys::gpio_set_pull_mode(
                        gpio,
                        esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
                    );
                }
            }
        }
    }

    pub fn write_digital(pin: u8, value: i32) {
        unsafe {
            let _ = esp_idf_sys::gpio_set_level(i32::from(pin), u32::from(value != 0));
        }
    }

    pub fn read_digital(pin: u8) -> i32 {
        unsafe { esp_idf_sys::gpio_get_level(i32::from(pin)) }
    }

    pub fn read_analog(pin: u8) -> i32 {
        match adc1_channel(pin) {
            Some(ch) => unsafe { esp_idf_sys::adc1_get_raw(ch) },
            None => 0,
        }
    }
}

/// Simulated GPIO bank size (covers the ESP32 pin numbering space).
#[cfg(not(feature = "espidf"))]
const SIM_PIN_COUNT: usize = 48;

/// Simulated pin bank for host targets. Digital writes loop back to
/// digital reads; analog values are injected by tests.
#[cfg(not(feature = "espidf"))]
struct SimPins {
    digital: [i32; SIM_PIN_COUNT],
    analog: [i32; SIM_PIN_COUNT],
}

#[cfg(not(feature = "espidf"))]
impl SimPins {
    fn new() -> Self {
        Self {
            digital: [0; SIM_PIN_COUNT],
            analog: [0; SIM_PIN_COUNT],
        }
    }

    fn idx(pin: u8) -> Option<usize> {
        let i = pin as usize;
        (i < SIM_PIN_COUNT).then_some(i)
    }
}

/// Concrete [`GpioPort`] over the device GPIO matrix (or its host sim).
pub struct GpioAdapter {
    #[cfg(not(feature = "espidf"))]
    sim: SimPins,
}

impl GpioAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(feature = "espidf"))]
            sim: SimPins::new(),
        }
    }

    /// Inject a simulated analog reading (host only).
    #[cfg(not(feature = "espidf"))]
    pub fn set_analog_raw(&mut self, pin: u8, raw: i32) {
        if let Some(i) = SimPins::idx(pin) {
            self.sim.analog[i] = raw;
        }
    }

    /// Inject a simulated digital level (host only).
    #[cfg(not(feature = "espidf"))]
    pub fn set_digital_level(&mut self, pin: u8, level: i32) {
        if let Some(i) = SimPins::idx(pin) {
            self.sim.digital[i] = level;
        }
    }
}

impl GpioPort for GpioAdapter {
    fn set_mode(&mut self, pin: u8, mode: PinMode) {
        #[cfg(feature = "espidf")]
        esp::set_mode(pin, mode);
        #[cfg(not(feature = "espidf"))]
        {
            let _ = (pin, mode);
        }
    }

    fn write_digital(&mut self, pin: u8, value: i32) {
        #[cfg(feature = "espidf")]
        esp::write_digital(pin, value);
        #[cfg(not(feature = "espidf"))]
        self.set_digital_level(pin, i32::from(value != 0));
    }

    fn read_digital(&mut self, pin: u8) -> i32 {
        #[cfg(feature = "espidf")]
        {
            esp::read_digital(pin)
        }
        #[cfg(not(feature = "espidf"))]
        {
            SimPins::idx(pin).map_or(0, |i| self.sim.digital[i])
        }
    }

    fn read_analog(&mut self, pin: u8) -> i32 {
        #[cfg(feature = "espidf")]
        {
            esp::read_analog(pin)
        }
        #[cfg(not(feature = "espidf"))]
        {
            SimPins::idx(pin).map_or(0, |i| self.sim.analog[i])
        }
    }
}

#[cfg(all(test, not(feature = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn sim_digital_write_loops_back() {
        let mut hw = GpioAdapter::new();
        hw.write_digital(4, 1);
        assert_eq!(hw.read_digital(4), 1);
        hw.write_digital(4, 0);
        assert_eq!(hw.read_digital(4), 0);
    }

    #[test]
    fn sim_nonzero_write_is_high() {
        let mut hw = GpioAdapter::new();
        hw.write_digital(4, 255);
        assert_eq!(hw.read_digital(4), 1);
    }

    #[test]
    fn sim_out_of_range_pin_reads_zero() {
        let mut hw = GpioAdapter::new();
        hw.write_digital(200, 1);
        assert_eq!(hw.read_digital(200), 0);
        assert_eq!(hw.read_analog(200), 0);
    }
}
