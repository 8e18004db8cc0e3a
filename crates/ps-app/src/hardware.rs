//! sysfs-backed CPU temperature sensor and PWM fan.
//!
//! Each type reads one file or writes a few attributes.
//! Anything that goes wrong becomes a sensor or actuator error.

use ps_controls::{
    ControlError, ControlResult, FanActuator, Reading, TemperatureRange, TemperatureSensor,
};
use ps_core::Real;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";
pub const PWM_CHIP_PATH: &str = "/sys/class/pwm/pwmchip0";
/// GPIO 13 (pin 33) is hardware PWM channel 1.
pub const FAN_PWM_CHANNEL: u32 = 1;
pub const PWM_FREQUENCY_HZ: u32 = 100;

/// Where the fan and temperature sensor live.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareConfig {
    pub thermal_path: PathBuf,
    pub pwm_chip: PathBuf,
    pub pwm_channel: u32,
    pub frequency_hz: u32,
    pub range: TemperatureRange,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            thermal_path: PathBuf::from(THERMAL_ZONE_PATH),
            pwm_chip: PathBuf::from(PWM_CHIP_PATH),
            pwm_channel: FAN_PWM_CHANNEL,
            frequency_hz: PWM_FREQUENCY_HZ,
            range: TemperatureRange::default(),
        }
    }
}

/// Thermal zone reporting millidegrees Celsius.
#[derive(Debug, Clone)]
pub struct SysfsThermalSensor {
    path: PathBuf,
    range: TemperatureRange,
}

impl SysfsThermalSensor {
    pub fn open(path: impl Into<PathBuf>, range: TemperatureRange) -> ControlResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(ControlError::sensor(format!(
                "thermal zone {} not found",
                path.display()
            )));
        }
        Ok(Self { path, range })
    }

    pub fn read_celsius(&self) -> ControlResult<Real> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| ControlError::sensor(format!("{}: {e}", self.path.display())))?;
        let millis: Real = text.trim().parse().map_err(|_| {
            ControlError::sensor(format!(
                "{}: unexpected contents {:?}",
                self.path.display(),
                text.trim()
            ))
        })?;
        Ok(millis / 1000.0)
    }
}

impl TemperatureSensor for SysfsThermalSensor {
    fn sample(&mut self) -> ControlResult<Reading> {
        Ok(self.range.reading(self.read_celsius()?))
    }
}

/// One channel of a sysfs PWM chip.
#[derive(Debug, Clone)]
pub struct SysfsPwmFan {
    channel_dir: PathBuf,
    period_ns: u64,
    value: Real,
}

impl SysfsPwmFan {
    /// Export (if needed) and enable the channel with the fan stopped.
    pub fn open(chip: &Path, channel: u32, frequency_hz: u32) -> ControlResult<Self> {
        if frequency_hz == 0 {
            return Err(ControlError::InvalidArg {
                what: "PWM frequency must be positive".to_string(),
            });
        }
        let channel_dir = chip.join(format!("pwm{channel}"));
        if !channel_dir.is_dir() {
            write_attr(&chip.join("export"), channel)?;
        }
        let fan = Self {
            channel_dir,
            period_ns: 1_000_000_000 / u64::from(frequency_hz),
            value: 0.0,
        };
        // Duty first: the kernel rejects a period shorter than the duty cycle.
        write_attr(&fan.attr("duty_cycle"), 0)?;
        write_attr(&fan.attr("period"), fan.period_ns)?;
        write_attr(&fan.attr("enable"), 1)?;
        debug!(channel = %fan.channel_dir.display(), period_ns = fan.period_ns, "PWM fan ready");
        Ok(fan)
    }

    pub fn from_config(config: &HardwareConfig) -> ControlResult<Self> {
        Self::open(&config.pwm_chip, config.pwm_channel, config.frequency_hz)
    }

    /// Last successfully written duty cycle.
    pub fn value(&self) -> Real {
        self.value
    }

    fn attr(&self, name: &str) -> PathBuf {
        self.channel_dir.join(name)
    }
}

impl FanActuator for SysfsPwmFan {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ControlError::InvalidArg {
                what: format!("fan duty cycle {fraction} outside [0, 1]"),
            });
        }
        let duty_ns = (fraction * self.period_ns as Real).round() as u64;
        write_attr(&self.attr("duty_cycle"), duty_ns)?;
        self.value = fraction;
        Ok(())
    }
}

fn write_attr(path: &Path, value: impl ToString) -> ControlResult<()> {
    fs::write(path, value.to_string())
        .map_err(|e| ControlError::actuator(format!("{}: {e}", path.display())))
}

/// The real board: one sensor, one fan.
#[derive(Debug)]
pub struct Board {
    pub sensor: SysfsThermalSensor,
    pub fan: SysfsPwmFan,
}

impl Board {
    /// Fan first, so a missing sensor still leaves the fan parked.
    pub fn open(config: &HardwareConfig) -> ControlResult<Self> {
        let fan = SysfsPwmFan::from_config(config)?;
        let sensor = SysfsThermalSensor::open(&config.thermal_path, config.range)?;
        Ok(Self { sensor, fan })
    }
}

impl TemperatureSensor for Board {
    fn sample(&mut self) -> ControlResult<Reading> {
        self.sensor.sample()
    }
}

impl FanActuator for Board {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        self.fan.command(fraction)
    }
}
