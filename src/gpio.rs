use std::collections::{hash_map::Entry, HashMap};

use crate::{
    config::Config,
    error::{GpioError, Result},
    policy::ErrorPolicy,
    sysfs::{self, PinHandle},
};

/// Specifies the GPIO pin value in output mode.
///
/// * `LOW` - 0
/// * `HIGH` - 1
///
/// # Example
///
/// To set GPIO pin 17 to HIGH and GPIO pin 27 to LOW:
///
/// ```rust,no_run
/// use sysfs_gpio_out::{GPIO, Level};
///
/// let mut gpio = GPIO::new();
/// gpio.output(17, Level::HIGH).unwrap();
/// gpio.output(27, Level::LOW).unwrap();
/// gpio.close().unwrap();
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Level {
    LOW = 0,
    HIGH = 1,
}

impl From<bool> for Level {
    fn from(on: bool) -> Self {
        match on {
            true => Level::HIGH,
            false => Level::LOW,
        }
    }
}

/// Something pins can be driven through: write values, then release everything.
///
/// [`GPIO`] is the sysfs implementation; applications can put their own
/// doubles behind this trait.
pub trait DigitalOutput {
    /// Writes `value` to `pin`, claiming the pin for output on first use.
    fn write(&mut self, pin: u32, value: i32) -> Result<()>;

    /// Releases every claimed pin.
    fn close(&mut self) -> Result<()>;
}

/// Drives GPIO pins as digital outputs through sysfs.
///
/// A pin is exported and configured as an output the first time it is written
/// to, and stays claimed until [`GPIO::close`]. Once closed, the controller
/// rejects further writes with [`GpioError::Closed`].
///
/// Two controllers writing to the same pin are not coordinated: whichever
/// closes first unexports the pin under the other.
///
/// # Example
///
/// ```rust,no_run
/// use sysfs_gpio_out::GPIO;
///
/// let mut gpio = GPIO::new();
/// gpio.write(17, 1).unwrap();
/// gpio.write(17, 0).unwrap();
/// gpio.close().unwrap();
/// ```
#[derive(Debug)]
pub struct GPIO {
    config: Config,
    pins: HashMap<u32, PinHandle>,
    closed: bool,
}

impl Default for GPIO {
    fn default() -> Self {
        GPIO::new()
    }
}

impl GPIO {
    /// Creates a controller for `/sys/class/gpio` that reports errors to the caller.
    pub fn new() -> Self {
        GPIO::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        GPIO {
            config,
            pins: HashMap::new(),
            closed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enable or disable the warning logged when a pin was already exported
    /// by someone else.
    pub fn setwarnings(&mut self, warnings: bool) {
        self.config.warnings = warnings;
    }

    /// Pins currently claimed by this controller, in ascending order.
    pub fn pins(&self) -> Vec<u32> {
        let mut pins: Vec<u32> = self.pins.keys().copied().collect();
        pins.sort_unstable();
        pins
    }

    pub fn is_claimed(&self, pin: u32) -> bool {
        self.pins.contains_key(&pin)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Writes `value` to `pin` as a decimal string.
    ///
    /// On the first write to a pin the pin is exported (unless its sysfs
    /// directory already exists), its `value` and `direction` files are opened
    /// and the direction is set to `out`. Later writes only touch `value`.
    /// The value is not validated and is written even when unchanged.
    ///
    /// # Arguments
    ///
    /// * `pin` - The kernel GPIO number.
    /// * `value` - The value to write, normally `0` or `1`.
    pub fn write(&mut self, pin: u32, value: i32) -> Result<()> {
        let result = self.write_one(pin, value);
        self.config.policy.apply(result)
    }

    /// Writes a [`Level`] to `pin`. See [`GPIO::write`].
    pub fn output(&mut self, pin: u32, level: Level) -> Result<()> {
        self.write(pin, level as i32)
    }

    /// Releases every claimed pin: closes its `direction` and `value` files and
    /// unexports it.
    ///
    /// Under [`ErrorPolicy::Report`] every pin is attempted and the first
    /// failure is returned afterwards. Under [`ErrorPolicy::Abort`] the first
    /// failure aborts. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.release(self.config.policy)
    }

    fn write_one(&mut self, pin: u32, value: i32) -> Result<()> {
        if self.closed {
            return Err(GpioError::Closed);
        }

        let handle = match self.pins.entry(pin) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(claim(&self.config, pin)?),
        };

        handle.write_value(value)
    }

    fn release(&mut self, policy: ErrorPolicy) -> Result<()> {
        self.closed = true;

        let root = self.config.sysfs_root.as_path();
        let mut first_failure = None;
        for (pin, handle) in std::mem::take(&mut self.pins) {
            handle.close();
            if let Err(err) = policy.apply(sysfs::unexport(root, pin)) {
                log::warn!("{}", err);
                first_failure.get_or_insert(err);
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn claim(config: &Config, pin: u32) -> Result<PinHandle> {
    let root = config.sysfs_root.as_path();
    if sysfs::is_exported(root, pin) {
        if config.warnings {
            log::warn!(
                "GPIO {} is already in use, continuing anyway. Use GPIO::setwarnings(false) to disable warnings",
                pin
            );
        }
    } else {
        sysfs::export(root, pin)?;
    }

    let mut handle = PinHandle::open(root, pin)?;
    handle.set_output()?;
    log::debug!("pin {} configured as output", pin);

    Ok(handle)
}

impl DigitalOutput for GPIO {
    fn write(&mut self, pin: u32, value: i32) -> Result<()> {
        GPIO::write(self, pin, value)
    }

    fn close(&mut self) -> Result<()> {
        GPIO::close(self)
    }
}

impl Drop for GPIO {
    fn drop(&mut self) {
        if !self.closed && !self.pins.is_empty() {
            log::debug!("releasing {} pin(s) left claimed", self.pins.len());
            // Never panic in drop, whatever the configured policy.
            let _ = self.release(ErrorPolicy::Report);
        }
    }
}
