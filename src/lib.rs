//! Digital output control for GPIO pins through the Linux sysfs interface
//! (`/sys/class/gpio`).
//!
//! Pins are claimed lazily: the first [`GPIO::write`] to a pin exports it and
//! sets it as an output, later writes only update its value. [`GPIO::close`]
//! unexports everything the controller claimed.
//!
//! ```rust,no_run
//! use sysfs_gpio_out::{GPIO, Level};
//!
//! let mut gpio = GPIO::new();
//! gpio.output(17, Level::HIGH).unwrap();
//! gpio.close().unwrap();
//! ```

mod config;
mod error;
mod gpio;
mod policy;
mod sysfs;

pub use config::{Config, SYSFS_ROOT};
pub use error::{GpioError, Result};
pub use gpio::{DigitalOutput, Level, GPIO};
pub use policy::ErrorPolicy;
