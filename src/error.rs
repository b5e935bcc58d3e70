use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while driving a pin through sysfs.
///
/// Every variant except `Closed` carries the pin number, the control file that
/// was being accessed and the underlying I/O error.
#[derive(Error, Debug)]
pub enum GpioError {
    #[error("failed to export pin {pin} via {}", path.display())]
    Export {
        pin: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to unexport pin {pin} via {}", path.display())]
    Unexport {
        pin: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {} for pin {pin}", path.display())]
    Open {
        pin: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to set pin {pin} as output via {}", path.display())]
    Direction {
        pin: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write value to pin {pin} via {}", path.display())]
    Value {
        pin: u32,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the GPIO controller has already been closed")]
    Closed,
}

impl GpioError {
    /// The pin the failed operation targeted, if any.
    pub fn pin(&self) -> Option<u32> {
        match self {
            GpioError::Export { pin, .. }
            | GpioError::Unexport { pin, .. }
            | GpioError::Open { pin, .. }
            | GpioError::Direction { pin, .. }
            | GpioError::Value { pin, .. } => Some(*pin),
            GpioError::Closed => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GpioError>;
