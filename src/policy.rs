use crate::error::{GpioError, Result};

/// How the controller reacts when a sysfs operation fails.
///
/// * `Report` - the error is returned to the caller, who decides what to do next
/// * `Abort` - the error is logged and the controller panics, which terminates
///   the process when raised on the main thread
///
/// # Example
///
/// ```rust,no_run
/// use sysfs_gpio_out::{Config, ErrorPolicy, GPIO};
///
/// let mut gpio = GPIO::with_config(Config::default().policy(ErrorPolicy::Abort));
/// gpio.write(17, 1).unwrap();
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ErrorPolicy {
    #[default]
    Report,
    Abort,
}

impl ErrorPolicy {
    /// Passes `result` through, or aborts on error under `Abort`.
    pub(crate) fn apply<T>(self, result: Result<T>) -> Result<T> {
        match (self, result) {
            (ErrorPolicy::Abort, Err(err)) => abort(err),
            (_, result) => result,
        }
    }
}

fn abort(err: GpioError) -> ! {
    let message = describe(&err);
    if log::log_enabled!(log::Level::Error) {
        log::error!("{}", message);
    } else {
        eprintln!("{}", message);
    }
    panic!("{}", message);
}

// Flattens the source chain so the log line names the OS error too.
fn describe(err: &GpioError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
