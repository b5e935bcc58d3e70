use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{GpioError, Result};

pub(crate) fn gpio_dir(root: &Path, pin: u32) -> PathBuf {
    root.join(format!("gpio{}", pin))
}

/// Whether `gpio<pin>` is present under `root`.
///
/// Anything other than a definite "not found" counts as exported, so an
/// unreadable directory is never exported a second time.
pub(crate) fn is_exported(root: &Path, pin: u32) -> bool {
    gpio_dir(root, pin).try_exists().unwrap_or(true)
}

// export/unexport are kernel-created; never create them, append so a stand-in
// file keeps every request.
fn write_control(path: &Path, pin: u32) -> std::io::Result<()> {
    let mut f = fs::OpenOptions::new().append(true).open(path)?;
    f.write_all(pin.to_string().as_bytes())
}

pub(crate) fn export(root: &Path, pin: u32) -> Result<()> {
    let path = root.join("export");
    log::debug!("exporting pin {} via {}", pin, path.display());
    write_control(&path, pin).map_err(|source| GpioError::Export { pin, path, source })
}

pub(crate) fn unexport(root: &Path, pin: u32) -> Result<()> {
    let path = root.join("unexport");
    log::debug!("unexporting pin {} via {}", pin, path.display());
    write_control(&path, pin).map_err(|source| GpioError::Unexport { pin, path, source })
}

fn open_write_only(pin: u32, path: PathBuf) -> Result<(File, PathBuf)> {
    match fs::OpenOptions::new().write(true).open(&path) {
        Ok(f) => Ok((f, path)),
        Err(source) => Err(GpioError::Open { pin, path, source }),
    }
}

/// The open `value` and `direction` files of a claimed pin.
#[derive(Debug)]
pub(crate) struct PinHandle {
    pin: u32,
    value: File,
    value_path: PathBuf,
    direction: File,
    direction_path: PathBuf,
}

impl PinHandle {
    /// Opens the pin's control files, `value` first.
    pub(crate) fn open(root: &Path, pin: u32) -> Result<Self> {
        let dir = gpio_dir(root, pin);
        let (value, value_path) = open_write_only(pin, dir.join("value"))?;
        let (direction, direction_path) = open_write_only(pin, dir.join("direction"))?;

        Ok(PinHandle {
            pin,
            value,
            value_path,
            direction,
            direction_path,
        })
    }

    pub(crate) fn set_output(&mut self) -> Result<()> {
        self.direction
            .write_all(b"out")
            .map_err(|source| GpioError::Direction {
                pin: self.pin,
                path: self.direction_path.clone(),
                source,
            })
    }

    pub(crate) fn write_value(&mut self, value: i32) -> Result<()> {
        log::trace!("pin {} <- {}", self.pin, value);
        self.value
            .write_all(value.to_string().as_bytes())
            .map_err(|source| GpioError::Value {
                pin: self.pin,
                path: self.value_path.clone(),
                source,
            })
    }

    /// Closes the direction handle, then the value handle.
    pub(crate) fn close(self) {
        let PinHandle {
            direction, value, ..
        } = self;
        drop(direction);
        drop(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_pin(root: &Path, pin: u32) {
        let dir = gpio_dir(root, pin);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("value"), "").unwrap();
        fs::write(dir.join("direction"), "").unwrap();
    }

    #[test]
    fn gpio_dir_uses_kernel_naming() {
        assert_eq!(
            gpio_dir(Path::new("/sys/class/gpio"), 17),
            PathBuf::from("/sys/class/gpio/gpio17")
        );
    }

    #[test]
    fn exported_follows_directory_presence() {
        let root = TempDir::new().unwrap();
        assert!(!is_exported(root.path(), 5));
        fake_pin(root.path(), 5);
        assert!(is_exported(root.path(), 5));
    }

    #[test]
    fn export_appends_without_newline() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("export"), "").unwrap();
        export(root.path(), 17).unwrap();
        export(root.path(), 27).unwrap();
        assert_eq!(fs::read_to_string(root.path().join("export")).unwrap(), "1727");
    }

    #[test]
    fn export_never_creates_the_control_file() {
        let root = TempDir::new().unwrap();
        let err = export(root.path(), 17).unwrap_err();
        assert!(matches!(err, GpioError::Export { pin: 17, .. }));
        assert!(!root.path().join("export").exists());
    }

    #[test]
    fn unexport_reports_its_own_error() {
        let root = TempDir::new().unwrap();
        let err = unexport(root.path(), 3).unwrap_err();
        assert!(matches!(err, GpioError::Unexport { pin: 3, .. }));
    }

    #[test]
    fn open_requires_value_file() {
        let root = TempDir::new().unwrap();
        let err = PinHandle::open(root.path(), 9).unwrap_err();
        match err {
            GpioError::Open { pin, path, .. } => {
                assert_eq!(pin, 9);
                assert!(path.ends_with("gpio9/value"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn handle_writes_direction_and_value() {
        let root = TempDir::new().unwrap();
        fake_pin(root.path(), 22);

        let mut handle = PinHandle::open(root.path(), 22).unwrap();
        handle.set_output().unwrap();
        handle.write_value(1).unwrap();
        handle.write_value(0).unwrap();
        handle.close();

        let dir = gpio_dir(root.path(), 22);
        assert_eq!(fs::read_to_string(dir.join("direction")).unwrap(), "out");
        assert_eq!(fs::read_to_string(dir.join("value")).unwrap(), "10");
    }
}
