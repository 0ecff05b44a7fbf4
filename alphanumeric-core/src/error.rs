use embedded_hal::digital;
use embedded_io as io;

/// Anything the control loop can run into.
///
/// Peripheral errors are reduced to their portable kinds; storage errors are kept as-is
/// since `embedded-storage` has no kind trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S> {
    Pin(digital::ErrorKind),
    Storage(S),
    Console(io::ErrorKind),
}

impl<S> From<digital::ErrorKind> for Error<S> {
    fn from(kind: digital::ErrorKind) -> Self {
        Self::Pin(kind)
    }
}

impl<S> From<io::ErrorKind> for Error<S> {
    fn from(kind: io::ErrorKind) -> Self {
        Self::Console(kind)
    }
}

pub(crate) fn pin_error<E: digital::Error>(error: E) -> digital::ErrorKind {
    error.kind()
}

pub(crate) fn io_error<E: io::Error>(error: E) -> io::ErrorKind {
    error.kind()
}
