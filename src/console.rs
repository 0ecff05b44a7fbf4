use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use rp_pico::hal::uart::{Enabled, ReadErrorType, UartDevice, UartPeripheral, ValidUartPinout};

/// Blocking adapter from the HAL UART to the `embedded-io` traits the core polls.
pub struct Console<D: UartDevice, P: ValidUartPinout<D>> {
    uart: UartPeripheral<Enabled, D, P>,
}

impl<D: UartDevice, P: ValidUartPinout<D>> Console<D, P> {
    pub fn new(uart: UartPeripheral<Enabled, D, P>) -> Self {
        Self { uart }
    }
}

fn read_error(error: ReadErrorType) -> ErrorKind {
    match error {
        ReadErrorType::Parity | ReadErrorType::Framing => ErrorKind::InvalidData,
        ReadErrorType::Overrun | ReadErrorType::Break => ErrorKind::Other,
    }
}

impl<D: UartDevice, P: ValidUartPinout<D>> ErrorType for Console<D, P> {
    type Error = ErrorKind;
}

impl<D: UartDevice, P: ValidUartPinout<D>> ReadReady for Console<D, P> {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart.uart_is_readable())
    }
}

impl<D: UartDevice, P: ValidUartPinout<D>> Read for Console<D, P> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match buf.first_mut() {
            Some(slot) => {
                let mut byte = [0u8; 1];
                self.uart.read_full_blocking(&mut byte).map_err(read_error)?;
                *slot = byte[0];
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl<D: UartDevice, P: ValidUartPinout<D>> Write for Console<D, P> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.uart.write_full_blocking(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
