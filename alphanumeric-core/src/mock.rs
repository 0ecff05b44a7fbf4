//! Host stand-ins for the peripherals the core drives.

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use embedded_storage::{ReadStorage, Storage};

use crate::store::Commit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Data,
    Clock,
    Latch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Clock(bool),
    Latch(bool),
}

#[derive(Default)]
struct Wire {
    data: bool,
    clock: bool,
    edges: Vec<Edge>,
    bits: Vec<bool>,
    pending: Vec<bool>,
    words: Vec<u16>,
}

/// Records what a shift-register chain would see on its three inputs.
#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<Wire>>);

impl Bus {
    pub fn pin(&self, line: Line) -> BusPin {
        BusPin {
            wire: Rc::clone(&self.0),
            line,
        }
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.0.borrow().edges.clone()
    }

    pub fn clocked_bits(&self) -> Vec<bool> {
        self.0.borrow().bits.clone()
    }

    /// Words committed by a latch rising edge, decoded from the clocked bits.
    pub fn words(&self) -> Vec<u16> {
        self.0.borrow().words.clone()
    }
}

pub struct BusPin {
    wire: Rc<RefCell<Wire>>,
    line: Line,
}

impl BusPin {
    fn drive(&mut self, high: bool) {
        let mut wire = self.wire.borrow_mut();
        match self.line {
            Line::Data => wire.data = high,
            Line::Clock => {
                if high && !wire.clock {
                    let bit = wire.data;
                    wire.bits.push(bit);
                    wire.pending.push(bit);
                }
                wire.clock = high;
                wire.edges.push(Edge::Clock(high));
            }
            Line::Latch => {
                if high {
                    let word = wire
                        .pending
                        .iter()
                        .fold(0u16, |word, &bit| (word << 1) | u16::from(bit));
                    wire.words.push(word);
                }
                wire.pending.clear();
                wire.edges.push(Edge::Latch(high));
            }
        }
    }
}

impl PinErrorType for BusPin {
    type Error = Infallible;
}

impl OutputPin for BusPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

/// Milliseconds since the test started, shared by a delay and a serial line.
pub type TestClock = Rc<Cell<u64>>;

/// Delay that only keeps score, and moves a [`TestClock`] forward if it has one.
#[derive(Default)]
pub struct MockDelay {
    pub millis: Vec<u32>,
    pub nanos: u64,
    clock: Option<TestClock>,
}

impl MockDelay {
    pub fn with_clock(clock: &TestClock) -> Self {
        Self {
            clock: Some(Rc::clone(clock)),
            ..Self::default()
        }
    }

    fn advance(&mut self, ns: u64) {
        self.nanos += ns;
        if let Some(clock) = &self.clock {
            clock.set(self.nanos / 1_000_000);
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.millis.push(ms);
        self.advance(u64::from(ms) * 1_000_000);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

/// Byte-addressable storage with a log of every write call.
pub struct MemStorage {
    pub cells: Vec<u8>,
    pub writes: Vec<(u32, Vec<u8>)>,
    pub commits: usize,
}

impl MemStorage {
    /// Storage as it comes out of the factory: every cell erased to 0xFF.
    pub fn erased(size: usize) -> Self {
        Self {
            cells: std::vec![0xFF; size],
            writes: Vec::new(),
            commits: 0,
        }
    }
}

impl ReadStorage for MemStorage {
    type Error = OutOfBounds;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        let source = self
            .cells
            .get(start..start + bytes.len())
            .ok_or(OutOfBounds)?;
        bytes.copy_from_slice(source);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.cells.len()
    }
}

impl Storage for MemStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let start = offset as usize;
        self.cells
            .get_mut(start..start + bytes.len())
            .ok_or(OutOfBounds)?
            .copy_from_slice(bytes);
        self.writes.push((offset, bytes.to_vec()));
        Ok(())
    }
}

impl Commit for MemStorage {
    fn commit(&mut self) -> Result<(), Self::Error> {
        self.commits += 1;
        Ok(())
    }
}

/// Console fed with bursts of bytes.
///
/// Every time the current burst runs dry and `read_ready` is asked, the next burst arrives.
/// An empty burst therefore stands for one quiet poll.
///
/// A serial built with [`MockSerial::typed`] instead releases each burst once the shared
/// clock reaches its arrival time.
#[derive(Default)]
pub struct MockSerial {
    bursts: VecDeque<VecDeque<u8>>,
    current: VecDeque<u8>,
    arrivals: VecDeque<(u64, VecDeque<u8>)>,
    clock: Option<TestClock>,
    pub written: Vec<u8>,
}

impl MockSerial {
    pub fn with_bursts(bursts: &[&[u8]]) -> Self {
        Self {
            bursts: bursts.iter().map(|b| b.iter().copied().collect()).collect(),
            ..Self::default()
        }
    }

    /// Bytes arriving at the given millisecond timestamps.
    pub fn typed(clock: &TestClock, arrivals: &[(u64, &[u8])]) -> Self {
        Self {
            arrivals: arrivals
                .iter()
                .map(|&(at, bytes)| (at, bytes.iter().copied().collect()))
                .collect(),
            clock: Some(Rc::clone(clock)),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.current.len()
            + self.bursts.iter().map(VecDeque::len).sum::<usize>()
            + self.arrivals.iter().map(|(_, b)| b.len()).sum::<usize>()
    }
}

impl ErrorType for MockSerial {
    type Error = ErrorKind;
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        if let Some(clock) = &self.clock {
            let now = clock.get();
            while self.arrivals.front().is_some_and(|&(at, _)| at <= now) {
                if let Some((_, bytes)) = self.arrivals.pop_front() {
                    self.current.extend(bytes);
                }
            }
            return Ok(!self.current.is_empty());
        }
        if self.current.is_empty() {
            if let Some(next) = self.bursts.pop_front() {
                self.current = next;
            }
        }
        Ok(!self.current.is_empty())
    }
}

impl Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut count = 0;
        for slot in buf.iter_mut() {
            match self.current.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}

impl Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
