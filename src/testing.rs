//! Mock transport for unit tests.
//!
//! Pins, SPI bus and delay all record into one shared event log, so
//! tests can assert on the exact wire order of a transaction:
//! chip-select framing, data/command phases, payload bytes and settle
//! delays.

use std::{cell::RefCell, rc::Rc, vec::Vec};

use hal::blocking::delay::DelayMs;
use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use crate::display::{Config, ST7789};
use crate::geometry::Rotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Dc,
    Cs,
    Rst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Level(Line, bool),
    Write(Vec<u8>),
    Wait(u16),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub struct LogPin {
    pub log: Log,
    pub line: Line,
}

impl OutputPin for LogPin {
    type Error = ();

    fn set_low(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push(Event::Level(self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ()> {
        self.log.borrow_mut().push(Event::Level(self.line, true));
        Ok(())
    }
}

pub struct LogSpi {
    pub log: Log,
    /// Err after this many successful writes, when set.
    pub writes_before_failure: Option<usize>,
}

impl SpiWrite<u8> for LogSpi {
    type Error = ();

    fn write(&mut self, words: &[u8]) -> Result<(), ()> {
        if let Some(left) = self.writes_before_failure.as_mut() {
            if *left == 0 {
                return Err(());
            }
            *left -= 1;
        }
        self.log.borrow_mut().push(Event::Write(words.to_vec()));
        Ok(())
    }
}

pub struct LogDelay {
    pub log: Log,
}

impl DelayMs<u16> for LogDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.log.borrow_mut().push(Event::Wait(ms));
    }
}

pub type MockDriver = ST7789<LogSpi, LogPin, LogPin, LogPin>;

/// A driver wired to fresh mocks, not yet initialized.
pub fn panel(width: u16, height: u16, rotation: Rotation) -> (MockDriver, Log, LogDelay) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let spi = LogSpi {
        log: log.clone(),
        writes_before_failure: None,
    };
    let dc = LogPin {
        log: log.clone(),
        line: Line::Dc,
    };
    let cs = LogPin {
        log: log.clone(),
        line: Line::Cs,
    };
    let rst = LogPin {
        log: log.clone(),
        line: Line::Rst,
    };
    let delay = LogDelay { log: log.clone() };
    let lcd = ST7789::new(
        spi,
        dc,
        cs,
        Some(rst),
        Config {
            width,
            height,
            rotation,
        },
    )
    .unwrap();
    (lcd, log, delay)
}

/// A driver that has been through init, with the log cleared so tests
/// see only their own traffic.
pub fn ready_panel(width: u16, height: u16, rotation: Rotation) -> (MockDriver, Log, LogDelay) {
    let (mut lcd, log, mut delay) = panel(width, height, rotation);
    lcd.init(&mut delay).unwrap();
    log.borrow_mut().clear();
    (lcd, log, delay)
}

/// Opcode byte of every command transaction, in wire order.
pub fn opcodes(log: &Log) -> Vec<u8> {
    let events = log.borrow();
    let mut ops = Vec::new();
    for i in 0..events.len() {
        if let Event::Level(Line::Dc, false) = events[i] {
            if let Some(Event::Write(bytes)) = events.get(i + 1) {
                ops.push(bytes[0]);
            }
        }
    }
    ops
}

/// Concatenated data phase of the first transaction with the given
/// opcode, plus the number of SPI writes it took.
pub fn data_phase(log: &Log, opcode: u8) -> (Vec<u8>, usize) {
    let events = log.borrow();
    for i in 0..events.len() {
        if let Event::Level(Line::Dc, false) = events[i] {
            if let Some(Event::Write(bytes)) = events.get(i + 1) {
                if bytes[0] == opcode {
                    let mut data = Vec::new();
                    let mut writes = 0;
                    for event in &events[i + 2..] {
                        match event {
                            Event::Write(bytes) => {
                                data.extend_from_slice(bytes);
                                writes += 1;
                            }
                            Event::Level(Line::Cs, true) => return (data, writes),
                            Event::Level(Line::Dc, true) => {}
                            other => panic!("unexpected event in data phase: {:?}", other),
                        }
                    }
                    panic!("transaction {:#04x} never deselected", opcode);
                }
            }
        }
    }
    panic!("no transaction with opcode {:#04x}", opcode);
}

/// Every blocking delay, in order, in milliseconds.
pub fn delays(log: &Log) -> Vec<u16> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            Event::Wait(ms) => Some(*ms),
            _ => None,
        })
        .collect()
}
