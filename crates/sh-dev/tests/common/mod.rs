#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::Instant;
use sh_dev::{BusPeripheral, Frame, PinControl, Registry, TransferStatus};

// ---------------------------------------------------------------------------
// Simulated bus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Write { address: u8, bytes: Vec<u8>, frame: Frame },
    Read { address: u8, len: usize, frame: Frame },
}

impl Phase {
    pub fn address(&self) -> u8 {
        match self {
            Phase::Write { address, .. } | Phase::Read { address, .. } => *address,
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            Phase::Write { frame, .. } | Phase::Read { frame, .. } => *frame,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Refused;

/// Records every started phase. Completed reads deliver `fill` bytes.
#[derive(Clone, Default)]
pub struct SimBus {
    pub phases: Rc<RefCell<Vec<Phase>>>,
    pub refuse: Rc<Cell<bool>>,
    pub completed: Rc<Cell<usize>>,
    pub fill: u8,
}

impl SimBus {
    pub fn started(&self) -> usize {
        self.phases.borrow().len()
    }

    pub fn in_flight(&self) -> bool {
        self.started() > self.completed.get()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.phases.borrow().clone()
    }
}

impl BusPeripheral for SimBus {
    type Error = Refused;

    fn start_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        frame: Frame,
    ) -> Result<(), Self::Error> {
        if self.refuse.get() {
            return Err(Refused);
        }
        self.phases.borrow_mut().push(Phase::Write {
            address,
            bytes: bytes.to_vec(),
            frame,
        });
        Ok(())
    }

    fn start_read(
        &mut self,
        address: u8,
        len: usize,
        frame: Frame,
    ) -> Result<(), Self::Error> {
        if self.refuse.get() {
            return Err(Refused);
        }
        self.phases
            .borrow_mut()
            .push(Phase::Read { address, len, frame });
        Ok(())
    }

    fn take_read(&mut self, buffer: &mut [u8]) {
        buffer.fill(self.fill);
    }
}

// ---------------------------------------------------------------------------
// Simulated pins
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    Reset(bool),
    Boot(bool),
}

#[derive(Clone)]
pub struct SimPins {
    pub events: Rc<RefCell<Vec<(PinEvent, Instant)>>>,
    pub ready_level: Rc<Cell<bool>>,
}

impl Default for SimPins {
    fn default() -> Self {
        Self {
            events: Rc::default(),
            ready_level: Rc::new(Cell::new(true)),
        }
    }
}

impl SimPins {
    pub fn events(&self) -> Vec<PinEvent> {
        self.events.borrow().iter().map(|(event, _)| *event).collect()
    }

    pub fn time_of(&self, event: PinEvent) -> Option<Instant> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|(e, _)| *e == event)
            .map(|(_, at)| *at)
    }
}

impl PinControl for SimPins {
    fn set_boot_target(&mut self, application: bool) {
        self.events
            .borrow_mut()
            .push((PinEvent::Boot(application), Instant::now()));
    }

    fn set_reset(&mut self, asserted: bool) {
        self.events
            .borrow_mut()
            .push((PinEvent::Reset(asserted), Instant::now()));
    }

    fn read_ready_pin(&mut self) -> bool {
        self.ready_level.get()
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

pub type Hub<const N: usize> = Registry<NoopRawMutex, SimBus, SimPins, N>;

pub struct Fixture<const N: usize> {
    pub hub: Hub<N>,
    pub bus: SimBus,
    pub pins: [SimPins; N],
}

pub fn fixture<const N: usize>() -> Fixture<N> {
    let bus = SimBus { fill: 0xC3, ..SimBus::default() };
    let pins: [SimPins; N] = core::array::from_fn(|_| SimPins::default());
    let hub = Registry::new(bus.clone(), pins.clone());
    Fixture { hub, bus, pins }
}

/// Plays the I2C interrupt layer: completes each started phase with the next
/// scripted status.
pub async fn interrupts<const N: usize>(
    hub: &Hub<N>,
    bus: &SimBus,
    script: &[TransferStatus],
) {
    for status in script {
        while !bus.in_flight() {
            yield_now().await;
        }
        bus.completed.set(bus.completed.get() + 1);
        hub.on_transfer_done(*status);
    }
}

/// Let other joined futures run for a few polls.
pub async fn idle(polls: usize) {
    for _ in 0..polls {
        yield_now().await;
    }
}
