//! Mock I2C bus simulating the ADXL345 register file

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

use super::journal::{Journal, Step};

/// One segment of a recorded transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Bytes written
    Write(Vec<u8>),
    /// Number of bytes read
    Read(usize),
}

/// One recorded bus transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Target address
    pub address: u8,
    /// Segments in order
    pub segments: Vec<Segment>,
}

/// Shared state for the mock bus (uses interior mutability)
#[derive(Debug)]
struct BusState {
    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Transactions log for verification
    transactions: Vec<Transaction>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
    fail_write_to: Option<u8>,

    /// Data blocks returned by consecutive reads of DATAX0
    data_sequence: Vec<[u8; 6]>,
    data_sequence_idx: usize,
}

impl BusState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            transactions: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            fail_write_to: None,
            data_sequence: Vec::new(),
            data_sequence_idx: 0,
        };

        // DEVID
        state.registers.insert(0x00, 0xE5);
        // BW_RATE power-on value
        state.registers.insert(0x2C, 0x0A);

        state
    }

    fn set_data(&mut self, block: [u8; 6]) {
        for (i, byte) in block.into_iter().enumerate() {
            self.registers.insert(0x32 + i as u8, byte);
        }
    }

    fn advance_data_sequence(&mut self) {
        if !self.data_sequence.is_empty() {
            let block = self.data_sequence[self.data_sequence_idx];
            self.set_data(block);
            self.data_sequence_idx = (self.data_sequence_idx + 1) % self.data_sequence.len();
        }
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBusError {
    /// Simulated NACK
    Nack,
}

impl embedded_hal::i2c::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(embedded_hal::i2c::NoAcknowledgeSource::Data)
    }
}

/// Mock I2C bus for testing
#[derive(Clone)]
pub struct MockBus {
    state: Rc<RefCell<BusState>>,
    journal: Journal,
}

impl MockBus {
    /// Create a new mock bus with power-on register values
    pub fn new(journal: Journal) -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState::new())),
            journal,
        }
    }

    /// Set a register value
    #[allow(dead_code)]
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Set the six data registers (will be returned on next read)
    pub fn set_data(&self, block: [u8; 6]) {
        self.state.borrow_mut().set_data(block);
    }

    /// Set a sequence of data blocks, one per read of the data registers
    #[allow(dead_code)]
    pub fn set_data_sequence(&self, sequence: Vec<[u8; 6]>) {
        let mut state = self.state.borrow_mut();
        state.data_sequence = sequence;
        state.data_sequence_idx = 0;
    }

    /// Inject a failure on the next transaction that reads
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a failure on the next write-only transaction
    #[allow(dead_code)]
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Fail every write to `register`
    #[allow(dead_code)]
    pub fn fail_writes_to(&self, register: Option<u8>) {
        self.state.borrow_mut().fail_write_to = register;
    }

    /// Get the transactions log
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.borrow().transactions.clone()
    }

    /// Clear the transactions log
    pub fn clear_transactions(&self) {
        self.state.borrow_mut().transactions.clear();
    }

    /// Register writes in order, as `(register, value)`
    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.state
            .borrow()
            .transactions
            .iter()
            .filter_map(|t| match t.segments.as_slice() {
                [Segment::Write(bytes)] if bytes.len() == 2 => Some((bytes[0], bytes[1])),
                _ => None,
            })
            .collect()
    }
}

impl ErrorType for MockBus {
    type Error = MockBusError;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        let segments: Vec<Segment> = operations
            .iter()
            .map(|op| match op {
                Operation::Write(bytes) => Segment::Write(bytes.to_vec()),
                Operation::Read(buf) => Segment::Read(buf.len()),
            })
            .collect();
        let reads = segments.iter().any(|s| matches!(s, Segment::Read(_)));
        state.transactions.push(Transaction { address, segments });

        // Check for injected failure
        if reads && state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockBusError::Nack);
        }
        if !reads && state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockBusError::Nack);
        }

        let mut pointer = 0u8;
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let Some((&register, values)) = bytes.split_first() else {
                        continue;
                    };
                    if state.fail_write_to == Some(register) && !values.is_empty() {
                        return Err(MockBusError::Nack);
                    }
                    pointer = register;
                    for &value in values {
                        state.registers.insert(pointer, value);
                        self.journal.push(Step::BusWrite(pointer, value));
                        pointer = pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    if pointer == 0x32 {
                        state.advance_data_sequence();
                    }
                    self.journal.push(Step::BusRead(pointer, buf.len()));
                    for byte in buf.iter_mut() {
                        *byte = state.registers.get(&pointer).copied().unwrap_or(0);
                        pointer = pointer.wrapping_add(1);
                    }
                }
            }
        }

        Ok(())
    }
}
