//! Recording bus used by unit tests

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::WordBus;
use crate::error::TransportError;

#[derive(Debug, Default)]
pub(crate) struct MockState {
    /// Last word written, keyed by register (command without the write flag)
    pub words: HashMap<u8, u16>,
    pub reads: usize,
    pub writes: usize,
    /// Log of (command, word) pairs seen by write_word_data
    pub written: Vec<(u8, u16)>,
    pub fail_with: Option<i32>,
}

/// Stores the last written word per register and returns it on read
#[derive(Clone, Default)]
pub(crate) struct MockBus {
    pub state: Arc<Mutex<MockState>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> usize {
        let state = self.state.lock();
        state.reads + state.writes
    }

    pub fn fail_with(&self, code: i32) {
        self.state.lock().fail_with = Some(code);
    }
}

impl WordBus for MockBus {
    fn read_word_data(&mut self, command: u8) -> Result<u16, TransportError> {
        let mut state = self.state.lock();
        state.reads += 1;
        if let Some(code) = state.fail_with {
            return Err(TransportError::new(code));
        }
        Ok(state.words.get(&(command & 0x7F)).copied().unwrap_or(0))
    }

    fn write_word_data(&mut self, command: u8, word: u16) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.writes += 1;
        if let Some(code) = state.fail_with {
            return Err(TransportError::new(code));
        }
        state.words.insert(command & 0x7F, word);
        state.written.push((command, word));
        Ok(())
    }
}
