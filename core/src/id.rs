use crate::model::task::TaskId;

pub trait IdGenerator {
    fn next_id(&mut self) -> TaskId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> TaskId {
        TaskId::new_v4()
    }
}

/// Counter-backed ids starting at 1. Deterministic, for tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `last`, e.g. past the ids of a seeded list.
    pub fn starting_after(last: u128) -> Self {
        Self { last }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        self.last += 1;
        TaskId::from_u128(self.last)
    }
}
