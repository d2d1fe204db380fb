use crate::error::MemoryMapError;
use mbcodec_core::pdu::limits::MAX_FIFO_COUNT;
use std::collections::VecDeque;

/// Bounded first-in first-out register queue answered by read FIFO queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FifoQueue {
    pointer_address: u16,
    capacity: usize,
    values: VecDeque<u16>,
}

impl FifoQueue {
    pub const MAX_CAPACITY: usize = MAX_FIFO_COUNT as usize;

    pub fn new(pointer_address: u16, capacity: usize) -> Result<Self, MemoryMapError> {
        if capacity > Self::MAX_CAPACITY {
            return Err(MemoryMapError::FifoCapacity {
                requested: capacity,
                max: Self::MAX_CAPACITY,
            });
        }
        Ok(Self {
            pointer_address,
            capacity,
            values: VecDeque::with_capacity(capacity),
        })
    }

    pub fn pointer_address(&self) -> u16 {
        self.pointer_address
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends `value`; a full queue is left untouched.
    pub fn push(&mut self, value: u16) -> Result<(), MemoryMapError> {
        if self.values.len() >= self.capacity {
            return Err(MemoryMapError::FifoFull {
                capacity: self.capacity,
            });
        }
        self.values.push_back(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.values.pop_front()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Queue contents, oldest first.
    pub fn values(&self) -> Vec<u16> {
        self.values.iter().copied().collect()
    }
}

impl Default for FifoQueue {
    fn default() -> Self {
        Self {
            pointer_address: 0,
            capacity: Self::MAX_CAPACITY,
            values: VecDeque::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FifoQueue;
    use crate::error::MemoryMapError;

    #[test]
    fn push_pop_in_order() {
        let mut fifo = FifoQueue::new(0x04DE, 3).unwrap();
        fifo.push(1).unwrap();
        fifo.push(2).unwrap();
        assert_eq!(fifo.values(), vec![1, 2]);
        assert_eq!(fifo.pop(), Some(1));
        assert_eq!(fifo.len(), 1);
    }

    #[test]
    fn full_queue_rejects_push() {
        let mut fifo = FifoQueue::new(0, 1).unwrap();
        fifo.push(7).unwrap();
        assert_eq!(fifo.push(8), Err(MemoryMapError::FifoFull { capacity: 1 }));
        assert_eq!(fifo.values(), vec![7]);
    }

    #[test]
    fn capacity_is_bounded() {
        assert!(FifoQueue::new(0, 31).is_ok());
        assert!(matches!(
            FifoQueue::new(0, 32),
            Err(MemoryMapError::FifoCapacity { requested: 32, max: 31 })
        ));
        assert_eq!(FifoQueue::default().capacity(), 31);
    }
}
