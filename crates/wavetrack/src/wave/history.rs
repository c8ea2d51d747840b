use std::collections::VecDeque;

/// Fixed-capacity FIFO: pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T: Clone> BoundedHistory<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut h = BoundedHistory::new(3);
        for i in 0..5 {
            h.push(i);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.to_vec(), vec![2, 3, 4]);
        assert_eq!(h.last(), Some(&4));
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut h = BoundedHistory::new(0);
        h.push(1.0);
        assert!(h.is_empty());
    }
}
