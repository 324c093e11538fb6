//! Single-value memory register.
//!
//! Created empty at session start, survives expression resets, and is only
//! ever touched through the four classic operations. The not-a-numeral
//! guards live in the session layer, which is the boundary where text
//! arrives.

/// One optional stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryRegister {
    value: Option<f64>,
}

impl MemoryRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored value.
    pub fn store(&mut self, value: f64) {
        self.value = Some(value);
    }

    /// Add to the stored value; empty memory counts as zero.
    pub fn add(&mut self, value: f64) {
        self.value = Some(self.value.unwrap_or(0.0) + value);
    }

    /// Subtract from the stored value; empty memory counts as zero.
    pub fn subtract(&mut self, value: f64) {
        self.value = Some(self.value.unwrap_or(0.0) - value);
    }

    /// Read without mutating.
    pub fn recall(&self) -> Option<f64> {
        self.value
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_recall_round_trip() {
        let mut memory = MemoryRegister::new();
        assert_eq!(memory.recall(), None);
        memory.store(5.0);
        assert_eq!(memory.recall(), Some(5.0));
    }

    #[test]
    fn add_and_subtract_treat_empty_as_zero() {
        let mut memory = MemoryRegister::new();
        memory.add(3.0);
        assert_eq!(memory.recall(), Some(3.0));

        let mut memory = MemoryRegister::new();
        memory.subtract(4.0);
        assert_eq!(memory.recall(), Some(-4.0));

        memory.store(5.0);
        memory.add(3.0);
        assert_eq!(memory.recall(), Some(8.0));
    }

    #[test]
    fn clear_empties_the_register() {
        let mut memory = MemoryRegister::new();
        memory.store(1.0);
        memory.clear();
        assert!(memory.is_empty());
    }
}
