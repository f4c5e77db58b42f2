/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Dense indices for the atomic species seen during expansion

/// Maps atomic numbers to dense indices in first-seen order
///
/// Indices are never reassigned: growing the table leaves every previously
/// issued index valid, so they can key per-species accumulators across passes.
#[derive(Debug, Default, Clone)]
pub struct SpeciesTable {
    atomic_numbers: Vec<u32>,
}

impl SpeciesTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `atomic_number`, registering it if it has not been seen yet
    pub fn intern(&mut self, atomic_number: u32) -> usize {
        match self.index_of(atomic_number) {
            Some(index) => index,
            None => {
                self.atomic_numbers.push(atomic_number);
                self.atomic_numbers.len() - 1
            }
        }
    }

    /// Index of `atomic_number` if it has been seen
    pub fn index_of(&self, atomic_number: u32) -> Option<usize> {
        self.atomic_numbers.iter().position(|&z| z == atomic_number)
    }

    /// Atomic number stored at `index`
    pub fn atomic_number(&self, index: usize) -> Option<u32> {
        self.atomic_numbers.get(index).copied()
    }

    /// Number of species seen so far
    pub fn len(&self) -> usize {
        self.atomic_numbers.len()
    }

    /// True when no species has been registered
    pub fn is_empty(&self) -> bool {
        self.atomic_numbers.is_empty()
    }

    /// Atomic numbers in index order
    pub fn atomic_numbers(&self) -> &[u32] {
        &self.atomic_numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let mut table = SpeciesTable::new();
        assert!(table.is_empty());

        assert_eq!(table.intern(8), 0);
        assert_eq!(table.intern(38), 1);
        assert_eq!(table.intern(8), 0);
        assert_eq!(table.intern(22), 2);

        assert_eq!(table.len(), 3);
        assert_eq!(table.atomic_numbers(), &[8, 38, 22]);
        assert_eq!(table.atomic_number(1), Some(38));
        assert_eq!(table.atomic_number(3), None);
    }

    #[test]
    fn test_growth_keeps_issued_indices() {
        let mut table = SpeciesTable::new();
        let oxygen = table.intern(8);
        for z in 1..=50 {
            table.intern(z);
        }
        assert_eq!(table.index_of(8), Some(oxygen));
        assert_eq!(table.len(), 50);
    }
}
