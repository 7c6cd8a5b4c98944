//! Canonical, reference-counted storage of complex edge weights
//!
//! Every weight attached to a decision-diagram edge is a [`ComplexId`]
//! handle into a [`ComplexTable`]. Values that agree within the table's
//! tolerance share one handle, which lets node hashing compare weights by
//! identity.
//!
//! Agreement is relative: two values match when each component differs by
//! at most `tolerance * max(|a|, |b|)`. Deep circuits carry weights such as
//! 2^-32 on their edges, and those must stay distinct from their neighbours.
//! Lookup buckets a value by its binary exponent and by its components
//! rounded to a cell proportional to that exponent; a query scans the
//! adjacent exponents and cells, so any stored value within tolerance is
//! found in constant time. When several stored values qualify, the lowest
//! table index wins.
//!
//! # Reference counting
//!
//! A freshly inserted entry starts with a count of zero. It stays valid until
//! the next [`collect`](ComplexTable::collect), which reclaims every
//! unpinned entry whose count is still zero. Counts are raised for weights of
//! live nodes and retained root edges; the constants 0, 1, -1 and 1/√2 are
//! pinned and never reclaimed.

use ahash::AHashMap;
use num_complex::Complex64;
use smallvec::SmallVec;
use std::fmt;

/// Handle to a canonical complex value
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComplexId(u32);

impl ComplexId {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const MINUS_ONE: Self = Self(2);
    /// 1/√2
    pub const SQRT2_2: Self = Self(3);

    const PINNED: u32 = 4;

    /// Position of the entry in its table
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == Self::ZERO.0
    }

    #[inline]
    pub const fn is_one(self) -> bool {
        self.0 == Self::ONE.0
    }

    #[inline]
    const fn is_pinned(self) -> bool {
        self.0 < Self::PINNED
    }
}

impl fmt::Display for ComplexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Entry {
    value: Complex64,
    ref_count: u32,
    live: bool,
}

/// (binary exponent, real cell, imaginary cell)
type BucketKey = (i32, i64, i64);

/// Tolerance-deduplicated table of complex values
#[derive(Debug)]
pub struct ComplexTable {
    tolerance: f64,
    entries: Vec<Entry>,
    free: Vec<u32>,
    buckets: AHashMap<BucketKey, SmallVec<[u32; 2]>>,
    live: usize,
    hits: usize,
    misses: usize,
}

impl ComplexTable {
    /// Create a table that merges values closer than `tolerance`
    pub fn new(tolerance: f64) -> Self {
        let mut table = Self {
            tolerance,
            entries: Vec::new(),
            free: Vec::new(),
            buckets: AHashMap::new(),
            live: 0,
            hits: 0,
            misses: 0,
        };

        let inv_sqrt2 = std::f64::consts::FRAC_1_SQRT_2;
        for value in [
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(-1.0, 0.0),
            Complex64::new(inv_sqrt2, 0.0),
        ] {
            table.insert(value);
        }
        table
    }

    /// The merge tolerance
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Return the canonical handle for `value`, inserting it if no stored
    /// value lies within tolerance
    ///
    /// Values whose components are both below the tolerance in absolute
    /// terms map to [`ComplexId::ZERO`].
    ///
    /// # Panics
    /// Panics if either component is NaN or infinite.
    pub fn lookup(&mut self, value: Complex64) -> ComplexId {
        if value.re.abs() <= self.tolerance && value.im.abs() <= self.tolerance {
            return ComplexId::ZERO;
        }
        self.intern(value)
    }

    /// Canonical handle for a value derived from stored weights
    ///
    /// Unlike [`lookup`](Self::lookup) there is no absolute zero floor: only
    /// an exact zero maps to [`ComplexId::ZERO`], so products of small
    /// weights keep their magnitude.
    pub(crate) fn intern(&mut self, value: Complex64) -> ComplexId {
        assert!(
            value.re.is_finite() && value.im.is_finite(),
            "non-finite complex weight {}",
            value
        );

        if value.re == 0.0 && value.im == 0.0 {
            return ComplexId::ZERO;
        }

        if let Some(found) = self.find(value) {
            self.hits += 1;
            return found;
        }

        self.misses += 1;
        self.insert(value)
    }

    /// The value behind `id`
    #[inline]
    pub fn value(&self, id: ComplexId) -> Complex64 {
        self.entry(id).value
    }

    /// Whether `id` still refers to a stored entry
    #[inline]
    pub fn is_live(&self, id: ComplexId) -> bool {
        self.entries.get(id.index()).map_or(false, |e| e.live)
    }

    /// Current reference count of `id`
    pub fn ref_count(&self, id: ComplexId) -> u32 {
        self.entry(id).ref_count
    }

    pub fn inc_ref(&mut self, id: ComplexId) {
        if id.is_pinned() {
            return;
        }
        let entry = self.entry_mut(id);
        entry.ref_count += 1;
    }

    /// # Panics
    /// Panics when the count is already zero.
    pub fn dec_ref(&mut self, id: ComplexId) {
        if id.is_pinned() {
            return;
        }
        let entry = self.entry_mut(id);
        assert!(
            entry.ref_count > 0,
            "complex reference count underflow for {}",
            id
        );
        entry.ref_count -= 1;
    }

    /// Reclaim every unpinned entry whose reference count is zero
    ///
    /// Returns the number of reclaimed entries.
    pub fn collect(&mut self) -> usize {
        let mut reclaimed = 0;
        for index in ComplexId::PINNED..self.entries.len() as u32 {
            let entry = &self.entries[index as usize];
            if !entry.live || entry.ref_count > 0 {
                continue;
            }

            let key = self.bucket_key(entry.value);
            if let Some(bucket) = self.buckets.get_mut(&key) {
                bucket.retain(|i| *i != index);
                if bucket.is_empty() {
                    self.buckets.remove(&key);
                }
            }
            self.entries[index as usize].live = false;
            self.free.push(index);
            reclaimed += 1;
        }
        self.live -= reclaimed;
        reclaimed
    }

    /// Number of live entries, pinned constants included
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of allocated slots, live or free
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// (hits, misses) of [`lookup`](Self::lookup) against existing entries
    pub fn lookup_counts(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Sum of two weights; a sum that cancels to within tolerance of the
    /// larger operand is zero
    pub fn add(&mut self, a: ComplexId, b: ComplexId) -> ComplexId {
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        let (x, y) = (self.value(a), self.value(b));
        let sum = x + y;
        let scale = x.norm().max(y.norm()) * self.tolerance;
        if sum.re.abs() <= scale && sum.im.abs() <= scale {
            return ComplexId::ZERO;
        }
        self.intern(sum)
    }

    pub fn mul(&mut self, a: ComplexId, b: ComplexId) -> ComplexId {
        if a.is_zero() || b.is_zero() {
            return ComplexId::ZERO;
        }
        if a.is_one() {
            return b;
        }
        if b.is_one() {
            return a;
        }
        self.intern(self.value(a) * self.value(b))
    }

    /// # Panics
    /// Panics when dividing by the zero handle.
    pub fn div(&mut self, a: ComplexId, b: ComplexId) -> ComplexId {
        assert!(!b.is_zero(), "division by zero weight");
        if a.is_zero() {
            return ComplexId::ZERO;
        }
        if a == b {
            return ComplexId::ONE;
        }
        if b.is_one() {
            return a;
        }
        self.intern(self.value(a) / self.value(b))
    }

    pub fn conj(&mut self, a: ComplexId) -> ComplexId {
        let value = self.value(a);
        if value.im == 0.0 {
            return a;
        }
        self.intern(value.conj())
    }

    fn find(&self, value: Complex64) -> Option<ComplexId> {
        let exponent = Self::exponent(value);
        let magnitude = value.norm();
        let mut best: Option<u32> = None;

        for de in -1..=1 {
            let cell = self.cell(exponent + de);
            let (kr, ki) = ((value.re / cell).round() as i64, (value.im / cell).round() as i64);
            for dr in -1..=1i64 {
                for di in -1..=1i64 {
                    let key = (exponent + de, kr.saturating_add(dr), ki.saturating_add(di));
                    let Some(bucket) = self.buckets.get(&key) else {
                        continue;
                    };
                    for &index in bucket {
                        let stored = self.entries[index as usize].value;
                        let bound = self.tolerance * magnitude.max(stored.norm());
                        let close = (stored.re - value.re).abs() <= bound
                            && (stored.im - value.im).abs() <= bound;
                        if close && best.map_or(true, |b| index < b) {
                            best = Some(index);
                        }
                    }
                }
            }
        }
        best.map(ComplexId)
    }

    fn insert(&mut self, value: Complex64) -> ComplexId {
        let entry = Entry {
            value,
            ref_count: 0,
            live: true,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.entries[index as usize] = entry;
                index
            }
            None => {
                self.entries.push(entry);
                (self.entries.len() - 1) as u32
            }
        };

        // Zero is pinned and answered before any bucket scan
        if index != ComplexId::ZERO.0 {
            let key = self.bucket_key(value);
            self.buckets.entry(key).or_default().push(index);
        }
        self.live += 1;
        ComplexId(index)
    }

    /// Binary exponent of the magnitude of a nonzero value
    #[inline]
    fn exponent(value: Complex64) -> i32 {
        value.norm().log2().floor() as i32
    }

    /// Rounding cell for values of the given exponent
    ///
    /// Twice the largest tolerated difference at that exponent, so matching
    /// values land in the same or an adjacent cell.
    #[inline]
    fn cell(&self, exponent: i32) -> f64 {
        self.tolerance * 2f64.powi(exponent + 2)
    }

    #[inline]
    fn bucket_key(&self, value: Complex64) -> BucketKey {
        let exponent = Self::exponent(value);
        let cell = self.cell(exponent);
        (
            exponent,
            (value.re / cell).round() as i64,
            (value.im / cell).round() as i64,
        )
    }

    fn entry(&self, id: ComplexId) -> &Entry {
        match self.entries.get(id.index()) {
            Some(entry) if entry.live => entry,
            _ => panic!("dangling complex handle {}", id),
        }
    }

    fn entry_mut(&mut self, id: ComplexId) -> &mut Entry {
        match self.entries.get_mut(id.index()) {
            Some(entry) if entry.live => entry,
            _ => panic!("dangling complex handle {}", id),
        }
    }
}
