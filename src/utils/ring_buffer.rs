use alloc::boxed::Box;

use crate::{ExtremaError, Result, Tick};

/// A fixed-size, circular buffer of `(price, time)` ticks.
///
/// Prices and times live in two parallel arrays allocated once at construction. Pushing
/// into a full buffer overwrites the oldest tick, so the buffer always holds the most
/// recent `capacity` observations. Access is by logical index, `0` being the oldest
/// surviving tick and `len() - 1` the newest.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Prices, physically indexed
    prices: Box<[T]>,
    /// Timestamps, physically indexed alongside `prices`
    times: Box<[i64]>,
    /// The index of the oldest element in the buffer (the "head").
    /// This is where the next element will be overwritten when the buffer is full.
    head: usize,
    /// The current number of ticks stored in the buffer.
    /// Always less than or equal to `capacity()`.
    len: usize,
}

impl<T: Default + Copy> RingBuffer<T> {
    /// Creates a new ring buffer holding up to `capacity` ticks
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of ticks retained before the oldest is overwritten
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, use [`RingBuffer::try_new`] to handle it instead
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity can not be zero");
        Self {
            prices: vec![T::default(); capacity].into_boxed_slice(),
            times: vec![0; capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Creates a new ring buffer, returning an error if `capacity` is zero
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of ticks retained before the oldest is overwritten
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The buffer, or [`ExtremaError::ZeroCapacity`]
    pub fn try_new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ExtremaError::ZeroCapacity);
        }
        Ok(Self::new(capacity))
    }

    /// Maximum number of ticks the buffer retains
    #[inline]
    pub fn capacity(&self) -> usize {
        self.prices.len()
    }

    /// Number of ticks currently buffered
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no tick has been pushed since construction or the last clear
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once the buffer holds `capacity()` ticks
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        (self.head + index) % self.capacity()
    }

    /// Pushes a tick as the newest element
    ///
    /// # Arguments
    ///
    /// * `price` - The tick price
    /// * `time` - The tick timestamp
    ///
    /// # Returns
    ///
    /// * `Option<Tick<T>>` - The evicted oldest tick if the buffer was full
    pub fn push(&mut self, price: T, time: i64) -> Option<Tick<T>> {
        let cap = self.capacity();

        if self.is_full() {
            let evicted = Tick::new(
                core::mem::replace(&mut self.prices[self.head], price),
                core::mem::replace(&mut self.times[self.head], time),
            );
            self.head = (self.head + 1) % cap; // move head forward
            Some(evicted)
        } else {
            let insert_at = (self.head + self.len) % cap;
            self.prices[insert_at] = price;
            self.times[insert_at] = time;
            self.len += 1;
            None
        }
    }

    /// Returns the price at logical `index`, `0` being the oldest
    ///
    /// # Arguments
    ///
    /// * `index` - Logical position, must be below `len()`
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The price, or [`ExtremaError::IndexOutOfBounds`]
    pub fn price_at(&self, index: usize) -> Result<T> {
        self.check(index)?;
        Ok(self.prices[self.slot(index)])
    }

    /// Returns the timestamp at logical `index`, `0` being the oldest
    ///
    /// # Arguments
    ///
    /// * `index` - Logical position, must be below `len()`
    ///
    /// # Returns
    ///
    /// * `Result<i64>` - The timestamp, or [`ExtremaError::IndexOutOfBounds`]
    pub fn time_at(&self, index: usize) -> Result<i64> {
        self.check(index)?;
        Ok(self.times[self.slot(index)])
    }

    /// Returns the whole tick at logical `index`
    pub fn tick_at(&self, index: usize) -> Result<Tick<T>> {
        self.check(index)?;
        let slot = self.slot(index);
        Ok(Tick::new(self.prices[slot], self.times[slot]))
    }

    /// Returns the newest tick, if any
    pub fn latest(&self) -> Option<Tick<T>> {
        self.len.checked_sub(1).and_then(|i| self.tick_at(i).ok())
    }

    #[inline]
    fn check(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            Err(ExtremaError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    /// Forgets every buffered tick; capacity is unchanged
    ///
    /// Storage is left as is, stale slots are unreachable until overwritten.
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Iterates over buffered prices in logical (oldest to newest) order
    pub fn prices(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.prices[self.slot(i)])
    }

    /// Iterates over buffered ticks in logical (oldest to newest) order
    pub fn iter(&self) -> impl Iterator<Item = Tick<T>> + '_ {
        (0..self.len).map(move |i| {
            let slot = self.slot(i);
            Tick::new(self.prices[slot], self.times[slot])
        })
    }
}
