//! Fixed-capacity rolling buffers
//!
//! [`RingBuffer`] keeps the most recent `N` records in insertion order and
//! silently evicts the oldest one when a new record arrives on a full
//! buffer. [`SeriesBuffer`] is the one-hour correlation history fed by every
//! data refresh.

use heapless::Deque;
use log::debug;

use crate::sample::{Label, Sample};

/// Number of samples kept by the correlation chart (one hour at one refresh per minute)
pub const SERIES_CAPACITY: usize = 60;

/// Rolling history of correlation samples
pub type SeriesBuffer = RingBuffer<Sample, SERIES_CAPACITY>;

/// FIFO ring of at most `N` records, oldest first
///
/// Backed by a `heapless::Deque`, so storage is a single fixed array with
/// head/length indices and appends never allocate.
#[derive(Debug, Clone)]
pub struct RingBuffer<T, const N: usize> {
    items: Deque<T, N>,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            items: Deque::new(),
        }
    }

    /// Append a record at the newest end, evicting the oldest if full
    pub fn append(&mut self, item: T) {
        if self.items.is_full() {
            self.items.pop_front();
            debug!("ring buffer full (capacity {}), evicted oldest record", N);
        }

        // Cannot fail: a slot was freed above when the deque was full.
        let _ = self.items.push_back(item);
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Alias of [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Whether no record has been appended yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the next append will evict
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }

    /// Maximum number of records
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Record at `index`, where 0 is the oldest
    pub fn get(&self, index: usize) -> Option<&T> {
        let (front, back) = self.items.as_slices();
        if index < front.len() {
            front.get(index)
        } else {
            back.get(index - front.len())
        }
    }

    /// Newest record
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + Clone {
        let (front, back) = self.items.as_slices();
        front.iter().chain(back.iter())
    }

    /// Drop every record
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<Sample, N> {
    /// Sample at `index` (0 = oldest)
    pub fn sample_at(&self, index: usize) -> Option<&Sample> {
        self.get(index)
    }

    /// Display labels, oldest first
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.iter().map(|sample| &sample.label)
    }

    /// Wind speeds (km/s), oldest first
    pub fn winds(&self) -> impl Iterator<Item = f32> + '_ {
        self.iter().map(|sample| sample.wind)
    }

    /// Kp indices, oldest first
    pub fn kps(&self) -> impl Iterator<Item = f32> + '_ {
        self.iter().map(|sample| sample.kp)
    }

    /// Resonance frequencies (Hz), oldest first
    pub fn schumanns(&self) -> impl Iterator<Item = f32> + '_ {
        self.iter().map(|sample| sample.schumann)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Reading, label};

    fn sample(wind: f32) -> Sample {
        Sample::new(label("12:00"), wind, 1.0, 7.83)
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..200 {
            buffer.append(sample(i as f32));
            assert!(buffer.size() <= SERIES_CAPACITY);
            assert_eq!(buffer.size(), (i + 1).min(SERIES_CAPACITY));
        }
    }

    #[test]
    fn test_fifo_eviction_drops_exactly_the_oldest() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..SERIES_CAPACITY {
            buffer.append(sample(i as f32));
        }
        assert!(buffer.is_full());

        buffer.append(sample(1000.0));

        assert_eq!(buffer.size(), SERIES_CAPACITY);
        assert_eq!(buffer.sample_at(0).map(|s| s.wind), Some(1.0));
        assert_eq!(buffer.latest().map(|s| s.wind), Some(1000.0));
        assert_eq!(
            buffer.sample_at(SERIES_CAPACITY - 1).map(|s| s.wind),
            Some(1000.0)
        );
    }

    #[test]
    fn test_keeps_most_recent_in_order() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..137 {
            buffer.append(sample(i as f32));
        }

        let winds: alloc::vec::Vec<f32> = buffer.winds().collect();
        let expected: alloc::vec::Vec<f32> = (77..137).map(|i| i as f32).collect();
        assert_eq!(winds, expected);
    }

    #[test]
    fn test_columns_stay_equal_length() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..75 {
            buffer.append(sample(i as f32));
            let n = buffer.size();
            assert_eq!(buffer.labels().count(), n);
            assert_eq!(buffer.winds().count(), n);
            assert_eq!(buffer.kps().count(), n);
            assert_eq!(buffer.schumanns().count(), n);
        }
    }

    #[test]
    fn test_sixty_five_increasing_winds() {
        let mut buffer = SeriesBuffer::new();
        for wind in 300..365 {
            let s = Sample::coerce(
                label("--:--"),
                Reading::Value(wind as f32),
                Reading::Value(2.0),
                Reading::Value(7.9),
            );
            buffer.append(s);
        }

        assert_eq!(buffer.size(), 60);
        assert_eq!(buffer.sample_at(0).map(|s| s.wind), Some(305.0));
        assert_eq!(buffer.latest().map(|s| s.wind), Some(364.0));
    }

    #[test]
    fn test_get_across_wrapped_storage() {
        let mut ring: RingBuffer<u32, 4> = RingBuffer::new();
        for i in 0..7 {
            ring.append(i);
        }

        assert_eq!(ring.get(0), Some(&3));
        assert_eq!(ring.get(3), Some(&6));
        assert_eq!(ring.get(4), None);
        assert_eq!(ring.iter().copied().collect::<alloc::vec::Vec<_>>(), [3, 4, 5, 6]);
    }

    #[test]
    fn test_clear_resets_length() {
        let mut ring: RingBuffer<u8, 3> = RingBuffer::new();
        ring.append(1);
        ring.append(2);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.latest(), None);
        assert_eq!(ring.capacity(), 3);
    }
}
