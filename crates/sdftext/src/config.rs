/// Buffer retention policy for page batches.
///
/// Batches keep their high-water capacity so editing text back and forth
/// never reallocates. Only a batch larger than `min_retained_capacity`, left
/// over from a transient very long text, is reallocated down to the needed
/// size once it is more than `shrink_ratio` times larger than required. A
/// ratio of zero disables shrinking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchConfig {
    pub shrink_ratio: f32,
    /// Capacity, in glyphs, that is never considered oversized.
    pub min_retained_capacity: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            shrink_ratio: 4.0,
            min_retained_capacity: 1024,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never shrink; buffers stay at their high-water capacity.
    pub fn retain_all() -> Self {
        Self {
            shrink_ratio: 0.0,
            ..Default::default()
        }
    }

    pub fn with_shrink_ratio(mut self, ratio: f32) -> Self {
        self.shrink_ratio = ratio.max(0.0);
        self
    }

    pub fn with_min_retained_capacity(mut self, glyphs: usize) -> Self {
        self.min_retained_capacity = glyphs;
        self
    }

    /// Whether a batch of `capacity` glyphs holding `needed` must be rebuilt.
    pub fn needs_realloc(&self, capacity: usize, needed: usize) -> bool {
        if needed > capacity {
            return true;
        }
        self.shrink_ratio > 0.0
            && capacity > self.min_retained_capacity
            && (needed as f32) * self.shrink_ratio < capacity as f32
    }
}
