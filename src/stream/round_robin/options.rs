/// The default read-ahead bound used by [`FillMode::Eager`].
pub const DEFAULT_BUFFER_SIZE: usize = 4;

/// When a round-robin union runs its fill loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Produce items only when the consumer asks for one. Each poll runs fill
    /// rounds until a single item is found or no source has anything ready.
    #[default]
    Lazy,
    /// Read ahead. Each poll keeps running fill rounds until the buffer holds
    /// `buffer_size` items or no source has anything ready, then yields the
    /// oldest buffered item.
    Eager,
}

/// Configuration for [`RoundRobinUnion`][super::RoundRobinUnion] and
/// [`TryRoundRobinUnion`][super::TryRoundRobinUnion].
///
/// # Example
///
/// ```
/// use round_robin_union::stream::{FillMode, Options};
///
/// let options = Options::new().fill_mode(FillMode::Eager).buffer_size(16);
/// assert_eq!(options.get_fill_mode(), FillMode::Eager);
/// assert_eq!(options.get_buffer_size(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    fill_mode: FillMode,
    buffer_size: usize,
}

impl Options {
    /// Lazy filling with the default buffer size.
    pub const fn new() -> Self {
        Self {
            fill_mode: FillMode::Lazy,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Set the fill mode.
    pub const fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set how many items may be read ahead in [`FillMode::Eager`]. Values
    /// below one are raised to one.
    pub const fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = if buffer_size == 0 { 1 } else { buffer_size };
        self
    }

    /// The configured fill mode.
    pub const fn get_fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    /// The configured read-ahead bound.
    pub const fn get_buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// How many items the buffer should hold before a poll stops filling.
    pub(crate) const fn fill_target(&self) -> usize {
        match self.fill_mode {
            FillMode::Lazy => 1,
            FillMode::Eager => self.buffer_size,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.get_fill_mode(), FillMode::Lazy);
        assert_eq!(options.get_buffer_size(), DEFAULT_BUFFER_SIZE);
        assert_eq!(options.fill_target(), 1);
    }

    #[test]
    fn eager_fills_up_to_buffer_size() {
        let options = Options::new().fill_mode(FillMode::Eager).buffer_size(8);
        assert_eq!(options.fill_target(), 8);
    }

    #[test]
    fn zero_buffer_size_is_raised() {
        let options = Options::new().fill_mode(FillMode::Eager).buffer_size(0);
        assert_eq!(options.get_buffer_size(), 1);
        assert_eq!(options.fill_target(), 1);
    }
}
