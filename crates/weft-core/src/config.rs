//! Execution configuration for partitioned field passes.

use crate::error::ConfigError;

/// Controls how array-wide passes (stencils, rules, commits) are executed.
///
/// Passes split the index range `[0, count)` into contiguous chunks of
/// `chunk_len` indices. Each chunk writes only its own output indices, so
/// chunks run independently on the rayon pool when `parallel` is set.
///
/// # Examples
///
/// ```
/// use weft_core::ExecConfig;
///
/// let exec = ExecConfig::parallel().with_chunk_len(1024);
/// assert!(exec.validate().is_ok());
/// assert!(ExecConfig::serial().with_chunk_len(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecConfig {
    /// Dispatch chunks to the rayon pool. Default: `true`.
    pub parallel: bool,
    /// Number of indices per chunk. Default: 4096. Must be at least 1.
    pub chunk_len: usize,
}

impl ExecConfig {
    /// Default chunk length in elements.
    pub const DEFAULT_CHUNK_LEN: usize = 4096;

    /// Run every pass inline on the calling thread.
    pub const fn serial() -> Self {
        Self {
            parallel: false,
            chunk_len: Self::DEFAULT_CHUNK_LEN,
        }
    }

    /// Run passes on the rayon pool.
    pub const fn parallel() -> Self {
        Self {
            parallel: true,
            chunk_len: Self::DEFAULT_CHUNK_LEN,
        }
    }

    /// Return a copy with a different chunk length.
    pub const fn with_chunk_len(mut self, chunk_len: usize) -> Self {
        self.chunk_len = chunk_len;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_len == 0 {
            return Err(ConfigError::ZeroChunkLen);
        }
        Ok(())
    }

    /// Returns `true` if a pass over `len` elements should fan out.
    pub fn fans_out(&self, len: usize) -> bool {
        self.parallel && len > self.chunk_len
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self::parallel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_parallel() {
        let exec = ExecConfig::default();
        assert!(exec.parallel);
        assert_eq!(exec.chunk_len, ExecConfig::DEFAULT_CHUNK_LEN);
        assert!(exec.validate().is_ok());
    }

    #[test]
    fn zero_chunk_rejected() {
        assert_eq!(
            ExecConfig::parallel().with_chunk_len(0).validate(),
            Err(ConfigError::ZeroChunkLen)
        );
    }

    #[test]
    fn small_ranges_stay_inline() {
        let exec = ExecConfig::parallel().with_chunk_len(16);
        assert!(!exec.fans_out(16));
        assert!(exec.fans_out(17));
        assert!(!ExecConfig::serial().fans_out(1_000_000));
    }
}
