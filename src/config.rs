// src/config.rs
//! Reader configuration.
//!
//! [`ReaderOptions`] collects the knobs that change how a file is opened and
//! validated. The defaults accept every file the format allows.

/// Options applied when opening a NEX file.
///
/// ```
/// use nex_rs::ReaderOptions;
///
/// let options = ReaderOptions {
///     reject_beta_versions: true,
///     ..ReaderOptions::default()
/// };
/// assert_eq!(options.buffer_capacity, 65536);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Capacity of the `BufReader` wrapped around files opened by path or handle.
    ///
    /// Default: `65536` bytes.
    pub buffer_capacity: usize,

    /// Refuse files written with the beta format versions 102 and 103.
    ///
    /// When `false` such files are opened and a warning is logged.
    ///
    /// Default: `false`.
    pub reject_beta_versions: bool,

    /// Fail interval reads when an interval ends before it starts.
    ///
    /// Default: `false`.
    pub check_interval_order: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            buffer_capacity: 65536,
            reject_beta_versions: false,
            check_interval_order: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReaderOptions::default();
        assert_eq!(options.buffer_capacity, 65536);
        assert!(!options.reject_beta_versions);
        assert!(!options.check_interval_order);
    }
}
