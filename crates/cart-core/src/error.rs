//! Error types for cart mutations

/// Cart mutation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Position does not exist in the cart
    #[error("cart position {index} out of range (len: {len})")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of items in the cart
        len: usize,
    },
}

impl CartError {
    /// Create out-of-range error
    #[inline]
    #[must_use]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_display() {
        let err = CartError::out_of_range(3, 2);
        assert_eq!(err.to_string(), "cart position 3 out of range (len: 2)");
    }
}
