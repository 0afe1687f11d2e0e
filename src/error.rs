use core::fmt::{self, Display};

/// Errors returned by the checked [`OrderedMap`](crate::OrderedMap) operations.
///
/// Duplicate inserts and erasing an absent key are not errors; those are
/// reported through ordinary return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
  /// The requested key is not present in the map
  KeyNotFound,

  /// The operation needs at least one entry
  Empty,

  /// A position was at or past the end of the entries
  PositionOutOfBounds {
    /// The position that was requested
    position: usize,
    /// The number of entries at the time of the call
    len: usize,
  },
}

impl Display for MapError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::KeyNotFound => write!(f, "key not found"),
      Self::Empty => write!(f, "map is empty"),
      Self::PositionOutOfBounds { position, len } => {
        write!(f, "position {} out of bounds (len is {})", position, len)
      }
    }
  }
}

#[cfg(not(feature = "no_std_support"))]
impl std::error::Error for MapError {}

#[cfg(feature = "no_std_support")]
impl core::error::Error for MapError {}

/// A specialized [`Result`](core::result::Result) type for map operations.
pub type Result<T, E = MapError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::string::ToString;

  #[test]
  fn test_display_messages() {
    assert_eq!(MapError::KeyNotFound.to_string(), "key not found");
    assert_eq!(MapError::Empty.to_string(), "map is empty");
    assert_eq!(
      MapError::PositionOutOfBounds { position: 4, len: 2 }.to_string(),
      "position 4 out of bounds (len is 2)"
    );
  }
}
