//! Compact encoded path decoding.
//!
//! Routing services return route geometry as an ASCII string: each point is
//! a pair of deltas (latitude, then longitude) from the previous point, in
//! units of 1e-5 degrees. Each delta is zig-zag encoded and split into
//! 5-bit groups, least significant first; every group except the last has
//! the 0x20 continuation bit set, and 63 is added to make it printable.

use crate::domain::Coordinate;

/// Units per degree.
const PRECISION: f64 = 1e5;

/// Largest shift for a group that still fits a 32-bit value.
const MAX_SHIFT: u32 = 30;

/// Errors from decoding an encoded path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input ended in the middle of a value or a lat/lng pair
    #[error("encoded path truncated at byte {offset}")]
    Truncated { offset: usize },

    /// A byte outside the printable range `'?'..='~'`
    #[error("invalid byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { offset: usize, byte: u8 },

    /// A value has more groups than fit in 32 bits
    #[error("value starting before byte {offset} overflows 32 bits")]
    Overflow { offset: usize },

    /// A decoded point is not a valid coordinate
    #[error("point starting at byte {offset} is out of range")]
    OutOfRange { offset: usize },
}

/// Decode an encoded path into coordinates, in encounter order.
///
/// An empty string decodes to an empty path. Malformed input is an error;
/// nothing is silently dropped.
///
/// # Examples
///
/// ```
/// use trip_server::polyline::decode;
///
/// let path = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0].lat(), 38.5);
/// assert_eq!(path[0].lng(), -120.2);
///
/// assert!(decode("").unwrap().is_empty());
/// assert!(decode("_p~iF").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut coordinates = Vec::new();

    while index < bytes.len() {
        let point_start = index;

        lat += next_delta(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(DecodeError::Truncated { offset: index });
        }
        lng += next_delta(bytes, &mut index)?;

        let point = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION)
            .map_err(|_| DecodeError::OutOfRange {
                offset: point_start,
            })?;
        coordinates.push(point);
    }

    Ok(coordinates)
}

/// Read one zig-zag varint starting at `index`, advancing past it.
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let offset = *index;
        let byte = *bytes
            .get(offset)
            .ok_or(DecodeError::Truncated { offset })?;
        if !(63..=126).contains(&byte) {
            return Err(DecodeError::InvalidByte { offset, byte });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow { offset });
        }

        let group = u64::from(byte - 63);
        result |= (group & 0x1f) << shift;
        shift += 5;
        *index += 1;

        if group < 0x20 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}
