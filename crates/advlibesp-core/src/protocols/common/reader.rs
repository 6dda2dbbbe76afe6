use std::ops::Range;

/// Slice `payload` over `range`, clamping both ends to the payload length.
///
/// Length fields in an envelope may claim more bytes than were captured;
/// the decoded region is whatever is actually present.
pub(crate) fn clamped_slice(payload: &[u8], range: Range<usize>) -> &[u8] {
    let end = range.end.min(payload.len());
    let start = range.start.min(end);
    &payload[start..end]
}

#[cfg(test)]
mod tests {
    use super::clamped_slice;

    #[test]
    fn clamped_slice_within_bounds() {
        assert_eq!(clamped_slice(&[1, 2, 3, 4], 1..3), &[2, 3]);
    }

    #[test]
    fn clamped_slice_past_end() {
        assert_eq!(clamped_slice(&[1, 2, 3, 4], 2..10), &[3, 4]);
        assert!(clamped_slice(&[1, 2, 3, 4], 6..10).is_empty());
    }
}
