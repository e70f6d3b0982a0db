//! Rotary menu switch decoding
//!
//! A mechanical rotary switch (not an encoder) wired to three binary-weighted
//! active-low lines. The position is the sum of the weights of the lines
//! currently pulled low, 0..=7. Mechanical rotation produces transient
//! intermediate codes, so callers must wait for the contacts to settle after
//! an edge before trusting a read.

/// Decodes the three sampled levels into the switch position.
///
/// Each argument is the raw level of the corresponding weighted line, `true`
/// meaning electrically high. A low line contributes its weight.
pub fn value(high1: bool, high2: bool, high4: bool) -> u8 {
    let mut value = 0;
    if !high1 {
        value += 1;
    }
    if !high2 {
        value += 2;
    }
    if !high4 {
        value += 4;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_lines_sum_their_weights() {
        // (low, high, low) -> weights 1 + 4
        assert_eq!(value(false, true, false), 5);
        // weight 1 alone
        assert_eq!(value(false, true, true), 1);
        assert_eq!(value(true, false, true), 2);
        assert_eq!(value(true, true, false), 4);
    }

    #[test]
    fn extremes() {
        assert_eq!(value(true, true, true), 0);
        assert_eq!(value(false, false, false), 7);
    }
}
