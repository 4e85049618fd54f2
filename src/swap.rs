//! Byte-order reversal for 4-byte words.
//!
//! The grid format is written native-endian by whatever machine produced it,
//! so a cross-endian reader has to reverse each 4-byte word explicitly. This
//! module is the sole byte-order primitive; it knows nothing about field
//! semantics.

/// Reverses the byte order within each 4-byte word of `buf`, in place.
///
/// The slice length must be a multiple of 4.
pub fn swap_words_in_place(buf: &mut [u8]) {
    assert!(
        buf.len() % 4 == 0,
        "word swap needs a multiple of 4 bytes, got {}",
        buf.len()
    );
    for word in buf.chunks_exact_mut(4) {
        word.swap(0, 3);
        word.swap(1, 2);
    }
}

/// Single-word swap for an integer header field.
pub fn swap_i32(v: i32) -> i32 {
    let mut b = v.to_ne_bytes();
    swap_words_in_place(&mut b);
    i32::from_ne_bytes(b)
}

/// Single-word swap for a float header field. Operates on the raw bit
/// pattern, so a swapped value may not be a sensible float until swapped back.
pub fn swap_f32(v: f32) -> f32 {
    let mut b = v.to_ne_bytes();
    swap_words_in_place(&mut b);
    f32::from_ne_bytes(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_single_word() {
        let mut buf = [0x01u8, 0x02, 0x03, 0x04];
        swap_words_in_place(&mut buf);
        assert_eq!(buf, [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn swap_many_words() {
        let mut buf = [1u8, 2, 3, 4, 5, 6, 7, 8];
        swap_words_in_place(&mut buf);
        assert_eq!(buf, [4, 3, 2, 1, 8, 7, 6, 5]);
    }

    #[test]
    fn swap_is_involution() {
        let orig: Vec<u8> = (0..64).collect();
        let mut buf = orig.clone();
        swap_words_in_place(&mut buf);
        assert_ne!(buf, orig);
        swap_words_in_place(&mut buf);
        assert_eq!(buf, orig);
    }

    #[test]
    fn swap_i32_round_trip() {
        for v in [0, 1, -1, 12345, i32::MIN, i32::MAX] {
            assert_eq!(swap_i32(swap_i32(v)), v);
        }
        assert_eq!(swap_i32(0x0102_0304), 0x0403_0201);
    }

    #[test]
    fn swap_f32_round_trip() {
        for v in [0.0f32, 1.0, -2.5, 0.025, f32::MAX] {
            assert_eq!(swap_f32(swap_f32(v)).to_bits(), v.to_bits());
        }
    }

    #[test]
    #[should_panic]
    fn swap_rejects_ragged_slice() {
        let mut buf = [0u8; 7];
        swap_words_in_place(&mut buf);
    }
}
