//! QPSK constellation (2 bits per symbol)
//!
//! Gray-coded mapping, symbol index = b0 << 1 | b1:
//! 00 → 45°  (I=+1, Q=+1) / √2
//! 01 → 135° (I=-1, Q=+1) / √2
//! 11 → 225° (I=-1, Q=-1) / √2
//! 10 → 315° (I=+1, Q=-1) / √2
//!
//! Neighbouring points differ in exactly one bit.

use crate::traits::Constellation;
use std::f64::consts::FRAC_1_SQRT_2;

/// Quadrature Phase Shift Keying constellation (Gray coded)
#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl Constellation for Qpsk {
    fn order(&self) -> usize {
        4
    }

    fn symbol_to_iq(&self, sym: u8) -> (f64, f64) {
        // b1 flips I, b0 flips Q
        let i = if (sym & 0x01) == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        let q = if (sym & 0x02) == 0 { FRAC_1_SQRT_2 } else { -FRAC_1_SQRT_2 };
        (i, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: f64 = FRAC_1_SQRT_2;

    #[test]
    fn test_qpsk_gray_table() {
        let qpsk = Qpsk;
        let table = [
            ([0u8, 0u8], (S, S)),
            ([0, 1], (-S, S)),
            ([1, 0], (S, -S)),
            ([1, 1], (-S, -S)),
        ];
        for (bits, expected) in table {
            let sym = qpsk.bits_to_symbol(&bits);
            assert_eq!(qpsk.symbol_to_iq(sym), expected, "bits {:?}", bits);
        }
    }

    #[test]
    fn test_qpsk_unit_power() {
        let qpsk = Qpsk;
        for sym in 0..4u8 {
            let (i, q) = qpsk.symbol_to_iq(sym);
            let power = i * i + q * q;
            assert!((power - 1.0).abs() < 1e-10, "Symbol {} power: {}", sym, power);
        }
    }

    #[test]
    fn test_qpsk_neighbours_differ_by_one_bit() {
        // Walk the circle counter-clockwise: 45°, 135°, 225°, 315°
        let qpsk = Qpsk;
        let mut by_angle: Vec<(f64, u8)> = (0..4u8)
            .map(|sym| {
                let (i, q) = qpsk.symbol_to_iq(sym);
                (q.atan2(i).rem_euclid(2.0 * std::f64::consts::PI), sym)
            })
            .collect();
        by_angle.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        for k in 0..4 {
            let a = by_angle[k].1;
            let b = by_angle[(k + 1) % 4].1;
            assert_eq!((a ^ b).count_ones(), 1, "symbols {} and {} are neighbours", a, b);
        }
    }

    #[test]
    fn test_qpsk_order() {
        assert_eq!(Qpsk.order(), 4);
        assert_eq!(Qpsk.bits_per_symbol(), 2);
    }
}
