use std::collections::BTreeSet;

use rand::Rng;

use crate::constants::{TOTO_MAX_NUMBER, TOTO_PICKS};

/// Draws six distinct numbers from `1..=49`, sorted ascending.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> [u8; TOTO_PICKS] {
    let mut picked = BTreeSet::new();
    while picked.len() < TOTO_PICKS {
        picked.insert(rng.gen_range(1..=TOTO_MAX_NUMBER));
    }

    let mut numbers = [0u8; TOTO_PICKS];
    for (slot, number) in numbers.iter_mut().zip(picked) {
        *slot = number;
    }
    numbers
}
