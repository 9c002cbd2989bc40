//! Zobrist keys for position hashing.
//!
//! `Position` folds these into its hash incrementally as pieces move, so a
//! hash kept through `make_move`/`unmake_move` always equals a fresh
//! `compute_hash`. The keys are fixed at compile time, so hashes are stable
//! across runs.

use crate::board::CastlingRights;
use crate::types::Piece;

const PIECE_KEYS: usize = 2 * 6 * 64;
const SIDE: usize = PIECE_KEYS;
const CASTLING: usize = SIDE + 1;
const EN_PASSANT: usize = CASTLING + 4;
const KEY_COUNT: usize = EN_PASSANT + 8;

/// One flat table: pieces by [color][kind][square], then the black-to-move
/// key, the four castling rights (wk, wq, bk, bq) and eight en passant files.
pub struct ZobristKeys {
    keys: [u64; KEY_COUNT],
}

const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    const fn generate(seed: u64) -> Self {
        let mut keys = [0u64; KEY_COUNT];
        let mut state = seed;
        let mut i = 0;
        while i < KEY_COUNT {
            let (next, key) = splitmix64(state);
            state = next;
            keys[i] = key;
            i += 1;
        }
        Self { keys }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.keys[(piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq as usize]
    }

    /// XORed in while black is to move.
    #[inline(always)]
    pub fn side_key(&self) -> u64 {
        self.keys[SIDE]
    }

    /// Combined key for every right currently held.
    #[inline]
    pub fn castling_key(&self, rights: &CastlingRights) -> u64 {
        [rights.wk, rights.wq, rights.bk, rights.bq]
            .into_iter()
            .enumerate()
            .filter(|&(_, held)| held)
            .fold(0, |acc, (i, _)| acc ^ self.keys[CASTLING + i])
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.keys[EN_PASSANT + file as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x5EED_C0DE_2024_0001);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
