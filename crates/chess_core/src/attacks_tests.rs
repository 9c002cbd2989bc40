use super::*;

#[test]
fn test_knight_attacks() {
    // Knight on e4 (square 28) should attack 8 squares
    assert_eq!(knight_attacks(28).popcount(), 8);

    // Knight on a1 reaches only b3 and c2
    let attacks = knight_attacks(0);
    assert_eq!(attacks.popcount(), 2);
    assert!(attacks.contains(10)); // c2
    assert!(attacks.contains(17)); // b3
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(28).popcount(), 8);
    assert_eq!(king_attacks(0).popcount(), 3);
}

#[test]
fn test_pawn_attacks_by_color() {
    // White pawn on e4 attacks d5 and f5
    let attacks = pawn_attacks(28, Color::White);
    assert_eq!(attacks.popcount(), 2);
    assert!(attacks.contains(35));
    assert!(attacks.contains(37));

    // Black pawn on e4 attacks d3 and f3
    let attacks = pawn_attacks(28, Color::Black);
    assert!(attacks.contains(19));
    assert!(attacks.contains(21));

    // Edge pawn attacks a single square
    assert_eq!(pawn_attacks(8, Color::White).popcount(), 1);
}

#[test]
fn test_slider_attacks_empty_board() {
    assert_eq!(rook_attacks(28, Bitboard::EMPTY).popcount(), 14);
    assert_eq!(bishop_attacks(28, Bitboard::EMPTY).popcount(), 13);
    assert_eq!(queen_attacks(28, Bitboard::EMPTY).popcount(), 27);
}

#[test]
fn test_rook_attacks_stop_at_blocker() {
    // Rook on a1, blocker on a4
    let attacks = rook_attacks(0, Bitboard(1 << 24));
    assert!(attacks.contains(16)); // a3
    assert!(attacks.contains(24)); // a4 (capturable)
    assert!(!attacks.contains(32)); // a5 (shadowed)
    assert!(attacks.contains(7)); // h1
}
