use super::*;

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_clears_transparent() {
    let mut px = vec![200u8, 100, 50, 255, 10, 20, 30, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[200, 100, 50, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_half_alpha_restores_channel() {
    let mut px = vec![128u8, 0, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![255, 0, 0, 128]);
}

#[test]
fn over_opaque_blends_half_red_onto_black() {
    let mut dst = vec![0u8, 0, 0, 255];
    over_opaque(&mut dst, &[128, 0, 0, 128]);
    assert_eq!(dst, vec![128, 0, 0, 255]);
}
