use proptest::prelude::*;
use umbra_geom::{BoxRange, CellBox, PackedBox};

fn arb_range() -> impl Strategy<Value = BoxRange> {
    prop_oneof![
        Just(BoxRange::Near),
        Just(BoxRange::Mid),
        Just(BoxRange::Far),
        Just(BoxRange::Extreme),
    ]
}

// Non-empty box inside a region: min in 0..16, max in min+1..=16 per axis.
fn arb_cell_box() -> impl Strategy<Value = CellBox> {
    prop::array::uniform3(0u8..16)
        .prop_flat_map(|min| {
            let maxs = (min[0] + 1..=16u8, min[1] + 1..=16u8, min[2] + 1..=16u8);
            (Just(min), maxs)
        })
        .prop_map(|(min, (x, y, z))| CellBox::new(min, [x, y, z]))
}

proptest! {
    // Decoding an encoded box yields the same box and range
    #[test]
    fn unpack_inverts_pack(b in arb_cell_box(), r in arb_range()) {
        let packed = PackedBox::pack(b, r);
        prop_assert_eq!(packed.unpack(), (b, r));
    }

    // A real box never encodes to the empty sentinel
    #[test]
    fn nonempty_box_is_not_empty_sentinel(b in arb_cell_box(), r in arb_range()) {
        prop_assert!(!PackedBox::pack(b, r).is_empty());
    }

    // Volume equals the number of cells iterated
    #[test]
    fn volume_matches_cell_iteration(b in arb_cell_box()) {
        prop_assert_eq!(b.volume() as usize, b.cells().count());
        for (x, y, z) in b.cells() {
            prop_assert!(b.contains(x, y, z));
        }
    }

    // Intersection is symmetric and a box always intersects itself
    #[test]
    fn intersects_is_symmetric(a in arb_cell_box(), b in arb_cell_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert!(a.intersects(&a));
    }
}

#[test]
fn full_box_covers_region() {
    assert_eq!(CellBox::FULL.volume(), 4096);
    assert!(PackedBox::FULL.is_full());
    assert_eq!(PackedBox::FULL.range(), BoxRange::Extreme);
}

#[test]
fn degenerate_box_has_no_volume() {
    let b = CellBox::new([3, 3, 3], [3, 8, 8]);
    assert!(b.is_empty());
    assert_eq!(b.volume(), 0);
    assert_eq!(b.cells().count(), 0);
}
