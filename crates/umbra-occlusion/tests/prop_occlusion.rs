use proptest::prelude::*;
use umbra_occlusion::{
    BoxFinder, BoxRange, CellBox, CellPos, InteriorIndex, OcclusionSource, PackedBox,
    RegionOcclusion, RenderList,
};

const AIR: u8 = 0;
const STONE: u8 = 1;
const GLASS: u8 = 2;

/// Padded 18³ cells; 0 air, 1 stone, 2 glass.
#[derive(Clone, Debug)]
struct Grid(Vec<u8>);

impl Grid {
    fn idx(p: CellPos) -> usize {
        ((p.x + 1) + 18 * ((p.y + 1) + 18 * (p.z + 1))) as usize
    }
}

impl OcclusionSource for Grid {
    type State = u8;

    fn state_at(&self, pos: CellPos) -> u8 {
        self.0[Self::idx(pos)]
    }

    fn has_content(&self, state: u8) -> bool {
        state != AIR
    }

    fn closed_at(&self, state: u8, _pos: CellPos) -> bool {
        state == STONE
    }
}

fn arb_grid() -> impl Strategy<Value = Grid> {
    // weighted so both open and sealed pockets show up
    let cell = prop_oneof![3 => Just(AIR), 4 => Just(STONE), 1 => Just(GLASS)];
    prop::collection::vec(cell, 18 * 18 * 18).prop_map(Grid)
}

fn arb_plane() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(any::<u64>(), 64)
}

fn run(grid: &Grid, is_near: bool) -> (RegionOcclusion, RenderList) {
    let mut occ = RegionOcclusion::new();
    occ.prepare(grid);
    let list = occ.build(is_near);
    (occ, list)
}

fn coverage(boxes: &[PackedBox], p: CellPos) -> usize {
    boxes
        .iter()
        .filter(|b| b.cell_box().contains(p.x as u8, p.y as u8, p.z as u8))
        .count()
}

fn expected_bounds(occ: &RegionOcclusion) -> Option<CellBox> {
    let mut min = [u8::MAX; 3];
    let mut max = [0u8; 3];
    let mut any = false;
    for i in InteriorIndex::all().filter(|i| occ.should_render(*i)) {
        any = true;
        let p = [i.x() as u8, i.y() as u8, i.z() as u8];
        for a in 0..3 {
            min[a] = min[a].min(p[a]);
            max[a] = max[a].max(p[a] + 1);
        }
    }
    any.then(|| CellBox::new(min, max))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Boxes partition the renderable cells and bounds are the tight hull
    #[test]
    fn render_list_matches_renderable_plane(grid in arb_grid(), is_near in any::<bool>()) {
        let (occ, list) = run(&grid, is_near);
        prop_assume!(occ.open_count() > 0);

        for i in InteriorIndex::all() {
            let want = usize::from(occ.should_render(i));
            prop_assert_eq!(coverage(list.boxes(), i.pos()), want);
        }
        let bounds = expected_bounds(&occ);
        prop_assert_eq!(occ.bounds(), bounds);
        match bounds {
            None => prop_assert_eq!(list.bounds(), PackedBox::EMPTY),
            Some(b) if b == CellBox::FULL => prop_assert_eq!(list.bounds(), PackedBox::FULL),
            Some(b) => {
                prop_assert!(!b.is_empty());
                prop_assert_eq!(list.bounds(), PackedBox::pack(b, BoxRange::Extreme));
            }
        }
    }

    // Only cells with content render; near keeps all of them, far drops buried ones
    #[test]
    fn hiding_only_removes_unreachable_cells(grid in arb_grid()) {
        let (near, _) = run(&grid, true);
        let (far, _) = run(&grid, false);
        prop_assume!(near.open_count() > 0);

        for i in InteriorIndex::all() {
            let content = grid.has_content(grid.state_at(i.pos()));
            prop_assert_eq!(near.should_render(i), content);
            if far.should_render(i) {
                prop_assert!(near.should_render(i));
                prop_assert!(i.pos().is_shell() || far.is_exterior_visible(i));
            }
            prop_assert_eq!(far.is_exterior_visible(i), near.is_exterior_visible(i));
        }
    }

    // Open count equals interior cells without closure
    #[test]
    fn open_count_tracks_interior_closure(grid in arb_grid()) {
        let mut occ = RegionOcclusion::new();
        occ.prepare(&grid);
        let closed = InteriorIndex::all()
            .filter(|i| grid.state_at(i.pos()) == STONE)
            .count();
        prop_assert_eq!(occ.open_count(), 4096 - closed);
        prop_assert_eq!(occ.closed_count(), closed);
    }

    // A reused analyzer answers exactly like a fresh one
    #[test]
    fn reused_analyzer_matches_fresh(a in arb_grid(), b in arb_grid(), is_near in any::<bool>()) {
        let mut occ = RegionOcclusion::new();
        occ.prepare(&a);
        let _ = occ.build(is_near);
        occ.prepare(&b);
        let reused = occ.build(is_near);
        let (fresh, expected) = run(&b, is_near);
        prop_assert_eq!(reused, expected);
        prop_assert_eq!(occ.renderable_count(), fresh.renderable_count());
        prop_assert_eq!(occ.closed_count(), fresh.closed_count());
    }

    // Decomposition is exact, disjoint, largest first and tagged by volume
    #[test]
    fn box_finder_partitions_plane(words in arb_plane()) {
        let mut plane = [0u64; 64];
        plane.copy_from_slice(&words);
        let mut finder = BoxFinder::new();
        let boxes = finder.find_boxes(&plane).to_vec();

        for (n, b) in boxes.iter().enumerate() {
            let cb = b.cell_box();
            prop_assert!(!cb.is_empty());
            prop_assert_eq!(b.range(), BoxRange::for_volume(cb.volume()));
            if n > 0 {
                prop_assert!(boxes[n - 1].cell_box().volume() >= cb.volume());
            }
        }
        for i in InteriorIndex::all() {
            let set = plane[i.get() >> 6] & (1u64 << (i.get() & 63)) != 0;
            prop_assert_eq!(coverage(&boxes, i.pos()), usize::from(set));
        }
        prop_assert_eq!(finder.find_boxes(&plane), &boxes[..]);
    }
}
