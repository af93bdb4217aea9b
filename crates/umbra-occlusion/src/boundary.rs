//! Enumerated face, edge and corner tables of the region boundary.
//!
//! Every table row is written out by hand. Faces touch one neighbor region,
//! edges two and corners three, and the suppression rules below depend on
//! exactly that arity.

use crate::address::CellPos;
use crate::constants::{REGION_DIM, REGION_LAST};

/// One coordinate of a boundary pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Coord {
    /// First interior layer (0).
    Min,
    /// Last interior layer (15).
    Max,
    /// Halo layer before the region (-1).
    Below,
    /// Halo layer after the region (16).
    Above,
    /// First free axis.
    U,
    /// Second free axis.
    V,
}

use Coord::{Above, Below, Max, Min, U, V};

pub(crate) type Pattern = [Coord; 3];

#[inline]
const fn resolve(c: Coord, u: i32, v: i32) -> i32 {
    match c {
        Min => 0,
        Max => REGION_LAST,
        Below => -1,
        Above => REGION_DIM,
        U => u,
        V => v,
    }
}

#[inline]
pub(crate) const fn at(p: Pattern, u: i32, v: i32) -> CellPos {
    CellPos::new(resolve(p[0], u, v), resolve(p[1], u, v), resolve(p[2], u, v))
}

// Halo cells; free axes span 0..16.

pub(crate) const HALO_FACES: [Pattern; 6] = [
    [Below, U, V],
    [Above, U, V],
    [U, V, Below],
    [U, V, Above],
    [U, Below, V],
    [U, Above, V],
];

pub(crate) const HALO_EDGES: [Pattern; 12] = [
    [Below, Below, U],
    [Below, Above, U],
    [Above, Below, U],
    [Above, Above, U],
    [Below, U, Below],
    [Below, U, Above],
    [Above, U, Below],
    [Above, U, Above],
    [U, Below, Below],
    [U, Below, Above],
    [U, Above, Below],
    [U, Above, Above],
];

pub(crate) const HALO_CORNERS: [Pattern; 8] = [
    [Below, Below, Below],
    [Below, Below, Above],
    [Below, Above, Below],
    [Below, Above, Above],
    [Above, Below, Below],
    [Above, Below, Above],
    [Above, Above, Below],
    [Above, Above, Above],
];

/// Interior face cell and the halo cell across that face.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FaceRule {
    pub cell: Pattern,
    pub neighbor: Pattern,
}

/// Interior edge cell and the two face-adjacent halo cells.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EdgeRule {
    pub cell: Pattern,
    pub neighbors: [Pattern; 2],
}

/// Interior corner cell and the three face-adjacent halo cells.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CornerRule {
    pub cell: Pattern,
    pub neighbors: [Pattern; 3],
}

#[rustfmt::skip]
pub(crate) const FACE_RULES: [FaceRule; 6] = [
    FaceRule { cell: [Min, U, V], neighbor: [Below, U, V] },
    FaceRule { cell: [Max, U, V], neighbor: [Above, U, V] },
    FaceRule { cell: [U, V, Min], neighbor: [U, V, Below] },
    FaceRule { cell: [U, V, Max], neighbor: [U, V, Above] },
    FaceRule { cell: [U, Min, V], neighbor: [U, Below, V] },
    FaceRule { cell: [U, Max, V], neighbor: [U, Above, V] },
];

#[rustfmt::skip]
pub(crate) const EDGE_RULES: [EdgeRule; 12] = [
    // along Z
    EdgeRule { cell: [Min, Min, U], neighbors: [[Below, Min, U], [Min, Below, U]] },
    EdgeRule { cell: [Max, Min, U], neighbors: [[Above, Min, U], [Max, Below, U]] },
    EdgeRule { cell: [Min, Max, U], neighbors: [[Below, Max, U], [Min, Above, U]] },
    EdgeRule { cell: [Max, Max, U], neighbors: [[Above, Max, U], [Max, Above, U]] },
    // along X
    EdgeRule { cell: [U, Min, Min], neighbors: [[U, Min, Below], [U, Below, Min]] },
    EdgeRule { cell: [U, Min, Max], neighbors: [[U, Min, Above], [U, Below, Max]] },
    EdgeRule { cell: [U, Max, Min], neighbors: [[U, Max, Below], [U, Above, Min]] },
    EdgeRule { cell: [U, Max, Max], neighbors: [[U, Max, Above], [U, Above, Max]] },
    // along Y
    EdgeRule { cell: [Min, U, Min], neighbors: [[Below, U, Min], [Min, U, Below]] },
    EdgeRule { cell: [Max, U, Min], neighbors: [[Above, U, Min], [Max, U, Below]] },
    EdgeRule { cell: [Min, U, Max], neighbors: [[Below, U, Max], [Min, U, Above]] },
    EdgeRule { cell: [Max, U, Max], neighbors: [[Above, U, Max], [Max, U, Above]] },
];

pub(crate) const CORNER_RULES: [CornerRule; 8] = [
    CornerRule {
        cell: [Min, Min, Min],
        neighbors: [[Below, Min, Min], [Min, Below, Min], [Min, Min, Below]],
    },
    CornerRule {
        cell: [Max, Min, Min],
        neighbors: [[Above, Min, Min], [Max, Below, Min], [Max, Min, Below]],
    },
    CornerRule {
        cell: [Min, Max, Min],
        neighbors: [[Below, Max, Min], [Min, Above, Min], [Min, Max, Below]],
    },
    CornerRule {
        cell: [Max, Max, Min],
        neighbors: [[Above, Max, Min], [Max, Above, Min], [Max, Max, Below]],
    },
    CornerRule {
        cell: [Min, Min, Max],
        neighbors: [[Below, Min, Max], [Min, Below, Max], [Min, Min, Above]],
    },
    CornerRule {
        cell: [Max, Min, Max],
        neighbors: [[Above, Min, Max], [Max, Below, Max], [Max, Min, Above]],
    },
    CornerRule {
        cell: [Min, Max, Max],
        neighbors: [[Below, Max, Max], [Min, Above, Max], [Min, Max, Above]],
    },
    CornerRule {
        cell: [Max, Max, Max],
        neighbors: [[Above, Max, Max], [Max, Above, Max], [Max, Max, Above]],
    },
];

/// Every halo position, faces first, then edges, then corners.
pub(crate) fn halo_positions() -> impl Iterator<Item = CellPos> {
    let faces = HALO_FACES.into_iter().flat_map(|p| {
        (0..REGION_DIM).flat_map(move |u| (0..REGION_DIM).map(move |v| at(p, u, v)))
    });
    let edges = HALO_EDGES
        .into_iter()
        .flat_map(|p| (0..REGION_DIM).map(move |u| at(p, u, 0)));
    let corners = HALO_CORNERS.into_iter().map(|p| at(p, 0, 0));
    faces.chain(edges).chain(corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::CellAddress;
    use crate::constants::HALO_STATE_COUNT;
    use std::collections::HashSet;

    #[test]
    fn halo_tables_cover_every_halo_cell_once() {
        let mut seen = HashSet::new();
        for pos in halo_positions() {
            assert!(pos.is_halo(), "{:?}", pos);
            assert!(seen.insert(CellAddress::of(pos)), "duplicate {:?}", pos);
        }
        assert_eq!(seen.len(), HALO_STATE_COUNT);
    }

    fn adjacent(a: CellPos, b: CellPos) -> bool {
        (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs() == 1
    }

    #[test]
    fn rule_neighbors_are_face_adjacent_halo_cells() {
        for u in 1..REGION_LAST {
            for v in 1..REGION_LAST {
                for r in FACE_RULES {
                    let cell = at(r.cell, u, v);
                    assert!(cell.is_shell());
                    assert!(at(r.neighbor, u, v).is_halo());
                    assert!(adjacent(cell, at(r.neighbor, u, v)));
                }
            }
            for r in EDGE_RULES {
                let cell = at(r.cell, u, 0);
                for n in r.neighbors {
                    assert!(at(n, u, 0).is_halo());
                    assert!(adjacent(cell, at(n, u, 0)));
                }
                assert_ne!(at(r.neighbors[0], u, 0), at(r.neighbors[1], u, 0));
            }
        }
        for r in CORNER_RULES {
            let cell = at(r.cell, 0, 0);
            let ns: HashSet<_> = r.neighbors.iter().map(|n| at(*n, 0, 0)).collect();
            assert_eq!(ns.len(), 3);
            for n in ns {
                assert!(n.is_halo());
                assert!(adjacent(cell, n));
            }
        }
    }

    #[test]
    fn edge_and_corner_cells_are_distinct() {
        let edges: HashSet<_> = EDGE_RULES
            .iter()
            .flat_map(|r| (1..REGION_LAST).map(move |u| at(r.cell, u, 0)))
            .collect();
        assert_eq!(edges.len(), 12 * 14);
        let corners: HashSet<_> = CORNER_RULES.iter().map(|r| at(r.cell, 0, 0)).collect();
        assert_eq!(corners.len(), 8);
        assert!(edges.is_disjoint(&corners));
    }
}
