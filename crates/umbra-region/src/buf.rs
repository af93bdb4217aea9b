use umbra_blocks::Block;

use crate::coord::{REGION_SIZE, RegionCoord};

const PADDED: i32 = REGION_SIZE + 2;
const PADDED_LEN: usize = (PADDED * PADDED * PADDED) as usize;

/// Blocks of one region plus the one-cell halo borrowed from its neighbors.
///
/// Local coordinates run `-1..=16` on every axis; `0..16` is the region itself.
#[derive(Clone, Debug)]
pub struct RegionBuf {
    pub coord: RegionCoord,
    pub blocks: Vec<Block>,
}

impl RegionBuf {
    pub fn new(coord: RegionCoord) -> Self {
        Self::filled(coord, Block::AIR)
    }

    pub fn filled(coord: RegionCoord, block: Block) -> Self {
        RegionBuf {
            coord,
            blocks: vec![block; PADDED_LEN],
        }
    }

    /// Samples every local cell, halo included, from world coordinates.
    pub fn from_world_fn(coord: RegionCoord, mut f: impl FnMut(i32, i32, i32) -> Block) -> Self {
        let (ox, oy, oz) = coord.origin();
        let mut blocks = Vec::with_capacity(PADDED_LEN);
        for z in -1..=REGION_SIZE {
            for y in -1..=REGION_SIZE {
                for x in -1..=REGION_SIZE {
                    blocks.push(f(ox + x, oy + y, oz + z));
                }
            }
        }
        RegionBuf { coord, blocks }
    }

    #[inline]
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        let r = -1..=REGION_SIZE;
        r.contains(&x) && r.contains(&y) && r.contains(&z)
    }

    #[inline]
    fn idx(x: i32, y: i32, z: i32) -> usize {
        debug_assert!(Self::contains_local(x, y, z), "({x},{y},{z}) outside padded region");
        ((x + 1) + PADDED * ((y + 1) + PADDED * (z + 1))) as usize
    }

    #[inline]
    pub fn get_local(&self, x: i32, y: i32, z: i32) -> Block {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: i32, y: i32, z: i32, block: Block) {
        let i = Self::idx(x, y, z);
        self.blocks[i] = block;
    }

    /// Fills the inclusive box `min..=max`, clipped to the padded region.
    /// Returns the number of cells written.
    pub fn fill_box(&mut self, min: [i32; 3], max: [i32; 3], block: Block) -> usize {
        let lo = min.map(|v| v.max(-1));
        let hi = max.map(|v| v.min(REGION_SIZE));
        let mut n = 0;
        for z in lo[2]..=hi[2] {
            for y in lo[1]..=hi[1] {
                for x in lo[0]..=hi[0] {
                    self.set_local(x, y, z, block);
                    n += 1;
                }
            }
        }
        n
    }

    pub fn fill_interior(&mut self, block: Block) {
        let last = REGION_SIZE - 1;
        self.fill_box([0, 0, 0], [last, last, last], block);
    }

    /// Iterates the region's own cells with their local coordinates.
    pub fn interior(&self) -> impl Iterator<Item = ((i32, i32, i32), Block)> + '_ {
        (0..REGION_SIZE).flat_map(move |z| {
            (0..REGION_SIZE).flat_map(move |y| {
                (0..REGION_SIZE).map(move |x| ((x, y, z), self.get_local(x, y, z)))
            })
        })
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.interior().any(|(_, b)| b != Block::AIR)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}
