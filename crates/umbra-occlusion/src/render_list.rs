use umbra_geom::{CellBox, PackedBox};

/// Slot holding the region's renderable bounds.
pub const REGION_BOUNDS: usize = 0;
/// First decomposed box.
pub const FIRST_BOX: usize = 1;

/// Result of one analysis: renderable bounds followed by the renderable boxes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderList(Vec<PackedBox>);

impl RenderList {
    /// Nothing to draw.
    pub fn empty() -> Self {
        RenderList(vec![PackedBox::EMPTY])
    }

    /// Solid region; bounds and the single box both span the region.
    pub fn full() -> Self {
        RenderList(vec![PackedBox::FULL, PackedBox::FULL])
    }

    pub(crate) fn from_parts(bounds: PackedBox, boxes: &[PackedBox]) -> Self {
        let mut v = Vec::with_capacity(boxes.len() + 1);
        v.push(bounds);
        v.extend_from_slice(boxes);
        RenderList(v)
    }

    #[inline]
    pub fn bounds(&self) -> PackedBox {
        self.0[REGION_BOUNDS]
    }

    /// Renderable bounds as a box, `None` for an empty region.
    pub fn bounds_box(&self) -> Option<CellBox> {
        let b = self.bounds();
        (!b.is_empty()).then(|| b.cell_box())
    }

    #[inline]
    pub fn boxes(&self) -> &[PackedBox] {
        &self.0[FIRST_BOX..]
    }

    #[inline]
    pub fn box_count(&self) -> usize {
        self.0.len() - FIRST_BOX
    }

    #[inline]
    pub fn as_slice(&self) -> &[PackedBox] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; the bounds slot is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_empty_region(&self) -> bool {
        self.bounds().is_empty()
    }

    pub fn is_full_region(&self) -> bool {
        self.bounds().is_full()
    }

    pub fn into_vec(self) -> Vec<PackedBox> {
        self.0
    }
}

impl AsRef<[PackedBox]> for RenderList {
    fn as_ref(&self) -> &[PackedBox] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_lists() {
        let e = RenderList::empty();
        assert!(e.is_empty_region());
        assert_eq!(e.box_count(), 0);
        assert_eq!(e.bounds_box(), None);

        let f = RenderList::full();
        assert!(f.is_full_region());
        assert_eq!(f.boxes(), &[PackedBox::FULL]);
        assert_eq!(f.bounds_box(), Some(CellBox::FULL));
    }
}
