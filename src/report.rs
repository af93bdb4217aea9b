use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;
use umbra_occlusion::{BoxRange, PackedBox, RenderList};
use umbra_region::RegionCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Toml,
}

#[derive(Debug, Serialize)]
pub struct BoxEntry {
    pub min: [u8; 3],
    pub max: [u8; 3],
    pub range: &'static str,
    pub packed: u32,
}

impl From<PackedBox> for BoxEntry {
    fn from(b: PackedBox) -> Self {
        let (cb, range) = b.unpack();
        BoxEntry {
            min: cb.min,
            max: cb.max,
            range: range_name(range),
            packed: b.0,
        }
    }
}

fn range_name(r: BoxRange) -> &'static str {
    match r {
        BoxRange::Near => "near",
        BoxRange::Mid => "mid",
        BoxRange::Far => "far",
        BoxRange::Extreme => "extreme",
    }
}

#[derive(Debug, Serialize)]
pub struct RegionReport {
    pub coord: [i32; 3],
    pub near: bool,
    pub bounds: String,
    pub open_count: usize,
    pub renderable: usize,
    pub closed: usize,
    pub boxes: Vec<BoxEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occluders: Option<Vec<BoxEntry>>,
}

impl RegionReport {
    pub fn new(
        coord: RegionCoord,
        near: bool,
        list: &RenderList,
        counts: (usize, usize, usize),
        occluders: Option<Vec<PackedBox>>,
    ) -> Self {
        let bounds = if list.is_empty_region() {
            "empty".to_string()
        } else if list.is_full_region() {
            "full".to_string()
        } else {
            let b = list.bounds().cell_box();
            format!("{:?}..{:?}", b.min, b.max)
        };
        RegionReport {
            coord: [coord.rx, coord.ry, coord.rz],
            near,
            bounds,
            open_count: counts.0,
            renderable: counts.1,
            closed: counts.2,
            boxes: list.boxes().iter().copied().map(BoxEntry::from).collect(),
            occluders: occluders.map(|o| o.into_iter().map(BoxEntry::from).collect()),
        }
    }

    pub fn render(&self, format: Format) -> Result<String, toml::ser::Error> {
        match format {
            Format::Toml => toml::to_string_pretty(self),
            Format::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "region {:?} near={}", self.coord, self.near);
        let _ = writeln!(
            s,
            "  open={} renderable={} closed={}",
            self.open_count, self.renderable, self.closed
        );
        let _ = writeln!(s, "  bounds {}", self.bounds);
        let _ = writeln!(s, "  {} box(es)", self.boxes.len());
        for b in &self.boxes {
            let _ = writeln!(s, "    {:?}..{:?} {}", b.min, b.max, b.range);
        }
        if let Some(occ) = &self.occluders {
            let _ = writeln!(s, "  {} occluder box(es)", occ.len());
            for b in occ {
                let _ = writeln!(s, "    {:?}..{:?} {}", b.min, b.max, b.range);
            }
        }
        s
    }
}
