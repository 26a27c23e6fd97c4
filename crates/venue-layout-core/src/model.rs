//! Venue layout document: sections, table positions and drawn geometry.
//!
//! Positions are stored in percent of the canvas (0-100) so they survive
//! any canvas size. Table sizes are stored in absolute pixels so a table
//! glyph looks the same on every screen.

use crate::error::{LayoutError, LayoutResult};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size (in pixels) of a table glyph dropped from the palette.
pub const DEFAULT_TABLE_SIZE_PX: f64 = 48.0;

/// Default display font size for table labels.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

/// Visual shape of a table glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Circle,
    #[default]
    Square,
}

/// Committed position of one table on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TablePosition {
    /// Left edge, percent of canvas width.
    pub x: f64,
    /// Top edge, percent of canvas height.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    #[serde(default)]
    pub shape: TableShape,
    #[serde(default)]
    pub placed: bool,
}

impl TablePosition {
    /// A table placed with its top-left corner at `origin` (percent).
    pub fn placed(origin: Point, size_px: Size, shape: TableShape) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size_px.width,
            height: size_px.height,
            shape,
            placed: true,
        }
    }

    /// Placeholder for a table that still lives in the palette.
    pub fn unplaced() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: DEFAULT_TABLE_SIZE_PX,
            height: DEFAULT_TABLE_SIZE_PX,
            shape: TableShape::default(),
            placed: false,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size_px(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same table moved to a new top-left corner.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.x = origin.x;
        self.y = origin.y;
        self
    }
}

/// A named group of tables sharing configuration (e.g. "VIP").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub table_count: usize,
    #[serde(default)]
    pub table_names: Vec<String>,
    /// Seats per table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Parallel to `table_names`; may be shorter than `table_count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_positions: Option<Vec<TablePosition>>,
}

impl Section {
    /// Create a section with `table_count` tables named "1".."n".
    pub fn new(id: impl Into<String>, name: impl Into<String>, table_count: usize) -> Self {
        let table_count = table_count.max(1);
        Self {
            id: id.into(),
            name: name.into(),
            table_count,
            table_names: (1..=table_count).map(|i| i.to_string()).collect(),
            capacity: None,
            table_positions: None,
        }
    }

    /// Display name of a table, falling back to its 1-based number.
    pub fn table_name(&self, index: usize) -> Option<String> {
        if index >= self.table_count {
            return None;
        }
        Some(
            self.table_names
                .get(index)
                .cloned()
                .unwrap_or_else(|| (index + 1).to_string()),
        )
    }

    /// The committed position of a table, if it has been placed.
    pub fn placed_position(&self, index: usize) -> Option<&TablePosition> {
        if index >= self.table_count {
            return None;
        }
        self.table_positions
            .as_ref()
            .and_then(|positions| positions.get(index))
            .filter(|pos| pos.placed)
    }

    pub fn is_placed(&self, index: usize) -> bool {
        self.placed_position(index).is_some()
    }

    /// Indices of tables shown on the canvas.
    pub fn placed_indices(&self) -> Vec<usize> {
        (0..self.table_count).filter(|&i| self.is_placed(i)).collect()
    }

    /// Indices of tables shown in the palette.
    pub fn palette_indices(&self) -> Vec<usize> {
        (0..self.table_count).filter(|&i| !self.is_placed(i)).collect()
    }

    /// Full replacement positions array with one entry changed.
    pub fn positions_with(&self, index: usize, position: TablePosition) -> Vec<TablePosition> {
        self.positions_with_many(&[(index, position)])
    }

    /// Full replacement positions array with several entries changed at once.
    ///
    /// Missing entries before the highest touched index are padded with
    /// unplaced placeholders.
    pub fn positions_with_many(&self, updates: &[(usize, TablePosition)]) -> Vec<TablePosition> {
        let mut positions = self.table_positions.clone().unwrap_or_default();
        for &(index, position) in updates {
            if index >= self.table_count {
                log::warn!(
                    "Ignoring position for table {} of section {} ({} tables)",
                    index,
                    self.id,
                    self.table_count
                );
                continue;
            }
            if positions.len() <= index {
                positions.resize(index + 1, TablePosition::unplaced());
            }
            positions[index] = position;
        }
        positions
    }

    /// Full replacement positions array with a table returned to the palette.
    pub fn positions_without(&self, index: usize) -> Vec<TablePosition> {
        let mut positions = self.table_positions.clone().unwrap_or_default();
        if let Some(pos) = positions.get_mut(index) {
            *pos = TablePosition::unplaced();
        }
        positions
    }

    /// Append a table to the section.
    pub fn add_table(&mut self, name: impl Into<String>) {
        self.table_names.truncate(self.table_count);
        while self.table_names.len() < self.table_count {
            let next = self.table_names.len() + 1;
            self.table_names.push(next.to_string());
        }
        self.table_names.push(name.into());
        self.table_count += 1;
    }

    /// Remove a table, keeping names and positions parallel.
    ///
    /// A section always keeps at least one table.
    pub fn remove_table(&mut self, index: usize) -> LayoutResult<()> {
        if index >= self.table_count {
            return Err(LayoutError::TableIndexOutOfRange {
                section: self.id.clone(),
                index,
                count: self.table_count,
            });
        }
        if self.table_count <= 1 {
            return Err(LayoutError::TableCountFloor(self.id.clone()));
        }
        if index < self.table_names.len() {
            self.table_names.remove(index);
        }
        if let Some(positions) = self.table_positions.as_mut() {
            if index < positions.len() {
                positions.remove(index);
            }
        }
        self.table_count -= 1;
        Ok(())
    }

    pub fn rename_table(&mut self, index: usize, name: impl Into<String>) -> LayoutResult<()> {
        if index >= self.table_count {
            return Err(LayoutError::TableIndexOutOfRange {
                section: self.id.clone(),
                index,
                count: self.table_count,
            });
        }
        while self.table_names.len() <= index {
            let next = self.table_names.len() + 1;
            self.table_names.push(next.to_string());
        }
        self.table_names[index] = name.into();
        Ok(())
    }
}

/// Partial changes to a section, applied by the owner of the section list.
///
/// The editor only ever sets `table_positions`, and always as a full array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub name: Option<String>,
    pub table_count: Option<usize>,
    pub table_names: Option<Vec<String>>,
    pub table_positions: Option<Vec<TablePosition>>,
}

impl SectionPatch {
    pub fn positions(positions: Vec<TablePosition>) -> Self {
        Self {
            table_positions: Some(positions),
            ..Self::default()
        }
    }

    pub fn apply_to(self, section: &mut Section) {
        if let Some(name) = self.name {
            section.name = name;
        }
        if let Some(count) = self.table_count {
            section.table_count = count.max(1);
        }
        if let Some(names) = self.table_names {
            section.table_names = names;
        }
        if let Some(positions) = self.table_positions {
            section.table_positions = Some(positions);
        }
    }
}

/// The single rectangle describing the venue's outer walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueBoundary {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

impl VenueBoundary {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            locked: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Which end of a line segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    pub fn opposite(self) -> Self {
        match self {
            Endpoint::Start => Endpoint::End,
            Endpoint::End => Endpoint::Start,
        }
    }
}

/// A straight wall or divider segment, in percent coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLine {
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Lines sharing a path id move, lock and delete together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
}

impl VenueLine {
    pub fn new(id: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            id: id.into(),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            path_id: None,
            locked: false,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn point(&self, endpoint: Endpoint) -> Point {
        match endpoint {
            Endpoint::Start => self.start(),
            Endpoint::End => self.end(),
        }
    }

    pub fn set_point(&mut self, endpoint: Endpoint, point: Point) {
        match endpoint {
            Endpoint::Start => {
                self.x1 = point.x;
                self.y1 = point.y;
            }
            Endpoint::End => {
                self.x2 = point.x;
                self.y2 = point.y;
            }
        }
    }

    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            self.x1.max(self.x2),
            self.y1.max(self.y2),
        )
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        let mut line = self.clone();
        line.x1 += delta.x;
        line.y1 += delta.y;
        line.x2 += delta.x;
        line.y2 += delta.y;
        line
    }
}

/// Hand-drawn venue geometry: zero or one boundary plus line paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawnVenueLayout {
    #[serde(default)]
    pub boundary: Option<VenueBoundary>,
    #[serde(default)]
    pub lines: Vec<VenueLine>,
}

/// Shared empty layout for hosts that have not drawn anything yet.
pub static EMPTY_DRAWN_LAYOUT: DrawnVenueLayout = DrawnVenueLayout {
    boundary: None,
    lines: Vec::new(),
};

impl DrawnVenueLayout {
    pub fn is_empty(&self) -> bool {
        self.boundary.is_none() && self.lines.is_empty()
    }

    pub fn line(&self, id: &str) -> Option<&VenueLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Copy with the given lines replaced by id; unknown ids are ignored.
    pub fn with_lines_replaced(&self, updated: &[VenueLine]) -> Self {
        let by_id: BTreeMap<&str, &VenueLine> =
            updated.iter().map(|line| (line.id.as_str(), line)).collect();
        Self {
            boundary: self.boundary,
            lines: self
                .lines
                .iter()
                .map(|line| by_id.get(line.id.as_str()).map_or_else(|| line.clone(), |l| (*l).clone()))
                .collect(),
        }
    }

    /// Copy without the lines whose ids are listed.
    pub fn with_lines_removed<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let ids: Vec<&str> = ids.into_iter().collect();
        Self {
            boundary: self.boundary,
            lines: self
                .lines
                .iter()
                .filter(|line| !ids.contains(&line.id.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn with_line_added(&self, line: VenueLine) -> Self {
        let mut next = self.clone();
        next.lines.push(line);
        next
    }

    pub fn with_boundary(&self, boundary: Option<VenueBoundary>) -> Self {
        Self {
            boundary,
            lines: self.lines.clone(),
        }
    }
}

/// An additional named floor plan with its own background and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_layout: Option<DrawnVenueLayout>,
}

/// The persisted venue layout document, owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLayout {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawn_layout: Option<DrawnVenueLayout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layouts: Vec<FloorPlan>,
    /// Floor plan currently being edited (None = the root plan).
    #[serde(skip)]
    active_floor: Option<String>,
}

impl Default for VenueLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl VenueLayout {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            image_url: None,
            drawn_layout: None,
            layouts: Vec::new(),
            active_floor: None,
        }
    }

    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections,
            ..Self::new()
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.id == id)
    }

    pub fn set_font_size(&mut self, font_size: f64) {
        self.font_size = font_size.max(1.0);
    }

    /// Add a table to a section (the table-service form's job, exposed for tooling).
    pub fn add_table(&mut self, section_id: &str, name: impl Into<String>) -> LayoutResult<()> {
        let section = self
            .section_mut(section_id)
            .ok_or_else(|| LayoutError::UnknownSection(section_id.to_string()))?;
        section.add_table(name);
        Ok(())
    }

    pub fn remove_table(&mut self, section_id: &str, index: usize) -> LayoutResult<()> {
        let section = self
            .section_mut(section_id)
            .ok_or_else(|| LayoutError::UnknownSection(section_id.to_string()))?;
        section.remove_table(index)
    }

    pub fn add_floor_plan(&mut self, name: impl Into<String>, image_url: Option<String>) -> LayoutResult<()> {
        let name = name.into();
        if self.layouts.iter().any(|plan| plan.name == name) {
            return Err(LayoutError::DuplicateFloorPlan(name));
        }
        self.layouts.push(FloorPlan {
            name,
            image_url,
            drawn_layout: None,
        });
        Ok(())
    }

    pub fn remove_floor_plan(&mut self, name: &str) -> LayoutResult<FloorPlan> {
        let index = self
            .layouts
            .iter()
            .position(|plan| plan.name == name)
            .ok_or_else(|| LayoutError::UnknownFloorPlan(name.to_string()))?;
        if self.active_floor.as_deref() == Some(name) {
            self.active_floor = None;
        }
        Ok(self.layouts.remove(index))
    }

    /// Choose which floor plan the editor reads and writes (None = root plan).
    pub fn select_floor_plan(&mut self, name: Option<&str>) -> LayoutResult<()> {
        match name {
            None => self.active_floor = None,
            Some(name) => {
                if !self.layouts.iter().any(|plan| plan.name == name) {
                    return Err(LayoutError::UnknownFloorPlan(name.to_string()));
                }
                self.active_floor = Some(name.to_string());
            }
        }
        Ok(())
    }

    pub fn active_floor_plan(&self) -> Option<&str> {
        self.active_floor.as_deref()
    }

    fn active_plan(&self) -> Option<&FloorPlan> {
        let name = self.active_floor.as_deref()?;
        self.layouts.iter().find(|plan| plan.name == name)
    }

    /// Background image of the active floor plan.
    pub fn active_image_url(&self) -> Option<&str> {
        match self.active_plan() {
            Some(plan) => plan.image_url.as_deref(),
            None => self.image_url.as_deref(),
        }
    }

    /// Drawn geometry of the active floor plan.
    pub fn active_drawn_layout(&self) -> &DrawnVenueLayout {
        let drawn = match self.active_plan() {
            Some(plan) => plan.drawn_layout.as_ref(),
            None => self.drawn_layout.as_ref(),
        };
        drawn.unwrap_or(&EMPTY_DRAWN_LAYOUT)
    }

    pub fn set_active_drawn_layout(&mut self, layout: DrawnVenueLayout) {
        if let Some(name) = self.active_floor.clone() {
            if let Some(plan) = self.layouts.iter_mut().find(|plan| plan.name == name) {
                plan.drawn_layout = Some(layout);
                return;
            }
            log::warn!("Active floor plan {} vanished; writing to root plan", name);
            self.active_floor = None;
        }
        self.drawn_layout = Some(layout);
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a layout from JSON.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let layout: Self = serde_json::from_str(json)?;
        for section in &layout.sections {
            let stored = section.table_positions.as_ref().map_or(0, Vec::len);
            if stored > section.table_count {
                log::warn!(
                    "Section {} stores {} positions for {} tables; extra entries are ignored",
                    section.id,
                    stored,
                    section.table_count
                );
            }
        }
        Ok(layout)
    }
}
