//! Drives a [`LayoutEditor`] through a script against an in-memory layout.

use crate::error::{AppError, AppResult};
use crate::script::{ScriptStep, key_event, modifiers};
use kurbo::{Point, Vec2};
use venue_layout_core::{
    DrawnVenueLayout, EditorConfig, LayoutEditor, LayoutHost, Section, SectionPatch, TableKey,
    VenueLayout, Viewport,
};

/// Host that owns the layout and counts the callbacks it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub layout: VenueLayout,
    pub section_updates: usize,
    pub drawn_updates: usize,
}

impl RecordingHost {
    pub fn new(layout: VenueLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }
}

impl LayoutHost for RecordingHost {
    fn sections(&self) -> &[Section] {
        self.layout.sections()
    }

    fn drawn_layout(&self) -> &DrawnVenueLayout {
        self.layout.drawn_layout()
    }

    fn has_background_image(&self) -> bool {
        self.layout.has_background_image()
    }

    fn update_section(&mut self, section_id: &str, patch: SectionPatch) {
        self.section_updates += 1;
        self.layout.update_section(section_id, patch);
    }

    fn update_drawn_layout(&mut self, layout: DrawnVenueLayout) {
        self.drawn_updates += 1;
        self.layout.update_drawn_layout(layout);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub steps: usize,
    pub section_updates: usize,
    pub drawn_updates: usize,
}

pub struct Replay {
    host: RecordingHost,
    editor: LayoutEditor,
    viewport: Viewport,
}

impl Replay {
    pub fn new(layout: VenueLayout, config: EditorConfig, viewport: Viewport) -> Self {
        let editor = LayoutEditor::new(config, viewport.metrics());
        Self {
            host: RecordingHost::new(layout),
            editor,
            viewport,
        }
    }

    pub fn layout(&self) -> &VenueLayout {
        &self.host.layout
    }

    pub fn editor(&self) -> &LayoutEditor {
        &self.editor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn into_layout(self) -> VenueLayout {
        self.host.layout
    }

    pub fn run(&mut self, steps: &[ScriptStep]) -> AppResult<ReplaySummary> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        Ok(ReplaySummary {
            steps: steps.len(),
            section_updates: self.host.section_updates,
            drawn_updates: self.host.drawn_updates,
        })
    }

    /// Apply one step. `index` is only used for error reporting.
    pub fn apply(&mut self, index: usize, step: &ScriptStep) -> AppResult<()> {
        log::trace!("Step {}: {:?}", index, step);
        let script_error = |message: String| AppError::Script { step: index, message };

        let applied = match step {
            ScriptStep::PointerDown { x, y, shift } => {
                let position = finite_point(*x, *y).ok_or_else(|| script_error("non-finite coordinate".into()))?;
                self.editor.pointer_down(&mut self.host, position, modifiers(*shift));
                true
            }
            ScriptStep::PointerMove { x, y, shift } => {
                let position = finite_point(*x, *y).ok_or_else(|| script_error("non-finite coordinate".into()))?;
                self.editor.pointer_move(&mut self.host, position, modifiers(*shift));
                true
            }
            ScriptStep::PointerUp { x, y, shift } => {
                let position = finite_point(*x, *y).ok_or_else(|| script_error("non-finite coordinate".into()))?;
                self.editor.pointer_up(&mut self.host, position, modifiers(*shift));
                true
            }
            ScriptStep::PaletteDrag { section, index: table, x, y } => {
                let position = finite_point(*x, *y).ok_or_else(|| script_error("non-finite coordinate".into()))?;
                self.editor.begin_palette_drag(
                    &self.host,
                    TableKey::new(section.clone(), *table),
                    position,
                    modifiers(false),
                )
            }
            ScriptStep::KeyDown { key, shift, in_text_field } => {
                self.editor.key_down(&mut self.host, &key_event(key, *shift, *in_text_field))
            }
            ScriptStep::KeyUp { key } => {
                self.editor.key_up(&mut self.host, &key_event(key, false, false));
                true
            }
            ScriptStep::Mode { mode } => self.editor.set_mode(&self.host, *mode),
            ScriptStep::Align { mode } => self.editor.align_selected(&mut self.host, *mode),
            ScriptStep::Distribute { axis } => self.editor.distribute_selected(&mut self.host, *axis),
            ScriptStep::SelectSection { section } => {
                if self.host.section(section).is_none() {
                    return Err(script_error(format!("unknown section {section}")));
                }
                self.editor.select_all_in_section(&self.host, section) > 0
            }
            ScriptStep::ClearSelection => {
                self.editor.clear_selection();
                true
            }
            ScriptStep::ToggleLock => self.editor.toggle_lock_selected(&mut self.host),
            ScriptStep::Delete => self.editor.delete_selected_drawn(&mut self.host),
            ScriptStep::Unplace => self.editor.unplace_selected_tables(&mut self.host),
            ScriptStep::Escape => {
                self.editor.escape();
                true
            }
            ScriptStep::Zoom { factor, x, y } => {
                self.viewport.zoom_at(Point::new(*x, *y), *factor);
                self.editor.set_metrics(self.viewport.metrics());
                true
            }
            ScriptStep::Pan { dx, dy } => {
                self.viewport.pan_by(Vec2::new(*dx, *dy));
                self.editor.set_metrics(self.viewport.metrics());
                true
            }
            ScriptStep::ResetView => {
                self.viewport.reset();
                self.editor.set_metrics(self.viewport.metrics());
                true
            }
            ScriptStep::SelectFloor { name } => {
                self.host.layout.select_floor_plan(name.as_deref())?;
                self.editor.escape();
                true
            }
            ScriptStep::AddTable { section, name } => {
                self.host.layout.add_table(section, name.clone())?;
                true
            }
            ScriptStep::RemoveTable { section, index: table } => {
                self.host.layout.remove_table(section, *table)?;
                true
            }
            ScriptStep::FontSize { size } => {
                self.host.layout.set_font_size(*size);
                true
            }
        };

        if !applied {
            log::info!("Step {} ({}) had no effect", index, step.name());
        }
        Ok(())
    }
}

fn finite_point(x: f64, y: f64) -> Option<Point> {
    (x.is_finite() && y.is_finite()).then(|| Point::new(x, y))
}
