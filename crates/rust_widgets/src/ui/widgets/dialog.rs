//! Modal message dialog
//!
//! A dialog is opened explicitly and holds event suppression until it is
//! decided. While it is open every other widget is inert and only the
//! restricted [`ModalAction`] set reaches it. At most one dialog is open.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::{emit, Callback};
use crate::config::ToolkitConfig;
use crate::error::{WidgetError, WidgetResult};
use crate::foundation::math::{colors, Color};
use crate::ui::bbox::Rect;
use crate::ui::frame::FrameContext;
use crate::ui::identity::{Geometry, Handle, Widget};
use crate::ui::modal::{EventGate, ModalAction};
use crate::ui::rendering::{text_units, Canvas, GlyphMetrics, IconId, IconRegistry, ImageHandle};

const MARGIN: f64 = 300.0;
const BODY_EXTRA: f64 = 330.0;
const LINE_PITCH: f64 = 50.0;
const BUTTON_HEIGHT: f64 = 60.0;
const OK_WIDTH: f64 = 102.0;

/// How a dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Confirmed
    Ok,
    /// Cancelled or force-closed
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Select {
    None,
    Ok,
    Cancel,
}

/// Centred message box with OK and optional Cancel
pub struct Dialog {
    geometry: Geometry,
    lines: Vec<(String, f64)>,
    widest: f64,
    need_cancel: bool,
    icon: Option<ImageHandle>,
    body_height: f64,
    ok_box: Rect,
    cancel_box: Rect,
    select: Select,
    fill: Color,
    border: Color,
    decided: Callback<Decision>,
    metrics: GlyphMetrics,
}

impl Widget for Dialog {
    fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Dialog {
    /// Subscribe to the decision; fires once per opening
    pub fn set_decided(&mut self, f: impl FnMut(Decision) + 'static) {
        self.decided.set(f);
    }

    /// Show a registered icon above the message; false for an unknown id
    pub fn set_icon(&mut self, icons: &IconRegistry, id: IconId) -> bool {
        let Some(image) = icons.get(id) else {
            return false;
        };
        let width = self.geometry.width;
        self.geometry.resize(width, self.body_height + f64::from(image.height));
        self.icon = Some(image.clone());
        true
    }

    /// Whether the dialog offers Cancel
    pub const fn needs_cancel(&self) -> bool {
        self.need_cancel
    }

    /// Message lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(line, _)| line.as_str())
    }

    /// Map a restricted action onto a decision
    fn decide(&self, action: ModalAction) -> Option<Decision> {
        match action {
            ModalAction::Click => match self.select {
                Select::Ok => Some(Decision::Ok),
                Select::Cancel => Some(Decision::Cancel),
                Select::None => None,
            },
            ModalAction::EnterKey => Some(Decision::Ok),
            ModalAction::EscapeKey if self.need_cancel => Some(Decision::Cancel),
            ModalAction::EscapeKey => Some(Decision::Ok),
            ModalAction::Release => None,
        }
    }

    fn layout(&mut self, window: (f64, f64), pointer: (f64, f64)) {
        let (w, h) = (self.geometry.width, self.geometry.height);
        let x = (window.0 - w) * 0.5;
        let y = (window.1 - h) * 0.5;
        self.geometry.move_to(x, y);
        let top = y + h - 130.0;
        let (px, py) = pointer;
        if self.need_cancel {
            let cancel_width = 6.0 * self.metrics.advance + 60.0;
            let cancel_x = x + w * 0.3 - (30.0 + 3.0 * self.metrics.advance);
            self.cancel_box = Rect::at(cancel_x, top, cancel_width, BUTTON_HEIGHT);
            self.ok_box = Rect::at(x + w * 0.7 - OK_WIDTH * 0.5, top, OK_WIDTH, BUTTON_HEIGHT);
            self.select = if self.cancel_box.contains(px, py) {
                Select::Cancel
            } else if self.ok_box.contains(px, py) {
                Select::Ok
            } else {
                Select::None
            };
        } else {
            self.ok_box = Rect::at(x + w * 0.5 - OK_WIDTH * 0.5, top, OK_WIDTH, BUTTON_HEIGHT);
            self.select = if self.ok_box.contains(px, py) { Select::Ok } else { Select::None };
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let bbox = self.geometry.bounding_box();
        canvas.draw_box(bbox, self.fill, true, -0.9);
        canvas.draw_box(bbox, self.border, false, -0.92);

        let mut y = bbox.top() + 75.0;
        if let Some(icon) = &self.icon {
            let (iw, ih) = (f64::from(icon.width), f64::from(icon.height));
            let x = (bbox.left() + bbox.right() - iw) * 0.5;
            canvas.draw_image(icon, Rect::at(x, y, iw, ih), colors::WHITE, -0.94);
            y += ih;
        }
        y += 75.0;
        for (line, units) in &self.lines {
            let x = bbox.left() + MARGIN + (self.widest - units) * 0.5 * self.metrics.advance;
            canvas.draw_text(line, x, y, colors::WHITE, -0.91);
            y += LINE_PITCH;
        }

        let ok = if self.select == Select::Ok { colors::GREEN } else { colors::WHITE };
        canvas.draw_box(self.ok_box, ok, false, -0.92);
        canvas.draw_text("OK", self.ok_box.left() + 30.0, self.ok_box.top() + 42.0, colors::WHITE, -0.91);
        if self.need_cancel {
            let cancel = if self.select == Select::Cancel { colors::RED } else { colors::WHITE };
            let b = self.cancel_box;
            canvas.draw_box(b, cancel, false, -0.92);
            canvas.draw_text("CANCEL", b.left() + 30.0, b.top() + 42.0, colors::WHITE, -0.91);
        }
    }
}

type Slot = Rc<RefCell<Option<Handle<Dialog>>>>;

/// The open dialog, if any
pub struct DialogSystem {
    current: Slot,
    metrics: GlyphMetrics,
    line_height: f64,
    fill: Color,
    border: Color,
}

impl Default for DialogSystem {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default())
    }
}

impl DialogSystem {
    /// System sizing dialogs with the configured metrics
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            current: Rc::new(RefCell::new(None)),
            metrics: GlyphMetrics::new(config.metrics.glyph_advance),
            line_height: config.metrics.line_height,
            fill: config.theme.panel_fill,
            border: config.theme.panel_border,
        }
    }

    /// Build a closed dialog; lines are split on `\n`
    pub fn create(&self, message: &str, need_cancel: bool) -> Handle<Dialog> {
        let lines: Vec<(String, f64)> = message
            .split('\n')
            .map(|line| (line.to_string(), text_units(line)))
            .collect();
        let widest = lines.iter().map(|(_, units)| *units).fold(0.0, f64::max);
        #[allow(clippy::cast_precision_loss)]
        let body_height = lines.len() as f64 * self.line_height + BODY_EXTRA;
        let width = widest * self.metrics.advance + MARGIN * 2.0;
        Rc::new(RefCell::new(Dialog {
            geometry: Geometry::new(0.0, 0.0, width, body_height, -0.9),
            lines,
            widest,
            need_cancel,
            icon: None,
            body_height,
            ok_box: Rect::default(),
            cancel_box: Rect::default(),
            select: Select::None,
            fill: self.fill,
            border: self.border,
            decided: Callback::default(),
            metrics: self.metrics,
        }))
    }

    /// Open a dialog, claiming event suppression
    ///
    /// Fails with [`WidgetError::DialogBusy`] while another dialog is open,
    /// and with the gate's error while something else holds suppression.
    pub fn open(&mut self, gate: &mut EventGate, dialog: &Handle<Dialog>) -> WidgetResult<()> {
        if self.current.borrow().is_some() {
            return Err(WidgetError::DialogBusy);
        }
        let slot = self.current.clone();
        gate.disable_event(move |action| Self::on_action(&slot, action))?;
        dialog.borrow_mut().select = Select::None;
        *self.current.borrow_mut() = Some(dialog.clone());
        info!("Dialog opened");
        Ok(())
    }

    /// Force the open dialog closed through the cancel path
    pub fn close(&mut self, gate: &mut EventGate) {
        let taken = self.current.borrow_mut().take();
        if let Some(dialog) = taken {
            gate.enable_event();
            debug!("Dialog force-closed");
            emit(&dialog, |d| &mut d.decided, Decision::Cancel);
        }
    }

    /// The open dialog
    pub fn current(&self) -> Option<Handle<Dialog>> {
        self.current.borrow().clone()
    }

    /// Whether a dialog is open
    pub fn is_open(&self) -> bool {
        self.current.borrow().is_some()
    }

    fn on_action(slot: &Slot, action: ModalAction) -> bool {
        let Some(dialog) = slot.borrow().clone() else {
            return false;
        };
        let Some(decision) = dialog.borrow().decide(action) else {
            return false;
        };
        slot.borrow_mut().take();
        info!("Dialog decided: {decision:?}");
        emit(&dialog, |d| &mut d.decided, decision);
        true
    }

    /// Centre, track the highlighted button and draw the open dialog
    pub fn update(&mut self, ctx: &FrameContext<'_>, canvas: &mut dyn Canvas) {
        let Some(dialog) = self.current() else {
            return;
        };
        let window = ctx.window_size();
        let pointer = ctx.input.pointer();
        let mut d = dialog.borrow_mut();
        d.layout((window.x, window.y), (pointer.x, pointer.y));
        d.draw(canvas);
    }
}
