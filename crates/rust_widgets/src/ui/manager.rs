//! UI Manager
//!
//! Central driver that owns every widget kind's system together with the
//! shared services (input state, event gate, editing engine, clipboard,
//! clock). Platform events go in through [`UIManager::handle_event`]; one
//! call to [`UIManager::update`] per frame runs every kind in a fixed order
//! and draws onto the caller's canvas.

use std::path::PathBuf;

use log::{debug, info};

use super::frame::FrameContext;
use super::input::{ClickAction, Clipboard, InputEvent, InputProcessor, Key, KeyAction, MemoryClipboard, MouseButton};
use super::modal::{EventGate, ModalAction};
use super::rendering::{Canvas, FileImageDecoder, IconId, IconRegistry};
use super::text_input::TextInput;
use super::widgets::{
    CheckBox, CheckBoxSystem, Dialog, DialogSystem, ImageButton, ImageButtonSystem, Label, LabelSystem,
    Notification, NotificationSystem, Pulldown, PulldownSystem, ScrollBox, ScrollBoxSystem, Sheet, SheetSystem,
    SlideBar, SlideBarSystem, TextBox, TextBoxSystem, TextButton, TextButtonSystem,
};
use crate::config::ToolkitConfig;
use crate::error::WidgetResult;
use crate::foundation::math::Color;
use crate::foundation::time::{Clock, SystemClock};
use crate::ui::identity::Handle;

/// Type-tagged handle accepted by [`UIManager::erase`]
#[derive(Clone)]
pub enum WidgetHandle {
    /// Scroll container
    ScrollBox(Handle<ScrollBox>),
    /// Background panel
    Sheet(Handle<Sheet>),
    /// Static caption
    Label(Handle<Label>),
    /// Toggle
    CheckBox(Handle<CheckBox>),
    /// Caption button
    TextButton(Handle<TextButton>),
    /// Image button
    ImageButton(Handle<ImageButton>),
    /// Slider
    SlideBar(Handle<SlideBar>),
    /// Text field
    TextBox(Handle<TextBox>),
    /// Drop-down list
    Pulldown(Handle<Pulldown>),
}

macro_rules! widget_handle_from {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<Handle<$kind>> for WidgetHandle {
                fn from(handle: Handle<$kind>) -> Self {
                    Self::$kind(handle)
                }
            }

            impl From<&Handle<$kind>> for WidgetHandle {
                fn from(handle: &Handle<$kind>) -> Self {
                    Self::$kind(handle.clone())
                }
            }
        )*
    };
}

widget_handle_from!(ScrollBox, Sheet, Label, CheckBox, TextButton, ImageButton, SlideBar, TextBox, Pulldown);

type DropHandler = Box<dyn FnMut(&[PathBuf])>;

/// Owner of every widget kind and the shared input services
pub struct UIManager {
    config: ToolkitConfig,
    input: InputProcessor,
    gate: EventGate,
    editor: TextInput,
    clipboard: Box<dyn Clipboard>,
    clock: Box<dyn Clock>,
    icons: IconRegistry,
    drop_handler: Option<DropHandler>,

    scroll_boxes: ScrollBoxSystem,
    sheets: SheetSystem,
    labels: LabelSystem,
    check_boxes: CheckBoxSystem,
    text_buttons: TextButtonSystem,
    image_buttons: ImageButtonSystem,
    slide_bars: SlideBarSystem,
    text_boxes: TextBoxSystem,
    pulldowns: PulldownSystem,
    dialogs: DialogSystem,
    notifications: NotificationSystem,

    frame_counter: u64,
}

impl Default for UIManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UIManager {
    /// Create a manager with the default configuration
    pub fn new() -> Self {
        Self::with_config(ToolkitConfig::default())
    }

    /// Create a manager with explicit settings
    pub fn with_config(config: ToolkitConfig) -> Self {
        info!("UI manager created");
        Self {
            input: InputProcessor::default(),
            gate: EventGate::new(),
            editor: TextInput::new(),
            clipboard: Box::new(MemoryClipboard::default()),
            clock: Box::new(SystemClock::new()),
            icons: IconRegistry::new(Box::new(FileImageDecoder)),
            drop_handler: None,
            scroll_boxes: ScrollBoxSystem::new(&config),
            sheets: SheetSystem::new(&config),
            labels: LabelSystem::new(&config),
            check_boxes: CheckBoxSystem::new(&config),
            text_buttons: TextButtonSystem::new(&config),
            image_buttons: ImageButtonSystem::new(&config),
            slide_bars: SlideBarSystem::new(&config),
            text_boxes: TextBoxSystem::new(&config),
            pulldowns: PulldownSystem::new(&config),
            dialogs: DialogSystem::new(&config),
            notifications: NotificationSystem::new(&config),
            config,
            frame_counter: 0,
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the clipboard used by [`Self::handle_event`]
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Replace the image registry (and with it the decoder)
    #[must_use]
    pub fn with_icons(mut self, icons: IconRegistry) -> Self {
        self.icons = icons;
        self
    }

    /// Toolkit settings
    pub const fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Accumulated input state
    pub const fn input(&self) -> &InputProcessor {
        &self.input
    }

    /// Whether ordinary event dispatch is running
    pub const fn events_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// The shared text editing engine
    pub const fn editor(&self) -> &TextInput {
        &self.editor
    }

    /// Mutable access to the editing engine
    pub fn editor_mut(&mut self) -> &mut TextInput {
        &mut self.editor
    }

    /// The manager's own clipboard
    pub fn clipboard(&self) -> &dyn Clipboard {
        self.clipboard.as_ref()
    }

    /// Frames run so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    /// Register an image for dialogs and notifications
    pub fn load_icon(&mut self, path: &str) -> WidgetResult<IconId> {
        self.icons.load(path)
    }

    /// Image registry
    pub fn icons_mut(&mut self) -> &mut IconRegistry {
        &mut self.icons
    }

    /// Called with the paths of files dropped on the window
    pub fn set_drop_handler(&mut self, f: impl FnMut(&[PathBuf]) + 'static) {
        self.drop_handler = Some(Box::new(f));
    }

    // --- Event intake ---

    /// Route one platform event, using the manager's own clipboard
    pub fn handle_event(&mut self, event: &InputEvent) {
        self.dispatch(event, None);
    }

    /// Route one platform event, using `clipboard` for cut, copy and paste
    pub fn handle_event_with(&mut self, event: &InputEvent, clipboard: &mut dyn Clipboard) {
        self.dispatch(event, Some(clipboard));
    }

    fn dispatch(&mut self, event: &InputEvent, external: Option<&mut dyn Clipboard>) {
        match event {
            InputEvent::CursorMoved { .. } | InputEvent::Resized { .. } => self.input.apply(event),
            InputEvent::Key { key, action, mods } => {
                if !self.gate.is_enabled() {
                    self.modal_key(*key, *action);
                    return;
                }
                self.input.apply(event);
                if *action != KeyAction::Release {
                    let clipboard: &mut dyn Clipboard = match external {
                        Some(c) => c,
                        None => self.clipboard.as_mut(),
                    };
                    self.editor.key_input(*key, *mods, clipboard);
                    self.scroll_boxes.on_key(*key);
                }
                if *key == Key::Enter && *action != KeyAction::Repeat {
                    let click = Self::click_of(*action);
                    self.text_buttons.on_click(click, true);
                    self.image_buttons.on_click(click, true);
                }
            }
            InputEvent::MouseButton { button, action } => {
                if *button != MouseButton::Left || *action == KeyAction::Repeat {
                    return;
                }
                let click = Self::click_of(*action);
                if self.gate.is_enabled() {
                    self.click(click);
                } else {
                    let modal = match click {
                        ClickAction::Press => ModalAction::Click,
                        ClickAction::Release => ModalAction::Release,
                    };
                    self.gate.dispatch(modal);
                }
            }
            InputEvent::Char(c) => {
                if self.gate.is_enabled() {
                    self.editor.text_input(*c);
                }
            }
            InputEvent::Scroll { dx, dy } => {
                if self.gate.is_enabled() {
                    self.input.apply(event);
                    self.scroll_boxes.on_scroll(*dx, *dy);
                }
            }
            InputEvent::FileDrop(paths) => {
                if self.gate.is_enabled() {
                    if let Some(handler) = &mut self.drop_handler {
                        handler(paths);
                    }
                }
            }
        }
    }

    const fn click_of(action: KeyAction) -> ClickAction {
        match action {
            KeyAction::Release => ClickAction::Release,
            KeyAction::Press | KeyAction::Repeat => ClickAction::Press,
        }
    }

    fn modal_key(&mut self, key: Key, action: KeyAction) {
        if action != KeyAction::Press {
            return;
        }
        let modal = match key {
            Key::Enter => ModalAction::EnterKey,
            Key::Escape => ModalAction::EscapeKey,
            _ => return,
        };
        self.gate.dispatch(modal);
    }

    fn click(&mut self, action: ClickAction) {
        let pointer = self.input.widget_pointer();
        self.check_boxes.on_click(action);
        self.text_buttons.on_click(action, false);
        self.image_buttons.on_click(action, false);
        self.slide_bars.on_click(action, &mut self.gate);
        self.text_boxes.on_click(action, pointer, &mut self.editor);
        self.pulldowns.on_click(action);
    }

    // --- Frame ---

    /// Run one frame: every kind updates and draws in the fixed order
    pub fn update(&mut self, canvas: &mut dyn Canvas) {
        self.frame_counter += 1;
        let now = self.clock.now_ms();
        {
            let ctx = FrameContext::new(&self.config, &self.input, self.gate.is_enabled(), now);
            self.scroll_boxes.update(&ctx, canvas);
            self.sheets.update(&ctx, canvas);
            self.labels.update(&ctx, canvas);
            self.check_boxes.update(&ctx, canvas);
            self.text_buttons.update(&ctx, canvas);
            self.image_buttons.update(&ctx, canvas);
            self.slide_bars.update(&ctx, canvas);
            self.text_boxes.update(&ctx, canvas, &mut self.editor);
            self.pulldowns.update(&ctx, canvas);
        }
        if self.pulldowns.is_any_open() {
            self.input.freeze_pointer();
        } else {
            self.input.thaw_pointer();
        }
        {
            let ctx = FrameContext::new(&self.config, &self.input, self.gate.is_enabled(), now);
            self.dialogs.update(&ctx, canvas);
            self.notifications.update(&ctx, canvas);
        }
        if self.editor.poll_autocomplete() {
            debug!("Autocomplete candidate applied");
        }
        self.input.end_frame();
    }

    // --- Layers ---

    /// Make `name` the active layer of every kind
    ///
    /// Returns whether any kind actually switched.
    pub fn bind_layer(&mut self, name: &str) -> bool {
        let mut changed = self.scroll_boxes.bind_layer(name);
        changed |= self.sheets.bind_layer(name);
        changed |= self.labels.bind_layer(name);
        changed |= self.check_boxes.bind_layer(name);
        changed |= self.text_buttons.bind_layer(name);
        changed |= self.image_buttons.bind_layer(name);
        changed |= self.slide_bars.bind_layer(name);
        changed |= self.text_boxes.bind_layer(name, &mut self.editor);
        changed |= self.pulldowns.bind_layer(name);
        if changed {
            info!("Layer '{name}' bound");
        }
        changed
    }

    /// Drop every widget of layer `name` in every kind
    pub fn clear_layer(&mut self, name: &str) {
        self.scroll_boxes.clear_layer(name);
        self.sheets.clear_layer(name);
        self.labels.clear_layer(name);
        self.check_boxes.clear_layer(name);
        self.text_buttons.clear_layer(name);
        self.image_buttons.clear_layer(name);
        self.slide_bars.clear_layer(name);
        self.text_boxes.clear_layer(name, &mut self.editor);
        self.pulldowns.clear_layer(name);
        info!("Layer '{name}' cleared");
    }

    /// Remove a widget from its kind's active layer
    pub fn erase(&mut self, widget: impl Into<WidgetHandle>) -> bool {
        match widget.into() {
            WidgetHandle::ScrollBox(h) => self.scroll_boxes.erase(&h),
            WidgetHandle::Sheet(h) => self.sheets.erase(&h),
            WidgetHandle::Label(h) => self.labels.erase(&h),
            WidgetHandle::CheckBox(h) => self.check_boxes.erase(&h),
            WidgetHandle::TextButton(h) => self.text_buttons.erase(&h),
            WidgetHandle::ImageButton(h) => self.image_buttons.erase(&h),
            WidgetHandle::SlideBar(h) => self.slide_bars.erase(&h),
            WidgetHandle::TextBox(h) => self.text_boxes.erase(&h, &mut self.editor),
            WidgetHandle::Pulldown(h) => self.pulldowns.erase(&h),
        }
    }

    // --- Factories ---

    /// New scroll box in the active layer
    pub fn create_scroll_box(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<ScrollBox> {
        self.scroll_boxes.create(x, y, width, height)
    }

    /// New background panel in the active layer
    pub fn create_sheet(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<Sheet> {
        self.sheets.create(x, y, width, height)
    }

    /// New caption in the active layer
    pub fn create_label(&mut self, text: &str, x: f64, y: f64, font: Color, background: Color) -> Handle<Label> {
        self.labels.create(text, x, y, font, background)
    }

    /// New toggle in the active layer
    pub fn create_check_box(&mut self, text: &str, x: f64, y: f64, value: bool) -> Handle<CheckBox> {
        self.check_boxes.create(text, x, y, value)
    }

    /// New caption button in the active layer
    pub fn create_text_button(&mut self, caption: &str, x: f64, y: f64, catch_enter: bool) -> Handle<TextButton> {
        self.text_buttons.create(caption, x, y, catch_enter)
    }

    /// New image button in the active layer
    pub fn create_image_button(
        &mut self,
        path: &str,
        x: f64,
        y: f64,
        catch_enter: bool,
    ) -> WidgetResult<Handle<ImageButton>> {
        self.image_buttons.create(&mut self.icons, path, x, y, catch_enter)
    }

    /// New slider in the active layer
    pub fn create_slide_bar(&mut self, x: f64, y: f64, width: f64, height: f64) -> Handle<SlideBar> {
        self.slide_bars.create(x, y, width, height)
    }

    /// New text field in the active layer
    pub fn create_text_box(&mut self, text: &str, x: f64, y: f64, width: f64, height: f64) -> Handle<TextBox> {
        self.text_boxes.create(text, x, y, width, height)
    }

    /// New drop-down list in the active layer
    pub fn create_pulldown(&mut self, items: Vec<String>, rows: usize) -> Handle<Pulldown> {
        self.pulldowns.create(items, rows)
    }

    /// Build a dialog; it shows once opened
    pub fn create_dialog(&self, message: &str, need_cancel: bool) -> Handle<Dialog> {
        self.dialogs.create(message, need_cancel)
    }

    /// Open a dialog, suppressing every other widget until it is decided
    pub fn open_dialog(&mut self, dialog: &Handle<Dialog>) -> WidgetResult<()> {
        self.dialogs.open(&mut self.gate, dialog)
    }

    /// Force the open dialog closed through its cancel path
    pub fn close_dialog(&mut self) {
        self.dialogs.close(&mut self.gate);
    }

    /// The open dialog
    pub fn current_dialog(&self) -> Option<Handle<Dialog>> {
        self.dialogs.current()
    }

    /// Post a notification for the configured display time
    pub fn notify(&mut self, message: &str) -> Handle<Notification> {
        let duration = self.notifications.default_duration();
        self.notify_for(message, duration)
    }

    /// Post a notification shown for `duration_ms`
    pub fn notify_for(&mut self, message: &str, duration_ms: u64) -> Handle<Notification> {
        let now = self.clock.now_ms();
        self.notifications.notify(message, duration_ms, now)
    }

    // --- Kind access ---

    /// Scroll boxes
    pub const fn scroll_boxes(&self) -> &ScrollBoxSystem {
        &self.scroll_boxes
    }

    /// Check boxes
    pub const fn check_boxes(&self) -> &CheckBoxSystem {
        &self.check_boxes
    }

    /// Text buttons
    pub const fn text_buttons(&self) -> &TextButtonSystem {
        &self.text_buttons
    }

    /// Text buttons, for changing default colours
    pub fn text_buttons_mut(&mut self) -> &mut TextButtonSystem {
        &mut self.text_buttons
    }

    /// Image buttons
    pub const fn image_buttons(&self) -> &ImageButtonSystem {
        &self.image_buttons
    }

    /// Slide bars
    pub const fn slide_bars(&self) -> &SlideBarSystem {
        &self.slide_bars
    }

    /// Text boxes
    pub const fn text_boxes(&self) -> &TextBoxSystem {
        &self.text_boxes
    }

    /// Pulldowns
    pub const fn pulldowns(&self) -> &PulldownSystem {
        &self.pulldowns
    }

    /// Notifications
    pub const fn notifications(&self) -> &NotificationSystem {
        &self.notifications
    }
}
