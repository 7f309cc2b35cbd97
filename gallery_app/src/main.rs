//! Widget gallery
//!
//! Opens a window, feeds its events to the toolkit and runs two screens
//! (controls and text entry) on separate layers. Drawing goes to a
//! recording canvas; the command count is logged at debug level.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use glfw::{ClientApiHint, WindowHint, WindowMode};
use rust_widgets::foundation::logging;
use rust_widgets::prelude::*;
use rust_widgets::ui::input::glfw_adapter;
use rust_widgets::ui::widgets::{ScrollBox, TextBox, TextButton};
use thiserror::Error;

const CONFIG_PATH: &str = "gallery.toml";
const CONTROLS: &str = "controls";
const ENTRY: &str = "entry";

/// Gallery start-up failures
#[derive(Error, Debug)]
enum GalleryError {
    #[error("GLFW initialization failed: {0}")]
    Init(#[from] glfw::InitError),

    #[error("window creation failed")]
    Window,
}

/// Requests raised from widget callbacks, applied between frames
#[derive(Default)]
struct Requests {
    layer: Cell<Option<&'static str>>,
    quit_dialog: Cell<bool>,
    quit: Cell<bool>,
}

fn load_config() -> ToolkitConfig {
    match ToolkitConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded toolkit config from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            log::warn!("Using default toolkit config ({})", e);
            ToolkitConfig::default()
        }
    }
}

fn build_controls(ui: &mut UIManager, requests: &Rc<Requests>) {
    ui.bind_layer(CONTROLS);
    ui.create_sheet(20.0, 20.0, 760.0, 560.0);
    ui.create_label("Controls", 40.0, 30.0, colors::WHITE, colors::CLEAR);

    let sound = ui.create_check_box("Sound", 40.0, 100.0, true);
    sound.borrow_mut().set_off_text("Muted");
    sound
        .borrow_mut()
        .set_changed(|on| log::info!("Sound {}", if on { "on" } else { "off" }));

    let volume = ui.create_slide_bar(40.0, 190.0, 300.0, 20.0);
    volume.borrow_mut().set_min_max(0.0, 10.0);
    volume.borrow_mut().set_step(0.5);
    let readout = ui.create_label("", 360.0, 170.0, colors::WHITE, colors::CLEAR);
    readout.borrow_mut().set_slider(Some(volume.clone()), 1);

    let difficulty = ui.create_text_button("Difficulty", 40.0, 260.0, false);
    let levels = ui.create_pulldown(vec!["Easy".into(), "Normal".into(), "Hard".into()], 3);
    levels
        .borrow_mut()
        .set_selected(|i| log::info!("Difficulty level {}", i));
    TextButton::set_pulldown(&difficulty, Some(levels));

    let scroll = ui.create_scroll_box(420.0, 100.0, 320.0, 200.0);
    for i in 0..8 {
        let y = 110.0 + f64::from(i) * 60.0;
        let row = ui.create_label(&format!("Row {i}"), 430.0, y, colors::WHITE, colors::CLEAR);
        ScrollBox::append(&scroll, &row);
    }

    let next = ui.create_text_button("Text entry", 40.0, 480.0, true);
    let r = requests.clone();
    next.borrow_mut().set_on_press(move |()| r.layer.set(Some(ENTRY)));

    let quit = ui.create_text_button("Quit", 600.0, 480.0, false);
    let r = requests.clone();
    quit.borrow_mut().set_on_press(move |()| r.quit_dialog.set(true));
}

fn build_entry(ui: &mut UIManager, requests: &Rc<Requests>) {
    ui.bind_layer(ENTRY);
    ui.create_label("Text entry", 40.0, 30.0, colors::WHITE, colors::CLEAR);

    let name = ui.create_text_box("", 40.0, 120.0, 400.0, 0.0);
    name.borrow_mut().set_placeholder("Player name");
    name.borrow_mut().set_max_length(16);

    let city = ui.create_text_box("", 40.0, 220.0, 400.0, 0.0);
    city.borrow_mut().set_placeholder("City");
    let cities = ["Berlin", "Bern", "Boston", "Oslo", "Osaka", "Ottawa"];
    let list = ui.create_pulldown(cities.iter().map(|c| (*c).to_string()).collect(), 4);
    TextBox::set_pulldown(&city, Some(list));

    let speed = ui.create_text_box("", 40.0, 320.0, 120.0, 0.0);
    speed.borrow_mut().set_input_style(InputStyle::Number);
    let slider = ui.create_slide_bar(200.0, 300.0, 240.0, 20.0);
    slider.borrow_mut().set_min_max(0.0, 100.0);
    speed.borrow_mut().set_slider(Some(slider), 0);

    let back = ui.create_text_button("Back", 40.0, 480.0, false);
    let r = requests.clone();
    back.borrow_mut().set_on_press(move |()| r.layer.set(Some(CONTROLS)));

    ui.set_drop_handler(|paths| {
        for path in paths {
            log::info!("Dropped {}", path.display());
        }
    });
}

fn run() -> Result<(), GalleryError> {
    let config = load_config();
    let mut glfw = glfw::init(glfw::fail_on_errors)?;
    glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
    let (mut window, events) = glfw
        .create_window(800, 600, "Widget Gallery", WindowMode::Windowed)
        .ok_or(GalleryError::Window)?;
    window.set_all_polling(true);
    log::info!("Window created");

    let mut ui = UIManager::with_config(config);
    let requests = Rc::new(Requests::default());
    build_controls(&mut ui, &requests);
    build_entry(&mut ui, &requests);
    ui.bind_layer(CONTROLS);
    ui.notify("Welcome to the widget gallery");

    let (width, height) = window.get_framebuffer_size();
    ui.handle_event(&InputEvent::Resized {
        width: f64::from(width),
        height: f64::from(height),
    });

    let mut canvas = RecordingCanvas::default();
    while !window.should_close() && !requests.quit.get() {
        glfw.poll_events();
        for (_, event) in glfw::flush_messages(&events) {
            if let Some(event) = glfw_adapter::translate(&event) {
                ui.handle_event_with(&event, &mut *window);
            }
        }

        if let Some(layer) = requests.layer.take() {
            log::info!("Switching to {}", layer);
            ui.bind_layer(layer);
        }
        if requests.quit_dialog.take() {
            let dialog = ui.create_dialog("Quit the gallery?", true);
            let r = requests.clone();
            dialog.borrow_mut().set_decided(move |d| r.quit.set(d == Decision::Ok));
            if let Err(e) = ui.open_dialog(&dialog) {
                log::warn!("Quit dialog not shown: {}", e);
            }
        }

        canvas.clear();
        ui.update(&mut canvas);
        log::debug!("Frame {}: {} draw commands", ui.frame_count(), canvas.commands().len());
        std::thread::sleep(Duration::from_millis(16));
    }
    log::info!("Gallery closed");
    Ok(())
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        log::error!("Gallery failed: {}", e);
        std::process::exit(1);
    }
}
