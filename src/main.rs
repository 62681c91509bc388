// What you SEE:
// • White paper with the reference picture (if any) faintly stamped in the middle.
// • B / F / E pick brush, bucket, eraser. 1-9 and 0 pick a crayon.
// • Hold Left Mouse to draw; with the bucket, click to fill an area.
// • [ ] change brush size, - = change fill tolerance.
// • R resets the page, S saves <title>.png, ESC quits.

use anyhow::Context;
use clap::Parser;
use minifb::Key;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paint_bucket::color::PALETTE;
use paint_bucket::config::{AppConfig, CliArgs};
use paint_bucket::coords::Viewport;
use paint_bucket::draw::{draw_crosshair, draw_text_5x7, fill_rect, Drawer};
use paint_bucket::reference::ReferenceImage;
use paint_bucket::types::FrameBuffer;
use paint_bucket::{DrawingSession, Surface, Tool};

const PALETTE_KEYS: [Key; 10] = [
    Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5,
    Key::Key6, Key::Key7, Key::Key8, Key::Key9, Key::Key0,
];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paint_bucket=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = AppConfig::resolve(&args).context("loading configuration")?;
    info!(width = config.width, height = config.height, title = %config.title, "starting paint bucket");

    /* --- Reference picture ---
       Visual: a missing or broken picture just means blank paper, not a crash. */
    let reference = match &config.reference {
        Some(path) => match ReferenceImage::open(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("{e}; starting with blank paper");
                None
            }
        },
        None => None,
    };

    let mut session = DrawingSession::new(config.width, config.height, config.title.clone(), reference);
    session.set_tolerance(config.tolerance);
    session.set_color(config.color);

    let mut drawer = Drawer::new(&format!("Paint Bucket - {}", config.title), config.width, config.height)?;
    let mut canvas = FrameBuffer::new(config.width, config.height); // composited drawing, redone only when dirty
    let mut screen = FrameBuffer::new(config.width, config.height); // canvas + overlays, rebuilt every frame
    let mut status: Option<String> = None; // last save/reset message, shown in the HUD
    let mut was_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Follow window resizes (the old canvas stays top-left). */
        let (win_w, win_h) = drawer.size();
        if win_w > 0 && win_h > 0 && (win_w, win_h) != (screen.width, screen.height) {
            session.resize(win_w, win_h);
            canvas = FrameBuffer::new(win_w, win_h);
            screen = FrameBuffer::new(win_w, win_h);
        }

        /* 2) Keyboard: tools, crayons, sliders, reset, save. */
        handle_keys(&drawer, &mut session, &config, &mut status);

        /* 3) Pointer: map window pixels into raster pixels, then feed the session. */
        let raster = session.raster();
        let viewport = Viewport::identity(screen.width, screen.height);
        let pointer = drawer
            .mouse_pos()
            .map(|(mx, my)| viewport.to_raster(mx, my, raster.width(), raster.height()));

        let down = drawer.left_mouse_down();
        match (down, was_down, pointer) {
            (true, false, Some((x, y))) => {
                if let Some(report) = session.pointer_down(x, y) {
                    if let Some(bounds) = report.bounds {
                        info!(x, y, filled = report.filled, w = bounds.width(), h = bounds.height(), "bucket fill");
                    }
                }
            }
            (true, true, Some((x, y))) => session.pointer_move(x, y),
            (false, true, _) | (true, _, None) => session.pointer_up(),
            _ => {}
        }
        was_down = down;

        /* 4) Compose: canvas, then crosshair + HUD on top. */
        if session.take_dirty() {
            session.raster().composite_over_white(&mut canvas);
        }
        screen.pixels.copy_from_slice(&canvas.pixels);
        if let Some((x, y)) = pointer {
            draw_crosshair(&mut screen, x as i32, y as i32, 10, 0x00_33_99_CC);
        }
        fill_rect(&mut screen, 6, 6, 9, 9, session.color().to_u32());
        let hud = hud_line(&session, status.as_deref());
        draw_text_5x7(&mut screen, 20, 7, &hud, 0x00_00_88_AA, 0x00_FF_FF_FF);

        /* 5) Present. */
        drawer.present(&screen)?;
    }

    info!("paint bucket closed");
    Ok(())
}

fn handle_keys(drawer: &Drawer, session: &mut DrawingSession, config: &AppConfig, status: &mut Option<String>) {
    for (key, tool) in [(Key::B, Tool::Brush), (Key::F, Tool::Fill), (Key::E, Tool::Eraser)] {
        if drawer.pressed_once(key) {
            session.set_tool(tool);
        }
    }
    for (key, swatch) in PALETTE_KEYS.iter().zip(PALETTE.iter()) {
        if drawer.pressed_once(*key) {
            session.set_color(swatch.color);
        }
    }
    if drawer.pressed_repeat(Key::LeftBracket) {
        session.set_brush_size(session.brush_size().saturating_sub(1));
    }
    if drawer.pressed_repeat(Key::RightBracket) {
        session.set_brush_size(session.brush_size() + 1);
    }
    if drawer.pressed_repeat(Key::Minus) {
        session.set_tolerance(session.tolerance().saturating_sub(1));
    }
    if drawer.pressed_repeat(Key::Equal) {
        session.set_tolerance(session.tolerance().saturating_add(1));
    }
    if drawer.pressed_once(Key::R) {
        session.reset();
        *status = None;
    }
    if drawer.pressed_once(Key::S) {
        *status = Some(match session.save_png(&config.output_dir) {
            Ok(_) => "SAVED".to_string(),
            Err(e) => {
                warn!("{e}");
                "SAVE FAILED".to_string()
            }
        });
    }
}

/// e.g. `FILL | TOL: 20 | SIZE: 5 | SAVED`
fn hud_line(session: &DrawingSession, status: Option<&str>) -> String {
    let mut hud = format!(
        "{} | TOL: {} | SIZE: {}",
        session.tool().label(),
        session.tolerance(),
        session.brush_size()
    );
    if let Some(s) = status {
        hud.push_str(" | ");
        hud.push_str(s);
    }
    hud
}
