//! Arena Blast entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! The browser build drives the simulation from requestAnimationFrame,
//! polls DOM input into a `TickInput`, and paints the display list
//! onto a 2D canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arena_blast::GameConfig;
    use arena_blast::consts::BASE_FRAME_MS;
    use arena_blast::render::{Scene, Shape, TextAlign, build_scene};
    use arena_blast::sim::{
        Arena, FrameTiming, GameEvent, GamePhase, GameState, TickInput, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        last_time: f64,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arena Blast starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas = document
            .get_element_by_id("canvas")
            .expect("canvas element missing")
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();

        let width = window.inner_width().unwrap().as_f64().unwrap();
        let height = window.inner_height().unwrap().as_f64().unwrap();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap();

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(config, Arena::new(width as f32, height as f32), seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            last_time: 0.0,
            canvas: canvas.clone(),
            ctx,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);
        log::info!("Arena Blast running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard: WASD/arrows move, space autofires, B opts into the
        // bonus game, Enter restarts after game over.
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.up = true,
                    "s" | "S" | "ArrowDown" => g.input.down = true,
                    "a" | "A" | "ArrowLeft" => g.input.left = true,
                    "d" | "D" | "ArrowRight" => g.input.right = true,
                    " " => g.input.fire_held = true,
                    "b" | "B" => g.input.start_bonus = true,
                    "Enter" => g.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.up = false,
                    "s" | "S" | "ArrowDown" => g.input.down = false,
                    "a" | "A" | "ArrowLeft" => g.input.left = false,
                    "d" | "D" | "ArrowRight" => g.input.right = false,
                    " " => g.input.fire_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position in canvas coordinates
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer =
                    glam::Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: fire in combat, restart from the game-over screen. The
        // mini-games themselves are stubbed out here, so during an
        // interlude a click stands in for the collaborator's completion
        // report.
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                match g.state.phase {
                    GamePhase::Playing => g.input.fire_pressed = true,
                    GamePhase::GameOver => g.input.restart = true,
                    GamePhase::BonusInterlude => g.state.end_bonus_interlude(),
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let width = window.inner_width().unwrap().as_f64().unwrap();
            let height = window.inner_height().unwrap().as_f64().unwrap();
            let mut g = game.borrow_mut();
            g.canvas.set_width(width as u32);
            g.canvas.set_height(height as u32);
            g.state.resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let elapsed_ms = if g.last_time > 0.0 {
                // Long tab-away frames must not teleport the simulation
                ((time - g.last_time) as f32).min(100.0)
            } else {
                BASE_FRAME_MS
            };
            g.last_time = time;

            let input = g.input.clone();
            tick(&mut g.state, &input, FrameTiming::from_frame_ms(elapsed_ms));

            // Clear one-shot inputs after processing
            g.input.fire_pressed = false;
            g.input.start_bonus = false;
            g.input.restart = false;

            for event in g.state.drain_events() {
                match event {
                    GameEvent::PlayerDied => log::info!("Game over at score {}", g.state.score),
                    GameEvent::EnemyKilled { score_value } => {
                        log::debug!("Enemy down (+{})", score_value)
                    }
                    GameEvent::BonusReady => log::info!("Bonus game unlocked"),
                    GameEvent::BonusStarted { kind } => {
                        log::info!("Bonus game started: {}", kind.label())
                    }
                    GameEvent::BonusEnded => log::info!("Bonus game finished"),
                    GameEvent::Restarted => log::info!("Match restarted"),
                }
            }

            let scene = build_scene(&g.state, g.input.pointer);
            let width = g.canvas.width() as f64;
            let height = g.canvas.height() as f64;
            paint(&g.ctx, &scene, width, height);
        }
        request_animation_frame(game);
    }

    fn css_color(color: u32) -> String {
        format!("#{:06x}", color)
    }

    fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene, width: f64, height: f64) {
        use std::f64::consts::TAU;

        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str("#555555");
        ctx.fill_rect(0.0, 0.0, width, height);

        for shape in &scene.shapes {
            match shape {
                Shape::Circle { center, radius, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.fill();
                }
                Shape::Ellipse { center, rotation, half_width, half_height, color } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    let _ = ctx.ellipse(
                        center.x as f64,
                        center.y as f64,
                        *half_width as f64,
                        *half_height as f64,
                        *rotation as f64,
                        0.0,
                        TAU,
                    );
                    ctx.fill();
                }
                Shape::Line { from, to, width, color } => {
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                Shape::Bar { top_left, width, height, fill, back, color } => {
                    ctx.set_fill_style_str(&css_color(*back));
                    ctx.fill_rect(
                        top_left.x as f64,
                        top_left.y as f64,
                        *width as f64,
                        *height as f64,
                    );
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(
                        top_left.x as f64,
                        top_left.y as f64,
                        (*width * fill) as f64,
                        *height as f64,
                    );
                }
                Shape::Text { pos, size, color, align, text } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.set_font(&format!("{}px sans-serif", size));
                    let (css_align, baseline) = match align {
                        TextAlign::Left => ("left", "top"),
                        TextAlign::Center => ("center", "middle"),
                        TextAlign::Right => ("right", "top"),
                    };
                    ctx.set_text_align(css_align);
                    ctx.set_text_baseline(baseline);
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
                Shape::Overlay { color, alpha } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.fill_rect(0.0, 0.0, width, height);
                    ctx.set_global_alpha(1.0);
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arena_blast::GameConfig;
    use arena_blast::sim::{Arena, FrameTiming, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Arena Blast (native) starting...");
    log::info!("The game targets the browser - build with `trunk serve` for the web version");

    // Headless smoke run: hold fire at a fixed pointer for ten seconds
    // of simulated time.
    let mut state = GameState::new(GameConfig::load(), Arena::new(800.0, 600.0), 0x0ddba11);
    let input = TickInput {
        fire_held: true,
        pointer: glam::Vec2::new(600.0, 300.0),
        ..TickInput::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input, FrameTiming::from_frame_ms(1000.0 / 60.0));
        for event in state.drain_events() {
            log::info!("{:?}", event);
        }
    }

    println!(
        "Demo finished: score {}, {} enemies alive, {} projectiles in flight",
        state.score,
        state.enemies.len(),
        state.projectiles.len()
    );
}
