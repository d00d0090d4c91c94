/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use config::GameConfig;
use domain::snake::{FrameInput, Heading};
use sim::event::GameEvent;
use sim::state::{self, Action};
use sim::step;
use sim::world::{Phase, WorldState};
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::menu;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = match WorldState::new(&config, SmallRng::from_entropy()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Could not set up the board: {e}");
            return;
        }
    };

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Slither!");
    println!("Final length: {}", world.snake.len());
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let mut last_tick = Instant::now();

    // Direction pressed between ticks; consumed by the next tick.
    let mut pending_turn: Option<Heading> = None;

    loop {
        kb.drain_events();
        gp.update();

        if kb.ctrl_c_pressed() {
            break;
        }

        for action in menu::handle(world, &kb, &gp) {
            state::apply(world, action)?;
            process_action_sound(sound, action);
        }
        if world.phase == Phase::Exit {
            break;
        }

        if world.phase == Phase::Playing {
            if let Some(turn) = detect_turn(&kb, &gp) {
                pending_turn = Some(turn);
            }
        } else {
            pending_turn = None;
        }

        let tick_rate = Duration::from_millis(1000 / world.fps.max(1) as u64);
        if last_tick.elapsed() >= tick_rate {
            match world.phase {
                Phase::Playing => {
                    let input = FrameInput { turn: pending_turn.take() };
                    let events = step::step(world, input)?;
                    process_sound_events(sound, &events);
                }
                Phase::Menu | Phase::Paused | Phase::Dead => {
                    world.anim_tick = world.anim_tick.wrapping_add(1);
                    if world.message_timer > 0 {
                        world.message_timer -= 1;
                        if world.message_timer == 0 {
                            world.message.clear();
                        }
                    }
                }
                Phase::Exit => {}
            }
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];

/// The latest direction press this frame, keyboard first.
fn detect_turn(kb: &InputState, gp: &GamepadState) -> Option<Heading> {
    let mut turn = None;
    for code in kb.presses() {
        if KEYS_UP.contains(code) {
            turn = Some(Heading::Up);
        } else if KEYS_DOWN.contains(code) {
            turn = Some(Heading::Down);
        } else if KEYS_LEFT.contains(code) {
            turn = Some(Heading::Left);
        } else if KEYS_RIGHT.contains(code) {
            turn = Some(Heading::Right);
        }
    }
    if turn.is_none() {
        if gp.up_pressed() {
            turn = Some(Heading::Up);
        } else if gp.down_pressed() {
            turn = Some(Heading::Down);
        } else if gp.left_pressed() {
            turn = Some(Heading::Left);
        } else if gp.right_pressed() {
            turn = Some(Heading::Right);
        }
    }
    turn
}

fn process_action_sound(sound: Option<&SoundEngine>, action: Action) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    match action {
        Action::Start | Action::Retry => sfx.play_start(),
        Action::Pause | Action::Resume => sfx.play_pause(),
        _ => {}
    }
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::AppleEaten { .. } => sfx.play_eat(),
            GameEvent::SnakeDied => sfx.play_die(),
            _ => {}
        }
    }
}
