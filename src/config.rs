/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub gamepad: GamepadConfig,
}

/// Board geometry in pixels; the grid is derived as width/cell_size ×
/// height/cell_size cells.
#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RulesConfig {
    /// Simulation ticks per second. The menu difficulty selector
    /// overrides this for the session.
    pub fps: u32,
    /// The snake grows into this length during the opening moves.
    pub start_length: usize,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
    pub pause: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlBoard {
    #[serde(default = "default_board_width")]
    width: u32,
    #[serde(default = "default_board_height")]
    height: u32,
    #[serde(default = "default_cell_size")]
    cell_size: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_fps")]
    fps: u32,
    #[serde(default = "default_start_length")]
    start_length: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
}

// ── Defaults ──

fn default_board_width() -> u32 { 1280 }
fn default_board_height() -> u32 { 720 }
fn default_cell_size() -> u32 { 20 }
fn default_fps() -> u32 { 20 }
fn default_start_length() -> usize { 6 }

fn default_confirm() -> Vec<String> { vec!["Start".into(), "A".into()] }
fn default_cancel() -> Vec<String> { vec!["Select".into(), "B".into()] }
fn default_pause() -> Vec<String> { vec!["Start".into()] }

impl Default for TomlBoard {
    fn default() -> Self {
        TomlBoard {
            width: default_board_width(),
            height: default_board_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            fps: default_fps(),
            start_length: default_start_length(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
            pause: default_pause(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        // Out-of-range values revert to defaults rather than aborting.
        let cell_size = if toml_cfg.board.cell_size == 0 {
            default_cell_size()
        } else {
            toml_cfg.board.cell_size
        };
        let width = toml_cfg.board.width.max(cell_size * 4);
        let height = toml_cfg.board.height.max(cell_size * 4);
        let fps = toml_cfg.game.fps.clamp(1, 240);
        let start_length = toml_cfg.game.start_length.max(1);

        GameConfig {
            board: BoardConfig { width, height, cell_size },
            rules: RulesConfig { fps, start_length },
            gamepad: GamepadConfig {
                confirm: toml_cfg.gamepad.confirm,
                cancel: toml_cfg.gamepad.cancel,
                pause: toml_cfg.gamepad.pause,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so a /usr/bin shim still finds data relative
        // to the real binary.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/slither)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/slither");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory (/usr/share/slither)
    let sys = PathBuf::from("/usr/share/slither");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
