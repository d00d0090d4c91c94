/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws.
///
/// Each grid cell of the board occupies two terminal columns, which
/// makes the cells roughly square in most fonts.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::sim::world::{Phase, WorldState, DIFFICULTIES};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells, so the
    /// inter-row gap pixels on VTE-based terminals match the cell color
    /// and no horizontal lines show.
    const BASE_BG: Color = Color::Rgb { r: 18, g: 20, b: 28 };

    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::White,
        bg: Cell::BASE_BG,
    };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell {
        ch: '?',
        fg: Color::Magenta,
        bg: Color::Magenta,
    };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── Palette ──

const BOARD_BG: Color = Color::Rgb { r: 30, g: 34, b: 44 };
const SNAKE_BODY: Color = Color::Rgb { r: 0, g: 200, b: 0 };
const SNAKE_HEAD: Color = Color::Rgb { r: 200, g: 200, b: 0 };
const APPLE_FG: Color = Color::Rgb { r: 230, g: 60, b: 50 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 24, b: 64 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const ACCENT: Color = Color::Rgb { r: 90, g: 230, b: 90 };
const GOLD: Color = Color::Rgb { r: 255, g: 200, b: 50 };

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.set(cx, y, Cell::new(ch, fg, bg));
            cx += 1;
        }
    }

    /// Fill a whole row with a background color.
    fn fill_row(&mut self, y: usize, fg: Color, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', fg, bg));
        }
    }
}

// ── Renderer ──

/// Terminal columns per board cell.
const CELL_W: usize = 2;

/// Rows reserved above the board (HUD + gap).
const BOARD_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Detect phase change → clear for clean transition
        let phase_changed = self.last_phase != Some(world.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        // Build front buffer
        self.front.clear();

        match world.phase {
            Phase::Menu => self.compose_menu(world),
            Phase::Playing => self.compose_game(world),
            Phase::Paused => {
                self.compose_game(world);
                self.compose_pause_overlay();
            }
            Phase::Dead => self.compose_death(world),
            Phase::Exit => {}
        }

        // Diff and emit
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame. Not ResetColor:
        // the terminal's native default may differ from BASE_BG and
        // cause line artifacts.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                let prev = self.back.get(x, y);

                if cell == prev {
                    need_move = true;
                    continue;
                }

                // Position cursor if needed
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                // Set colors only if changed
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.ch))?;

                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Board origin: center the board in the terminal ──

    fn board_origin(&self, w: &WorldState) -> (usize, usize) {
        let board_cols = w.grid.width as usize * CELL_W;
        let board_rows = w.grid.height as usize;
        let ox = self.term_w.saturating_sub(board_cols) / 2;
        let avail = self.term_h.saturating_sub(BOARD_ROW + 2);
        let oy = BOARD_ROW + avail.saturating_sub(board_rows) / 2;
        (ox, oy)
    }

    // ── Compose: build front buffer content ──

    fn compose_game(&mut self, w: &WorldState) {
        // ── HUD row ──
        let label = if DIFFICULTIES[w.difficulty_idx].1 == w.fps {
            DIFFICULTIES[w.difficulty_idx].0
        } else {
            "Custom"
        };
        let hud = format!(
            " Length:{:<4}  Speed:{:>2} tps ({}) ",
            w.snake.len(),
            w.fps,
            label,
        );
        self.front.fill_row(0, Color::White, HUD_BG);
        self.front.put_str(0, 0, &hud, Color::White, HUD_BG);

        // ── Board ──
        let (ox, oy) = self.board_origin(w);
        for gy in 0..w.grid.height as usize {
            let row = oy + gy;
            if row >= self.front.height { break; }
            for gx in 0..w.grid.width as usize {
                let col = ox + gx * CELL_W;
                if col + 1 >= self.front.width { break; }
                self.front.set(col, row, Cell::new(' ', Color::White, BOARD_BG));
                self.front.set(col + 1, row, Cell::new(' ', Color::White, BOARD_BG));
            }
        }

        // Apple
        self.put_board_cell(w, w.apple.cell.x, w.apple.cell.y, '●', APPLE_FG, BOARD_BG);

        // Snake body, then head on top
        for seg in w.snake.body() {
            self.put_board_pair(w, seg.x, seg.y, SNAKE_BODY);
        }
        let head = w.snake.head();
        self.put_board_pair(w, head.x, head.y, SNAKE_HEAD);

        // ── Message bar ──
        if !w.message.is_empty() {
            let msg_row = self.front.height.saturating_sub(2);
            let msg = format!(" ◈ {} ", w.message);
            self.front.fill_row(msg_row, Color::Black, MSG_BG);
            self.front.put_str(0, msg_row, &msg, Color::Black, MSG_BG);
        }

        // ── Help bar ──
        let help_row = self.front.height.saturating_sub(1);
        let help = " ←↑↓→/WASD Steer   P Pause   │   Pad: D-Pad steer, Start pause";
        self.front.put_str(0, help_row, help, Color::DarkGrey, Cell::BASE_BG);
    }

    /// Paint one board cell (both terminal columns) in a solid color.
    fn put_board_pair(&mut self, w: &WorldState, gx: i32, gy: i32, bg: Color) {
        let (ox, oy) = self.board_origin(w);
        let col = ox + gx as usize * CELL_W;
        let row = oy + gy as usize;
        self.front.set(col, row, Cell::new(' ', Color::White, bg));
        self.front.set(col + 1, row, Cell::new(' ', Color::White, bg));
    }

    /// Put a single glyph into the left column of a board cell.
    fn put_board_cell(&mut self, w: &WorldState, gx: i32, gy: i32, ch: char, fg: Color, bg: Color) {
        let (ox, oy) = self.board_origin(w);
        let col = ox + gx as usize * CELL_W;
        let row = oy + gy as usize;
        self.front.set(col, row, Cell::new(ch, fg, bg));
        self.front.set(col + 1, row, Cell::new(' ', fg, bg));
    }

    fn compose_menu(&mut self, w: &WorldState) {
        let title = [
            r"  ___  _  _  _    _                ",
            r" / __|| |(_)| |_ | |_   ___  _ _  ",
            r" \__ \| || ||  _||   \ / -_)| '_| ",
            r" |___/|_||_| \__||_||_|\___||_|   ",
        ];

        for (i, line) in title.iter().enumerate() {
            self.front.put_str(4, 2 + i, line, GOLD, Cell::BASE_BG);
        }

        let subtitle = "◈◈  Apple Run  ◈◈";
        let sx = 4 + (title[1].chars().count().saturating_sub(subtitle.chars().count())) / 2;
        self.front.put_str(sx, 7, subtitle, ACCENT, Cell::BASE_BG);

        // Menu entries
        let menu_base = 10;
        let blink = (w.anim_tick / 5) % 2 == 0;
        let entries = [
            "Play".to_string(),
            format!("Difficulty  ‹ {} ›", DIFFICULTIES[w.difficulty_idx].0),
            "Exit".to_string(),
        ];

        for (i, entry) in entries.iter().enumerate() {
            let row = menu_base + i * 2;
            if i == w.menu_cursor {
                let arrow = if blink { "▸ " } else { "  " };
                self.front.put_str(8, row, arrow, ACCENT, Cell::BASE_BG);
                self.front.put_str(10, row, entry, ACCENT, Cell::BASE_BG);
            } else {
                self.front.put_str(10, row, entry, Color::White, Cell::BASE_BG);
            }
        }

        // Controls reference
        let help = [
            "Controls",
            "  ↑↓          Choose       ENTER  Confirm",
            "  ←→          Difficulty   Q/ESC  Quit",
            "  In game:    ←↑↓→ / WASD steer, P pause",
        ];
        let help_base = menu_base + 7;
        for (i, line) in help.iter().enumerate() {
            let color = if i == 0 { GOLD } else { Color::White };
            self.front.put_str(8, help_base + i, line, color, Cell::BASE_BG);
        }

        let board_info = format!(
            "      Board {}×{} cells",
            w.grid.width, w.grid.height,
        );
        self.front.put_str(8, help_base + 5, &board_info, Color::DarkGrey, Cell::BASE_BG);
    }

    fn compose_death(&mut self, w: &WorldState) {
        let art = [
            r"   ___   _   __  __  ___    _____   _____  ___ ",
            r"  / __| /_\ |  \/  || __|  / _ \ \ / / __|| _ \",
            r" | (_ |/ _ \| |\/| || _|  | (_) \ V /| _| |   /",
            r"  \___/_/ \_\_|  |_||___|  \___/ \_/ |___||_|_\",
        ];

        let top = (self.term_h / 2).saturating_sub(5);
        for (i, line) in art.iter().enumerate() {
            let x = self.term_w.saturating_sub(line.chars().count()) / 2;
            self.front.put_str(x, top + i, line, APPLE_FG, Cell::BASE_BG);
        }

        let score = format!("The snake ate itself at length {}", w.snake.len());
        let x = self.term_w.saturating_sub(score.chars().count()) / 2;
        self.front.put_str(x, top + 6, &score, Color::White, Cell::BASE_BG);

        let blink = (w.anim_tick / 6) % 2 == 0;
        if blink {
            let hint = "ENTER  Try Again      ESC  Menu";
            let x = self.term_w.saturating_sub(hint.chars().count()) / 2;
            self.front.put_str(x, top + 9, hint, ACCENT, Cell::BASE_BG);
        }
    }

    fn compose_pause_overlay(&mut self) {
        let lines = [
            "╔══════════════════════════════╗",
            "║           PAUSED             ║",
            "║   P Resume      ESC Menu     ║",
            "╚══════════════════════════════╝",
        ];
        let box_w = lines[0].chars().count();
        let x0 = self.term_w.saturating_sub(box_w) / 2;
        let y0 = (self.term_h / 2).saturating_sub(2);

        for (i, line) in lines.iter().enumerate() {
            self.front.put_str(x0, y0 + i, line, GOLD, Cell::BASE_BG);
        }
    }
}
