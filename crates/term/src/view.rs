//! GameView: maps engine state into a terminal framebuffer.
//!
//! Pure with respect to the terminal (no I/O), so it can be unit-tested by
//! inspecting the framebuffer. Draws the playfield with ghost and active
//! piece, the side panel (score, hold, next queue, statistics, high scores),
//! and the menu / pause / game-over screens.

use tetrix_core::{Engine, Shape};
use tetrix_types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::effects::Effects;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Per-kind block color (classic palette).
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::J => Rgb::new(0, 100, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(0, 255, 100),
        PieceKind::T => Rgb::new(160, 32, 240),
        PieceKind::Z => Rgb::new(255, 50, 50),
    }
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is resized only when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        engine: &Engine,
        effects: &mut Effects,
        high_scores: &[u32],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Default::default());

        if engine.phase() == GamePhase::Menu {
            self.draw_menu(fb, high_scores);
            return;
        }

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let (shake_x, shake_y) = effects.shake_offset();
        let start_x = (viewport.width.saturating_sub(frame_w + PANEL_W) / 2) as i32 + shake_x as i32;
        let start_y = (viewport.height.saturating_sub(frame_h) / 2) as i32 + shake_y as i32;
        let start_x = start_x.max(0) as u16;
        let start_y = start_y.max(0) as u16;

        self.draw_playfield(engine, effects, fb, start_x, start_y);
        self.draw_particles(effects, fb, start_x, start_y, frame_w, frame_h);
        self.draw_side_panel(engine, high_scores, fb, start_x + frame_w + 2, start_y);

        match engine.phase() {
            GamePhase::Paused => self.draw_pause_overlay(fb),
            GamePhase::GameOver => self.draw_game_over_overlay(engine, fb),
            _ => {}
        }
    }

    fn draw_playfield(
        &self,
        engine: &Engine,
        effects: &Effects,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
    ) {
        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;

        let empty_bg = if effects.flash_active() {
            Rgb::new(90, 90, 100)
        } else {
            Rgb::new(25, 25, 35)
        };
        let bg = CellStyle {
            fg: Rgb::new(60, 60, 70),
            bg: empty_bg,
            bold: false,
            dim: false,
        };
        let border = CellStyle::with_fg(Rgb::new(200, 200, 200));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, board_px_w + 2, board_px_h + 2, border);

        // Locked cells, with cleared rows flickering while the effect runs.
        let board = engine.board();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if let Some(Some(kind)) = board.get(x as i8, y as i8) {
                    let mut color = piece_color(kind);
                    if effects.row_flickering(y) {
                        color = color.scaled(1, 3);
                    }
                    self.fill_board_cell(fb, start_x, start_y, x as u16, y as u16, '█', color);
                }
            }
        }

        // Ghost outline below the falling piece.
        if let (Some(piece), Some(ghost_y)) = (engine.current(), engine.ghost_y()) {
            let color = piece_color(piece.kind).scaled(1, 2);
            for (dx, dy) in piece.shape().cells() {
                let x = piece.x + dx;
                let y = ghost_y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.fill_board_cell(fb, start_x, start_y, x as u16, y as u16, '░', color);
                }
            }
        }

        // Falling piece on top.
        if let Some(piece) = engine.current() {
            let color = piece_color(piece.kind);
            for (dx, dy) in piece.shape().cells() {
                let x = piece.x + dx;
                let y = piece.y + dy;
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.fill_board_cell(fb, start_x, start_y, x as u16, y as u16, '█', color);
                }
            }
        }
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        color: Rgb,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, CellStyle::with_fg(color));
    }

    fn draw_border(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
        for dx in 0..w {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 0..h {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
    }

    fn draw_particles(
        &self,
        effects: &Effects,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        for p in effects.particles() {
            let px = start_x as i32 + 1 + (p.x * self.cell_w as f32) as i32;
            let py = start_y as i32 + 1 + (p.y * self.cell_h as f32) as i32;
            // Keep sparks inside the playfield frame.
            if px <= start_x as i32
                || py <= start_y as i32
                || px >= (start_x + frame_w - 1) as i32
                || py >= (start_y + frame_h - 1) as i32
            {
                continue;
            }
            let (r, g, b) = p.color;
            fb.put_char(
                px as u16,
                py as u16,
                p.glyph(),
                CellStyle::with_fg(Rgb::new(r, g, b)),
            );
        }
    }

    fn draw_side_panel(
        &self,
        engine: &Engine,
        high_scores: &[u32],
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
    ) {
        let label = CellStyle::with_fg(Rgb::new(140, 140, 150));
        let value = CellStyle::default();
        let accent = CellStyle::with_fg(Rgb::new(255, 255, 0));

        let mut row = y;
        fb.put_str(x, row, &format!("Score  {}", engine.score()), value);
        row += 1;
        fb.put_str(x, row, &format!("Level  {}", engine.level()), value);
        row += 1;
        fb.put_str(x, row, &format!("Lines  {}", engine.lines()), value);
        row += 1;
        if engine.combo() > 0 {
            fb.put_str(x, row, &format!("Combo  {}x", engine.combo()), accent);
        }
        row += 2;

        fb.put_str(x, row, "Hold", label);
        if let Some(kind) = engine.hold_kind() {
            self.draw_mini_piece(fb, x, row + 1, kind);
        }
        row += 4;

        fb.put_str(x, row, "Next", label);
        for (i, &kind) in engine.next_queue().iter().enumerate() {
            self.draw_mini_piece(fb, x, row + 1 + (i as u16) * 3, kind);
        }
        row += 2 + 3 * engine.next_queue().len() as u16;

        let stats = engine.stats();
        fb.put_str(x, row, "Pieces", label);
        row += 1;
        for (kind, count) in stats.per_kind() {
            fb.put_str(
                x,
                row,
                &format!("{}  {}", kind.as_str(), count),
                CellStyle::with_fg(piece_color(kind)),
            );
            row += 1;
        }
        row += 1;

        fb.put_str(
            x,
            row,
            &format!("PPS {:.2}  LPS {:.2}", stats.pieces_per_second(), stats.lines_per_second()),
            label,
        );
        row += 1;
        fb.put_str(x, row, &format!("Time {:.0}s", stats.elapsed_secs()), label);
        row += 2;

        if !high_scores.is_empty() {
            fb.put_str(x, row, "Best", label);
            row += 1;
            for &score in high_scores.iter().take(5) {
                fb.put_str(x, row, &format!("{score}"), value);
                row += 1;
            }
        }
    }

    fn draw_mini_piece(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::with_fg(piece_color(kind));
        for (dx, dy) in Shape::base(kind).cells() {
            fb.fill_rect(x + (dx as u16) * 2, y + dy as u16, 2, 1, '█', style);
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, high_scores: &[u32]) {
        let title = CellStyle {
            fg: Rgb::new(0, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let text = CellStyle::default();
        let dim = CellStyle::with_fg(Rgb::new(140, 140, 150));

        let top = fb.height() / 4;
        fb.put_str_centered(top, "T E T R I X", title);

        let lines = [
            "Controls:",
            "Left/Right  move",
            "Down        soft drop",
            "Space       hard drop",
            "Up          rotate",
            "C           hold",
            "P           pause",
        ];
        for (i, line) in lines.iter().enumerate() {
            fb.put_str_centered(top + 3 + i as u16, line, dim);
        }

        if let Some(&best) = high_scores.first() {
            fb.put_str_centered(top + 11, &format!("Best score: {best}"), text);
        }
        fb.put_str_centered(top + 13, "Press SPACE to start", text);
    }

    fn draw_pause_overlay(&self, fb: &mut FrameBuffer) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let mid = fb.height() / 2;
        fb.put_str_centered(mid, " PAUSED ", style);
        fb.put_str_centered(mid + 2, " Press 'P' to resume ", CellStyle::default());
    }

    fn draw_game_over_overlay(&self, engine: &Engine, fb: &mut FrameBuffer) {
        let alert = CellStyle {
            fg: Rgb::new(255, 50, 50),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let text = CellStyle::default();

        let mid = fb.height() / 2;
        fb.put_str_centered(mid.saturating_sub(3), " GAME OVER ", alert);
        fb.put_str_centered(mid.saturating_sub(1), &format!(" Final score: {} ", engine.score()), text);
        fb.put_str_centered(mid, &format!(" Level reached: {} ", engine.level()), text);
        fb.put_str_centered(mid + 2, " Press 'R' to restart or 'Q' to quit ", text);
    }
}

/// Side panel width in terminal columns (reserved right of the board).
const PANEL_W: u16 = 24;
