//! Runner scene rendering.
//!
//! The 420x290 px world is scaled onto the play field and drawn into a cell
//! buffer (one char plus fg/bg per cell) which is then stamped row by row as
//! Paragraph widgets.

use super::game_common::{format_score, render_header, render_hints, split_screen};
use super::Hud;
use crate::core::constants::{
    HORIZON_TILE_SIZE, HORIZON_Y, OBSTACLE_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH, TILE_SIZE,
    VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
use crate::runner::{RunPhase, RunnerScene};
use crate::scroll::{ScrollEntity, TileKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SKY: Color = Color::Rgb(223, 246, 245);
const LOWER_SKY: Color = Color::Rgb(255, 255, 255);
const PLAYER_COLOR: Color = Color::Rgb(120, 60, 160);
const TEXT_COLOR: Color = Color::Rgb(0, 0, 0);
const HORIZON_CELL: Cell = Cell {
    ch: '░',
    fg: Color::Rgb(185, 225, 228),
    bg: SKY,
};

const START_PROMPT: &str = "Press Space to start";

/// Render the full game screen.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, scene: &RunnerScene, hud: &Hud) {
    let screen = split_screen(frame, area, " Dino Run ", Color::LightGreen, 24);

    render_header(frame, screen.header, scene.restarts + 1, scene.state.high_score);
    render_play_field(frame, screen.field, scene, hud);
    render_status(frame, screen.hints, scene, hud);
    render_info_panel(frame, screen.side, scene, hud);
}

/// Cell in the render buffer with foreground and background colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// World-to-cell mapping for one play field size.
pub(crate) struct FieldBuffer {
    pub cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl FieldBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![Cell::default(); width as usize]; height as usize],
            width: width as usize,
            height: height as usize,
            x_scale: width as f64 / VIEWPORT_WIDTH,
            y_scale: height as f64 / VIEWPORT_HEIGHT,
        }
    }

    /// Cells whose centers fall inside a centered box, clipped to the buffer.
    fn cover(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let span = |start_px: f64, end_px: f64, scale: f64, limit: usize| {
            let first = (start_px * scale - 0.5).ceil().max(0.0) as usize;
            let end = ((end_px * scale - 0.5).ceil().max(0.0) as usize).min(limit);
            first.min(end)..end
        };

        (
            span(x - w / 2.0, x + w / 2.0, self.x_scale, self.width),
            span(y - h / 2.0, y + h / 2.0, self.y_scale, self.height),
        )
    }

    fn fill(&mut self, x: f64, y: f64, w: f64, h: f64, cell: Cell) {
        let (cols, rows) = self.cover(x, y, w, h);
        for row in rows {
            for col in cols.clone() {
                self.cells[row][col] = cell;
            }
        }
    }

    fn text(&mut self, row: usize, col: usize, text: &str, style: Cell) {
        if row >= self.height {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = col + i;
            if col >= self.width {
                break;
            }
            let bg = self.cells[row][col].bg;
            self.cells[row][col] = Cell { ch, bg, ..style };
        }
    }
}

fn tile_cell(kind: TileKind) -> Cell {
    let (ch, fg, bg) = match kind {
        TileKind::Ground => ('▓', Color::Rgb(150, 100, 60), Color::Rgb(110, 70, 40)),
        TileKind::Grass => ('▀', Color::Rgb(70, 170, 70), Color::Rgb(110, 70, 40)),
        TileKind::Water => ('≈', Color::Rgb(60, 110, 210), Color::Rgb(30, 60, 150)),
        TileKind::ShallowWater => ('~', Color::Rgb(120, 180, 235), Color::Rgb(60, 120, 200)),
        TileKind::Cactus => ('‖', Color::Rgb(30, 120, 50), Color::Rgb(60, 160, 80)),
        TileKind::CloudLeft => ('(', Color::Rgb(150, 170, 180), Color::Rgb(250, 250, 250)),
        TileKind::CloudCenter => ('~', Color::Rgb(150, 170, 180), Color::Rgb(250, 250, 250)),
        TileKind::CloudRight => (')', Color::Rgb(150, 170, 180), Color::Rgb(250, 250, 250)),
    };
    Cell { ch, fg, bg }
}

fn draw_tile(buffer: &mut FieldBuffer, tile: &ScrollEntity) {
    let size = if tile.kind == TileKind::Cactus {
        OBSTACLE_SIZE
    } else {
        TILE_SIZE
    };
    buffer.fill(tile.x, tile.y, size, size, tile_cell(tile.kind));
}

/// Leg glyph for a run-cycle frame; the idle frame stands straight.
fn leg_glyph(frame: u32) -> char {
    match frame {
        5 | 7 => '/',
        6 | 8 => '\\',
        _ => '|',
    }
}

fn draw_player(buffer: &mut FieldBuffer, scene: &RunnerScene) {
    let player = &scene.player;
    let (cols, rows) = buffer.cover(player.x, player.y, PLAYER_WIDTH, PLAYER_HEIGHT);
    let (first_row, last_row) = (rows.start, rows.end.saturating_sub(1));

    for row in rows {
        for col in cols.clone() {
            let ch = if row == last_row && row != first_row {
                leg_glyph(player.animation.frame)
            } else {
                '█'
            };
            let bg = buffer.cells[row][col].bg;
            buffer.cells[row][col] = Cell {
                ch,
                fg: PLAYER_COLOR,
                bg,
            };
        }
    }
}

/// Darken every cell to approximate the translucent black start overlay.
fn dim(buffer: &mut FieldBuffer) {
    let darken = |color: Color| match color {
        Color::Rgb(r, g, b) => Color::Rgb(r / 5, g / 5, b / 5),
        _ => Color::Black,
    };
    for cell in buffer.cells.iter_mut().flatten() {
        cell.fg = darken(cell.fg);
        cell.bg = darken(cell.bg);
    }
}

/// Draw the world into a cell buffer of the given size.
pub(crate) fn build_field_buffer(
    width: u16,
    height: u16,
    scene: &RunnerScene,
    hud: &Hud,
) -> FieldBuffer {
    let mut buffer = FieldBuffer::new(width, height);

    // Background: sky over the top half, white below
    let half = buffer.height / 2;
    for (row, cells) in buffer.cells.iter_mut().enumerate() {
        let bg = if row < half { SKY } else { LOWER_SKY };
        for cell in cells.iter_mut() {
            cell.bg = bg;
        }
    }

    // Static backdrop strip, behind the clouds
    buffer.fill(
        VIEWPORT_WIDTH / 2.0,
        HORIZON_Y,
        VIEWPORT_WIDTH,
        HORIZON_TILE_SIZE,
        HORIZON_CELL,
    );

    let field = &scene.field;
    for cluster in &field.clouds {
        for member in &cluster.members {
            draw_tile(&mut buffer, member);
        }
    }
    for tile in field.ground.iter().chain(field.river.iter()) {
        draw_tile(&mut buffer, tile);
    }
    draw_tile(&mut buffer, &field.obstacle);
    draw_player(&mut buffer, scene);

    let waiting = scene.state.phase == RunPhase::NotStarted;
    if waiting && hud.variant.shows_start_overlay() {
        dim(&mut buffer);
        let row = buffer.height / 2;
        let col = buffer.width.saturating_sub(START_PROMPT.len()) / 2;
        buffer.text(
            row,
            col,
            START_PROMPT,
            Cell {
                ch: ' ',
                fg: Color::White,
                bg: Color::Reset,
            },
        );
    }

    // Score readouts sit above everything, overlay included
    let text_style = Cell {
        ch: ' ',
        fg: TEXT_COLOR,
        bg: Color::Reset,
    };
    let high = format!("high score: {}", scene.state.high_score);
    buffer.text(0, 2, &high, text_style);

    let score = format!("score: {}", scene.state.score);
    let score_col = buffer.width.saturating_sub(score.len() + 2);
    let score_style = if hud.milestone_flash > 0 {
        Cell {
            fg: Color::Rgb(200, 120, 0),
            ..text_style
        }
    } else {
        text_style
    };
    buffer.text(0, score_col, &score, score_style);

    buffer
}

fn render_play_field(frame: &mut Frame, area: Rect, scene: &RunnerScene, hud: &Hud) {
    if area.height < 2 || area.width < 10 {
        return;
    }

    let buffer = build_field_buffer(area.width, area.height, scene, hud);

    for (row_idx, row_data) in buffer.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_status(frame: &mut Frame, area: Rect, scene: &RunnerScene, hud: &Hud) {
    if scene.state.phase == RunPhase::NotStarted {
        let status = match hud.last_run {
            Some(run) if run.new_record => {
                format!("Crashed at {} - new high score!", format_score(run.score))
            }
            Some(run) => format!("Crashed at {}", format_score(run.score)),
            None => "Ready".to_string(),
        };
        render_hints(
            frame,
            area,
            &status,
            Color::LightYellow,
            &[("[Space/Up]", "Start"), ("[Q]", "Quit")],
        );
        return;
    }

    render_hints(
        frame,
        area,
        "Run!",
        Color::LightGreen,
        &[("[Space/Up]", "Jump"), ("[Q]", "Quit")],
    );
}

fn render_info_panel(frame: &mut Frame, inner: Rect, scene: &RunnerScene, hud: &Hud) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let field = &scene.field;
    let cached = field.respawn_cache.len();

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format_score(scene.state.score),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Ticks: ", label),
            Span::styled(format!("{}", scene.tick_count), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tiles: ", label),
            Span::styled(format!("{}", field.entity_count()), value),
        ]),
        Line::from(vec![
            Span::styled("Clouds: ", label),
            Span::styled(format!("{}/{} wrapped", cached, field.clouds.len()), value),
        ]),
        Line::from(vec![
            Span::styled("Mode:  ", label),
            Span::styled(hud.variant.name(), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(PLAYER_COLOR)),
            Span::styled("Runner", label),
        ]),
        Line::from(vec![
            Span::styled(" ‖ ", Style::default().fg(Color::Rgb(60, 160, 80))),
            Span::styled("Cactus", label),
        ]),
        Line::from(vec![
            Span::styled(" ≈ ", Style::default().fg(Color::Rgb(60, 110, 210))),
            Span::styled("River", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
