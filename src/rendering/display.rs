//! # Display Management
//!
//! Draws the maze, actors, and the alert flash with macroquad.

use crate::game::{GameEvent, GameState, Monster, MonsterState, Side, WorldPos};
use crate::rendering::UI;
use crate::ShadowmazeResult;
use macroquad::prelude::*;

/// Macroquad display manager for the game.
///
/// Scales the world to fit the window and keeps a short log of event
/// messages for the side panel.
pub struct MacroquadDisplay {
    /// Pixels per world unit
    pub scale: f32,
    /// Screen position of the world origin
    pub origin: Vec2,
    /// UI panel width in pixels
    pub ui_panel_width: f32,
    /// Message history, newest last
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Seconds left on the alert screen flash
    pub alert_flash: f32,
    pub ui: UI,
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub async fn new() -> ShadowmazeResult<Self> {
        Ok(Self {
            scale: 1.0,
            origin: vec2(10.0, 10.0),
            ui_panel_width: 260.0,
            messages: Vec::new(),
            max_messages: 8,
            alert_flash: 0.0,
            ui: UI::new(),
        })
    }

    /// Adds a message to the log.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Logs the tick's events and starts the alert flash when one is raised.
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if matches!(event, GameEvent::AlertRaised) {
                self.alert_flash = 0.4;
            }
            if let Some(message) = event_message(event) {
                self.add_message(message);
            }
        }
    }

    fn to_screen(&self, point: WorldPos) -> Vec2 {
        self.origin + vec2(point.x, point.y) * self.scale
    }

    /// Fits the world into the window left of the UI panel.
    fn fit(&mut self, game_state: &GameState) {
        let available_w = screen_width() - self.ui_panel_width - 20.0;
        let available_h = screen_height() - 20.0;
        let world_w = game_state.config.world_width();
        let world_h = game_state.config.world_height();
        if world_w > 0.0 && world_h > 0.0 {
            self.scale = (available_w / world_w).min(available_h / world_h).max(0.1);
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&mut self, game_state: &GameState, dt: f32) -> ShadowmazeResult<()> {
        clear_background(BLACK);
        self.fit(game_state);

        self.render_maze(game_state);
        self.render_collectibles(game_state);
        for monster in game_state.visible_monsters() {
            self.render_monster(monster);
        }
        let player = &game_state.player;
        let center = self.to_screen(player.position);
        let color = if player.is_boosted() { YELLOW } else { SKYBLUE };
        draw_circle(center.x, center.y, player.radius * self.scale, color);

        if self.alert_flash > 0.0 {
            let alpha = (self.alert_flash / 0.4).clamp(0.0, 1.0) * 0.35;
            draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(1.0, 0.0, 0.0, alpha));
            self.alert_flash = (self.alert_flash - dt).max(0.0);
        }

        let panel_x = screen_width() - self.ui_panel_width;
        self.ui.render_hud(game_state, panel_x, &self.messages);
        self.ui.render_ending_screen(game_state);
        Ok(())
    }

    fn render_maze(&self, game_state: &GameState) {
        let cell_size = game_state.cell_size();
        let thickness = 2.0;
        for (y, row) in game_state.maze.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let top_left = self.to_screen(WorldPos::new(x as f32 * cell_size, y as f32 * cell_size));
                let size = cell_size * self.scale;
                let (left, top, right, bottom) = (top_left.x, top_left.y, top_left.x + size, top_left.y + size);

                if cell.has_wall(Side::Top) {
                    draw_line(left, top, right, top, thickness, WHITE);
                }
                if cell.has_wall(Side::Right) {
                    draw_line(right, top, right, bottom, thickness, WHITE);
                }
                if cell.has_wall(Side::Bottom) {
                    draw_line(left, bottom, right, bottom, thickness, WHITE);
                }
                if cell.has_wall(Side::Left) {
                    draw_line(left, top, left, bottom, thickness, WHITE);
                }
            }
        }
    }

    fn render_collectibles(&self, game_state: &GameState) {
        for item in game_state.collectibles.iter().filter(|item| !item.is_collected()) {
            let center = self.to_screen(item.position);
            let size = item.size * self.scale;
            draw_rectangle(center.x - size / 2.0, center.y - size / 2.0, size, size, MAGENTA);
        }
    }

    fn render_monster(&self, monster: &Monster) {
        let center = self.to_screen(monster.position);
        let color = if monster.is_frozen() {
            Color::new(0.6, 0.8, 1.0, 1.0)
        } else {
            match monster.state() {
                MonsterState::Chasing => RED,
                MonsterState::Patrolling => ORANGE,
            }
        };
        draw_circle(center.x, center.y, monster.radius * self.scale, color);
    }
}

/// Log line for an event, if it is worth showing.
pub fn event_message(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::ItemCollected { remaining, .. } => {
            Some(format!("Item collected, {} to go", remaining))
        }
        GameEvent::PlayerCaught { .. } => Some("Caught!".to_string()),
        GameEvent::AbilityActivated { ability } => Some(format!("{} activated", ability.name())),
        GameEvent::AlertRaised => Some("You have been spotted".to_string()),
        GameEvent::Victory => Some("All items collected!".to_string()),
        GameEvent::LevelReset { level, .. } => Some(format!("Level {}", level)),
        GameEvent::MonsterStateChanged { .. } => None,
    }
}
