//! # User Interface Elements
//!
//! Side panel with items, ability cooldowns, and the message log, plus the
//! end-of-level overlay.

use crate::game::{Ability, GameCompletionState, GameState, Player};
use macroquad::prelude::*;

/// HUD and overlay drawing.
pub struct UI {
    pub font_size: f32,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self { font_size: 18.0 }
    }

    /// Draws the side panel starting at `panel_x`.
    pub fn render_hud(&self, game_state: &GameState, panel_x: f32, messages: &[String]) {
        let mut line_y = 30.0;
        let line = self.font_size + 6.0;

        draw_text("SHADOWMAZE", panel_x, line_y, 24.0, WHITE);
        line_y += line * 1.5;

        draw_text(
            &format!("Level {}", game_state.level_number),
            panel_x,
            line_y,
            self.font_size,
            WHITE,
        );
        line_y += line;
        draw_text(
            &format!(
                "Items: {}/{}",
                game_state.collected_count(),
                game_state.collectibles.len()
            ),
            panel_x,
            line_y,
            self.font_size,
            MAGENTA,
        );
        line_y += line * 1.5;

        for (ability, key) in [(Ability::Boost, 'E'), (Ability::Freeze, 'Q')] {
            let color = if game_state.player.is_ready(ability) { GREEN } else { GRAY };
            draw_text(
                &ability_label(&game_state.player, ability, key),
                panel_x,
                line_y,
                self.font_size,
                color,
            );
            line_y += line;
        }

        if game_state.alert_active() {
            line_y += line * 0.5;
            draw_text("! SPOTTED !", panel_x, line_y, self.font_size, RED);
        }

        line_y += line * 1.5;
        draw_text("Controls:", panel_x, line_y, self.font_size, SKYBLUE);
        for control in ["WASD/Arrows: move", "E: boost  Q: freeze", "R: restart  Esc: quit"] {
            line_y += line;
            draw_text(control, panel_x, line_y, 16.0, WHITE);
        }

        line_y += line * 1.5;
        for message in messages {
            draw_text(message, panel_x, line_y, 16.0, LIGHTGRAY);
            line_y += line * 0.8;
        }
    }

    /// Draws the victory or caught banner when the level has ended.
    pub fn render_ending_screen(&self, game_state: &GameState) {
        let (title, subtitle, color) = match game_state.completion_state() {
            GameCompletionState::Playing => return,
            GameCompletionState::Victory => (
                "VICTORY".to_string(),
                format!(
                    "Next level in {:.0}s",
                    game_state.victory_time_remaining().ceil()
                ),
                GOLD,
            ),
            GameCompletionState::Caught => (
                "CAUGHT".to_string(),
                "Press R to try again".to_string(),
                RED,
            ),
        };

        draw_rectangle(
            0.0,
            0.0,
            screen_width(),
            screen_height(),
            Color::new(0.0, 0.0, 0.0, 0.6),
        );
        let center_x = screen_width() / 2.0;
        let center_y = screen_height() / 2.0;
        let title_size = measure_text(&title, None, 64, 1.0);
        draw_text(&title, center_x - title_size.width / 2.0, center_y, 64.0, color);
        let subtitle_size = measure_text(&subtitle, None, 24, 1.0);
        draw_text(
            &subtitle,
            center_x - subtitle_size.width / 2.0,
            center_y + 40.0,
            24.0,
            WHITE,
        );
    }
}

/// HUD text for one ability: ready, running, or cooling down.
pub fn ability_label(player: &Player, ability: Ability, key: char) -> String {
    if ability == Ability::Boost && player.is_boosted() {
        return format!("[{}] {}: active {:.1}s", key, ability.name(), player.boost_remaining());
    }
    if player.is_ready(ability) {
        format!("[{}] {}: ready", key, ability.name())
    } else {
        format!(
            "[{}] {}: {:.0}s",
            key,
            ability.name(),
            player.cooldown_remaining(ability).ceil()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::game::WorldPos;

    #[test]
    fn test_ability_labels() {
        let mut player = Player::new(WorldPos::new(0.0, 0.0), &PlayerConfig::default());
        assert_eq!(ability_label(&player, Ability::Freeze, 'Q'), "[Q] Freeze: ready");

        player.try_activate(Ability::Freeze);
        player.advance_timers(4.5);
        assert_eq!(ability_label(&player, Ability::Freeze, 'Q'), "[Q] Freeze: 16s");

        player.try_activate(Ability::Boost);
        assert_eq!(ability_label(&player, Ability::Boost, 'E'), "[E] Boost: active 3.0s");
    }
}
