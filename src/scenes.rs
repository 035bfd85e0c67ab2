//! # Scene Management System
//!
//! The frame loop: poll input, tick the simulation, draw. The scene only
//! tracks which screen is showing; all game rules live in [`GameState`].

use crate::{
    GameCompletionState, GameState, InputHandler, MacroquadDisplay, ShadowmazeResult,
};
use log::info;
use macroquad::prelude::*;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// Victory or capture screen
    GameOver(GameCompletionState),
}

impl SceneType {
    /// The scene that shows a game in the given state.
    pub fn for_state(state: GameCompletionState) -> Self {
        match state {
            GameCompletionState::Playing => SceneType::Playing,
            ended => SceneType::GameOver(ended),
        }
    }
}

/// Longest frame delta fed to the simulation, in seconds.
///
/// Stalls (window drags, breakpoints) would otherwise teleport actors
/// through several cells in one tick.
pub const MAX_FRAME_TIME: f32 = 0.1;

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a new scene manager with the given game state and input handler
    pub async fn new(game_state: GameState, input_handler: InputHandler) -> ShadowmazeResult<Self> {
        let mut display = MacroquadDisplay::new().await?;
        display.add_message("Collect every item. Stay out of sight.".to_string());

        Ok(Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler,
        })
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    /// Runs the main scene loop until the game exits
    pub async fn run(&mut self) -> ShadowmazeResult<()> {
        loop {
            if self.update_frame()? {
                break;
            }
            next_frame().await;
        }
        info!(
            "Exiting after {} ticks, {} levels cleared",
            self.game_state.statistics.ticks, self.game_state.statistics.levels_cleared
        );
        Ok(())
    }

    /// Runs one frame, returns true if exit is requested
    fn update_frame(&mut self) -> ShadowmazeResult<bool> {
        let input = self.input_handler.snapshot();
        if input.quit {
            return Ok(true);
        }

        let dt = get_frame_time().min(MAX_FRAME_TIME);
        let events = self.game_state.tick(&input, dt)?;
        self.display.handle_events(&events);

        let scene = SceneType::for_state(self.game_state.completion_state());
        if scene != self.current_scene {
            info!("Scene {:?} -> {:?}", self.current_scene, scene);
            self.current_scene = scene;
        }

        self.display.render_game(&self.game_state, dt)?;
        Ok(false)
    }
}
