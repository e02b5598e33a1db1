//! WebAssembly bindings for the Recipe Puzzle engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. The
//! page owns the real timers: it calls `tick` once a second while
//! `isTimerRunning` is true, and passes hint tokens back to `hideHint`.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::config::GameConfig;
#[cfg(feature = "wasm")]
use crate::game::GameState;
#[cfg(feature = "wasm")]
use crate::recipe::Catalog;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON config (`"{}"` for defaults) using the built-in recipes
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmGame, JsValue> {
        let config: GameConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;

        let state = GameState::new(config, Catalog::builtin())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame { state })
    }

    /// Create a game with a custom JSON catalog
    #[wasm_bindgen(js_name = withCatalog)]
    pub fn with_catalog(config_json: &str, catalog_json: &str) -> Result<WasmGame, JsValue> {
        let config: GameConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        let catalog =
            Catalog::from_json(catalog_json).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let state =
            GameState::new(config, catalog).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame { state })
    }

    /// Get the render snapshot as JSON
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Apply an action from JSON, returns events JSON or the rejection reason
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        self.dispatch(action)
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, piece_id: u32) -> Result<String, JsValue> {
        self.dispatch(GameAction::DragStart(piece_id))
    }

    #[wasm_bindgen(js_name = drop)]
    pub fn drop_piece(&mut self, slot_index: usize) -> Result<String, JsValue> {
        self.dispatch(GameAction::Drop(slot_index))
    }

    #[wasm_bindgen(js_name = requestHint)]
    pub fn request_hint(&mut self) -> Result<String, JsValue> {
        self.dispatch(GameAction::RequestHint)
    }

    /// Hide a hint; `token_json` is the token from the `HintRevealed` event
    #[wasm_bindgen(js_name = hideHint)]
    pub fn hide_hint(&mut self, token_json: &str) -> Result<String, JsValue> {
        let token = serde_json::from_str(token_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid token JSON: {}", e)))?;
        self.dispatch(GameAction::HideHint(token))
    }

    pub fn tick(&mut self) -> Result<String, JsValue> {
        self.dispatch(GameAction::Tick)
    }

    #[wasm_bindgen(js_name = playAgain)]
    pub fn play_again(&mut self) -> Result<String, JsValue> {
        self.dispatch(GameAction::PlayAgain)
    }

    /// Whether the page should be ticking
    #[wasm_bindgen(js_name = isTimerRunning)]
    pub fn is_timer_running(&self) -> bool {
        self.state.timer_running()
    }

    #[wasm_bindgen(js_name = isComplete)]
    pub fn is_complete(&self) -> bool {
        self.state.complete
    }
}

#[cfg(feature = "wasm")]
impl WasmGame {
    fn dispatch(&mut self, action: GameAction) -> Result<String, JsValue> {
        match self.state.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action rejected: {}", e))),
        }
    }
}
