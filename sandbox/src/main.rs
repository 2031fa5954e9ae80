// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sandbox showing how priorities and same-tick cancellation resolve
//! conflicts between behaviours bound to the same input.

use anyhow::{Context, Result};
use prime_actions::{MultiplexerRegistry, RegistryConfig};
use prime_core::{ActionValue, EventKind};
use prime_infra::{ActionMap, FrameClock};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Default)]
struct DemoState {
    dialog_open: Cell<bool>,
    quit_requested: Cell<bool>,
}

/// "Close dialog" and "exit application" share the Escape key.
///
/// The dialog handler runs first (priority 10) and cancels the rest of the
/// pass when it consumed the key.
fn prepare_dialog_conflict(registry: &MultiplexerRegistry, state: &Rc<DemoState>) -> Result<()> {
    let cancel = registry.get_or_create("ui/cancel")?;

    let (dialog_state, dialog_cancel) = (Rc::clone(state), cancel.clone());
    cancel.performed(10, move |_| {
        if !dialog_state.dialog_open.get() {
            return;
        }
        log::info!("Closing dummy dialog");
        dialog_state.dialog_open.set(false);
        log::info!("Canceling further notification of event");
        dialog_cancel.cancel(EventKind::Performed);
    });

    let quit_state = Rc::clone(state);
    cancel.performed(0, move |_| {
        log::info!("Quitting application");
        quit_state.quit_requested.set(true);
    });
    Ok(())
}

/// "Save" (Ctrl+S) is part of "save as" (Shift+Ctrl+S).
///
/// The simpler action checks that the chord is not held.
fn prepare_shortcut_conflict(registry: &MultiplexerRegistry) -> Result<()> {
    let save = registry.get_or_create("shortcuts/save")?;
    let save_as = registry.get_or_create("shortcuts/saveAs")?;

    let chord = save_as.clone();
    save.performed(0, move |_| match chord.read_value::<f32>() {
        Ok(held) if held == 0.0 => log::info!("dummy 'save' triggered"),
        Ok(_) => log::debug!("'save' suppressed while 'save as' is held"),
        Err(e) => log::error!("Cannot read 'save as': {e}"),
    });

    // Pass-through style action: performed also fires on release, so the
    // value is checked explicitly.
    let chord = save_as.clone();
    save_as.performed(0, move |_| {
        if matches!(chord.read_value::<f32>(), Ok(v) if v == 1.0) {
            log::info!("dummy 'save as' triggered");
        }
    });
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let config_json = std::fs::read_to_string(assets.join("registry.json"))
        .context("failed to read registry config")?;
    let config = RegistryConfig::from_json(&config_json)?;

    let clock = FrameClock::new();
    let map = ActionMap::load(assets.join("actions.json"), clock.clone())?;
    let registry = MultiplexerRegistry::with_config(map.clone(), config);

    let state = Rc::new(DemoState::default());
    state.dialog_open.set(true);
    prepare_dialog_conflict(&registry, &state)?;
    prepare_shortcut_conflict(&registry)?;

    let escape = map.action("ui/cancel").context("ui/cancel is missing")?;
    let save = map.action("shortcuts/save").context("shortcuts/save is missing")?;
    let save_as = map.action("shortcuts/saveAs").context("shortcuts/saveAs is missing")?;

    // Frame 1: Escape closes the dialog only.
    log::info!("--- frame {} ---", clock.advance());
    escape.press();
    escape.cancel();
    log::info!(
        "dialog open: {}, quit requested: {}",
        state.dialog_open.get(),
        state.quit_requested.get()
    );

    // Frame 2: with no dialog left, Escape quits.
    log::info!("--- frame {} ---", clock.advance());
    escape.press();
    escape.cancel();
    log::info!(
        "dialog open: {}, quit requested: {}",
        state.dialog_open.get(),
        state.quit_requested.get()
    );

    // Frame 3: plain Ctrl+S.
    log::info!("--- frame {} ---", clock.advance());
    save.press();
    save.cancel();

    // Frame 4: Shift+Ctrl+S, the chord is held when "save" performs.
    log::info!("--- frame {} ---", clock.advance());
    save_as.perform(ActionValue::Axis(1.0));
    save.press();
    save.cancel();
    save_as.cancel();

    for multiplexer in registry.list_active() {
        log::info!("Active: {multiplexer:?}");
    }

    registry.clear();
    Ok(())
}
