//! WebAssembly bindings for the browser front end.
//!
//! The page holds one [`WasmSession`], forwards clicks on elements carrying
//! `data-action` to it and swaps in the markup returned by `render`.

#![cfg(feature = "wasm")]

use crate::catalog::Catalog;
use crate::render::{render_html, HtmlConfig, HtmlRenderer};
use crate::session::{Session, ViewState};
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// A learner session driven from JavaScript.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen]
impl WasmSession {
    /// Load a session from the text of a TOML course file.
    #[wasm_bindgen(constructor)]
    pub fn new(course_toml: &str) -> Result<WasmSession, JsError> {
        let catalog = Catalog::from_toml_str(course_toml).map_err(js_error)?;
        Ok(Self {
            inner: Session::new(catalog),
        })
    }

    /// Open a module by id.
    #[wasm_bindgen(js_name = selectModule)]
    pub fn select_module(&mut self, id: &str) -> Result<(), JsError> {
        self.inner.select_module(id).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = goToOverview)]
    pub fn go_to_overview(&mut self) {
        self.inner.go_to_overview();
    }

    /// Mark a module complete. Returns `true` on the first call only.
    #[wasm_bindgen(js_name = markComplete)]
    pub fn mark_complete(&mut self, id: &str) -> Result<bool, JsError> {
        self.inner.mark_complete(id).map_err(js_error)
    }

    /// Markup for the current view.
    pub fn render(&self) -> String {
        self.inner.render()
    }

    /// Id of the open module, or `undefined` on the overview.
    #[wasm_bindgen(js_name = currentModuleId)]
    pub fn current_module_id(&self) -> Option<String> {
        match self.inner.view() {
            ViewState::Overview => None,
            ViewState::Module(id) => Some(id.clone()),
        }
    }

    /// Completed share in percent.
    pub fn progress(&self) -> u8 {
        self.inner.progress().percent
    }

    #[wasm_bindgen(js_name = completedIds)]
    pub fn completed_ids(&self) -> js_sys::Array {
        self.inner
            .completed()
            .iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Math assets and stylesheet tags for the host page head.
    #[wasm_bindgen(js_name = headContent)]
    pub fn head_content(&self) -> String {
        HtmlRenderer::new(self.inner.catalog().config()).head_content()
    }
}

/// Render a single piece of module content with default settings.
#[wasm_bindgen(js_name = renderModule)]
pub fn render_module(content: &str) -> String {
    render_html(content, &HtmlConfig::default())
}

/// Get the library version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
