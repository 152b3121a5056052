use std::rc::Rc;

use cell_comments_core::{
    CellCommentsPart, CellViewModel, CollapsibleState, DemoCommentService, PanelConfig, PanelServices,
    StaticCommentService, ThreadError,
};
use wasm_bindgen::prelude::*;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct CellComments {
    part: CellCommentsPart,
    cell: Option<Rc<CellViewModel>>,
}

#[wasm_bindgen]
impl CellComments {
    /// Part backed by the placeholder discussion.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CellComments {
        let config = PanelConfig::default();
        let services = PanelServices::html(Rc::new(DemoCommentService), &config);
        CellComments { part: CellCommentsPart::new(config, services), cell: None }
    }

    /// Part serving the thread described by `seed_json`. An empty
    /// `config_json` keeps the defaults.
    pub fn from_seed(seed_json: String, config_json: String) -> Result<CellComments, JsValue> {
        let config = if config_json.trim().is_empty() {
            PanelConfig::default()
        } else {
            PanelConfig::from_json(&config_json).map_err(js_error)?
        };
        let service = StaticCommentService::from_json(&seed_json).map_err(js_error)?;
        let services = PanelServices::html(Rc::new(service), &config);
        Ok(CellComments { part: CellCommentsPart::new(config, services), cell: None })
    }

    pub fn render_code_cell(&mut self, handle: u32, uri: String) -> Result<(), JsValue> {
        let cell = Rc::new(CellViewModel::code(u64::from(handle), uri));
        self.render(cell)
    }

    pub fn render_markup_cell(&mut self, handle: u32, uri: String) -> Result<(), JsValue> {
        let cell = Rc::new(CellViewModel::markup(u64::from(handle), uri));
        self.render(cell)
    }

    /// Run layout and return the height now recorded on the bound cell.
    pub fn prepare_layout(&mut self) -> f64 {
        self.part.prepare_layout();
        self.cell.as_ref().map(|c| c.comment_height()).unwrap_or(0.0)
    }

    pub fn is_initialized(&self) -> bool {
        self.part.is_initialized()
    }

    pub fn state(&self) -> String {
        format!("{:?}", self.part.state())
    }

    pub fn to_html(&self) -> String {
        self.part.to_html()
    }

    pub fn label(&self) -> Option<String> {
        self.part.thread().and_then(|t| t.label())
    }

    pub fn set_label(&mut self, label: Option<String>) -> Result<(), JsValue> {
        self.with_thread(|t| t.set_label(label))
    }

    pub fn set_can_reply(&mut self, can_reply: bool) -> Result<(), JsValue> {
        self.with_thread(|t| t.set_can_reply(can_reply))
    }

    pub fn set_collapsed(&mut self, collapsed: bool) -> Result<(), JsValue> {
        let state = if collapsed { CollapsibleState::Collapsed } else { CollapsibleState::Expanded };
        self.with_thread(|t| t.set_collapsible_state(Some(state)))
    }

    pub fn comments_json(&self) -> String {
        let comments = self.part.thread().map(|t| t.comments()).unwrap_or_default();
        serde_json::to_string(&comments).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn dispose(&mut self) {
        self.part.dispose();
        self.cell = None;
    }
}

impl CellComments {
    fn render(&mut self, cell: Rc<CellViewModel>) -> Result<(), JsValue> {
        self.part.render_cell(&cell).map_err(js_error)?;
        if cell.kind().is_discussable() {
            self.cell = Some(cell);
        }
        Ok(())
    }

    fn with_thread(
        &self,
        f: impl FnOnce(&cell_comments_core::CommentThread) -> Result<(), ThreadError>,
    ) -> Result<(), JsValue> {
        match self.part.thread() {
            Some(thread) => f(thread).map_err(js_error),
            None => Err(JsValue::from_str("no comment thread has been rendered")),
        }
    }
}

impl Default for CellComments {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_sanity() {
        let mut c = CellComments::new();
        c.render_code_cell(1, "cell://1".into()).unwrap();
        assert!(c.is_initialized());
        assert!(c.to_html().contains("Discussion"));
        assert!(c.prepare_layout() > 25.0);
    }

    #[wasm_bindgen_test]
    fn label_changes_reach_the_header() {
        let mut c = CellComments::new();
        c.render_code_cell(2, "cell://2".into()).unwrap();
        c.set_label(Some("Renamed".into())).unwrap();
        assert_eq!(c.label().as_deref(), Some("Renamed"));
        assert!(c.to_html().contains("Renamed"));
        c.dispose();
        assert_eq!(c.state(), "Disposed");
        assert!(c.set_label(None).is_err());
    }
}
