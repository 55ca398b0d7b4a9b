use crate::constants::*;
use crate::dom;
use orbpulse_core::ToolbarStyle;
use web_sys as web;

/// The toolbar overlay and its shortcut hint.
pub struct ToolbarView {
    toolbar: Option<web::HtmlElement>,
    hint: Option<web::HtmlElement>,
}

impl ToolbarView {
    pub fn find(document: &web::Document) -> Self {
        let toolbar = dom::html_element_by_selector(document, TOOLBAR_SELECTOR);
        if toolbar.is_none() {
            log::warn!("[toolbar] missing {}", TOOLBAR_SELECTOR);
        }
        Self {
            toolbar,
            hint: dom::html_element_by_selector(document, SHORTCUT_HINT_SELECTOR),
        }
    }

    pub fn apply(&self, style: ToolbarStyle) {
        if let Some(t) = &self.toolbar {
            dom::set_style(t, "opacity", style.toolbar_opacity);
            dom::set_style(t, "pointer-events", style.pointer_events);
        }
        if let Some(h) = &self.hint {
            dom::set_style(h, "opacity", style.hint_opacity);
        }
    }

    /// Append the "Hide Toolbar" button to the toolbar.
    pub fn add_hide_button(&self, document: &web::Document, on_click: impl FnMut() + 'static) -> anyhow::Result<()> {
        let Some(toolbar) = &self.toolbar else {
            return Ok(());
        };
        let button = document
            .create_element("button")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        button.set_id(HIDE_TOOLBAR_BUTTON_ID);
        button.set_text_content(Some(HIDE_TOOLBAR_LABEL));
        toolbar
            .append_child(&button)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        dom::add_element_click_listener(&button, on_click);
        Ok(())
    }
}
