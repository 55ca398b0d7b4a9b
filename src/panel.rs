//! DOM control panel generated from the core's binding table.

use crate::constants::*;
use crate::dom;
use fnv::FnvHashMap;
use orbpulse_core::panel::{format_value, Control, PanelBinding, PANEL_LAYOUT};
use orbpulse_core::{AnimationParameters, ParamKey, ParamValue};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type ChangeCallback = Rc<dyn Fn(ParamKey, ParamValue)>;

struct Widget {
    input: web::HtmlInputElement,
    readout: Option<web::HtmlElement>,
    step: f32,
}

pub struct ControlPanel {
    root: web::HtmlElement,
    widgets: FnvHashMap<ParamKey, Widget>,
}

fn create(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn append(parent: &web::HtmlElement, child: &web::HtmlElement) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

impl ControlPanel {
    /// Build the panel under `<body>`, closed, with values from `params`.
    pub fn build(
        document: &web::Document,
        params: &AnimationParameters,
        on_change: ChangeCallback,
    ) -> anyhow::Result<Self> {
        let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
        let root = create(document, "div", PANEL_CLOSED_CLASS)?;
        root.set_id(CONTROL_PANEL_ID);

        let header = create(document, "div", "panel-title")?;
        header.set_text_content(Some(PANEL_TITLE));
        append(&root, &header)?;

        let content = create(document, "div", "panel-content")?;
        dom::set_style(&content, "display", "none");
        append(&root, &content)?;

        let mut widgets = FnvHashMap::default();
        for folder in PANEL_LAYOUT {
            let section = create(document, "fieldset", "panel-folder")?;
            let legend = create(document, "legend", "")?;
            legend.set_text_content(Some(folder.title));
            append(&section, &legend)?;
            for binding in folder.bindings {
                let widget = build_row(document, &section, binding, params, on_change.clone())?;
                widgets.insert(binding.key, widget);
            }
            append(&content, &section)?;
        }

        let root_toggle = root.clone();
        dom::add_element_click_listener(&header, move || {
            let closed = root_toggle.class_list().contains(PANEL_CLOSED_CLASS);
            dom::set_class(&root_toggle, PANEL_CLOSED_CLASS, !closed);
            dom::set_style(&content, "display", if closed { "block" } else { "none" });
        });

        append(&body, &root)?;
        log::info!("[panel] built {} controls", widgets.len());
        Ok(Self { root, widgets })
    }

    /// Push the current parameter value into its widget.
    pub fn sync(&self, key: ParamKey, params: &AnimationParameters) {
        let Some(widget) = self.widgets.get(&key) else {
            return;
        };
        match params.get(key) {
            ParamValue::Toggle(on) => widget.input.set_checked(on),
            ParamValue::Number(v) => {
                widget.input.set_value(&v.to_string());
                if let Some(readout) = &widget.readout {
                    readout.set_text_content(Some(&format_value(v, widget.step)));
                }
            }
        }
    }

    pub fn set_visible(&self, visible: bool) {
        dom::set_style(&self.root, "display", if visible { "block" } else { "none" });
    }
}

fn build_row(
    document: &web::Document,
    section: &web::HtmlElement,
    binding: &PanelBinding,
    params: &AnimationParameters,
    on_change: ChangeCallback,
) -> anyhow::Result<Widget> {
    let row = create(document, "label", "panel-row")?;
    let name = create(document, "span", "panel-label")?;
    name.set_text_content(Some(binding.label));
    append(&row, &name)?;

    let input = create(document, "input", "")?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let (readout, step) = match binding.control {
        Control::Slider { min, max, step } => {
            input.set_type("range");
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
            let value = match params.get(binding.key) {
                ParamValue::Number(v) => v,
                ParamValue::Toggle(_) => min,
            };
            input.set_value(&value.to_string());
            let readout = create(document, "span", "panel-value")?;
            readout.set_text_content(Some(&format_value(value, step)));
            (Some(readout), step)
        }
        Control::Checkbox => {
            input.set_type("checkbox");
            input.set_checked(matches!(params.get(binding.key), ParamValue::Toggle(true)));
            (None, 0.0)
        }
    };
    append(&row, &input)?;
    if let Some(r) = &readout {
        append(&row, r)?;
    }
    append(section, &row)?;

    let key = binding.key;
    let is_checkbox = binding.control == Control::Checkbox;
    let input_ev = input.clone();
    let readout_ev = readout.clone();
    let event = if is_checkbox { "change" } else { "input" };
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_: web::Event| {
        let value = if is_checkbox {
            ParamValue::Toggle(input_ev.checked())
        } else {
            let v = input_ev.value_as_number() as f32;
            if let Some(r) = &readout_ev {
                r.set_text_content(Some(&format_value(v, step)));
            }
            ParamValue::Number(v)
        };
        on_change(key, value);
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();

    Ok(Widget { input, readout, step })
}
