//! Declarative layout of the debug control panel.
//!
//! The web frontend builds DOM widgets from [`PANEL_LAYOUT`]; every widget
//! writes back through [`crate::params::AnimationParameters::set`].

use crate::params::ParamKey;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    Slider { min: f32, max: f32, step: f32 },
    Checkbox,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelBinding {
    pub key: ParamKey,
    pub label: &'static str,
    pub control: Control,
}

#[derive(Clone, Copy, Debug)]
pub struct PanelFolder {
    pub title: &'static str,
    pub bindings: &'static [PanelBinding],
}

const fn slider(key: ParamKey, label: &'static str, min: f32, max: f32, step: f32) -> PanelBinding {
    PanelBinding {
        key,
        label,
        control: Control::Slider { min, max, step },
    }
}

pub const PANEL_LAYOUT: &[PanelFolder] = &[
    PanelFolder {
        title: "Colors",
        bindings: &[
            slider(ParamKey::Red, "red", 0.0, 1.0, 0.01),
            slider(ParamKey::Green, "green", 0.0, 1.0, 0.01),
            slider(ParamKey::Blue, "blue", 0.0, 1.0, 0.01),
        ],
    },
    PanelFolder {
        title: "Bloom",
        bindings: &[
            slider(ParamKey::Threshold, "threshold", 0.0, 1.0, 0.01),
            slider(ParamKey::Strength, "strength", 0.0, 3.0, 0.01),
            slider(ParamKey::Radius, "radius", 0.0, 1.0, 0.01),
        ],
    },
    PanelFolder {
        title: "Audio",
        bindings: &[slider(ParamKey::Sensitivity, "Mic Sensitivity", 0.1, 5.0, 0.1)],
    },
    PanelFolder {
        title: "Logo",
        bindings: &[
            slider(ParamKey::LogoOpacity, "Logo Opacity", 0.0, 1.0, 0.01),
            slider(ParamKey::LogoSize, "Logo Size", 0.5, 5.0, 0.1),
        ],
    },
    PanelFolder {
        title: "Interface",
        bindings: &[PanelBinding {
            key: ParamKey::ToolbarVisible,
            label: "Show Toolbar",
            control: Control::Checkbox,
        }],
    },
];

pub fn binding(key: ParamKey) -> Option<&'static PanelBinding> {
    PANEL_LAYOUT
        .iter()
        .flat_map(|f| f.bindings.iter())
        .find(|b| b.key == key)
}

/// Format a slider value with as many decimals as its step implies.
pub fn format_value(value: f32, step: f32) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).round().max(0.0) as usize
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_exactly_one_binding() {
        let keys = [
            ParamKey::Red,
            ParamKey::Green,
            ParamKey::Blue,
            ParamKey::Threshold,
            ParamKey::Strength,
            ParamKey::Radius,
            ParamKey::Sensitivity,
            ParamKey::LogoOpacity,
            ParamKey::LogoSize,
            ParamKey::ToolbarVisible,
        ];
        for key in keys {
            let n = PANEL_LAYOUT
                .iter()
                .flat_map(|f| f.bindings.iter())
                .filter(|b| b.key == key)
                .count();
            assert_eq!(n, 1, "{key:?}");
        }
    }

    #[test]
    fn defaults_sit_inside_their_ranges() {
        let p = crate::params::AnimationParameters::default();
        for b in PANEL_LAYOUT.iter().flat_map(|f| f.bindings.iter()) {
            if let (Control::Slider { min, max, .. }, crate::params::ParamValue::Number(v)) =
                (b.control, p.get(b.key))
            {
                assert!(v >= min && v <= max, "{} = {} outside [{}, {}]", b.label, v, min, max);
            }
        }
    }

    #[test]
    fn value_formatting_follows_step() {
        assert_eq!(format_value(0.5, 0.01), "0.50");
        assert_eq!(format_value(1.5, 0.1), "1.5");
        assert_eq!(format_value(3.0, 1.0), "3");
    }
}
