//! The single shared parameter record edited live by the control panel.

use crate::constants::DEFAULT_LOGO_SIZE;
use crate::panel::{self, Control};

/// Addressable fields of [`AnimationParameters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Red,
    Green,
    Blue,
    Threshold,
    Strength,
    Radius,
    Sensitivity,
    LogoOpacity,
    LogoSize,
    ToolbarVisible,
}

/// A value travelling between the panel and the parameter record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Toggle(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationParameters {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub threshold: f32,
    pub strength: f32,
    pub radius: f32,
    pub sensitivity: f32,
    pub toolbar_visible: bool,
    pub logo_opacity: f32,
    pub logo_size: f32,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            red: 1.0,
            green: 0.5,
            blue: 1.0,
            threshold: 0.5,
            strength: 0.8,
            radius: 0.8,
            sensitivity: 1.5,
            toolbar_visible: true,
            logo_opacity: 0.7,
            logo_size: DEFAULT_LOGO_SIZE,
        }
    }
}

impl AnimationParameters {
    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::ToolbarVisible => ParamValue::Toggle(self.toolbar_visible),
            _ => ParamValue::Number(*self.number_slot(key).unwrap_or(&0.0)),
        }
    }

    /// Write a value through its key. Numbers are clamped to the panel range;
    /// a value of the wrong kind is ignored. Returns whether anything changed.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> bool {
        match (key, value) {
            (ParamKey::ToolbarVisible, ParamValue::Toggle(v)) => {
                let changed = self.toolbar_visible != v;
                self.toolbar_visible = v;
                changed
            }
            (_, ParamValue::Number(v)) if v.is_finite() => {
                let clamped = match panel::binding(key).map(|b| b.control) {
                    Some(Control::Slider { min, max, .. }) => v.clamp(min, max),
                    _ => v,
                };
                match self.number_slot_mut(key) {
                    Some(slot) => {
                        let changed = *slot != clamped;
                        *slot = clamped;
                        changed
                    }
                    None => false,
                }
            }
            _ => {
                log::debug!("[params] ignoring {:?} for {:?}", value, key);
                false
            }
        }
    }

    pub fn color(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    fn number_slot(&self, key: ParamKey) -> Option<&f32> {
        Some(match key {
            ParamKey::Red => &self.red,
            ParamKey::Green => &self.green,
            ParamKey::Blue => &self.blue,
            ParamKey::Threshold => &self.threshold,
            ParamKey::Strength => &self.strength,
            ParamKey::Radius => &self.radius,
            ParamKey::Sensitivity => &self.sensitivity,
            ParamKey::LogoOpacity => &self.logo_opacity,
            ParamKey::LogoSize => &self.logo_size,
            ParamKey::ToolbarVisible => return None,
        })
    }

    fn number_slot_mut(&mut self, key: ParamKey) -> Option<&mut f32> {
        Some(match key {
            ParamKey::Red => &mut self.red,
            ParamKey::Green => &mut self.green,
            ParamKey::Blue => &mut self.blue,
            ParamKey::Threshold => &mut self.threshold,
            ParamKey::Strength => &mut self.strength,
            ParamKey::Radius => &mut self.radius,
            ParamKey::Sensitivity => &mut self.sensitivity,
            ParamKey::LogoOpacity => &mut self.logo_opacity,
            ParamKey::LogoSize => &mut self.logo_size,
            ParamKey::ToolbarVisible => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_writes_clamp_to_panel_range() {
        let mut p = AnimationParameters::default();
        assert!(p.set(ParamKey::Strength, ParamValue::Number(7.0)));
        assert_eq!(p.strength, 3.0);
        assert!(p.set(ParamKey::Sensitivity, ParamValue::Number(0.0)));
        assert!((p.sensitivity - 0.1).abs() < 1e-6);
        assert!(p.set(ParamKey::LogoSize, ParamValue::Number(5.0)));
        assert_eq!(p.get(ParamKey::LogoSize), ParamValue::Number(5.0));
    }

    #[test]
    fn mismatched_kinds_and_nan_are_ignored() {
        let mut p = AnimationParameters::default();
        assert!(!p.set(ParamKey::ToolbarVisible, ParamValue::Number(0.0)));
        assert!(!p.set(ParamKey::Red, ParamValue::Toggle(false)));
        assert!(!p.set(ParamKey::Red, ParamValue::Number(f32::NAN)));
        assert_eq!(p, AnimationParameters::default());
    }

    #[test]
    fn toolbar_toggle_reports_change() {
        let mut p = AnimationParameters::default();
        assert!(!p.set(ParamKey::ToolbarVisible, ParamValue::Toggle(true)));
        assert!(p.set(ParamKey::ToolbarVisible, ParamValue::Toggle(false)));
        assert_eq!(p.get(ParamKey::ToolbarVisible), ParamValue::Toggle(false));
    }
}
