//! Overlay configuration.

use crate::color::Color;
use crate::events::ModifierFlags;
use crate::marker::Font;
use core::fmt;

/// Appearance and activation settings for the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Tint over the element the loop starts from.
    pub highlight_color: Color,
    /// Outline and label color for every marker.
    pub outline_color: Color,
    /// Outline stroke width in points.
    pub stroke_width: f64,
    /// How far outlines sit outside the element frame, so they don’t cover its edge.
    pub outline_offset: f64,
    /// Space between a label and the frame it belongs to.
    pub label_gap: f64,
    /// Label font.
    pub font: Font,
    /// Modifiers that show the loop going forward.
    pub forward_modifier: ModifierFlags,
    /// Modifiers that show the loop going backward.
    pub backward_modifier: ModifierFlags,
    /// If none of these are held, the overlay is hidden.
    pub trigger_mask: ModifierFlags,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            highlight_color: Color::HIGHLIGHT,
            outline_color: Color::BLUE,
            stroke_width: 0.5,
            outline_offset: 0.25,
            label_gap: 2.,
            font: Font::default(),
            forward_modifier: ModifierFlags::OPTION,
            backward_modifier: ModifierFlags::SHIFT,
            trigger_mask: ModifierFlags::DEVICE_INDEPENDENT_FLAGS_MASK,
        }
    }
}

impl OverlayConfig {
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn with_outline_color(mut self, color: Color) -> Self {
        self.outline_color = color;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the forward and backward modifiers.
    pub fn with_modifiers(mut self, forward: ModifierFlags, backward: ModifierFlags) -> Self {
        self.forward_modifier = forward;
        self.backward_modifier = backward;
        self
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("stroke_width", self.stroke_width),
            ("outline_offset", self.outline_offset),
            ("label_gap", self.label_gap),
        ];
        for &(name, value) in lengths.iter() {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::InvalidLength(name, value));
            }
        }
        if !self.font.size.is_finite() || self.font.size <= 0. {
            return Err(ConfigError::InvalidFontSize(self.font.size));
        }
        if self.trigger_mask.is_empty() {
            return Err(ConfigError::EmptyTriggerMask);
        }
        if self.forward_modifier.is_empty() && self.backward_modifier.is_empty() {
            return Err(ConfigError::NoDirectionModifier);
        }
        Ok(())
    }
}

/// Reasons an [`OverlayConfig`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A length setting is negative or not finite: `(setting, value)`.
    InvalidLength(&'static str, f64),
    InvalidFontSize(f64),
    /// No modifier would ever activate the overlay.
    EmptyTriggerMask,
    /// Neither direction has a modifier.
    NoDirectionModifier,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidLength(name, value) => write!(f, "invalid {}: {}", name, value),
            ConfigError::InvalidFontSize(size) => write!(f, "invalid font size: {}", size),
            ConfigError::EmptyTriggerMask => write!(f, "trigger mask is empty"),
            ConfigError::NoDirectionModifier => {
                write!(f, "neither forward nor backward modifier is set")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
