//! Wrestler builds confirmed before a bout

use serde::{Deserialize, Serialize};

use crate::bout::phase::SignatureMove;
use crate::core::error::{DohyoError, Result};

pub const ATTRIBUTE_MIN: u8 = 1;
pub const ATTRIBUTE_MAX: u8 = 10;
/// Every build spends exactly this many points across its four attributes
pub const ATTRIBUTE_POINT_TOTAL: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Height,
    Weight,
    Speed,
    Technique,
}

/// Who decides a corner's moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    #[default]
    Human,
    Cpu,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrestlerBuild {
    pub height: u8,
    pub weight: u8,
    pub speed: u8,
    pub technique: u8,
    pub signature_move: SignatureMove,
    /// Overrides the roster name in announcements
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WrestlerBuild {
    pub fn new(
        height: u8,
        weight: u8,
        speed: u8,
        technique: u8,
        signature_move: SignatureMove,
    ) -> Result<Self> {
        let build = Self {
            height,
            weight,
            speed,
            technique,
            signature_move,
            display_name: None,
        };
        build.validate()?;
        Ok(build)
    }

    /// Even 5/5/5/5 spread
    pub fn balanced(signature_move: SignatureMove) -> Self {
        Self {
            height: 5,
            weight: 5,
            speed: 5,
            technique: 5,
            signature_move,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn attribute(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Height => self.height,
            Attribute::Weight => self.weight,
            Attribute::Speed => self.speed,
            Attribute::Technique => self.technique,
        }
    }

    pub fn total_points(&self) -> u32 {
        [self.height, self.weight, self.speed, self.technique]
            .iter()
            .map(|&v| v as u32)
            .sum()
    }

    pub fn validate(&self) -> Result<()> {
        for attribute in [
            Attribute::Height,
            Attribute::Weight,
            Attribute::Speed,
            Attribute::Technique,
        ] {
            let value = self.attribute(attribute);
            if !(ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value) {
                return Err(DohyoError::InvalidBuild(format!(
                    "{:?} is {}, must be within {}..={}",
                    attribute, value, ATTRIBUTE_MIN, ATTRIBUTE_MAX
                )));
            }
        }

        let total = self.total_points();
        if total != ATTRIBUTE_POINT_TOTAL as u32 {
            return Err(DohyoError::InvalidBuild(format!(
                "attributes total {}, must total exactly {}",
                total, ATTRIBUTE_POINT_TOTAL
            )));
        }

        if matches!(&self.display_name, Some(name) if name.trim().is_empty()) {
            return Err(DohyoError::InvalidBuild("display name is blank".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_build_is_valid() {
        assert!(WrestlerBuild::balanced(SignatureMove::Yorikiri)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_points_must_total_twenty() {
        let err = WrestlerBuild::new(6, 6, 6, 6, SignatureMove::Oshidashi).unwrap_err();
        assert!(matches!(err, DohyoError::InvalidBuild(_)));
        assert!(WrestlerBuild::new(7, 3, 5, 5, SignatureMove::Oshidashi).is_ok());
    }

    #[test]
    fn test_attribute_bounds() {
        assert!(WrestlerBuild::new(0, 10, 5, 5, SignatureMove::Kotenage).is_err());
        assert!(WrestlerBuild::new(11, 3, 3, 3, SignatureMove::Kotenage).is_err());
        assert!(WrestlerBuild::new(10, 1, 1, 8, SignatureMove::Kotenage).is_ok());
    }

    #[test]
    fn test_blank_display_name_rejected() {
        let build = WrestlerBuild::balanced(SignatureMove::Sukuinage).with_display_name("  ");
        assert!(build.validate().is_err());
    }
}
