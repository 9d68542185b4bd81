//! Supported stock materials and their machining parameters.

use std::fmt;
use std::str::FromStr;

use cutquote_core::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A stock material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Material {
    Steel,
    Aluminum,
    Plastic,
    Wood,
    Brass,
    Copper,
}

impl Material {
    /// Every supported material, in catalog order.
    pub const ALL: [Material; 6] = [
        Material::Steel,
        Material::Aluminum,
        Material::Plastic,
        Material::Wood,
        Material::Brass,
        Material::Copper,
    ];

    /// Lower-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Material::Steel => "steel",
            Material::Aluminum => "aluminum",
            Material::Plastic => "plastic",
            Material::Wood => "wood",
            Material::Brass => "brass",
            Material::Copper => "copper",
        }
    }

    /// Built-in machining parameters.
    pub fn properties(self) -> MaterialProperties {
        let (feed_rate, cost_per_cm3, hourly_rate) = match self {
            Material::Steel => (300.0, 0.0065, 1800.0),
            Material::Aluminum => (600.0, 0.0085, 1500.0),
            Material::Plastic => (800.0, 0.0025, 1200.0),
            Material::Wood => (1200.0, 0.0015, 1000.0),
            Material::Brass => (400.0, 0.0120, 2000.0),
            Material::Copper => (350.0, 0.0150, 2100.0),
        };
        MaterialProperties {
            feed_rate,
            cost_per_cm3,
            hourly_rate,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steel" => Ok(Material::Steel),
            "aluminum" | "aluminium" => Ok(Material::Aluminum),
            "plastic" => Ok(Material::Plastic),
            "wood" => Ok(Material::Wood),
            "brass" => Ok(Material::Brass),
            "copper" => Ok(Material::Copper),
            _ => Err(Error::UnknownMaterial(s.to_string())),
        }
    }
}

/// Machining parameters of one material.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialProperties {
    /// Cutting feed rate in mm/min.
    pub feed_rate: f64,
    /// Stock cost per cm³ of removed volume.
    pub cost_per_cm3: f64,
    /// Machine and operator rate per hour.
    pub hourly_rate: f64,
}

impl MaterialProperties {
    /// Returns an error unless every parameter is finite, the feed rate positive and
    /// the costs non-negative.
    pub fn validate(&self) -> cutquote_core::Result<()> {
        if !(self.feed_rate.is_finite() && self.feed_rate > 0.0) {
            return Err(Error::InvalidInput(format!(
                "feed rate must be positive, got {}",
                self.feed_rate
            )));
        }
        for (name, value) in [("cost_per_cm3", self.cost_per_cm3), ("hourly_rate", self.hourly_rate)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidInput(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Steel".parse::<Material>().unwrap(), Material::Steel);
        assert_eq!(" ALUMINIUM ".parse::<Material>().unwrap(), Material::Aluminum);
        assert!(matches!("titanium".parse::<Material>(), Err(Error::UnknownMaterial(_))));
    }

    #[test]
    fn test_display_roundtrips() {
        for material in Material::ALL {
            assert_eq!(material.to_string().parse::<Material>().unwrap(), material);
        }
    }

    #[test]
    fn test_feed_rates() {
        assert_eq!(Material::Steel.properties().feed_rate, 300.0);
        assert_eq!(Material::Wood.properties().feed_rate, 1200.0);
        assert_eq!(Material::Copper.properties().hourly_rate, 2100.0);
        for material in Material::ALL {
            assert!(material.properties().validate().is_ok());
        }
    }
}
