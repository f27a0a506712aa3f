// src/types.rs
use serde::Serialize;
use std::fmt;

/// NEX variable type tag, as stored in the variable header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum VariableType {
    Neuron = 0,
    Event = 1,
    Interval = 2,
    Waveform = 3,
    PopulationVector = 4,
    Continuous = 5,
    Marker = 6,
}

impl VariableType {
    pub const ALL: [VariableType; 7] = [
        VariableType::Neuron,
        VariableType::Event,
        VariableType::Interval,
        VariableType::Waveform,
        VariableType::PopulationVector,
        VariableType::Continuous,
        VariableType::Marker,
    ];

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(VariableType::Neuron),
            1 => Some(VariableType::Event),
            2 => Some(VariableType::Interval),
            3 => Some(VariableType::Waveform),
            4 => Some(VariableType::PopulationVector),
            5 => Some(VariableType::Continuous),
            6 => Some(VariableType::Marker),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Neuron => "neuron",
            VariableType::Event => "event",
            VariableType::Interval => "interval",
            VariableType::Waveform => "waveform",
            VariableType::PopulationVector => "population vector",
            VariableType::Continuous => "continuous",
            VariableType::Marker => "marker",
        }
    }

    /// Parse the lowercase names used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "neuron" => Some(VariableType::Neuron),
            "event" => Some(VariableType::Event),
            "interval" => Some(VariableType::Interval),
            "waveform" => Some(VariableType::Waveform),
            "population" | "popvector" | "population_vector" => Some(VariableType::PopulationVector),
            "continuous" => Some(VariableType::Continuous),
            "marker" => Some(VariableType::Marker),
            _ => None,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether variable names are compared exactly or case-folded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    Sensitive,
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn names_match(&self, stored: &str, requested: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => stored == requested,
            CaseSensitivity::Insensitive => {
                stored == requested || stored.to_lowercase() == requested.to_lowercase()
            }
        }
    }
}

impl From<bool> for CaseSensitivity {
    /// `true` selects an exact comparison.
    fn from(is_case_sensitive: bool) -> Self {
        if is_case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }
}

/// Convert a raw tick count to seconds.
#[inline]
pub fn ticks_to_seconds(ticks: i32, frequency: f64) -> f64 {
    ticks as f64 / frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_type_round_trip() {
        for ty in VariableType::ALL {
            assert_eq!(VariableType::from_i32(ty as i32), Some(ty));
        }
        assert_eq!(VariableType::from_i32(7), None);
        assert_eq!(VariableType::from_i32(-1), None);
    }

    #[test]
    fn test_variable_type_names() {
        assert_eq!(VariableType::from_name("Interval"), Some(VariableType::Interval));
        assert_eq!(VariableType::from_name(" neuron "), Some(VariableType::Neuron));
        assert_eq!(VariableType::from_name("spike"), None);
        assert_eq!(VariableType::Marker.to_string(), "marker");
    }

    #[test]
    fn test_case_sensitivity() {
        let exact = CaseSensitivity::from(true);
        let folded = CaseSensitivity::from(false);
        assert!(exact.names_match("Rem", "Rem"));
        assert!(!exact.names_match("Rem", "rem"));
        assert!(folded.names_match("Rem", "rem"));
        assert!(folded.names_match("REM", "rem"));
        assert!(!folded.names_match("Rem", "Wake"));
        assert_eq!(CaseSensitivity::default(), CaseSensitivity::Insensitive);
    }

    #[test]
    fn test_ticks_to_seconds() {
        assert_eq!(ticks_to_seconds(1000, 1000.0), 1.0);
        assert_eq!(ticks_to_seconds(-40_000, 40_000.0), -1.0);
        assert_eq!(ticks_to_seconds(0, 25_000.0), 0.0);
    }
}
