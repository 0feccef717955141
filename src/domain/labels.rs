//! The classifier's label set.
//!
//! The order of [`RipenessLabel::ALL`] is fixed by how the model was trained:
//! index `i` of the output vector is the probability of `ALL[i]`.

use crate::core::constants::NUM_LABELS;
use crate::core::errors::RipenessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five classes the model can output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RipenessLabel {
    #[serde(rename = "cokelat")]
    Cokelat,
    #[serde(rename = "hijau")]
    Hijau,
    #[serde(rename = "kuning")]
    Kuning,
    #[serde(rename = "kuning bintik cokelat")]
    KuningBintikCokelat,
    /// Sentinel for "not a banana".
    #[serde(rename = "unknown")]
    Unknown,
}

impl RipenessLabel {
    /// All labels, index-aligned with the model output.
    pub const ALL: [RipenessLabel; NUM_LABELS] = [
        RipenessLabel::Cokelat,
        RipenessLabel::Hijau,
        RipenessLabel::Kuning,
        RipenessLabel::KuningBintikCokelat,
        RipenessLabel::Unknown,
    ];

    /// Label at `index` of the model output.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this label in the model output.
    pub fn index(self) -> usize {
        match self {
            RipenessLabel::Cokelat => 0,
            RipenessLabel::Hijau => 1,
            RipenessLabel::Kuning => 2,
            RipenessLabel::KuningBintikCokelat => 3,
            RipenessLabel::Unknown => 4,
        }
    }

    /// The label text as the model was trained with it.
    pub fn as_str(self) -> &'static str {
        match self {
            RipenessLabel::Cokelat => "cokelat",
            RipenessLabel::Hijau => "hijau",
            RipenessLabel::Kuning => "kuning",
            RipenessLabel::KuningBintikCokelat => "kuning bintik cokelat",
            RipenessLabel::Unknown => "unknown",
        }
    }

    /// The ripeness stage, or `None` for [`RipenessLabel::Unknown`].
    pub fn stage(self) -> Option<RipenessStage> {
        match self {
            RipenessLabel::Cokelat => Some(RipenessStage::Cokelat),
            RipenessLabel::Hijau => Some(RipenessStage::Hijau),
            RipenessLabel::Kuning => Some(RipenessStage::Kuning),
            RipenessLabel::KuningBintikCokelat => Some(RipenessStage::KuningBintikCokelat),
            RipenessLabel::Unknown => None,
        }
    }
}

impl fmt::Display for RipenessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RipenessLabel {
    type Err = RipenessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| RipenessError::InvalidInput {
                message: format!(
                    "unknown ripeness label '{s}', expected one of: {}",
                    Self::ALL.map(|l| l.as_str()).join(", ")
                ),
            })
    }
}

/// A recognized ripeness stage. Unlike [`RipenessLabel`] this cannot be "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RipenessStage {
    #[serde(rename = "hijau")]
    Hijau,
    #[serde(rename = "kuning")]
    Kuning,
    #[serde(rename = "kuning bintik cokelat")]
    KuningBintikCokelat,
    #[serde(rename = "cokelat")]
    Cokelat,
}

impl RipenessStage {
    /// Stages from least to most ripe.
    pub fn display_order() -> [RipenessStage; 4] {
        [
            RipenessStage::Hijau,
            RipenessStage::Kuning,
            RipenessStage::KuningBintikCokelat,
            RipenessStage::Cokelat,
        ]
    }

    /// The model label for this stage.
    pub fn label(self) -> RipenessLabel {
        match self {
            RipenessStage::Hijau => RipenessLabel::Hijau,
            RipenessStage::Kuning => RipenessLabel::Kuning,
            RipenessStage::KuningBintikCokelat => RipenessLabel::KuningBintikCokelat,
            RipenessStage::Cokelat => RipenessLabel::Cokelat,
        }
    }

    /// Lowercase label text.
    pub fn as_str(self) -> &'static str {
        self.label().as_str()
    }

    /// Label text with only the first letter capitalized, e.g. "Kuning bintik cokelat".
    pub fn display_name(self) -> &'static str {
        match self {
            RipenessStage::Hijau => "Hijau",
            RipenessStage::Kuning => "Kuning",
            RipenessStage::KuningBintikCokelat => "Kuning bintik cokelat",
            RipenessStage::Cokelat => "Cokelat",
        }
    }
}

impl fmt::Display for RipenessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RipenessStage {
    type Err = RipenessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label: RipenessLabel = s.parse()?;
        label.stage().ok_or_else(|| RipenessError::InvalidInput {
            message: format!("'{s}' is not a ripeness stage"),
        })
    }
}
