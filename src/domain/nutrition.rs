//! Nutritional content shown for each ripeness stage.
//!
//! The text is user-facing Indonesian copy. Every lookup is an exhaustive
//! `match`, so adding a stage without its copy fails to compile.

use super::labels::RipenessStage;
use serde::Serialize;

/// Shown instead of a result when the image is not recognized as a banana.
pub const UNRECOGNIZED_MESSAGE: &str = "Gambar yang diunggah tidak dikenali sebagai pisang. Silakan unggah gambar pisang yang jelas.";

/// One health benefit of a ripeness stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Benefit {
    /// Short heading.
    pub title: &'static str,
    /// One or two sentences of explanation.
    pub detail: &'static str,
}

const fn benefit(title: &'static str, detail: &'static str) -> Benefit {
    Benefit { title, detail }
}

const HIJAU_BENEFITS: [Benefit; 3] = [
    benefit(
        "Tinggi Pati Resisten",
        "Pati ini berfungsi seperti serat, tidak cepat diubah menjadi gula, sehingga membantu menjaga kadar gula darah tetap stabil.",
    ),
    benefit(
        "Menjaga Kesehatan Usus",
        "Merupakan sumber prebiotik yang menjadi makanan bagi bakteri baik di usus Anda.",
    ),
    benefit(
        "Memberi Rasa Kenyang Lebih Lama",
        "Kandungan patinya yang kompleks membuat Anda merasa kenyang lebih lama, cocok untuk program diet.",
    ),
];

const KUNING_BENEFITS: [Benefit; 4] = [
    benefit(
        "Kaya Potasium",
        "Penting untuk mengatur tekanan darah, fungsi saraf, dan keseimbangan cairan dalam tubuh.",
    ),
    benefit(
        "Sumber Serat Pektin",
        "Membantu melancarkan pencernaan dan dapat mencegah sembelit.",
    ),
    benefit(
        "Kaya Antioksidan",
        "Mengandung dopamin dan katekin yang melindungi tubuh dari kerusakan sel.",
    ),
    benefit(
        "Mudah Dicerna",
        "Gula alami dalam pisang kuning lebih mudah dipecah oleh tubuh untuk menjadi energi cepat.",
    ),
];

const KUNING_BINTIK_COKELAT_BENEFITS: [Benefit; 4] = [
    benefit(
        "Puncak Antioksidan",
        "Bintik cokelat menandakan bahwa pati telah berubah menjadi gula sederhana dan tingkat antioksidan berada di puncaknya.",
    ),
    benefit(
        "Mengandung TNF (Tumor Necrosis Factor)",
        "Kandungan TNF-nya dapat membantu melawan sel-sel abnormal dalam tubuh.",
    ),
    benefit(
        "Sangat Mudah Dicerna",
        "Cocok untuk orang dengan sistem pencernaan sensitif karena patinya sudah terurai.",
    ),
    benefit(
        "Rasa Paling Manis",
        "Ideal sebagai pemanis alami dalam smoothie atau kue.",
    ),
];

const COKELAT_BENEFITS: [Benefit; 3] = [
    benefit(
        "Kaya Triptofan",
        "Asam amino ini diubah tubuh menjadi serotonin, yang membantu meningkatkan mood dan membuat rileks.",
    ),
    benefit(
        "Sumber Antioksidan Maksimal",
        "Proses pematangan lanjut meningkatkan konsentrasi antioksidan.",
    ),
    benefit(
        "Pemanis Alami Terbaik",
        "Hampir seluruh patinya telah menjadi gula, membuatnya sangat ideal untuk bahan kue pisang atau pancake tanpa tambahan gula.",
    ),
];

impl RipenessStage {
    /// One-paragraph summary shown next to a classification result.
    ///
    /// Markdown bold (`**...**`) marks the stage name.
    pub fn insight(self) -> &'static str {
        match self {
            RipenessStage::Hijau => {
                "Pisang dengan tingkat kematangan **Hijau** baik untuk mengontrol gula darah karena tinggi pati resisten dan menjaga kesehatan pencernaan."
            }
            RipenessStage::Kuning => {
                "Pisang dengan tingkat kematangan **Kuning** bermanfaat sebagai sumber energi yang ideal, kaya potasium untuk kesehatan jantung dan serat untuk pencernaan."
            }
            RipenessStage::KuningBintikCokelat => {
                "Pisang dengan tingkat kematangan **Kuning bintik cokelat** sangat mudah dicerna, kaya antioksidan, dan memiliki kandungan yang baik untuk imunitas."
            }
            RipenessStage::Cokelat => {
                "Pisang dengan tingkat kematangan **cokelat** memiliki kandungan gula dan antioksidan sangat tinggi, sempurna untuk pemanis alami pada makanan."
            }
        }
    }

    /// Detailed health benefits of this stage.
    pub fn benefits(self) -> &'static [Benefit] {
        match self {
            RipenessStage::Hijau => &HIJAU_BENEFITS,
            RipenessStage::Kuning => &KUNING_BENEFITS,
            RipenessStage::KuningBintikCokelat => &KUNING_BINTIK_COKELAT_BENEFITS,
            RipenessStage::Cokelat => &COKELAT_BENEFITS,
        }
    }
}

/// Benefits of one stage, as exported by `ripeness benefits --output json`.
#[derive(Debug, Clone, Serialize)]
pub struct StageBenefits {
    /// Stage the entry describes.
    pub stage: RipenessStage,
    /// Short summary shown next to a classification.
    pub insight: &'static str,
    /// Detailed benefit list.
    pub benefits: &'static [Benefit],
}

impl From<RipenessStage> for StageBenefits {
    fn from(stage: RipenessStage) -> Self {
        Self {
            stage,
            insight: stage.insight(),
            benefits: stage.benefits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_copy() {
        for stage in RipenessStage::display_order() {
            assert!(stage.insight().starts_with("Pisang dengan tingkat kematangan"));
            assert!(!stage.benefits().is_empty());
        }
    }

    #[test]
    fn test_insight_names_the_stage() {
        assert!(
            RipenessStage::KuningBintikCokelat
                .insight()
                .contains("**Kuning bintik cokelat**")
        );
        assert!(RipenessStage::Hijau.insight().contains("**Hijau**"));
    }

    #[test]
    fn test_benefit_counts() {
        assert_eq!(RipenessStage::Hijau.benefits().len(), 3);
        assert_eq!(RipenessStage::Kuning.benefits().len(), 4);
        assert_eq!(RipenessStage::KuningBintikCokelat.benefits().len(), 4);
        assert_eq!(RipenessStage::Cokelat.benefits().len(), 3);
        assert_eq!(RipenessStage::Kuning.benefits()[0].title, "Kaya Potasium");
    }

    #[test]
    fn test_stage_benefits_json() {
        let value = serde_json::to_value(StageBenefits::from(RipenessStage::Cokelat)).unwrap();
        assert_eq!(value["stage"], "cokelat");
        assert_eq!(value["benefits"][0]["title"], "Kaya Triptofan");
    }
}
