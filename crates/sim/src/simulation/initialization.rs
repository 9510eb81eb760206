//! Founder label initialization.

use crate::base::{AlleleLabel, RandomSource, ALLELE_A, ALLELE_B};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// How generation 0 is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum LabelInit {
    /// Every founder carries the same label.
    Monomorphic { label: AlleleLabel },
    /// Each founder independently carries allele A with probability `p`,
    /// allele B otherwise.
    Biallelic { p: f64 },
    /// Founder `i` carries label `i`, so every label marks one founder's
    /// descendants.
    Unique,
}

impl Default for LabelInit {
    fn default() -> Self {
        Self::Monomorphic { label: ALLELE_A }
    }
}

impl LabelInit {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Biallelic { p } if !(0.0..=1.0).contains(&p) => {
                Err(ConfigError::InvalidFrequency(p))
            }
            Self::Monomorphic { label } if label == AlleleLabel::MAX => {
                Err(ConfigError::LabelOutOfRange(label))
            }
            _ => Ok(()),
        }
    }

    /// Labels of `size` founders.
    ///
    /// Only the biallelic mode consumes random draws, one per founder.
    pub fn founder_labels<R: RandomSource + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Vec<AlleleLabel> {
        match *self {
            Self::Monomorphic { label } => vec![label; size],
            Self::Biallelic { p } => (0..size)
                .map(|_| if rng.unit() < p { ALLELE_A } else { ALLELE_B })
                .collect(),
            Self::Unique => (0..size as AlleleLabel).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ScriptedSource, SeededSource};

    #[test]
    fn test_monomorphic() {
        let mut rng = ScriptedSource::default();
        let labels = LabelInit::Monomorphic { label: 3 }.founder_labels(4, &mut rng);
        assert_eq!(labels, vec![3, 3, 3, 3]);
    }

    #[test]
    fn test_unique() {
        let mut rng = ScriptedSource::default();
        assert_eq!(LabelInit::Unique.founder_labels(3, &mut rng), vec![0, 1, 2]);
    }

    #[test]
    fn test_biallelic_threshold() {
        let mut rng = ScriptedSource::new(Vec::new(), [0.1, 0.5, 0.49, 0.9]);
        let labels = LabelInit::Biallelic { p: 0.5 }.founder_labels(4, &mut rng);
        assert_eq!(labels, vec![ALLELE_A, ALLELE_B, ALLELE_A, ALLELE_B]);
    }

    #[test]
    fn test_biallelic_extremes() {
        let mut rng = SeededSource::seed_from_u64(9);
        let all_a = LabelInit::Biallelic { p: 1.0 }.founder_labels(100, &mut rng);
        let all_b = LabelInit::Biallelic { p: 0.0 }.founder_labels(100, &mut rng);

        assert!(all_a.iter().all(|&l| l == ALLELE_A));
        assert!(all_b.iter().all(|&l| l == ALLELE_B));
    }

    #[test]
    fn test_validate() {
        assert!(LabelInit::Biallelic { p: 0.3 }.validate().is_ok());
        assert_eq!(
            LabelInit::Biallelic { p: 1.2 }.validate(),
            Err(ConfigError::InvalidFrequency(1.2))
        );
        assert!(LabelInit::Unique.validate().is_ok());
        assert!(LabelInit::Monomorphic { label: AlleleLabel::MAX - 1 }
            .validate()
            .is_ok());
        assert_eq!(
            LabelInit::Monomorphic {
                label: AlleleLabel::MAX
            }
            .validate(),
            Err(ConfigError::LabelOutOfRange(AlleleLabel::MAX))
        );
    }

    #[test]
    fn test_serde_roundtrip_tag() {
        let json = serde_json::to_string(&LabelInit::Biallelic { p: 0.25 }).unwrap();
        assert_eq!(json, r#"{"mode":"biallelic","p":0.25}"#);
        let parsed: LabelInit = serde_json::from_str(r#"{"mode":"unique"}"#).unwrap();
        assert_eq!(parsed, LabelInit::Unique);
    }
}
