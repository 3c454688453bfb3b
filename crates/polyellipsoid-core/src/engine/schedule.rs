use crate::core::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealSegment {
    pub kt: f64,
    pub steps: u64,
}

/// Temperatures and run lengths followed in order by an anneal.
///
/// Segments are never merged, so two segments that round to the same
/// temperature both run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealSchedule {
    segments: Vec<AnnealSegment>,
}

impl AnnealSchedule {
    /// Evenly spaced temperatures from `kt_init` to `kt_final` (both included),
    /// rounded to one decimal, paired with `step_sequence` in order.
    pub fn linear(
        kt_init: f64,
        kt_final: f64,
        step_sequence: &[u64],
    ) -> Result<Self, ConfigurationError> {
        check_kt("kt_init", kt_init)?;
        check_kt("kt_final", kt_final)?;
        let n = step_sequence.len();
        let segments = step_sequence
            .iter()
            .enumerate()
            .map(|(i, &steps)| {
                let kt = if n == 1 {
                    kt_init
                } else if i == n - 1 {
                    kt_final
                } else {
                    kt_init + (kt_final - kt_init) * i as f64 / (n - 1) as f64
                };
                AnnealSegment {
                    kt: round_to_tenth(kt),
                    steps,
                }
            })
            .collect();
        Self::from_segments(segments)
    }

    pub fn explicit<I>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        let segments = pairs
            .into_iter()
            .map(|(kt, steps)| AnnealSegment { kt, steps })
            .collect::<Vec<_>>();
        for segment in &segments {
            check_kt("kt", segment.kt)?;
        }
        Self::from_segments(segments)
    }

    fn from_segments(segments: Vec<AnnealSegment>) -> Result<Self, ConfigurationError> {
        if segments.is_empty() {
            return Err(ConfigurationError::EmptySchedule);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[AnnealSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_steps(&self) -> u64 {
        self.segments.iter().map(|s| s.steps).sum()
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

fn check_kt(name: &'static str, kt: f64) -> Result<(), ConfigurationError> {
    if kt >= 0.0 && kt.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { name, value: kt })
    }
}
