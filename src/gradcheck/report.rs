//! Gradient check reports

use crate::model::{Float, ParamKind};
use serde::Serialize;
use std::fmt;

/// One summary error per weight tensor
///
/// Each value is `Σ(analytic - numerical) / numel`. Being a signed mean it can
/// hide errors that cancel; see [`TensorComparison`] for per-entry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorReport {
    pub w: Float,
    pub why: Float,
    pub bh: Float,
    pub by: Float,
}

impl ErrorReport {
    /// Build a report by evaluating `f` for each tensor
    pub fn from_fn<F: FnMut(ParamKind) -> Float>(mut f: F) -> Self {
        Self {
            w: f(ParamKind::W),
            why: f(ParamKind::Why),
            bh: f(ParamKind::Bh),
            by: f(ParamKind::By),
        }
    }

    pub fn get(&self, kind: ParamKind) -> Float {
        match kind {
            ParamKind::W => self.w,
            ParamKind::Why => self.why,
            ParamKind::Bh => self.bh,
            ParamKind::By => self.by,
        }
    }

    /// Largest absolute error across the four tensors
    pub fn max_abs(&self) -> Float {
        ParamKind::ALL
            .iter()
            .map(|&kind| self.get(kind).abs())
            .fold(0.0, Float::max)
    }

    /// True when every tensor's error is within `tolerance`
    pub fn passes(&self, tolerance: Float) -> bool {
        ParamKind::ALL
            .iter()
            .all(|&kind| self.get(kind).abs() < tolerance)
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in ParamKind::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>4}: {:+.3e}", kind.name(), self.get(*kind))?;
        }
        Ok(())
    }
}

/// Per-entry agreement between analytic and numerical gradients for one tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TensorComparison {
    pub kind: ParamKind,
    pub mean_signed_error: Float,
    pub max_abs_error: Float,
    /// `|a - n| / max(|a|, |n|)`, entries where both are zero count as 0
    pub max_rel_error: Float,
}

impl TensorComparison {
    pub fn between<A, N>(kind: ParamKind, analytic: A, numerical: N) -> Self
    where
        A: IntoIterator<Item = Float>,
        N: IntoIterator<Item = Float>,
    {
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut max_abs_error: Float = 0.0;
        let mut max_rel_error: Float = 0.0;

        for (a, n) in analytic.into_iter().zip(numerical) {
            let diff = a - n;
            sum += diff;
            count += 1;
            max_abs_error = max_abs_error.max(diff.abs());
            let scale = a.abs().max(n.abs());
            if scale > 0.0 {
                max_rel_error = max_rel_error.max(diff.abs() / scale);
            }
        }

        Self {
            kind,
            mean_signed_error: if count == 0 { 0.0 } else { sum / count as Float },
            max_abs_error,
            max_rel_error,
        }
    }
}
