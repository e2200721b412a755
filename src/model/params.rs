//! Weight and gradient bundles

use super::{Float, Sizes};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayViewD, ArrayViewMutD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the four parameter tensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    W,
    Why,
    Bh,
    By,
}

impl ParamKind {
    /// All tensors, in canonical order
    pub const ALL: [ParamKind; 4] = [ParamKind::W, ParamKind::Why, ParamKind::Bh, ParamKind::By];

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::W => "W",
            ParamKind::Why => "Why",
            ParamKind::Bh => "bh",
            ParamKind::By => "by",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_shape(kind: ParamKind, got: &[usize], sizes: Sizes) -> Result<()> {
    let expected = sizes.shape(kind);
    if got != expected.as_slice() {
        return Err(Error::ShapeMismatch {
            tensor: kind.name(),
            expected,
            got: got.to_vec(),
        });
    }
    Ok(())
}

/// The learnable parameters of the network
#[derive(Debug, Clone, PartialEq)]
pub struct WeightBundle {
    /// Combined input/recurrent transform: `[hidden, vocab + hidden]`
    pub w: Array2<Float>,
    /// Output projection: `[vocab, hidden]`
    pub why: Array2<Float>,
    /// Hidden bias: `[hidden]`
    pub bh: Array1<Float>,
    /// Output bias: `[vocab]`
    pub by: Array1<Float>,
}

impl WeightBundle {
    /// All-zero weights
    pub fn zeros(sizes: Sizes) -> Self {
        Self {
            w: Array2::zeros((sizes.hidden_size, sizes.input_size())),
            why: Array2::zeros((sizes.vocab_size, sizes.hidden_size)),
            bh: Array1::zeros(sizes.hidden_size),
            by: Array1::zeros(sizes.vocab_size),
        }
    }

    /// Assemble a bundle from existing tensors, validating them against `sizes`
    pub fn from_parts(
        sizes: Sizes,
        w: Array2<Float>,
        why: Array2<Float>,
        bh: Array1<Float>,
        by: Array1<Float>,
    ) -> Result<Self> {
        let weights = Self { w, why, bh, by };
        weights.check_shapes(sizes)?;
        Ok(weights)
    }

    /// Sizes implied by the bias lengths
    pub fn sizes(&self) -> Sizes {
        Sizes {
            vocab_size: self.by.len(),
            hidden_size: self.bh.len(),
        }
    }

    /// Verify every tensor matches the shape implied by `sizes`
    pub fn check_shapes(&self, sizes: Sizes) -> Result<()> {
        for kind in ParamKind::ALL {
            check_shape(kind, self.tensor(kind).shape(), sizes)?;
        }
        Ok(())
    }

    /// Panicking form of [`check_shapes`](Self::check_shapes), for the numerical core
    pub(crate) fn assert_shapes(&self, sizes: Sizes) {
        if let Err(e) = self.check_shapes(sizes) {
            panic!("weights do not match sizes: {e}");
        }
    }

    /// Read-only view of one tensor
    pub fn tensor(&self, kind: ParamKind) -> ArrayViewD<'_, Float> {
        match kind {
            ParamKind::W => self.w.view().into_dyn(),
            ParamKind::Why => self.why.view().into_dyn(),
            ParamKind::Bh => self.bh.view().into_dyn(),
            ParamKind::By => self.by.view().into_dyn(),
        }
    }

    /// Mutable view of one tensor
    pub fn tensor_mut(&mut self, kind: ParamKind) -> ArrayViewMutD<'_, Float> {
        match kind {
            ParamKind::W => self.w.view_mut().into_dyn(),
            ParamKind::Why => self.why.view_mut().into_dyn(),
            ParamKind::Bh => self.bh.view_mut().into_dyn(),
            ParamKind::By => self.by.view_mut().into_dyn(),
        }
    }

    /// True when every entry is finite
    pub fn is_finite(&self) -> bool {
        ParamKind::ALL
            .iter()
            .all(|&kind| self.tensor(kind).iter().all(|v| v.is_finite()))
    }
}

/// Whole-sequence gradients, one tensor per [`WeightBundle`] tensor
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBundle {
    pub dw: Array2<Float>,
    pub dwhy: Array2<Float>,
    pub dbh: Array1<Float>,
    pub dby: Array1<Float>,
}

impl GradientBundle {
    /// Zero gradients shaped like the weights for `sizes`
    pub fn zeros(sizes: Sizes) -> Self {
        Self {
            dw: Array2::zeros((sizes.hidden_size, sizes.input_size())),
            dwhy: Array2::zeros((sizes.vocab_size, sizes.hidden_size)),
            dbh: Array1::zeros(sizes.hidden_size),
            dby: Array1::zeros(sizes.vocab_size),
        }
    }

    pub fn check_shapes(&self, sizes: Sizes) -> Result<()> {
        for kind in ParamKind::ALL {
            check_shape(kind, self.tensor(kind).shape(), sizes)?;
        }
        Ok(())
    }

    pub(crate) fn assert_shapes(&self, sizes: Sizes) {
        if let Err(e) = self.check_shapes(sizes) {
            panic!("gradients do not match sizes: {e}");
        }
    }

    pub fn tensor(&self, kind: ParamKind) -> ArrayViewD<'_, Float> {
        match kind {
            ParamKind::W => self.dw.view().into_dyn(),
            ParamKind::Why => self.dwhy.view().into_dyn(),
            ParamKind::Bh => self.dbh.view().into_dyn(),
            ParamKind::By => self.dby.view().into_dyn(),
        }
    }

    pub fn tensor_mut(&mut self, kind: ParamKind) -> ArrayViewMutD<'_, Float> {
        match kind {
            ParamKind::W => self.dw.view_mut().into_dyn(),
            ParamKind::Why => self.dwhy.view_mut().into_dyn(),
            ParamKind::Bh => self.dbh.view_mut().into_dyn(),
            ParamKind::By => self.dby.view_mut().into_dyn(),
        }
    }

    /// True when every entry is exactly zero
    pub fn is_zero(&self) -> bool {
        ParamKind::ALL
            .iter()
            .all(|&kind| self.tensor(kind).iter().all(|&v| v == 0.0))
    }

    /// Global L2 norm over all four tensors
    pub fn norm(&self) -> Float {
        ParamKind::ALL
            .iter()
            .map(|&kind| self.tensor(kind).iter().map(|v| v * v).sum::<Float>())
            .sum::<Float>()
            .sqrt()
    }
}
