//! Needle pictures as plain data, for a plotting front end to draw
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CARTOON_NEEDLES, DEFAULT_SPAN, GRID_SPACING, MAX_CARTOON_SPAN,
};
use crate::needle::Needle;
use crate::table::{NeedleDrop, NeedleDropError};
use crate::traits::Sampleable;
use rand::Rng;
use std::fmt;

/// Draws `num_needles` needles on a table of side `span`.
///
/// # Example
///
/// ```
/// use buffon::Cartoon;
///
/// let cartoon = Cartoon::new(10.0, 200).unwrap();
/// let mut rng = rand::thread_rng();
///
/// let frame = cartoon.draw(&mut rng);
/// assert_eq!(frame.needles().len(), 200);
/// assert_eq!(frame.grid_lines().len(), 11);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "CartoonParameters"))]
#[cfg_attr(feature = "serde1", serde(into = "CartoonParameters"))]
pub struct Cartoon {
    table: NeedleDrop,
    num_needles: usize,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct CartoonParameters {
    pub span: f64,
    pub num_needles: usize,
}

/// A needle as a line segment plus whether it crosses a grid line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct CartoonNeedle {
    /// `((x1, x2), (y1, y2))`
    pub endpoints: ((f64, f64), (f64, f64)),
    pub crosses: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct CartoonFrame {
    span: f64,
    needles: Vec<CartoonNeedle>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum CartoonError {
    /// The table is invalid
    Table(NeedleDropError),
    /// The span is greater than [`MAX_CARTOON_SPAN`]
    SpanTooWide { span: f64 },
}

impl Cartoon {
    /// Create a cartoon of `num_needles` needles on a table of side `span`
    ///
    /// # Example
    ///
    /// ```
    /// # use buffon::{Cartoon, CartoonError};
    /// // One grid line per unit of span is more than any plot can show
    /// assert_eq!(
    ///     Cartoon::new(1E12, 10),
    ///     Err(CartoonError::SpanTooWide { span: 1E12 })
    /// );
    /// ```
    pub fn new(span: f64, num_needles: usize) -> Result<Self, CartoonError> {
        let table = NeedleDrop::new(span).map_err(CartoonError::Table)?;
        if span > MAX_CARTOON_SPAN {
            Err(CartoonError::SpanTooWide { span })
        } else {
            Ok(Cartoon { table, num_needles })
        }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.table.span()
    }

    #[inline]
    pub fn num_needles(&self) -> usize {
        self.num_needles
    }

    /// Drop the needles
    pub fn draw<R: Rng>(&self, rng: &mut R) -> CartoonFrame {
        let needles = self
            .table
            .sample(self.num_needles, rng)
            .iter()
            .map(CartoonNeedle::from)
            .collect();
        CartoonFrame {
            span: self.table.span(),
            needles,
        }
    }
}

impl Default for Cartoon {
    fn default() -> Self {
        Cartoon {
            table: NeedleDrop::new_unchecked(DEFAULT_SPAN),
            num_needles: DEFAULT_CARTOON_NEEDLES,
        }
    }
}

impl TryFrom<CartoonParameters> for Cartoon {
    type Error = CartoonError;

    fn try_from(params: CartoonParameters) -> Result<Self, Self::Error> {
        Cartoon::new(params.span, params.num_needles)
    }
}

impl From<Cartoon> for CartoonParameters {
    fn from(cartoon: Cartoon) -> Self {
        CartoonParameters {
            span: cartoon.span(),
            num_needles: cartoon.num_needles,
        }
    }
}

impl From<&Needle> for CartoonNeedle {
    fn from(needle: &Needle) -> Self {
        CartoonNeedle {
            endpoints: needle.endpoints(),
            crosses: needle.crosses_grid_line(),
        }
    }
}

impl CartoonFrame {
    /// Side of the table the needles were dropped on
    #[inline]
    pub fn span(&self) -> f64 {
        self.span
    }

    #[inline]
    pub fn needles(&self) -> &[CartoonNeedle] {
        &self.needles
    }

    /// Number of needles crossing a grid line
    pub fn n_crossing(&self) -> usize {
        self.needles.iter().filter(|n| n.crosses).count()
    }

    /// x positions of the vertical grid lines covering the table, `0..=span`.
    ///
    /// Lines stop at [`MAX_CARTOON_SPAN`], even for a wider frame.
    pub fn grid_lines(&self) -> Vec<f64> {
        // NaN clamps to NaN, which casts to zero
        let last = (self.span / GRID_SPACING)
            .floor()
            .clamp(0.0, MAX_CARTOON_SPAN / GRID_SPACING) as usize;
        (0..=last).map(|ix| ix as f64 * GRID_SPACING).collect()
    }
}

impl std::error::Error for CartoonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(err) => Some(err),
            Self::SpanTooWide { .. } => None,
        }
    }
}

impl fmt::Display for CartoonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(err) => write!(f, "invalid table: {err}"),
            Self::SpanTooWide { span } => write!(
                f,
                "span ({span}) must be at most {MAX_CARTOON_SPAN} to draw"
            ),
        }
    }
}
