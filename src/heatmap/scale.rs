use crate::error::{HeatmapError, Result};

/// Number of entries in a [`ColorScale`].
pub const SCALE_LEN: usize = 256;

/// Injected 256-entry score → RGBA lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScale {
    table: Box<[[u8; 4]; SCALE_LEN]>,
}

impl ColorScale {
    pub fn new(table: [[u8; 4]; SCALE_LEN]) -> Self {
        Self {
            table: Box::new(table),
        }
    }

    /// Build the table by evaluating `f` at every index.
    pub fn from_fn(mut f: impl FnMut(u8) -> [u8; 4]) -> Self {
        let mut table = [[0u8; 4]; SCALE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self::new(table)
    }

    /// Table index for `score`: `round(clamp(score, 0, 1) * 255)`; NaN maps to 0.
    #[inline]
    pub fn index(score: f32) -> usize {
        if score.is_nan() {
            return 0;
        }
        (score.clamp(0.0, 1.0) * 255.0).round() as usize
    }

    #[inline]
    pub fn lookup(&self, score: f32) -> [u8; 4] {
        self.table[Self::index(score)]
    }

    pub fn entries(&self) -> &[[u8; 4]] {
        &self.table[..]
    }
}

impl TryFrom<Vec<[u8; 4]>> for ColorScale {
    type Error = HeatmapError;

    fn try_from(entries: Vec<[u8; 4]>) -> Result<Self> {
        let len = entries.len();
        let table: Box<[[u8; 4]; SCALE_LEN]> = entries
            .into_boxed_slice()
            .try_into()
            .map_err(|_| {
                HeatmapError::invalid(format!("color scale needs {SCALE_LEN} entries, got {len}"))
            })?;
        Ok(Self { table })
    }
}
