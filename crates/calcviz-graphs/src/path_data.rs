//! SVG `d` attribute serialization for [`Path`].

use crate::path::{Path, PathCommand};
use std::fmt;

/// Displays a path as SVG path data, e.g. `M240.0,204.3 L242.4,200.1`.
#[derive(Debug, Clone, Copy)]
pub struct PathData<'a> {
    path: &'a Path,
    precision: Option<usize>,
}

impl<'a> PathData<'a> {
    /// Path data with one decimal per coordinate.
    pub const fn new(path: &'a Path) -> Self {
        Self {
            path,
            precision: Some(1),
        }
    }

    /// Sets the number of decimals; `None` writes the shortest exact representation.
    #[must_use]
    pub const fn precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }
}

impl fmt::Display for PathData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.path.commands().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let (letter, p) = match command {
                PathCommand::MoveTo(p) => ('M', p),
                PathCommand::LineTo(p) => ('L', p),
            };
            match self.precision {
                Some(digits) => write!(f, "{letter}{:.*},{:.*}", digits, p.x, digits, p.y)?,
                None => write!(f, "{letter}{},{}", p.x, p.y)?,
            }
        }
        Ok(())
    }
}

/// Serializes `path` with `precision` decimals per coordinate.
pub fn to_svg_path(path: &Path, precision: Option<usize>) -> String {
    PathData::new(path).precision(precision).to_string()
}
