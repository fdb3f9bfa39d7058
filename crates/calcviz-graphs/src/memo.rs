//! Single-slot memo for built paths.
//!
//! A plot slot (say, the derivative curve) keeps the last path it built together
//! with the inputs that produced it. Rebuilding happens only when one of those
//! inputs differs, so moving a probe slider does not resample unchanged curves.

use crate::mapper::{CoordinateMapper, MathRange, Viewport};
use crate::path::{build_path, Path, PathOptions};
use tracing::debug;

/// Everything a built path depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct PathKey {
    /// Stable identity of the sampled function.
    pub function: String,
    /// Mathematical window.
    pub range: MathRange,
    /// Drawing surface.
    pub viewport: Viewport,
    /// Sampling steps.
    pub samples: usize,
    /// Out-of-range tolerance.
    pub break_margin: f64,
}

impl PathKey {
    /// Key for sampling `function` through `mapper` with `options`.
    pub fn new(function: impl Into<String>, mapper: &CoordinateMapper, options: &PathOptions) -> Self {
        Self {
            function: function.into(),
            range: mapper.range(),
            viewport: mapper.viewport(),
            samples: options.samples,
            break_margin: options.break_margin,
        }
    }
}

/// Caches the most recent path of one plot slot.
#[derive(Debug, Default)]
pub struct PathMemo {
    entry: Option<(PathKey, Path)>,
    hits: u64,
    misses: u64,
}

impl PathMemo {
    /// Creates an empty memo.
    pub const fn new() -> Self {
        Self {
            entry: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached path when `key` matches, otherwise runs `build` and caches its result.
    pub fn get_or_build<F>(&mut self, key: PathKey, build: F) -> &Path
    where
        F: FnOnce() -> Path,
    {
        match self.entry.take() {
            Some((cached, path)) if cached == key => {
                self.hits += 1;
                &self.entry.insert((cached, path)).1
            }
            previous => {
                self.misses += 1;
                debug!(
                    function = %key.function,
                    samples = key.samples,
                    replaced = previous.is_some(),
                    "rebuilding memoised path"
                );
                let path = build();
                &self.entry.insert((key, path)).1
            }
        }
    }

    /// Samples `f` under the identity `function`, reusing the cached path when nothing changed.
    pub fn plot<F>(
        &mut self,
        function: &str,
        f: F,
        mapper: &CoordinateMapper,
        options: &PathOptions,
    ) -> &Path
    where
        F: Fn(f64) -> f64,
    {
        let key = PathKey::new(function, mapper, options);
        self.get_or_build(key, || build_path(f, mapper, options))
    }

    /// Key of the cached entry, if any.
    pub fn key(&self) -> Option<&PathKey> {
        self.entry.as_ref().map(|(key, _)| key)
    }

    /// Drops the cached entry.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Lookups answered from the cache.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to build.
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}
