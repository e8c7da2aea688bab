//! Bucketed nearest-color index with exhaustive fallback
//!
//! Reference colors are grouped by their quantized key. A query first scans
//! only the bucket its own key falls into; if that bucket is absent the whole
//! palette is scanned instead, so every query against a non-empty palette
//! resolves to some entry.

use crate::color::Color;
use crate::io::error::{MosaicError, Result};
use crate::matching::ReferenceEntry;
use crate::matching::quantize::{BucketKey, quantize, validate_quantum};
use crate::mosaic::ThumbnailStore;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Which search tier produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchSource {
    /// Found within the query's quantization bucket
    Bucket,
    /// Found by scanning the entire palette after a bucket miss
    Exhaustive,
}

/// Outcome of resolving a query color against the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Position of the matched entry in [`ColorIndex::entries`]
    pub entry: usize,
    /// Tier that found it
    pub source: MatchSource,
}

/// Immutable palette index keyed by quantized color
///
/// Holds every palette entry exactly once; buckets store positions into
/// that list in palette order.
#[derive(Debug, Clone)]
pub struct ColorIndex {
    entries: Vec<ReferenceEntry>,
    buckets: HashMap<BucketKey, Vec<usize>>,
    quantum: u16,
}

impl ColorIndex {
    /// Group palette entries by quantized color
    ///
    /// An entry repeated with the same color is kept once.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The quantum is zero or wider than a channel
    /// - An identifier appears twice with different colors
    pub fn build<I>(entries: I, quantum: u16) -> Result<Self>
    where
        I: IntoIterator<Item = ReferenceEntry>,
    {
        let quantum = validate_quantum(quantum)?;
        let mut seen: HashMap<String, Color> = HashMap::new();
        let mut palette = Vec::new();
        let mut buckets: HashMap<BucketKey, Vec<usize>> = HashMap::new();

        for entry in entries {
            match seen.entry(entry.identifier.clone()) {
                Entry::Occupied(existing) => {
                    if *existing.get() != entry.color {
                        return Err(MosaicError::DuplicateReference {
                            identifier: entry.identifier,
                            first: *existing.get(),
                            second: entry.color,
                        });
                    }
                    log::debug!("Skipping repeated palette entry '{}'", entry.identifier);
                    continue;
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry.color);
                }
            }

            buckets
                .entry(quantize(entry.color, quantum))
                .or_default()
                .push(palette.len());
            palette.push(entry);
        }

        log::debug!(
            "Indexed {} palette entries into {} buckets (quantum {quantum})",
            palette.len(),
            buckets.len()
        );

        Ok(Self {
            entries: palette,
            buckets,
            quantum,
        })
    }

    /// Build the index and confirm every identifier resolves in `store`
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ColorIndex::build`], or
    /// [`MosaicError::MissingReferenceResource`] for the first identifier the
    /// store cannot resolve
    pub fn build_verified<I, S>(entries: I, quantum: u16, store: &S) -> Result<Self>
    where
        I: IntoIterator<Item = ReferenceEntry>,
        S: ThumbnailStore + ?Sized,
    {
        let index = Self::build(entries, quantum)?;
        if let Some(missing) = index
            .entries
            .iter()
            .find(|entry| !store.contains(&entry.identifier))
        {
            return Err(MosaicError::MissingReferenceResource {
                identifier: missing.identifier.clone(),
            });
        }
        Ok(index)
    }

    /// Nearest entry within the query's bucket, or `None` on a bucket miss
    pub fn lookup(&self, color: Color) -> Option<&ReferenceEntry> {
        self.lookup_position(color)
            .and_then(|position| self.entries.get(position))
    }

    /// Position of the nearest entry within the query's bucket
    pub fn lookup_position(&self, color: Color) -> Option<usize> {
        let bucket = self.buckets.get(&quantize(color, self.quantum))?;
        nearest(
            bucket
                .iter()
                .filter_map(|&position| Some((position, self.entries.get(position)?))),
            color,
        )
    }

    /// Resolve a color by bucket lookup, falling back to a full scan
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyPalette`] if the index holds no entries
    pub fn resolve(&self, color: Color) -> Result<Resolution> {
        if let Some(entry) = self.lookup_position(color) {
            return Ok(Resolution {
                entry,
                source: MatchSource::Bucket,
            });
        }

        nearest(self.entries.iter().enumerate(), color)
            .map(|entry| Resolution {
                entry,
                source: MatchSource::Exhaustive,
            })
            .ok_or(MosaicError::EmptyPalette)
    }

    /// Every entry, in palette order
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Entry at a position returned by a lookup
    pub fn entry(&self, position: usize) -> Option<&ReferenceEntry> {
        self.entries.get(position)
    }

    /// Entries sharing a bucket key, in palette order
    pub fn bucket(&self, key: BucketKey) -> Vec<&ReferenceEntry> {
        self.buckets
            .get(&key)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&position| self.entries.get(position))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette was empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-empty buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket width used for quantization
    pub const fn quantum(&self) -> u16 {
        self.quantum
    }
}

/// Globally nearest palette entry by scanning every candidate
///
/// Ties go to the entry appearing first.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyPalette`] if `entries` is empty
pub fn exhaustive_match(entries: &[ReferenceEntry], color: Color) -> Result<&ReferenceEntry> {
    nearest(entries.iter().enumerate(), color)
        .and_then(|position| entries.get(position))
        .ok_or(MosaicError::EmptyPalette)
}

// Strict comparison keeps the first of equally distant candidates
fn nearest<'a, I>(candidates: I, color: Color) -> Option<usize>
where
    I: IntoIterator<Item = (usize, &'a ReferenceEntry)>,
{
    let mut best: Option<(usize, u32)> = None;
    for (position, entry) in candidates {
        let distance = entry.color.distance_squared(color);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((position, distance));
        }
    }
    best.map(|(position, _)| position)
}
