//! The catalog owns the ordered photo list, the classification cache, the
//! active filter and the selection state. Nothing here touches storage except
//! [`Catalog::scan`]; everything else is pure bookkeeping so it stays
//! testable headlessly.

use std::collections::{BTreeSet, HashMap};

use crate::core::formats;
use crate::error::Result;
use crate::models::{Classification, FilterKind, MetadataRecord, PhotoEntry};
use crate::storage::FolderStore;

#[derive(Default)]
pub struct Catalog {
    photos: Vec<PhotoEntry>,
    cache: HashMap<String, MetadataRecord>,
    filter: FilterKind,
    /// Indices into `photos` passing the active filter.
    filtered: Vec<usize>,
    /// Position within `filtered`, None = viewer blanked.
    current: Option<usize>,
    /// Multi-select positions within `filtered`.
    selected: BTreeSet<usize>,
    display_epoch: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a folder scan: image files become entries,
    /// sidecars are associated case-insensitively by filename convention.
    pub async fn scan(store: &dyn FolderStore) -> Result<Self> {
        let entries = store.enumerate().await?;

        let mut sidecars: HashMap<String, String> = HashMap::new();
        for info in &entries {
            if let Some(base) = formats::sidecar_base(&info.name) {
                sidecars.insert(base.to_lowercase(), info.name.clone());
            }
        }

        let mut photos = Vec::new();
        for info in entries {
            if !formats::is_image(&info.name) {
                continue;
            }
            let mut entry = PhotoEntry::new(info.name, info.size, info.last_modified);
            entry.sidecar = sidecars.get(&entry.name.to_lowercase()).cloned();
            photos.push(entry);
        }

        let mut catalog = Self::new();
        catalog.load(photos);
        Ok(catalog)
    }

    /// Replace the photo list wholesale (folder reload). Drops the cache and
    /// selection, sorts, and selects the first visible photo if any.
    pub fn load(&mut self, mut photos: Vec<PhotoEntry>) {
        // Stable sort keeps enumeration order for case-insensitive ties.
        photos.sort_by_key(|photo| photo.name.to_lowercase());

        self.photos = photos;
        self.cache.clear();
        self.filter = FilterKind::All;
        self.selected.clear();
        self.recompute_filtered();
        self.current = if self.filtered.is_empty() {
            None
        } else {
            Some(0)
        };
        self.bump_epoch();
    }

    pub fn photos(&self) -> &[PhotoEntry] {
        &self.photos
    }

    pub fn filtered(&self) -> Vec<&PhotoEntry> {
        self.filtered
            .iter()
            .map(|&index| &self.photos[index])
            .collect()
    }

    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    // ---- classification cache -------------------------------------------

    pub fn cache_record(&mut self, name: &str, record: MetadataRecord) {
        self.cache.insert(name.to_string(), record);
    }

    pub fn record(&self, name: &str) -> Option<&MetadataRecord> {
        self.cache.get(name)
    }

    /// Absent cache entries classify as lacking both date and location.
    pub fn classification(&self, name: &str) -> Classification {
        self.cache
            .get(name)
            .map(|record| record.classification())
            .unwrap_or_default()
    }

    pub fn invalidate(&mut self, name: &str) {
        self.cache.remove(name);
    }

    // ---- filtering -------------------------------------------------------

    /// Activate a filter: recompute the visible list, clear any multi-select,
    /// and re-select the first visible item (or blank the viewer).
    pub fn set_filter(&mut self, filter: FilterKind) {
        self.filter = filter;
        self.selected.clear();
        self.recompute_filtered();
        self.current = if self.filtered.is_empty() {
            None
        } else {
            Some(0)
        };
        self.bump_epoch();
    }

    /// Re-run the active predicate after classifications changed (e.g. a
    /// save). Keeps the current photo selected if it is still visible.
    pub fn refilter(&mut self) {
        let current_name = self.current_photo().map(|photo| photo.name.clone());
        self.recompute_filtered();
        self.current = match current_name {
            Some(name) => self
                .filtered
                .iter()
                .position(|&index| self.photos[index].name == name)
                .or(if self.filtered.is_empty() { None } else { Some(0) }),
            None => None,
        };
        self.selected.retain(|&position| position < self.filtered.len());
    }

    fn recompute_filtered(&mut self) {
        let filter = self.filter;
        self.filtered = self
            .photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| filter.matches(self.cache.get(&photo.name)))
            .map(|(index, _)| index)
            .collect();
    }

    // ---- selection -------------------------------------------------------

    /// Select by position in the filtered list. Bumps the display generation
    /// token so results of superseded thumbnail/extract requests can be
    /// recognized as stale.
    pub fn select(&mut self, position: usize) -> Option<&PhotoEntry> {
        if position >= self.filtered.len() {
            return None;
        }
        self.current = Some(position);
        self.bump_epoch();
        self.current_photo()
    }

    pub fn navigate(&mut self, delta: i64) -> Option<&PhotoEntry> {
        let current = self.current? as i64;
        let next = current + delta;
        if next < 0 || next as usize >= self.filtered.len() {
            return self.current_photo();
        }
        self.select(next as usize)
    }

    pub fn current_photo(&self) -> Option<&PhotoEntry> {
        let position = self.current?;
        let index = *self.filtered.get(position)?;
        self.photos.get(index)
    }

    pub fn toggle_selection(&mut self, position: usize) {
        if position >= self.filtered.len() {
            return;
        }
        if !self.selected.remove(&position) {
            self.selected.insert(position);
        }
    }

    pub fn select_range(&mut self, start: usize, end: usize) {
        if self.filtered.is_empty() {
            return;
        }
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        for position in low..=high.min(self.filtered.len() - 1) {
            self.selected.insert(position);
        }
    }

    /// Select-all toggles: everything selected collapses back to none.
    pub fn select_all(&mut self) {
        if self.selected.len() == self.filtered.len() {
            self.selected.clear();
        } else {
            self.selected = (0..self.filtered.len()).collect();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// The photos a save targets: the multi-selection when there is one,
    /// otherwise the current photo.
    pub fn save_targets(&self) -> Vec<PhotoEntry> {
        if self.selected.len() > 1 {
            self.selected
                .iter()
                .filter_map(|&position| self.filtered.get(position))
                .map(|&index| self.photos[index].clone())
                .collect()
        } else {
            self.current_photo().cloned().into_iter().collect()
        }
    }

    // ---- mutation bookkeeping -------------------------------------------

    /// Record a completed on-disk rename: entry renamed, classification
    /// dropped, sidecar association moved along, order re-established.
    pub fn apply_rename(&mut self, old_name: &str, new_name: &str, new_sidecar: Option<String>) {
        let Some(entry) = self.photos.iter_mut().find(|photo| photo.name == old_name) else {
            return;
        };
        entry.name = new_name.to_string();
        entry.sidecar = new_sidecar;
        self.cache.remove(old_name);

        let keep = self.current_photo().map(|photo| photo.name.clone());
        self.photos.sort_by_key(|photo| photo.name.to_lowercase());
        self.recompute_filtered();
        self.current = keep.and_then(|name| {
            self.filtered
                .iter()
                .position(|&index| self.photos[index].name == name)
        });
    }

    /// Refresh an entry after its bytes were rewritten.
    pub fn refresh_entry(&mut self, name: &str, size: u64, sidecar: Option<String>) {
        if let Some(entry) = self.photos.iter_mut().find(|photo| photo.name == name) {
            entry.size = size;
            if sidecar.is_some() {
                entry.sidecar = sidecar;
            }
        }
    }

    // ---- display generation token ---------------------------------------

    pub fn display_epoch(&self) -> u64 {
        self.display_epoch
    }

    /// True when `token` still refers to the latest selection; callers
    /// discard thumbnail/extract results carrying a stale token.
    pub fn is_current_epoch(&self, token: u64) -> bool {
        token == self.display_epoch
    }

    fn bump_epoch(&mut self) {
        self.display_epoch = self.display_epoch.wrapping_add(1);
    }
}
