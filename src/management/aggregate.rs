use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    discogs::DiscogsError,
    types::{CanonicalRecord, EnrichmentCandidate, GradePrices, RawRelease, ReleaseEnrichment},
};

/// Artist name to instance id to record.
///
/// Both levels are ordered maps, so iteration yields artists alphabetically
/// and releases of one artist by instance id. A key is written once: later
/// deliveries of the same `(artist, instance_id)` leave the record alone,
/// and enrichment only touches keys that already exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatalogAggregate {
    artists: BTreeMap<String, BTreeMap<u64, CanonicalRecord>>,
}

impl CatalogAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` unless the key is taken. Returns whether it was inserted.
    pub fn merge(&mut self, artist: String, record: CanonicalRecord) -> bool {
        let releases = self.artists.entry(artist).or_default();
        if releases.contains_key(&record.instance_id) {
            return false;
        }
        releases.insert(record.instance_id, record);
        true
    }

    pub fn merge_release(&mut self, release: &RawRelease) -> Result<bool, DiscogsError> {
        let (artist, record) = CanonicalRecord::from_raw(release)?;
        Ok(self.merge(artist, record))
    }

    pub fn merge_releases(&mut self, releases: &[RawRelease]) -> Result<usize, DiscogsError> {
        let mut inserted = 0;
        for release in releases {
            if self.merge_release(release)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Adds detail fields to an existing record. Returns `false` for unknown keys.
    pub fn merge_details(
        &mut self,
        artist: &str,
        instance_id: u64,
        details: ReleaseEnrichment,
    ) -> bool {
        match self.get_mut(artist, instance_id) {
            Some(record) => {
                record.merge_details(details);
                true
            }
            None => false,
        }
    }

    /// Adds price suggestions to an existing record. Returns `false` for unknown keys.
    pub fn merge_prices(&mut self, artist: &str, instance_id: u64, prices: GradePrices) -> bool {
        match self.get_mut(artist, instance_id) {
            Some(record) => {
                record.merge_prices(prices);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, artist: &str, instance_id: u64) -> Option<&CanonicalRecord> {
        self.artists.get(artist).and_then(|r| r.get(&instance_id))
    }

    fn get_mut(&mut self, artist: &str, instance_id: u64) -> Option<&mut CanonicalRecord> {
        self.artists
            .get_mut(artist)
            .and_then(|r| r.get_mut(&instance_id))
    }

    /// The `(artist, instance_id, release_id)` triples to enrich, in aggregate order.
    pub fn candidates(&self) -> Vec<EnrichmentCandidate> {
        self.records()
            .map(|(artist, record)| EnrichmentCandidate {
                artist: artist.to_string(),
                instance_id: record.instance_id,
                release_id: record.id,
            })
            .collect()
    }

    pub fn artists(&self) -> impl Iterator<Item = (&str, &BTreeMap<u64, CanonicalRecord>)> {
        self.artists.iter().map(|(a, r)| (a.as_str(), r))
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &CanonicalRecord)> {
        self.artists
            .iter()
            .flat_map(|(a, r)| r.values().map(move |record| (a.as_str(), record)))
    }

    pub fn count_artists(&self) -> usize {
        self.artists.len()
    }

    pub fn count_releases(&self) -> usize {
        self.artists.values().map(|r| r.len()).sum()
    }

    pub fn count_with_details(&self) -> usize {
        self.records().filter(|(_, r)| r.has_details()).count()
    }

    pub fn count_with_prices(&self) -> usize {
        self.records().filter(|(_, r)| r.prices.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count_releases() == 0
    }
}
