use rayon::prelude::*;

use crate::core::{
    filters::{has_valid_route, within_threshold},
    scoring::score_candidate,
};
use crate::models::{Candidate, CoordinateFields, MatchResult, Page, PageRequest, RideQuery, ScoredCandidate};

/// Default maximum distance, per leg, for a ride to count as a match
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Pages at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Ranks one page of rides by how close they run to a rider's trip
///
/// # Pipeline Stages
/// 1. Optional route validation (strict mode only)
/// 2. Distance scoring for both legs
/// 3. Per-leg threshold filter
/// 4. Stable sort by combined distance
#[derive(Debug, Clone)]
pub struct ProximityMatcher {
    max_distance_km: f64,
    fields: CoordinateFields,
    strict: bool,
    parallel_threshold: usize,
}

impl ProximityMatcher {
    pub fn new(max_distance_km: f64) -> Self {
        Self {
            max_distance_km,
            fields: CoordinateFields::default(),
            strict: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_fields(mut self, fields: CoordinateFields) -> Self {
        self.fields = fields;
        self
    }

    /// Reject candidates with missing or out-of-range coordinates up front
    pub fn with_strict_validation(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Match a page using the configured distance threshold
    pub fn match_page(&self, query: &RideQuery, page: Page, request: PageRequest) -> MatchResult {
        self.match_page_within(query, page, request, self.max_distance_km)
    }

    /// Match a page against an explicit threshold in kilometers.
    ///
    /// The returned `total` is the page's unfiltered total, untouched.
    pub fn match_page_within(
        &self,
        query: &RideQuery,
        page: Page,
        request: PageRequest,
        threshold_km: f64,
    ) -> MatchResult {
        let fetched = page.candidates.len();
        let rides = self.rank(query, page.candidates, threshold_km);

        tracing::debug!(
            "Matched {} of {} fetched rides within {}km (store total: {})",
            rides.len(),
            fetched,
            threshold_km,
            page.total
        );

        MatchResult {
            rides,
            total: page.total,
            limit: request.limit,
            offset: request.offset,
        }
    }

    /// Score, filter and sort candidates.
    ///
    /// Equal combined distances keep their input order.
    pub fn rank(
        &self,
        query: &RideQuery,
        candidates: Vec<Candidate>,
        threshold_km: f64,
    ) -> Vec<ScoredCandidate> {
        let candidates = if self.strict {
            self.reject_malformed(candidates)
        } else {
            candidates
        };

        let mut ranked: Vec<ScoredCandidate> = self
            .score(query, candidates)
            .into_iter()
            .filter(|scored| within_threshold(scored, threshold_km))
            .collect();

        // slice::sort_by is stable
        ranked.sort_by(|a, b| {
            a.combined_distance
                .partial_cmp(&b.combined_distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked
    }

    /// Score every candidate, preserving input order
    pub fn score(&self, query: &RideQuery, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        if candidates.len() >= self.parallel_threshold {
            candidates
                .into_par_iter()
                .map(|candidate| score_candidate(query, candidate, &self.fields))
                .collect()
        } else {
            candidates
                .into_iter()
                .map(|candidate| score_candidate(query, candidate, &self.fields))
                .collect()
        }
    }

    fn reject_malformed(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| {
                let valid = has_valid_route(candidate, &self.fields);
                if !valid {
                    tracing::warn!(
                        "Rejecting ride {} with malformed coordinates",
                        candidate
                            .get("$id")
                            .and_then(|id| id.as_str())
                            .unwrap_or("<unknown>")
                    );
                }
                valid
            })
            .collect()
    }
}

impl Default for ProximityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_KM)
    }
}
