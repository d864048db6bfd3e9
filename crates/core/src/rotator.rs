//! Quote rotation without immediate repeats
//!
//! The rotator serves every quote of its pool exactly once per cycle. The
//! order of a cycle is shuffled once, lazily, when the first quote of that
//! cycle is requested; an exhausted cycle is refilled with every index of the
//! pool and reshuffled.

use crate::data_source::QuotePool;
use chrono::{DateTime, Local};
use inkboard_types::QuoteRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Stateful pool of quotes handed out in shuffled cycles
pub struct Rotator<R = StdRng> {
    pool: Vec<QuoteRecord>,
    /// Indices into `pool` not yet served in the current cycle
    remaining: VecDeque<usize>,
    shuffled: bool,
    last_fetch: Option<DateTime<Local>>,
    rng: R,
}

impl Rotator<StdRng> {
    /// Create a rotator over `quotes` seeded from OS entropy
    pub fn new(quotes: Vec<QuoteRecord>) -> Self {
        Self::with_rng(quotes, StdRng::from_entropy())
    }

    /// Create a rotator from a loaded pool, keeping its fetch time
    pub fn from_pool(pool: QuotePool) -> Self {
        let mut rotator = Self::new(pool.quotes);
        rotator.last_fetch = Some(pool.fetched_at);
        rotator
    }
}

impl<R: Rng> Rotator<R> {
    /// Create a rotator with an explicit random source
    ///
    /// An empty `quotes` list is replaced by the single placeholder quote.
    pub fn with_rng(quotes: Vec<QuoteRecord>, rng: R) -> Self {
        let mut rotator = Self {
            pool: Vec::new(),
            remaining: VecDeque::new(),
            shuffled: false,
            last_fetch: None,
            rng,
        };
        rotator.replace_pool(quotes);
        rotator
    }

    /// Next quote of the current cycle. Never fails.
    pub fn next(&mut self) -> QuoteRecord {
        if self.remaining.is_empty() {
            self.remaining.extend(0..self.pool.len());
            self.shuffled = false;
            log::debug!("Quote cycle exhausted, starting a new cycle of {}", self.pool.len());
        }

        if !self.shuffled {
            self.remaining.make_contiguous().shuffle(&mut self.rng);
            self.shuffled = true;
        }

        match self.remaining.pop_front() {
            Some(index) => self.pool[index].clone(),
            // The pool is never empty, so a refilled cycle always has an index
            None => QuoteRecord::placeholder(),
        }
    }

    /// Replace the whole pool and restart the cycle
    pub fn refresh(&mut self, pool: QuotePool) {
        log::info!(
            "Replacing quote pool ({} -> {} quotes)",
            self.pool.len(),
            pool.quotes.len()
        );
        self.replace_pool(pool.quotes);
        self.last_fetch = Some(pool.fetched_at);
    }

    fn replace_pool(&mut self, quotes: Vec<QuoteRecord>) {
        self.pool = if quotes.is_empty() {
            log::warn!("Empty quote pool, using placeholder");
            vec![QuoteRecord::placeholder()]
        } else {
            quotes
        };
        self.remaining = (0..self.pool.len()).collect();
        self.shuffled = false;
    }

    /// Number of quotes in the pool
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    /// Always false: an empty pool is replaced by the placeholder
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Quotes left before the current cycle is exhausted
    pub fn remaining_in_cycle(&self) -> usize {
        self.remaining.len()
    }

    /// When the current pool was fetched, if known
    pub fn last_fetch(&self) -> Option<DateTime<Local>> {
        self.last_fetch
    }
}
