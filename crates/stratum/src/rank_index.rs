//! Rank-indexed grouping of ranked nodes by an arbitrary classification key.

use crate::rank::RankMap;
use indexmap::{Equivalent, IndexMap};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Classification key -> rank -> nodes, with nodes in rank-map order.
///
/// Nodes whose key is undefined are left out; every other ranked node appears exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct RankIndex<K: Hash + Eq> {
    groups: IndexMap<K, BTreeMap<usize, Vec<String>>>,
}

impl<K: Hash + Eq> Default for RankIndex<K> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> RankIndex<K> {
    pub fn build<F>(ranks: &RankMap, mut classify: F) -> Self
    where
        F: FnMut(&str) -> Option<K>,
    {
        match Self::try_build(ranks, |v| Ok::<_, Infallible>(classify(v))) {
            Ok(index) => index,
            Err(never) => match never {},
        }
    }

    /// Like [`RankIndex::build`], but stops at the first classification error.
    pub fn try_build<F, E>(ranks: &RankMap, mut classify: F) -> Result<Self, E>
    where
        F: FnMut(&str) -> Result<Option<K>, E>,
    {
        let mut groups: IndexMap<K, BTreeMap<usize, Vec<String>>> = IndexMap::new();
        for (v, &rank) in ranks {
            let Some(key) = classify(v)? else {
                continue;
            };
            groups
                .entry(key)
                .or_default()
                .entry(rank)
                .or_default()
                .push(v.clone());
        }
        Ok(Self { groups })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeMap<usize, Vec<String>>)> {
        self.groups.iter()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&BTreeMap<usize, Vec<String>>>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.groups.get(key)
    }

    /// Up to `k` nodes from the single extremal rank of `key`, never reaching into the next
    /// rank when that one holds fewer than `k`.
    pub fn top_k_at_extremal_rank<Q>(&self, key: &Q, k: usize, extremum: Extremum) -> Vec<&str>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let Some(by_rank) = self.groups.get(key) else {
            return Vec::new();
        };
        let nodes = match extremum {
            Extremum::Max => by_rank.last_key_value(),
            Extremum::Min => by_rank.first_key_value(),
        };
        nodes
            .map(|(_, nodes)| nodes.iter().take(k).map(String::as_str).collect())
            .unwrap_or_default()
    }
}
