//! Integration tests for the repository
//!
//! Tests entity creation, erasure, resizing, iteration, lookup, and cloning.

use stratum_foundation::{EntityKey, ErrorKind, StoreConfig};
use stratum_storage::Repository;

#[derive(Clone, Debug, PartialEq)]
struct Name(String);

#[derive(Clone, Debug, PartialEq)]
struct Health(u32);

fn live_keys(repo: &Repository) -> Vec<u32> {
    repo.iter().map(|cursor| cursor.key().raw()).collect()
}

// =============================================================================
// Creation and Erasure
// =============================================================================

#[test]
fn first_key_is_zero() {
    let mut repo = Repository::new();
    assert_eq!(repo.create().key(), EntityKey::new(0));
    assert_eq!(repo.create().key(), EntityKey::new(1));
}

#[test]
fn erase_then_create_issues_fresh_key() {
    let mut repo = Repository::new();
    repo.create();
    repo.create();
    repo.erase(EntityKey::new(1));

    let key = repo.create().key();
    assert_eq!(key, EntityKey::new(2));
    assert_eq!(live_keys(&repo), vec![0, 2]);
}

#[test]
fn erase_twice_is_harmless() {
    let mut repo = Repository::new();
    let key = repo.create_with((Health(3),)).key();
    repo.erase(key);
    repo.erase(key);

    assert_eq!(repo.live_count(), 0);
    assert!(repo.values::<Health>().next().is_none());
}

#[test]
fn create_with_and_create_then_emplace_agree() {
    let mut repo = Repository::new();
    let a = repo
        .create_with((Name("a".into()), Health(1)))
        .into_cursor()
        .key();
    let b = {
        let mut cursor = repo.create();
        cursor.emplace(Name("a".into()));
        cursor.emplace(Health(1));
        cursor.key()
    };

    assert_eq!(repo.at(a).view::<Name>(), repo.at(b).view::<Name>());
    assert_eq!(repo.at(a).view::<Health>(), repo.at(b).view::<Health>());
}

// =============================================================================
// Resize
// =============================================================================

#[test]
fn resize_same_length_is_noop() {
    let mut repo = Repository::new();
    repo.create().emplace(Health(1));
    repo.resize(1);
    assert_eq!(live_keys(&repo), vec![0]);
    assert!(repo.at(EntityKey::new(0)).contains::<Health>());
}

#[test]
fn resize_down_makes_old_keys_unknown() {
    let mut repo = Repository::new();
    repo.resize(4);
    repo.resize(1);

    assert!(matches!(
        repo.validate(EntityKey::new(3)).unwrap_err().kind,
        ErrorKind::EntityNotFound(_)
    ));
}

#[test]
fn resize_then_create_continues_from_new_length() {
    let mut repo = Repository::new();
    repo.resize(10);
    repo.resize(3);
    assert_eq!(repo.create().key(), EntityKey::new(3));
}

#[test]
fn resize_to_zero_clears_everything() {
    let mut repo = Repository::new();
    for n in 0..5 {
        repo.create_with((Health(n), Name(n.to_string())));
    }
    repo.resize(0);

    assert!(repo.is_empty());
    assert_eq!(repo.len(), 0);
    assert_eq!(repo.begin(), repo.end());
    assert_eq!(repo.values::<Health>().count(), 0);
    assert_eq!(repo.values::<Name>().count(), 0);
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn iteration_visits_live_keys_in_order() {
    let mut repo = Repository::new();
    repo.resize(6);
    repo.erase(EntityKey::new(0));
    repo.erase(EntityKey::new(3));
    repo.erase(EntityKey::new(5));

    assert_eq!(live_keys(&repo), vec![1, 2, 4]);
}

#[test]
fn manual_cursor_walk_matches_iter() {
    let mut repo = Repository::new();
    repo.resize(5);
    repo.erase(EntityKey::new(2));

    let mut walked = Vec::new();
    let mut cursor = repo.begin();
    while cursor != repo.end() {
        walked.push(cursor.key().raw());
        cursor.advance();
    }
    assert_eq!(walked, live_keys(&repo));
}

#[test]
fn values_skip_entities_without_the_type() {
    let mut repo = Repository::new();
    repo.create().emplace(Health(10));
    repo.create().emplace(Name("x".into()));
    repo.create().emplace(Health(30));

    let pairs: Vec<_> = repo
        .values::<Health>()
        .map(|(key, health)| (key.raw(), health.0))
        .collect();
    assert_eq!(pairs, vec![(0, 10), (2, 30)]);
}

// =============================================================================
// Find
// =============================================================================

#[test]
fn find_returns_first_match_in_key_order() {
    let mut repo = Repository::new();
    repo.create().emplace(Health(5));
    repo.create().emplace(Health(7));
    repo.create().emplace(Health(7));

    assert_eq!(repo.find(&Health(7)).key(), EntityKey::new(1));
}

#[test]
fn find_ignores_erased_entities() {
    let mut repo = Repository::new();
    repo.create().emplace(Health(7));
    repo.create().emplace(Health(7));
    repo.erase(EntityKey::new(0));

    assert_eq!(repo.find(&Health(7)).key(), EntityKey::new(1));
}

#[test]
fn find_miss_is_bound_but_invalid() {
    let repo = Repository::new();
    let cursor = repo.find(&Health(1));
    assert!(cursor.container().is_some());
    assert!(!cursor.is_valid());
    assert_eq!(cursor.key(), EntityKey::INVALID);
}

// =============================================================================
// Configuration and Cloning
// =============================================================================

#[test]
fn configured_repository_uses_configured_blocks() {
    let mut repo = Repository::with_config(StoreConfig::compact()).unwrap();
    repo.create().emplace(Health(1));
    assert_eq!(repo.column::<Health>().map(|c| c.capacity()), Some(1));
}

#[test]
fn clone_preserves_tombstones() {
    let mut repo = Repository::new();
    repo.resize(3);
    repo.erase(EntityKey::new(1));

    let copy = repo.clone();
    assert_eq!(copy.len(), 3);
    assert!(!copy.contains(EntityKey::new(1)));
    assert_eq!(live_keys(&copy), vec![0, 2]);
}

#[test]
fn debug_output_mentions_counts() {
    let mut repo = Repository::new();
    repo.create().emplace(Health(1));
    let text = format!("{repo:?}");
    assert!(text.contains("Repository"));
    assert!(text.contains("live: 1"));
}

// =============================================================================
// Reverse Iteration
// =============================================================================

#[test]
fn reverse_iteration_mirrors_forward() {
    let mut repo = Repository::new();
    repo.resize(9);
    for raw in [0, 4, 5, 8] {
        repo.erase(EntityKey::new(raw));
    }

    let mut backward: Vec<_> = repo.iter().rev().map(|c| c.key().raw()).collect();
    assert_eq!(backward, vec![7, 6, 3, 2, 1]);
    backward.reverse();
    assert_eq!(backward, live_keys(&repo));
}

#[test]
fn values_reverse_in_key_order() {
    let mut repo = Repository::new();
    repo.resize(3);
    repo.at_mut(EntityKey::new(2)).emplace(Health(2));
    repo.at_mut(EntityKey::new(0)).emplace(Health(0));

    let backward: Vec<_> = repo.values::<Health>().rev().map(|(_, h)| h.0).collect();
    assert_eq!(backward, vec![2, 0]);

    for (_, health) in repo.values_mut::<Health>() {
        health.0 += 1;
    }
    let keys: Vec<_> = repo.values_mut::<Health>().map(|(k, _)| k.raw()).collect();
    assert_eq!(keys, vec![0, 2]);
}
