use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hashcracker::{
    transform, Alphabet, CancellationToken, CrackError, DigestTransform, Engine, EngineConfig,
    SaltedSha256, SearchParameters, SearchResult, SearchSpace, DIGEST_LEN,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn params(target: &str, salt: &str, length: usize, chars: &str) -> SearchParameters {
    SearchParameters::new(target, salt, length, Alphabet::new(chars).unwrap()).unwrap()
}

fn cfg(workers: usize, chunk_size: u64) -> EngineConfig {
    EngineConfig { workers, chunk_size, ..EngineConfig::default() }
}

/// Weakened scheme where only the last character matters, so many
/// candidates share a digest.
struct LastCharOnly;

impl DigestTransform for LastCharOnly {
    fn digest(&self, candidate: &str, salt: &str) -> [u8; DIGEST_LEN] {
        let last = candidate.chars().last().map(String::from).unwrap_or_default();
        SaltedSha256.digest(&last, salt)
    }
}

/// Production scheme that counts how often it runs.
#[derive(Clone, Default)]
struct Counting {
    calls: Arc<AtomicU64>,
}

impl DigestTransform for Counting {
    fn digest(&self, candidate: &str, salt: &str) -> [u8; DIGEST_LEN] {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SaltedSha256.digest(candidate, salt)
    }
}

#[test]
fn finds_ab_on_second_attempt() {
    let p = params(&transform("ab", "s"), "s", 2, "ab");
    for workers in [1, 2, 4] {
        let result = Engine::new(cfg(workers, 1))
            .search(&p, &CancellationToken::new(), |_| {})
            .unwrap();
        let SearchResult::Found { candidate, attempts, .. } = result else {
            panic!("expected a match with {workers} workers");
        };
        assert_eq!(candidate, "ab");
        assert_eq!(attempts, 2);
    }
}

#[test]
fn uppercase_target_still_matches() {
    let target = transform("ba", "s").to_uppercase();
    let p = params(&target, "s", 2, "ab");
    let result = Engine::new(cfg(1, 16))
        .search(&p, &CancellationToken::new(), |_| {})
        .unwrap();
    assert_eq!(result.candidate(), Some("ba"));
}

#[test]
fn different_length_target_is_not_found() {
    let p = params(&transform("abc", "s"), "s", 2, "abc");
    let counting = Counting::default();
    let engine = Engine::with_transform(cfg(3, 2), counting.clone());
    let result = engine.search(&p, &CancellationToken::new(), |_| {}).unwrap();
    assert_eq!(result, SearchResult::NotFound);
    assert_eq!(counting.calls.load(Ordering::SeqCst), 9);
}

#[test]
fn random_passwords_found_with_any_partitioning() {
    let chars = "abcdef0123";
    let alphabet = Alphabet::new(chars).unwrap();
    let space = SearchSpace::new(&alphabet, 4, u64::MAX).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..3 {
        let index = rng.gen_range(0..space.size());
        let password = space.decode(index).unwrap();
        let p = params(&transform(&password, "pepper"), "pepper", 4, chars);
        for (workers, chunk) in [(1, 4096), (2, 1), (4, 3), (7, 64)] {
            let result = Engine::new(cfg(workers, chunk))
                .search(&p, &CancellationToken::new(), |_| {})
                .unwrap();
            match result {
                SearchResult::Found { candidate, attempts, .. } => {
                    assert_eq!(candidate, password);
                    assert_eq!(attempts, index + 1);
                }
                other => panic!("{password}: {other:?}"),
            }
        }
    }
}

#[test]
fn smallest_index_wins() {
    // Every candidate ending in 'b' matches; "aab" comes first.
    let target = transform("b", "s");
    let p = params(&target, "s", 3, "ab");
    for workers in [1, 2, 4, 8] {
        let engine = Engine::with_transform(cfg(workers, 1), LastCharOnly);
        let result = engine.search(&p, &CancellationToken::new(), |_| {}).unwrap();
        assert_eq!(result.candidate(), Some("aab"));
        let SearchResult::Found { attempts, .. } = result else { unreachable!() };
        assert_eq!(attempts, 2);
    }
}

#[test]
fn smallest_index_wins_under_contention() {
    // Matches at "aaaz", "aabz", ... spread over many tiny chunks.
    let target = transform("z", "s");
    let p = params(&target, "s", 4, "abcdefghijklmnopqrstuvwxyz");
    for _ in 0..20 {
        let engine = Engine::with_transform(cfg(8, 1), LastCharOnly);
        let result = engine.search(&p, &CancellationToken::new(), |_| {}).unwrap();
        assert_eq!(result.candidate(), Some("aaaz"));
    }
}

#[test]
fn cancel_from_progress_callback() {
    // Length 7 target can never match a length 6 candidate.
    let p = params(&transform("unknown", "s"), "s", 6, "abcdefghijklmnopqrstuvwxyz");
    let token = CancellationToken::new();
    let counting = Counting::default();
    let config = EngineConfig { workers: 4, chunk_size: 2048, progress_interval_ms: 0, ..EngineConfig::default() };
    let engine = Engine::with_transform(config, counting.clone());

    let mut snapshots = 0;
    let result = engine
        .search(&p, &token, |snapshot| {
            snapshots += 1;
            assert!(snapshot.attempts > 0);
            assert_eq!(snapshot.total, 26u64.pow(6));
            token.cancel();
        })
        .unwrap();

    assert_eq!(result, SearchResult::Cancelled);
    assert!(snapshots >= 1);

    // Every worker has stopped once search returns.
    let after_return = counting.calls.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(counting.calls.load(Ordering::SeqCst), after_return);
    assert!(after_return < 26u64.pow(6));
}

#[test]
fn cancel_from_another_thread() {
    let p = params(&transform("unknown", "s"), "s", 6, "abcdefghijklmnopqrstuvwxyz");
    let token = CancellationToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        remote.cancel();
    });
    let result = Engine::new(cfg(2, 4096)).search(&p, &token, |_| {}).unwrap();
    canceller.join().unwrap();
    assert_eq!(result, SearchResult::Cancelled);
}

#[test]
fn oversized_space_refused_without_work() {
    let chars = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let p = params(&transform("a", "s"), "s", 12, chars);
    let counting = Counting::default();
    let engine = Engine::with_transform(EngineConfig::default(), counting.clone());
    let err = engine.search(&p, &CancellationToken::new(), |_| {}).unwrap_err();
    assert!(matches!(err, CrackError::InvalidParameters(_)));
    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn configured_limit_refuses_space() {
    let p = params(&transform("abc", "s"), "s", 3, "abcdefghijklmnopqrstuvwxyz");
    let config = EngineConfig { max_space: 1000, ..EngineConfig::default() };
    let err = Engine::new(config)
        .search(&p, &CancellationToken::new(), |_| {})
        .unwrap_err();
    assert!(matches!(err, CrackError::InvalidParameters(_)));
}

#[test]
fn more_workers_than_candidates() {
    let p = params(&transform("b", "s"), "s", 1, "ab");
    let result = Engine::new(cfg(16, 1))
        .search(&p, &CancellationToken::new(), |_| {})
        .unwrap();
    assert_eq!(result.candidate(), Some("b"));
}
