//! Cached data-access example
//!
//! Run with: cargo run --example cached_dao -p faresql
//!
//! A DAO-shaped query source behind the compressed result cache:
//! single-flight population, explicit demotion to the compressed tier
//! and pooled destruction.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use faresql::{AccessResult, CompressedCache, QuerySource, VectorPool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TaxRecord {
    nation: String,
    tax_code: String,
    seq_no: i64,
}

/// Stands in for the real database-backed DAO. Counts how often the
/// expensive query actually runs.
struct TaxRecordSource {
    queries: AtomicUsize,
}

impl QuerySource<String, TaxRecord> for TaxRecordSource {
    fn create(&self, nation: &String) -> AccessResult<Vec<TaxRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            TaxRecord {
                nation: nation.clone(),
                tax_code: "US1".to_string(),
                seq_no: 100,
            },
            TaxRecord {
                nation: nation.clone(),
                tax_code: "US2".to_string(),
                seq_no: 200,
            },
        ])
    }
}

fn main() -> AccessResult<()> {
    let source = TaxRecordSource {
        queries: AtomicUsize::new(0),
    };
    let cache = Arc::new(CompressedCache::with_pool(source, VectorPool::new(16)));

    // ============================================
    // Example 1: concurrent misses, one query
    // ============================================
    let threads: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get(&"US".to_string()).unwrap().len())
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }
    println!(
        "4 concurrent readers, {} query executed",
        cache.source().queries.load(Ordering::SeqCst)
    );

    // ============================================
    // Example 2: demote to the compressed tier and read back
    // ============================================
    let key = "US".to_string();
    cache.compress_key(&key)?;
    let rows = cache.get(&key)?;
    println!(
        "after demotion: {} rows inflated, {} queries total",
        rows.len(),
        cache.source().queries.load(Ordering::SeqCst)
    );
    drop(rows);

    // ============================================
    // Example 3: destroy returns storage to the pool
    // ============================================
    cache.destroy(&key);
    println!("after destroy: {} cached keys", cache.len());

    Ok(())
}
