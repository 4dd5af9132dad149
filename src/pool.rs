// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A small scoped worker pool.  Workers pull numbered items off a
//! shared queue until it runs dry; the results come back in the order
//! the items went in, not the order they finished.

use crossbeam::thread::ScopedJoinHandle;
use itertools::Itertools;
use std::panic;
use std::sync::{Arc, Mutex};

/// Apply `task` to every item on up to `threads` threads and return the
/// results in item order.  A panic in any task is re-raised here once
/// every worker has stopped.
pub fn map_ordered<T, R, F>(items: &[T], threads: usize, task: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if items.is_empty() {
        return vec![];
    }
    let threads = threads.max(1).min(items.len());
    debug!("Mapping {} items over {} threads", items.len(), threads);

    let queue = Arc::new(Mutex::new(items.iter().enumerate()));
    let task = &task;

    let joined = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<(usize, R)>>> = (0..threads)
            .map(|_| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut done: Vec<(usize, R)> = vec![];
                    loop {
                        let item = {
                            queue
                                .lock()
                                .unwrap_or_else(|poisoned| poisoned.into_inner())
                                .next()
                        };
                        match item {
                            Some((index, item)) => done.push((index, task(item))),
                            None => {
                                break;
                            }
                        }
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });

    let joined = match joined {
        Ok(joined) => joined,
        Err(payload) => panic::resume_unwind(payload),
    };

    let mut batches = Vec::with_capacity(joined.len());
    for batch in joined {
        match batch {
            Ok(batch) => batches.push(batch),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    // Each worker took its items in queue order, so every batch is
    // already sorted by index.
    batches
        .into_iter()
        .kmerge_by(|a: &(usize, R), b: &(usize, R)| a.0 < b.0)
        .map(|(_, result)| result)
        .collect()
}
