//! Worker pool over a shared task queue.
//!
//! The decoded tasks go into one mutex-guarded queue; a fixed number of OS
//! threads pop and fetch until the queue is empty. The lock is held only for
//! the pop, never during network or file I/O, so fetches run fully in
//! parallel. Results come back over an mpsc channel and are aggregated after
//! the pool joins.

mod error;
mod fetch;

pub use error::FetchError;
pub use fetch::fetch_to_file;

use crate::playlist::SegmentTask;
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

/// Downloads every task into `save_dir` with up to `workers` threads.
///
/// `save_dir` is created recursively if absent; an existing non-directory
/// path is a fatal precondition failure. Each task is claimed by exactly one
/// worker. A failed fetch is logged and does not stop the other workers;
/// once the queue is drained and the pool has joined, an aggregate error is
/// returned if any task failed.
pub fn run(
    save_dir: &Path,
    tasks: Vec<SegmentTask>,
    workers: usize,
    user_agent: &str,
) -> Result<()> {
    if !save_dir.exists() {
        tracing::info!("save dir {} does not exist, creating it", save_dir.display());
        fs::create_dir_all(save_dir)
            .with_context(|| format!("failed to create save dir {}", save_dir.display()))?;
    }
    if !save_dir.is_dir() {
        anyhow::bail!("save path {} is not a directory", save_dir.display());
    }

    let total = tasks.len();
    if total == 0 {
        tracing::info!("playlist has no segments, nothing to download");
        return Ok(());
    }

    let queue: Arc<Mutex<VecDeque<SegmentTask>>> =
        Arc::new(Mutex::new(tasks.into_iter().collect()));
    let (tx, rx) = mpsc::channel();
    let num_workers = workers.max(1).min(total);
    let mut handles = Vec::with_capacity(num_workers);
    for worker in 0..num_workers {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let save_dir = save_dir.to_path_buf();
        let user_agent = user_agent.to_string();
        handles.push(std::thread::spawn(move || {
            tracing::debug!("worker {} started", worker);
            loop {
                let task = match queue.lock().unwrap().pop_front() {
                    Some(task) => task,
                    None => break,
                };
                let dest = save_dir.join(&task.filename);
                tracing::info!(
                    "worker {} downloading segment {} from {}",
                    worker,
                    task.index,
                    task.url
                );
                let res = fetch::fetch_to_file(&task.url, &user_agent, &dest);
                match &res {
                    Ok(bytes) => tracing::info!(
                        "worker {} saved {} as {} ({} bytes)",
                        worker,
                        task.url,
                        dest.display(),
                        bytes
                    ),
                    Err(e) => {
                        tracing::warn!("worker {} failed on {}: {}", worker, task.url, e)
                    }
                }
                let _ = tx.send((task.index, res));
            }
            tracing::debug!("worker {} stopped", worker);
        }));
    }
    drop(tx);

    let mut failed = 0usize;
    for _ in 0..total {
        let (_index, res) = rx.recv().expect("worker result");
        if res.is_err() {
            failed += 1;
        }
    }
    for handle in handles {
        handle
            .join()
            .unwrap_or_else(|e| panic!("worker panicked: {:?}", e));
    }

    if failed > 0 {
        anyhow::bail!("{} of {} segments failed to download", failed, total);
    }
    tracing::info!("downloaded {} segment(s) into {}", total, save_dir.display());
    Ok(())
}
