//! Best-effort persistence sinks for spin snapshots
//!
//! The engine hands every settled spin to a [`SpinSink`] and ignores the
//! outcome. Failures are logged, never retried and never surface to the
//! caller of `spin`.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, TrySendError};
use parking_lot::Mutex;
use thiserror::Error;

use crate::spin::SpinSnapshot;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sink queue full, snapshot {0} dropped")]
    Backpressure(u64),

    #[error("Sink closed")]
    Closed,
}

/// Write-only consumer of spin snapshots
pub trait SpinSink: Send + Sync {
    fn record(&self, snapshot: &SpinSnapshot) -> Result<(), SinkError>;
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl SpinSink for NoopSink {
    fn record(&self, _snapshot: &SpinSnapshot) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps snapshots in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SpinSnapshot>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn records(&self) -> Vec<SpinSnapshot> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl SpinSink for MemorySink {
    fn record(&self, snapshot: &SpinSnapshot) -> Result<(), SinkError> {
        self.records.lock().push(snapshot.clone());
        Ok(())
    }
}

/// Appends one JSON object per line to a file
pub struct JsonLinesSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesSink {
    /// Open (or create) `path` for appending. Parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        log::debug!("Spin log opened: {}", path.display());
        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every snapshot stored in a spin log, in file order
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<SpinSnapshot>, SinkError> {
        let reader = BufReader::new(File::open(path)?);
        let mut snapshots = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            snapshots.push(serde_json::from_str(&line)?);
        }
        Ok(snapshots)
    }
}

impl SpinSink for JsonLinesSink {
    fn record(&self, snapshot: &SpinSnapshot) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, snapshot)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Forwards snapshots to an inner sink on a worker thread.
///
/// `record` only enqueues onto a bounded channel and never blocks. A full
/// queue drops the snapshot with [`SinkError::Backpressure`]. Dropping the
/// sink drains the queue and joins the worker.
pub struct BackgroundSink {
    tx: Option<Sender<SpinSnapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundSink {
    pub fn spawn<S: SpinSink + 'static>(inner: S, capacity: usize) -> Result<Self, SinkError> {
        let (tx, rx) = crossbeam_channel::bounded::<SpinSnapshot>(capacity.max(1));
        let worker = std::thread::Builder::new()
            .name("ew-spin-sink".into())
            .spawn(move || {
                for snapshot in rx {
                    if let Err(e) = inner.record(&snapshot) {
                        log::warn!("Background sink failed on spin {}: {}", snapshot.id, e);
                    }
                }
                log::debug!("Background sink worker exiting");
            })?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Flush pending snapshots and stop the worker
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Background sink worker panicked");
            }
        }
    }
}

impl SpinSink for BackgroundSink {
    fn record(&self, snapshot: &SpinSnapshot) -> Result<(), SinkError> {
        let tx = self.tx.as_ref().ok_or(SinkError::Closed)?;
        tx.try_send(snapshot.clone()).map_err(|e| match e {
            TrySendError::Full(s) => SinkError::Backpressure(s.id),
            TrySendError::Disconnected(_) => SinkError::Closed,
        })
    }
}

impl Drop for BackgroundSink {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crossbeam_channel::{Receiver, Sender};

    use crate::config::SlotConfig;
    use crate::engine::SlotEngine;
    use crate::rng::ScriptedRng;

    /// Announces each snapshot, then waits until the gate sender is dropped
    struct GatedSink {
        entered: Sender<u64>,
        gate: Receiver<()>,
        inner: MemorySink,
    }

    impl SpinSink for GatedSink {
        fn record(&self, snapshot: &SpinSnapshot) -> Result<(), SinkError> {
            self.entered.send(snapshot.id).ok();
            self.gate.recv().ok();
            self.inner.record(snapshot)
        }
    }

    fn gated(memory: &MemorySink) -> (BackgroundSink, Sender<()>, Receiver<u64>) {
        let (gate_tx, gate_rx) = crossbeam_channel::bounded(0);
        let (entered_tx, entered_rx) = crossbeam_channel::unbounded();
        let inner = GatedSink {
            entered: entered_tx,
            gate: gate_rx,
            inner: memory.clone(),
        };
        (BackgroundSink::spawn(inner, 1).unwrap(), gate_tx, entered_rx)
    }

    fn snapshot(id: u64) -> SpinSnapshot {
        SpinSnapshot {
            id,
            bet: 10,
            win: 0,
            is_win: false,
            near_miss: true,
            timestamp: 1_700_000_000_000 + id as i64,
            symbols: [1, 1, 2],
            balance: 1000 - 10 * id as i64,
            effective_edge: 0.12,
        }
    }

    #[test]
    fn test_memory_sink_shared_between_clones() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.record(&snapshot(1)).unwrap();
        sink.record(&snapshot(2)).unwrap();
        assert_eq!(handle.len(), 2);
        assert_eq!(handle.records()[1].id, 2);
    }

    #[test]
    fn test_json_lines_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("spins.jsonl");

        let sink = JsonLinesSink::open(&path).unwrap();
        for id in 1..=3 {
            sink.record(&snapshot(id)).unwrap();
        }
        drop(sink);

        // Appending from a second handle keeps earlier lines
        let sink = JsonLinesSink::open(&path).unwrap();
        sink.record(&snapshot(4)).unwrap();

        let read = JsonLinesSink::read_all(&path).unwrap();
        assert_eq!(read.len(), 4);
        assert_eq!(read[0], snapshot(1));
        assert_eq!(read[3].id, 4);
    }

    #[test]
    fn test_background_sink_drains_on_shutdown() {
        let memory = MemorySink::new();
        let sink = BackgroundSink::spawn(memory.clone(), 64).unwrap();
        for id in 1..=10 {
            sink.record(&snapshot(id)).unwrap();
        }
        sink.shutdown();

        let ids: Vec<u64> = memory.records().iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_background_sink_reports_backpressure_without_blocking() {
        let memory = MemorySink::new();
        let (sink, gate, entered) = gated(&memory);

        sink.record(&snapshot(1)).unwrap();
        // Worker is now stuck on snapshot 1 and the queue is empty
        assert_eq!(entered.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
        sink.record(&snapshot(2)).unwrap();

        let started = Instant::now();
        assert!(matches!(
            sink.record(&snapshot(3)),
            Err(SinkError::Backpressure(3))
        ));
        assert!(started.elapsed() < Duration::from_secs(1));

        drop(gate);
        sink.shutdown();
        let ids: Vec<u64> = memory.records().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_engine_keeps_spinning_when_sink_is_full() {
        let memory = MemorySink::new();
        let (sink, gate, entered) = gated(&memory);
        let mut engine = SlotEngine::with_rng(SlotConfig::default(), ScriptedRng::new([0, 1, 2]))
            .unwrap()
            .with_sink(Arc::new(sink));
        let mut state = engine.new_state();

        engine.spin(&mut state, 10).unwrap();
        assert_eq!(entered.recv_timeout(Duration::from_secs(5)).unwrap(), 1);
        for _ in 0..4 {
            engine.spin(&mut state, 10).unwrap();
        }
        assert_eq!(state.spin_counter(), 5);
        assert_eq!(state.history().len(), 5);
        assert_eq!(state.balance(), 950);

        drop(gate);
        drop(engine);
        let ids: Vec<u64> = memory.records().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
