//! Parallel scanline rendering with in-order output.
//!
//! Rows are handed out through a bounded queue to a fixed rayon pool. Each
//! worker renders whole rows and sends them to a single writer thread, which
//! buffers rows that arrive early and flushes every contiguous run starting
//! at the next expected index. Rows finish in any order but reach the sink
//! strictly top to bottom.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::renderer::{render_scanline, RenderedScanline};
use crate::{Camera, Color, Hittable, RenderError, ScanlineSink};

/// Default capacity of the row queue and the result channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Rows between `info` progress lines: roughly every tenth of the image.
fn progress_interval(total: u32) -> u32 {
    (total / 10).max(1)
}

/// Scheduling settings for one render.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of worker threads; independent of image height
    pub workers: usize,
    /// Bound on queued row indices and on unsent finished rows
    pub queue_capacity: usize,
    /// Base seed; each row derives its own generator from it
    pub seed: u64,
    /// When set, workers stop before taking their next row
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, |n| n.get()),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            seed: 0,
            cancel: None,
        }
    }
}

impl RenderConfig {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// What a finished render reports back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    /// Largest number of rows the writer held waiting for a gap to fill
    pub max_pending: usize,
    pub elapsed: Duration,
}

/// Reorders finished scanlines and forwards them to a sink in index order.
pub struct OrderedWriter<S: ScanlineSink> {
    sink: S,
    expected: u32,
    next: u32,
    pending: HashMap<u32, Vec<Color>>,
    max_pending: usize,
}

impl<S: ScanlineSink> OrderedWriter<S> {
    /// Writer expecting rows `0..expected`. The sink's header must already
    /// have been written.
    pub fn new(sink: S, expected: u32) -> Self {
        Self {
            sink,
            expected,
            next: 0,
            pending: HashMap::new(),
            max_pending: 0,
        }
    }

    /// Take one finished row and flush everything that is now contiguous.
    pub fn accept(&mut self, scanline: RenderedScanline) -> Result<(), RenderError> {
        self.pending.insert(scanline.index, scanline.pixels);
        self.max_pending = self.max_pending.max(self.pending.len());

        while let Some(pixels) = self.pending.remove(&self.next) {
            self.sink.write_scanline(self.next, &pixels)?;
            self.next += 1;

            let remaining = self.expected.saturating_sub(self.next);
            if self.next % progress_interval(self.expected) == 0 || remaining == 0 {
                log::info!("Scanlines remaining: {remaining}");
            } else {
                log::debug!("Scanlines remaining: {remaining}");
            }
        }

        Ok(())
    }

    /// Number of rows flushed so far.
    pub fn written(&self) -> u32 {
        self.next
    }

    /// Rows received but still waiting on an earlier one.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn max_pending(&self) -> usize {
        self.max_pending
    }

    /// Check every row was flushed, then finish the sink.
    pub fn finish(mut self) -> Result<usize, RenderError> {
        if self.next != self.expected || !self.pending.is_empty() {
            return Err(RenderError::IncompleteImage {
                written: self.next,
                expected: self.expected,
            });
        }
        self.sink.finish()?;
        Ok(self.max_pending)
    }
}

/// Render `world` through `camera` into `sink`, one row per work item.
///
/// Blocks until every row has been written. The first sink error aborts the
/// render and is returned.
pub fn render<S>(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    sink: &mut S,
) -> Result<RenderSummary, RenderError>
where
    S: ScanlineSink + Send + ?Sized,
{
    let start = Instant::now();
    let width = camera.image_width();
    let height = camera.image_height();
    let workers = config.workers.max(1);
    let capacity = config.queue_capacity.max(1);

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} workers",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        workers
    );

    // Nothing reaches the sink unless the pool is up
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lux-worker-{i}"))
        .build()?;

    sink.write_header(width, height)?;

    let completed = AtomicU32::new(0);

    let outcome = thread::scope(|scope| {
        let (job_tx, job_rx) = mpsc::sync_channel::<u32>(capacity);
        let (result_tx, result_rx) = mpsc::sync_channel::<RenderedScanline>(capacity);

        let writer = scope.spawn(move || {
            let mut writer = OrderedWriter::new(sink, height);
            for scanline in result_rx {
                writer.accept(scanline)?;
            }
            writer.finish()
        });

        // Dispatcher: fill the queue, then drop the sender to close it
        scope.spawn(move || {
            for y in 0..height {
                if job_tx.send(y).is_err() {
                    break;
                }
            }
        });

        let queue = Mutex::new(job_rx);
        let ctx = WorkerContext {
            camera,
            world,
            config,
            queue: &queue,
            completed: &completed,
            height,
        };

        // Only workers hold senders, so the writer sees the channel close
        // as soon as the last one exits
        let senders: Vec<_> = (0..workers).map(|_| result_tx.clone()).collect();
        drop(result_tx);

        let workers_ok = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.scope(|s| {
                for (id, results) in senders.into_iter().enumerate() {
                    let ctx = &ctx;
                    s.spawn(move |_| run_worker(id, ctx, results));
                }
            })
        }))
        .is_ok();

        // Unblocks the dispatcher if workers stopped early
        drop(queue);

        let flushed = writer.join().map_err(|_| RenderError::WriterPanicked)?;
        if !workers_ok {
            return Err(RenderError::WorkerPanicked);
        }
        flushed
    });

    let max_pending = match outcome {
        Ok(max_pending) => max_pending,
        Err(RenderError::IncompleteImage { written, .. }) if config.is_cancelled() => {
            log::info!("Render cancelled after {written} scanlines");
            return Err(RenderError::Cancelled { written });
        }
        Err(err) => return Err(err),
    };

    let elapsed = start.elapsed();
    log::info!(
        "Rendered {} scanlines in {:.2?} (at most {} buffered out of order)",
        height,
        elapsed,
        max_pending
    );

    Ok(RenderSummary {
        width,
        height,
        max_pending,
        elapsed,
    })
}

/// Read-only state shared by all workers of one render.
struct WorkerContext<'a> {
    camera: &'a Camera,
    world: &'a dyn Hittable,
    config: &'a RenderConfig,
    queue: &'a Mutex<Receiver<u32>>,
    completed: &'a AtomicU32,
    height: u32,
}

/// Take rows off the queue until it closes, the writer goes away, or the
/// render is cancelled.
fn run_worker(id: usize, ctx: &WorkerContext<'_>, results: SyncSender<RenderedScanline>) {
    loop {
        if ctx.config.is_cancelled() {
            log::debug!("worker {id}: cancelled");
            break;
        }

        let next = match ctx.queue.lock() {
            Ok(queue) => queue.recv(),
            Err(_) => break,
        };
        // Queue closed and drained
        let Ok(y) = next else { break };

        let scanline = render_scanline(ctx.camera, ctx.world, y, ctx.config.seed);
        if results.send(scanline).is_err() {
            // Writer failed; it reports the error
            break;
        }

        // Reporting only
        let done = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("scanline {y} done, {done} of {} finished", ctx.height);
    }
}
