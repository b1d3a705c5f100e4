use super::Gate;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState {
    Unlocked,
    Read(usize),
    Write,
}

#[derive(Debug)]
struct Queue {
    state: LockState,
    waiting_readers: Vec<oneshot::Sender<()>>,
    waiting_writers: VecDeque<oneshot::Sender<()>>,
}

/// FIFO reader/writer gate.
///
/// - `read()` proceeds immediately unless a writer holds the gate, in which
///   case it queues.
/// - `write()` proceeds only when the gate is unlocked, otherwise it queues.
/// - Releasing the last read lock hands the gate to the oldest queued writer.
/// - Releasing a write lock admits **every** queued reader at once; only when
///   no reader is waiting does the oldest queued writer go next.
///
/// Ownership is transferred to a waiter *before* it is woken, so a waiter
/// never has to re-check the state. A waiter whose future is dropped while
/// queued is skipped; one dropped after being handed the gate but before it
/// ran passes the gate straight on, as if it had unlocked.
#[derive(Debug)]
pub struct RwGate {
    queue: Mutex<Queue>,
}

impl Default for RwGate {
    fn default() -> Self {
        Self {
            queue: Mutex::new(Queue {
                state: LockState::Unlocked,
                waiting_readers: Vec::new(),
                waiting_writers: VecDeque::new(),
            }),
        }
    }
}

impl RwGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while no reader or writer holds the gate.
    pub fn is_unlocked(&self) -> bool {
        self.queue().state == LockState::Unlocked
    }

    /// Number of readers currently holding the gate.
    pub fn readers(&self) -> usize {
        match self.queue().state {
            LockState::Read(n) => n,
            _ => 0,
        }
    }

    /// `true` while a writer holds the gate.
    pub fn is_write_locked(&self) -> bool {
        self.queue().state == LockState::Write
    }

    // The queue is only mutated in short critical sections that cannot panic
    // halfway, so a poisoned mutex still holds a consistent state.
    fn queue(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Queue {
    fn promote_writer(&mut self) {
        while let Some(writer) = self.waiting_writers.pop_front() {
            self.state = LockState::Write;
            if writer.send(()).is_ok() {
                trace!("gate handed to queued writer");
                return;
            }
        }
        self.state = LockState::Unlocked;
    }

    /// Releases one acquisition; `false` when nothing was held.
    fn release(&mut self) -> bool {
        match self.state {
            LockState::Read(n) if n > 1 => self.state = LockState::Read(n - 1),
            LockState::Read(_) => self.promote_writer(),
            LockState::Write => {
                if self.waiting_readers.is_empty() {
                    self.promote_writer();
                } else {
                    self.admit_readers();
                }
            }
            LockState::Unlocked => return false,
        }
        true
    }

    fn admit_readers(&mut self) {
        let admitted = self
            .waiting_readers
            .drain(..)
            .filter_map(|reader| reader.send(()).ok())
            .count();

        if admitted == 0 {
            self.promote_writer();
        } else {
            trace!(admitted, "gate handed to queued readers");
            self.state = LockState::Read(admitted);
        }
    }
}

/// A queued waiter's claim on the gate.
///
/// Dropped before completion, it either withdraws from the queue or, when the
/// gate was already handed over, releases it again.
struct Admission<'a> {
    gate: &'a RwGate,
    receiver: Option<oneshot::Receiver<()>>,
}

impl<'a> Admission<'a> {
    fn new(gate: &'a RwGate, receiver: oneshot::Receiver<()>) -> Self {
        Self {
            gate,
            receiver: Some(receiver),
        }
    }

    async fn granted(mut self) {
        if let Some(receiver) = self.receiver.as_mut() {
            // The sender only disappears with the gate itself.
            let _ = receiver.await;
        }
        self.receiver = None;
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        let Some(mut receiver) = self.receiver.take() else {
            return;
        };

        // Grants are sent under the queue lock, so holding it here settles
        // whether this waiter was handed the gate.
        let mut queue = self.gate.queue();
        if receiver.try_recv().is_ok() {
            trace!("abandoned waiter passes the gate on");
            queue.release();
        }
    }
}

#[async_trait::async_trait]
impl Gate for RwGate {
    async fn read(&self) {
        let admission = {
            let mut queue = self.queue();
            match queue.state {
                LockState::Unlocked => {
                    queue.state = LockState::Read(1);
                    return;
                }
                LockState::Read(n) => {
                    queue.state = LockState::Read(n + 1);
                    return;
                }
                LockState::Write => {
                    let (tx, rx) = oneshot::channel();
                    queue.waiting_readers.push(tx);
                    rx
                }
            }
        };

        Admission::new(self, admission).granted().await;
    }

    async fn write(&self) {
        let admission = {
            let mut queue = self.queue();
            if queue.state == LockState::Unlocked {
                queue.state = LockState::Write;
                return;
            }
            let (tx, rx) = oneshot::channel();
            queue.waiting_writers.push_back(tx);
            rx
        };

        Admission::new(self, admission).granted().await;
    }

    fn unlock(&self) {
        let mut queue = self.queue();
        if !queue.release() {
            drop(queue);
            warn!("unlock called on an unlocked gate");
            panic!("RwGate is not locked");
        }
    }
}
