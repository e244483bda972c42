//! Serial edit queue.
//!
//! Edits and task toggles share one bounded queue drained by a single
//! worker thread, so there is never more than one parse in flight. Requests
//! arriving within the debounce window after the first one are staged
//! together and committed with a single reparse.
//!
//! The worker publishes each committed tree through an [`ArcSwap`] so
//! readers can grab the current snapshot without talking to the queue. An
//! update the consumer has not picked up yet is never delivered stale: the
//! worker takes it back and folds it into the next one.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use arc_swap::ArcSwap;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, unbounded};
use log::{trace, warn};

use crate::{buffer::EditDescriptor, error::EngineError, parsing::DocumentTree, tasks::TaskId};

use super::{RenderUpdate, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// How long to wait for more requests before reparsing.
    pub debounce: Duration,
    /// Queue size; submitting blocks while the queue is full.
    pub capacity: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            capacity: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Edit(EditDescriptor),
    Toggle(TaskId),
}

/// What the worker hands back to the preview.
#[derive(Debug, Clone)]
pub enum Delivery {
    Update(RenderUpdate),
    Rejected {
        request: Request,
        error: EngineError,
    },
}

enum Message {
    Request(Request),
    Shutdown,
}

/// Cloneable submit side of a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineHandle {
    sender: Sender<Message>,
}

impl PipelineHandle {
    /// Queues `request`, waiting for room when the queue is full.
    pub fn submit(&self, request: Request) -> Result<(), EngineError> {
        self.sender
            .send(Message::Request(request))
            .map_err(|_| EngineError::PipelineClosed)
    }
}

/// A [`Session`] running on its own worker thread.
pub struct Pipeline {
    handle: PipelineHandle,
    deliveries: Receiver<Delivery>,
    current: Arc<ArcSwap<DocumentTree>>,
    worker: Option<JoinHandle<Session>>,
}

impl Pipeline {
    /// Starts a worker over an empty session.
    pub fn spawn(options: PipelineOptions) -> Self {
        Self::with_session(Session::new(), options)
    }

    /// Starts a worker that takes ownership of `session`.
    pub fn with_session(session: Session, options: PipelineOptions) -> Self {
        let (sender, requests) = bounded(options.capacity.max(1));
        let (deliver, deliveries) = unbounded();
        let current = Arc::new(ArcSwap::new(session.tree()));

        let worker = Worker {
            session,
            requests,
            deliver,
            taken_back: deliveries.clone(),
            current: Arc::clone(&current),
            debounce: options.debounce,
        };
        let worker = thread::spawn(move || worker.run());

        Self {
            handle: PipelineHandle { sender },
            deliveries,
            current,
            worker: Some(worker),
        }
    }

    pub fn handle(&self) -> PipelineHandle {
        self.handle.clone()
    }

    pub fn submit(&self, request: Request) -> Result<(), EngineError> {
        self.handle.submit(request)
    }

    pub fn edit(&self, edit: EditDescriptor) -> Result<(), EngineError> {
        self.submit(Request::Edit(edit))
    }

    pub fn toggle(&self, id: TaskId) -> Result<(), EngineError> {
        self.submit(Request::Toggle(id))
    }

    /// Updates and rejections, in the order the worker produced them.
    pub fn deliveries(&self) -> &Receiver<Delivery> {
        &self.deliveries
    }

    /// The most recently committed tree.
    pub fn current(&self) -> Arc<DocumentTree> {
        self.current.load_full()
    }

    /// Stops the worker once the requests queued so far are handled and
    /// returns its session. `None` if the worker panicked.
    pub fn shutdown(mut self) -> Option<Session> {
        self.stop()
    }

    fn stop(&mut self) -> Option<Session> {
        let worker = self.worker.take()?;
        // The worker may already be gone; join tells.
        let _ = self.handle.sender.send(Message::Shutdown);
        worker.join().ok()
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Worker {
    session: Session,
    requests: Receiver<Message>,
    deliver: Sender<Delivery>,
    /// Receiving end of `deliver`, used to reclaim undelivered updates.
    taken_back: Receiver<Delivery>,
    current: Arc<ArcSwap<DocumentTree>>,
    debounce: Duration,
}

impl Worker {
    fn run(mut self) -> Session {
        loop {
            let first = match self.requests.recv() {
                Ok(Message::Request(request)) => request,
                Ok(Message::Shutdown) | Err(_) => break,
            };
            let (batch, stopping) = self.collect_batch(first);
            trace!("pipeline: coalescing {} requests", batch.len());
            for request in batch {
                self.stage(request);
            }
            if let Some(update) = self.session.commit() {
                self.current.store(Arc::clone(&update.tree));
                self.publish(update);
            }
            if stopping {
                break;
            }
        }
        self.session
    }

    /// Gathers requests until the debounce window after `first` closes.
    fn collect_batch(&self, first: Request) -> (Vec<Request>, bool) {
        let deadline = Instant::now() + self.debounce;
        let mut batch = vec![first];
        loop {
            match self.requests.recv_deadline(deadline) {
                Ok(Message::Request(request)) => batch.push(request),
                Ok(Message::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                    return (batch, true);
                }
                Err(RecvTimeoutError::Timeout) => return (batch, false),
            }
        }
    }

    fn stage(&mut self, request: Request) {
        let staged = match &request {
            Request::Edit(edit) => self.session.stage_edit(edit.clone()),
            Request::Toggle(id) => self
                .session
                .toggle(id)
                .and_then(|edit| self.session.stage_edit(edit)),
        };
        if let Err(error) = staged {
            warn!("pipeline: rejected {request:?}: {error}");
            let _ = self.deliver.send(Delivery::Rejected { request, error });
        }
    }

    fn publish(&self, mut update: RenderUpdate) {
        let mut rejected = vec![];
        for pending in self.taken_back.try_iter() {
            match pending {
                Delivery::Update(stale) => {
                    trace!(
                        "pipeline: generation {} superseded by {}",
                        stale.generation, update.generation
                    );
                    update = update.superseding(stale);
                }
                other => rejected.push(other),
            }
        }
        for delivery in rejected
            .into_iter()
            .chain(std::iter::once(Delivery::Update(update)))
        {
            // A dropped consumer is not the worker's problem.
            let _ = self.deliver.send(delivery);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_document;
    use pretty_assertions::assert_eq;

    const WAIT: Duration = Duration::from_secs(5);

    fn options(debounce_ms: u64) -> PipelineOptions {
        PipelineOptions {
            debounce: Duration::from_millis(debounce_ms),
            capacity: 16,
        }
    }

    fn next_update(pipeline: &Pipeline) -> RenderUpdate {
        match pipeline.deliveries().recv_timeout(WAIT) {
            Ok(Delivery::Update(update)) => update,
            other => panic!("expected an update, got {other:?}"),
        }
    }

    #[test]
    fn burst_of_edits_is_one_reparse() {
        let pipeline = Pipeline::spawn(options(200));
        pipeline
            .edit(EditDescriptor::replace_all(1, "a\n\nb"))
            .unwrap();
        pipeline
            .edit(EditDescriptor::replace_line(2, "b!"))
            .unwrap();
        pipeline
            .edit(EditDescriptor::new(3..3, vec!["".into(), "- [ ] c".into()]))
            .unwrap();

        let update = next_update(&pipeline);
        assert_eq!(update.generation, 1);
        assert_eq!(update.tasks.len(), 1);
        assert!(Arc::ptr_eq(&pipeline.current(), &update.tree));

        let deliveries = pipeline.deliveries().clone();
        let session = pipeline.shutdown().expect("worker finished");
        assert_eq!(deliveries.try_iter().count(), 0);
        assert_eq!(session.buffer().text(), "a\n\nb!\n\n- [ ] c");
        assert_eq!(*update.tree, parse_document(session.buffer()));
    }

    #[test]
    fn stale_toggle_is_rejected() {
        let mut session = Session::new();
        session
            .apply_edit(EditDescriptor::replace_all(1, "- [ ] a"))
            .unwrap();
        let id = session.task_items()[0].id.clone();
        let pipeline = Pipeline::with_session(session, options(0));
        pipeline
            .edit(EditDescriptor::replace_line(0, "- [ ] changed"))
            .unwrap();
        next_update(&pipeline);
        pipeline.toggle(id).unwrap();
        match pipeline.deliveries().recv_timeout(WAIT) {
            Ok(Delivery::Rejected { error, .. }) => {
                assert_eq!(error, EngineError::StaleReference { line: 0 })
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn toggle_after_typing_in_same_batch_sees_the_typing() {
        let mut session = Session::new();
        session
            .apply_edit(EditDescriptor::replace_all(1, "- [ ] a\n- [ ] b"))
            .unwrap();
        let items = session.task_items();
        let pipeline = Pipeline::with_session(session, options(200));
        pipeline
            .edit(EditDescriptor::replace_line(0, "- [ ] a, typed"))
            .unwrap();
        pipeline.toggle(items[0].id.clone()).unwrap();
        pipeline.toggle(items[1].id.clone()).unwrap();

        let mut rejected = 0;
        let update = loop {
            match pipeline.deliveries().recv_timeout(WAIT) {
                Ok(Delivery::Rejected { .. }) => rejected += 1,
                Ok(Delivery::Update(update)) => break update,
                Err(e) => panic!("no update: {e}"),
            }
        };
        assert_eq!(rejected, 1);
        let states: Vec<_> = update.tasks.iter().map(|t| t.checked).collect();
        assert_eq!(states, vec![false, true]);
    }

    #[test]
    fn toggle_swallowed_by_fence_in_same_batch_is_rejected() {
        let mut session = Session::new();
        session
            .apply_edit(EditDescriptor::replace_all(1, "intro\n\n- [ ] a\n\n```"))
            .unwrap();
        let id = session.task_items()[0].id.clone();
        let pipeline = Pipeline::with_session(session, options(200));
        pipeline
            .edit(EditDescriptor::replace_line(1, "```"))
            .unwrap();
        pipeline.toggle(id).unwrap();

        match pipeline.deliveries().recv_timeout(WAIT) {
            Ok(Delivery::Rejected { error, .. }) => {
                assert_eq!(error, EngineError::StaleReference { line: 2 })
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
        let update = next_update(&pipeline);
        assert!(update.tasks.is_empty());
        let session = pipeline.shutdown().expect("worker finished");
        assert_eq!(session.buffer().line(2), "- [ ] a");
    }

    #[test]
    fn handle_outliving_the_pipeline_reports_closed() {
        let pipeline = Pipeline::spawn(options(0));
        let handle = pipeline.handle();
        drop(pipeline);
        assert_eq!(
            handle.submit(Request::Edit(EditDescriptor::replace_line(0, "x"))),
            Err(EngineError::PipelineClosed)
        );
    }
}
