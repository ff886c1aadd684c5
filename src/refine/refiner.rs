//! FIFO scheduler of sweep passes.
//!
//! The queue starts with one item covering the whole image. Under
//! [`RefinePolicy::Adaptive`] every sample the zoom predicate accepts pushes a
//! child item that re-sweeps that sample's window with half-size windows.
//! Children are drained after their parents, so finer passes are always
//! composited on top of coarser ones. Under [`RefinePolicy::GlobalShrink`] a
//! new full-image item with a scaled-down window is produced each time the
//! queue runs dry, up to the configured pass count.
use super::policy::{refined_window, shrunk_window, RefinePolicy, ZoomPredicate};
use crate::types::{Rect, WindowSize, WorkItem};
use log::{debug, trace};
use std::collections::VecDeque;

#[derive(Debug)]
pub struct RegionRefiner {
    policy: RefinePolicy,
    min_window: WindowSize,
    enabled: bool,
    bounds: Rect,
    queue: VecDeque<WorkItem>,
    last_global: Option<WorkItem>,
    dispatched: usize,
    enqueued: usize,
}

impl RegionRefiner {
    /// Seed the queue with a single pass over `bounds` at `initial` size.
    pub fn new(
        bounds: Rect,
        initial: WindowSize,
        policy: RefinePolicy,
        min_window: WindowSize,
        enabled: bool,
    ) -> Self {
        let seed = WorkItem {
            region: bounds,
            window: initial,
            depth: 0,
        };
        let mut queue = VecDeque::new();
        queue.push_back(seed);
        Self {
            policy,
            min_window,
            enabled,
            bounds,
            queue,
            last_global: matches!(policy, RefinePolicy::GlobalShrink { .. }).then_some(seed),
            dispatched: 0,
            enqueued: 1,
        }
    }

    /// Pop the next pass, or `None` once refinement is exhausted.
    pub fn next_item(&mut self) -> Option<WorkItem> {
        if let Some(item) = self.queue.pop_front() {
            self.dispatched += 1;
            return Some(item);
        }
        if !self.enabled {
            return None;
        }
        let RefinePolicy::GlobalShrink { ratio, passes } = self.policy else {
            return None;
        };
        let prev = self.last_global?;
        if prev.depth + 1 >= passes {
            debug!("RegionRefiner: global shrink finished after {passes} passes");
            return None;
        }
        let Some(window) = shrunk_window(prev.window, ratio, self.min_window) else {
            debug!(
                "RegionRefiner: global shrink stopped at {} (min {})",
                prev.window, self.min_window
            );
            return None;
        };
        let item = WorkItem {
            region: self.bounds,
            window,
            depth: prev.depth + 1,
        };
        self.last_global = Some(item);
        self.dispatched += 1;
        self.enqueued += 1;
        Some(item)
    }

    /// Feed back one sample of `item`. Returns the child pass it scheduled.
    pub fn on_sample<Z: ZoomPredicate + ?Sized>(
        &mut self,
        item: &WorkItem,
        window: Rect,
        score: f32,
        zoom: &mut Z,
    ) -> Option<WorkItem> {
        if !self.enabled || self.policy != RefinePolicy::Adaptive {
            return None;
        }
        if !zoom.should_zoom(score) {
            return None;
        }
        let Some(next) = refined_window(window.size(), self.min_window) else {
            trace!(
                "RegionRefiner: window {} at depth {} is at min size",
                window.size(),
                item.depth
            );
            return None;
        };
        let child = WorkItem {
            region: window,
            window: next,
            depth: item.depth + 1,
        };
        self.queue.push_back(child);
        self.enqueued += 1;
        Some(child)
    }

    /// Passes waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Passes handed out so far.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Passes created so far, the seed included.
    pub fn enqueued(&self) -> usize {
        self.enqueued
    }
}
