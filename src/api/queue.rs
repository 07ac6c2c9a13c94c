use std::collections::VecDeque;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::render::TransitionDirective;

use super::request::{RequestHandle, TransitionRequest};

/// One not-yet-started transition awaiting dispatch.
pub(super) struct QueuedTransition {
    pub(super) directive: TransitionDirective,
    pub(super) request: Rc<RequestHandle>,
}

/// Ordered pending transitions for one chart instance.
///
/// Granularity is per transition: an immediate request displaces the
/// untransitioned tail of an in-flight request without touching the
/// renderer call currently executing.
#[derive(Default)]
pub(super) struct TransitionQueue {
    items: VecDeque<QueuedTransition>,
}

impl TransitionQueue {
    /// Appends the request's transitions in order.
    ///
    /// An immediate request first discards every pending item; the distinct
    /// requests those items belonged to are returned so the controller can
    /// emit one interruption notification and rejection per displaced
    /// request, strictly in displacement order.
    pub(super) fn enqueue(
        &mut self,
        request: TransitionRequest,
    ) -> SmallVec<[Rc<RequestHandle>; 2]> {
        let displaced = if request.immediate {
            self.discard_pending()
        } else {
            SmallVec::new()
        };

        let TransitionRequest {
            directives, handle, ..
        } = request;
        for directive in directives {
            self.items.push_back(QueuedTransition {
                directive,
                request: Rc::clone(&handle),
            });
        }

        displaced
    }

    pub(super) fn dequeue_next(&mut self) -> Option<QueuedTransition> {
        self.items.pop_front()
    }

    /// Drops every pending item belonging to `request`; used when a
    /// renderer failure skips the remainder of a request.
    pub(super) fn discard_request(&mut self, request: &Rc<RequestHandle>) {
        self.items
            .retain(|item| !Rc::ptr_eq(&item.request, request));
    }

    pub(super) fn len(&self) -> usize {
        self.items.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn discard_pending(&mut self) -> SmallVec<[Rc<RequestHandle>; 2]> {
        let mut displaced: SmallVec<[Rc<RequestHandle>; 2]> = SmallVec::new();
        for item in self.items.drain(..) {
            if !displaced
                .iter()
                .any(|request| Rc::ptr_eq(request, &item.request))
            {
                displaced.push(item.request);
            }
        }
        displaced
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::core::TransitionOptions;
    use crate::render::TransitionDirective;

    use super::super::request::TransitionRequest;
    use super::TransitionQueue;

    fn directives(count: usize) -> Vec<TransitionDirective> {
        (0..count)
            .map(|index| TransitionDirective {
                data: Some(vec![serde_json::json!(index)]),
                layout: None,
                traces: None,
                options: TransitionOptions::default(),
            })
            .collect()
    }

    #[test]
    fn append_preserves_submission_order_across_requests() {
        let mut queue = TransitionQueue::default();
        let (first, _rx1) = TransitionRequest::new(directives(2), false);
        let (second, _rx2) = TransitionRequest::new(directives(1), false);

        assert!(queue.enqueue(first).is_empty());
        assert!(queue.enqueue(second).is_empty());
        assert_eq!(queue.len(), 3);

        let mut order = Vec::new();
        while let Some(item) = queue.dequeue_next() {
            order.push(item.directive.data);
        }
        assert_eq!(
            order,
            [
                Some(vec![serde_json::json!(0)]),
                Some(vec![serde_json::json!(1)]),
                Some(vec![serde_json::json!(0)]),
            ]
        );
    }

    #[test]
    fn immediate_enqueue_displaces_each_pending_request_once() {
        let mut queue = TransitionQueue::default();
        let (first, _rx1) = TransitionRequest::new(directives(2), false);
        let (second, _rx2) = TransitionRequest::new(directives(2), false);
        let first_handle = Rc::clone(&first.handle);
        let second_handle = Rc::clone(&second.handle);

        let _ = queue.enqueue(first);
        let _ = queue.enqueue(second);

        let (immediate, _rx3) = TransitionRequest::new(directives(1), true);
        let displaced = queue.enqueue(immediate);

        assert_eq!(displaced.len(), 2);
        assert!(Rc::ptr_eq(&displaced[0], &first_handle));
        assert!(Rc::ptr_eq(&displaced[1], &second_handle));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn discard_request_drops_only_that_requests_items() {
        let mut queue = TransitionQueue::default();
        let (first, _rx1) = TransitionRequest::new(directives(2), false);
        let (second, _rx2) = TransitionRequest::new(directives(1), false);
        let first_handle = Rc::clone(&first.handle);

        let _ = queue.enqueue(first);
        let _ = queue.enqueue(second);

        queue.discard_request(&first_handle);
        assert_eq!(queue.len(), 1);
        let survivor = queue.dequeue_next().expect("second request remains");
        assert!(!Rc::ptr_eq(&survivor.request, &first_handle));
    }
}
