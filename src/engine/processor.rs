// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node-by-node invocation of an entry point over a linked list.

use std::sync::Arc;
use std::time::Instant;

use crate::backends::resolve;
use crate::config::{CallConv, EntryPointRegistry, ValueType};
use crate::engine::{Halt, NodeFailure, OnError, ProcessResult};
use crate::errors::ProcessError;
use crate::list::{ListKind, Node};
use crate::observability::messages::processor::{
    NodeFailed, ProcessorDisposed, TraversalCompleted, TraversalHalted, TraversalStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EntryPoint, StopCondition, STATUS_OK};

/// Walks a linked list and invokes one bound entry point per node.
///
/// The processor is `Ready` from construction until [`dispose`](Self::dispose),
/// after which every `process` call fails with [`ProcessError::Disposed`].
/// Each `process` call is a complete, synchronous traversal on the calling
/// thread; a processor can run over many lists in its lifetime.
///
/// # Traversal
///
/// For node `i`, the input slot holds the node value and the output slot
/// starts at zero. On status `0` the output is written back into the node.
/// On any other status the node is left untouched and `on_error` decides
/// whether to halt or move on. The stop condition, when given, sees every
/// attempt that did not already halt on failure. Failures are counted before
/// it runs; a success is written back and counted only after it declines to
/// halt, so a node it halts on keeps its value.
///
/// Both slots pass through the processor's [`ValueType`], so a processor bound
/// with `I32` sees and writes truncated integers whatever the entry point's
/// backend.
pub struct LinkedListProcessor {
    entry_point: Option<Arc<dyn EntryPoint>>,
    value_type: ValueType,
    list_kind: ListKind,
}

impl LinkedListProcessor {
    /// Resolves `function` from `library` eagerly and binds to it.
    ///
    /// `library` may name a native shared library or a core WASM module.
    pub fn new(
        library: &str,
        function: &str,
        call_conv: CallConv,
        value_type: ValueType,
        list_kind: ListKind,
    ) -> Result<Self, ProcessError> {
        let entry_point = resolve(library, function, call_conv, value_type)
            .map_err(|e| ProcessError::resolution(function, e))?;
        Ok(Self::with_entry_point(entry_point, value_type, list_kind))
    }

    /// Binds to the entry point registered under `name`.
    pub fn from_registry(
        registry: &EntryPointRegistry,
        name: &str,
        value_type: ValueType,
        list_kind: ListKind,
    ) -> Result<Self, ProcessError> {
        let entry_point = registry
            .get(name)
            .map_err(|e| ProcessError::resolution(name, e))?;
        Ok(Self::with_entry_point(entry_point, value_type, list_kind))
    }

    /// Binds to an already resolved entry point.
    pub fn with_entry_point(
        entry_point: Arc<dyn EntryPoint>,
        value_type: ValueType,
        list_kind: ListKind,
    ) -> Self {
        Self {
            entry_point: Some(entry_point),
            value_type,
            list_kind,
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn list_kind(&self) -> &ListKind {
        &self.list_kind
    }

    /// Name of the bound entry point, or `None` once disposed.
    pub fn entry_point_name(&self) -> Option<&str> {
        self.entry_point.as_deref().map(|entry_point| entry_point.name())
    }

    pub fn is_disposed(&self) -> bool {
        self.entry_point.is_none()
    }

    /// Runs the bound entry point over the list starting at `head`.
    ///
    /// An absent `head` is an empty list: the result is all zeros and the
    /// entry point is not invoked.
    pub fn process(
        &self,
        head: Option<&mut Node>,
        on_error: OnError,
        stop_condition: Option<&dyn StopCondition>,
    ) -> Result<ProcessResult, ProcessError> {
        let entry_point = self.entry_point.as_deref().ok_or(ProcessError::Disposed)?;

        let mut result = ProcessResult::default();
        let Some(head) = head else {
            return Ok(result);
        };

        let started = TraversalStarted {
            entry_point: entry_point.name(),
            list_kind: self.list_kind.as_str(),
            on_error: on_error.as_str(),
        };
        let span = started.span("process");
        let _guard = span.enter();
        started.log();
        let start_time = Instant::now();

        let mut cursor = Some(head);
        let mut index = 0;
        while let Some(node) = cursor {
            let input = self.value_type.narrow(node.value);
            let mut output = 0.0;
            let status = entry_point.invoke(input, &mut output);
            let succeeded = status == STATUS_OK;
            if succeeded {
                output = self.value_type.narrow(output);
            } else {
                NodeFailed {
                    entry_point: entry_point.name(),
                    index,
                    input,
                    status,
                }
                .log();
            }

            if !succeeded {
                result.fail += 1;
                result.failures.push(NodeFailure {
                    index,
                    input,
                    output,
                    status,
                });
                if on_error == OnError::Stop {
                    result.halt = Some(Halt::OnFailure { index });
                    break;
                }
            }

            // A successful attempt is applied only after the condition declines
            // to halt, so a halting node keeps its value.
            if let Some(stop_condition) = stop_condition {
                if stop_condition.should_stop(node, index, input, output, status) {
                    result.halt = Some(Halt::StopCondition { index });
                    break;
                }
            }

            if succeeded {
                node.value = output;
                result.success += 1;
            }

            cursor = node.next.as_deref_mut();
            index += 1;
        }

        if let Some(halt) = result.halt {
            TraversalHalted {
                entry_point: entry_point.name(),
                index: halt.index(),
                reason: halt.reason(),
            }
            .log();
        }
        TraversalCompleted {
            entry_point: entry_point.name(),
            success: result.success,
            fail: result.fail,
            duration: start_time.elapsed(),
        }
        .log();

        Ok(result)
    }

    /// Like [`process`](Self::process), with the policy given by name.
    ///
    /// The name is validated before any node is visited.
    pub fn process_with_policy(
        &self,
        head: Option<&mut Node>,
        on_error: &str,
        stop_condition: Option<&dyn StopCondition>,
    ) -> Result<ProcessResult, ProcessError> {
        let on_error: OnError = on_error.parse()?;
        self.process(head, on_error, stop_condition)
    }

    /// Releases the bound entry point, and with it any library handle or WASM
    /// instance this processor resolved. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if let Some(entry_point) = self.entry_point.take() {
            ProcessorDisposed {
                entry_point: entry_point.name(),
            }
            .log();
        }
    }
}

impl std::fmt::Debug for LinkedListProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedListProcessor")
            .field("entry_point", &self.entry_point_name())
            .field("value_type", &self.value_type)
            .field("list_kind", &self.list_kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::FnEntryPoint;
    use crate::list::build;
    use crate::traits::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn double(input: f64, output: &mut f64) -> StatusCode {
        *output = input * 2.0;
        STATUS_OK
    }

    fn double_non_negative(input: f64, output: &mut f64) -> StatusCode {
        if input < 0.0 {
            return 7;
        }
        *output = input * 2.0;
        STATUS_OK
    }

    fn processor_for<F>(func: F) -> LinkedListProcessor
    where
        F: Fn(f64, &mut f64) -> StatusCode + Send + Sync + 'static,
    {
        LinkedListProcessor::with_entry_point(
            Arc::new(FnEntryPoint::new("test", func)),
            ValueType::F64,
            ListKind::default(),
        )
    }

    /// Entry point that counts how often it was invoked.
    fn counting_processor() -> (LinkedListProcessor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let processor = processor_for(move |input, output: &mut f64| {
            counter.fetch_add(1, Ordering::SeqCst);
            double(input, output)
        });
        (processor, calls)
    }

    #[test]
    fn test_all_succeed_visits_every_node_once() {
        let (processor, calls) = counting_processor();
        let mut list = build([1.0, 2.0, 3.0, 4.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Stop, None)
            .unwrap();

        assert_eq!(result.success, 4);
        assert_eq!(result.fail, 0);
        assert!(result.failures.is_empty());
        assert_eq!(result.halt, None);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(list.values(), vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_absent_head_invokes_nothing() {
        let (processor, calls) = counting_processor();

        let result = processor.process(None, OnError::Stop, None).unwrap();

        assert_eq!(result, ProcessResult::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_policy_halts_at_first_failure() {
        let processor = processor_for(double_non_negative);
        let mut list = build([1.0, -2.0, 3.0, -4.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Stop, None)
            .unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.fail, 1);
        assert_eq!(result.halt, Some(Halt::OnFailure { index: 1 }));
        assert_eq!(
            result.failures,
            vec![NodeFailure {
                index: 1,
                input: -2.0,
                output: 0.0,
                status: 7,
            }]
        );
        assert_eq!(list.values(), vec![2.0, -2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_skip_policy_visits_all_nodes() {
        let processor = processor_for(double_non_negative);
        let mut list = build([-1.0, 2.0, -3.0, 4.0], ListKind::default());

        let result = processor
            .process(list.head_mut(), OnError::Skip, None)
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.fail, 2);
        assert_eq!(result.visited(), list.len());
        assert!(!result.halted_early());
        assert_eq!(
            result.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert_eq!(list.values(), vec![-1.0, 4.0, -3.0, 8.0]);
    }

    #[test]
    fn test_stop_condition_sees_failed_attempts_under_skip() {
        let processor = processor_for(double_non_negative);
        let mut list = build([1.0, -2.0, 3.0], ListKind::default());
        let stop = |_: &Node, _: usize, _: f64, _: f64, status: StatusCode| status != STATUS_OK;

        let result = processor
            .process(list.head_mut(), OnError::Skip, Some(&stop))
            .unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.fail, 1);
        assert_eq!(
            result.failures,
            vec![NodeFailure {
                index: 1,
                input: -2.0,
                output: 0.0,
                status: 7,
            }]
        );
        assert_eq!(result.halt, Some(Halt::StopCondition { index: 1 }));
        assert_eq!(list.values(), vec![2.0, -2.0, 3.0]);
    }

    #[test]
    fn test_stop_condition_halts_exactly_when_true() {
        let processor = processor_for(double);
        let mut list = build([1.0, 2.0, 3.0, 4.0, 5.0], ListKind::default());
        let seen = std::cell::RefCell::new(Vec::new());
        let stop = |node: &Node, index: usize, input: f64, output: f64, status: StatusCode| {
            seen.borrow_mut().push((index, input, output, status, node.value));
            index == 2
        };

        let result = processor
            .process(list.head_mut(), OnError::Stop, Some(&stop))
            .unwrap();

        assert_eq!(result.success, 2);
        assert_eq!(result.halt, Some(Halt::StopCondition { index: 2 }));
        assert_eq!(list.values(), vec![2.0, 4.0, 3.0, 4.0, 5.0]);
        // The node still holds its input when the condition runs.
        assert_eq!(
            seen.into_inner(),
            vec![
                (0, 1.0, 2.0, 0, 1.0),
                (1, 2.0, 4.0, 0, 2.0),
                (2, 3.0, 6.0, 0, 3.0),
            ]
        );
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (mut processor, calls) = counting_processor();
        let mut list = build([1.0], ListKind::default());

        processor.dispose();
        let first = processor.process(list.head_mut(), OnError::Stop, None);
        processor.dispose();
        let second = processor.process(list.head_mut(), OnError::Stop, None);

        assert!(matches!(first, Err(ProcessError::Disposed)));
        assert!(matches!(second, Err(ProcessError::Disposed)));
        assert!(processor.is_disposed());
        assert_eq!(processor.entry_point_name(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(list.values(), vec![1.0]);
    }

    #[test]
    fn test_disposed_fails_even_for_empty_list() {
        let mut processor = processor_for(double);
        processor.dispose();

        assert!(matches!(
            processor.process(None, OnError::Stop, None),
            Err(ProcessError::Disposed)
        ));
    }

    #[test]
    fn test_invalid_policy_rejected_before_any_node() {
        let (processor, calls) = counting_processor();
        let mut list = build([1.0, 2.0], ListKind::default());

        let result = processor.process_with_policy(list.head_mut(), "ignore", None);

        assert!(matches!(
            result,
            Err(ProcessError::InvalidPolicy { ref policy }) if policy == "ignore"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(list.values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_processor_reusable_across_lists() {
        let processor = processor_for(double);
        let mut first = build([1.0], ListKind::default());
        let mut second = build([5.0, 6.0], ListKind::default());

        processor.process(first.head_mut(), OnError::Stop, None).unwrap();
        processor.process(second.head_mut(), OnError::Stop, None).unwrap();
        processor.process(first.head_mut(), OnError::Stop, None).unwrap();

        assert_eq!(first.values(), vec![4.0]);
        assert_eq!(second.values(), vec![10.0, 12.0]);
    }

    #[test]
    fn test_integer_value_type_narrows_slots() {
        let processor = LinkedListProcessor::with_entry_point(
            Arc::new(FnEntryPoint::new("half", |input, output: &mut f64| {
                *output = input / 2.0;
                STATUS_OK
            })),
            ValueType::I32,
            ListKind::default(),
        );
        let mut list = build([7.9, -3.0], ListKind::default());

        processor.process(list.head_mut(), OnError::Stop, None).unwrap();

        // 7.9 -> 7 -> 3.5 -> 3; -3 -> -1.5 -> -1
        assert_eq!(list.values(), vec![3.0, -1.0]);
    }

    #[test]
    fn test_from_registry_unknown_name_is_resolution_error() {
        let registry = EntryPointRegistry::new();

        let result = LinkedListProcessor::from_registry(
            &registry,
            "missing",
            ValueType::F64,
            ListKind::default(),
        );

        match result {
            Err(ProcessError::Resolution { function, source }) => {
                assert_eq!(function, "missing");
                assert!(source.to_string().contains("missing"));
            }
            other => panic!("Expected Resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_with_missing_library_is_resolution_error() {
        let result = LinkedListProcessor::new(
            "/nonexistent/libentry.so",
            "double",
            CallConv::Cdecl,
            ValueType::F64,
            ListKind::default(),
        );

        assert!(matches!(result, Err(ProcessError::Resolution { .. })));
    }
}
