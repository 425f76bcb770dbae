#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Rendering opens a `table_render` span recording the grid size, and emits
//! debug events for column sizing inside it.
//!
//!   cargo test -p tessera-table --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tessera_table::{Cell, Row, Table};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span with the fields recorded on it so far.
#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

/// A captured event and the span it was emitted in.
#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    span: Option<String>,
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    ids: HashMap<tracing::span::Id, usize>,
    events: Vec<CapturedEvent>,
}

/// A tracing Layer that captures span fields and events.
struct SpanCapture {
    captured: Arc<Mutex<Captured>>,
}

/// Handle to read what was captured after rendering.
struct CaptureHandle {
    captured: Arc<Mutex<Captured>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.captured.lock().unwrap().spans.clone()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.captured.lock().unwrap().events.clone()
    }
}

/// Visitor that extracts fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let mut captured = self.captured.lock().unwrap();
        let index = captured.spans.len();
        captured.spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
        captured.ids.insert(id.clone(), index);
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        values.record(&mut visitor);

        let mut captured = self.captured.lock().unwrap();
        if let Some(&index) = captured.ids.get(id) {
            captured.spans[index].fields.extend(visitor.0);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .into_iter()
            .find(|(name, _)| name == "message")
            .map(|(_, value)| value)
            .unwrap_or_default();
        let span = ctx.event_span(event).map(|span| span.name().to_string());

        self.captured
            .lock()
            .unwrap()
            .events
            .push(CapturedEvent { message, span });
    }
}

/// Set up a tracing subscriber with capture and run a closure.
fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let captured = Arc::new(Mutex::new(Captured::default()));
    let layer = SpanCapture {
        captured: captured.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { captured }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn render_span_records_grid_size() {
    let handle = with_captured(|| {
        Table::new([["a", "b", "c"], ["d", "e", "f"]])
            .header(["x", "y", "z"])
            .border(true)
            .render()
            .unwrap();
    });

    let spans = handle.spans();
    let render: Vec<_> = spans.iter().filter(|s| s.name == "table_render").collect();
    assert_eq!(render.len(), 1, "spans: {spans:?}");
    assert_eq!(render[0].fields.get("rows").map(String::as_str), Some("3"));
    assert_eq!(render[0].fields.get("columns").map(String::as_str), Some("3"));
}

#[test]
fn one_span_per_render() {
    let handle = with_captured(|| {
        let table = Table::new([["a"]]);
        for _ in 0..3 {
            table.render().unwrap();
        }
        Table::default().render().unwrap();
    });

    let count = handle
        .spans()
        .iter()
        .filter(|s| s.name == "table_render")
        .count();
    assert_eq!(count, 4);
}

#[test]
fn sizing_events_nest_in_render_span() {
    let handle = with_captured(|| {
        Table::new([
            Row::new([Cell::new("a wide spanning cell").col_span(2)]),
            Row::new(["a", "b"]),
        ])
        .render()
        .unwrap();
    });

    let events = handle.events();
    let resolved = events
        .iter()
        .find(|e| e.message == "resolved column widths")
        .expect("sizing event");
    assert_eq!(resolved.span.as_deref(), Some("table_render"));

    let widened = events
        .iter()
        .find(|e| e.message == "widened columns for span")
        .expect("backfill event");
    assert_eq!(widened.span.as_deref(), Some("table_render"));

    assert!(events.iter().any(|e| e.message == "table rendered"));
}

#[test]
fn no_subscriber_no_panic() {
    // Without a subscriber installed the instrumentation is inert.
    let rendered = Table::new([["x"]]).border(true).render().unwrap();
    assert_eq!(rendered, "┌───┐\n│ x │\n└───┘");
}
