// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use ledgerclip::charts::{
    render_ascii, ChartHandle, ChartKind, ChartSlot, ChartSlots, ChartSpec, PlottingSurface,
    Series,
};
use rust_decimal::Decimal;

struct FakeHandle {
    id: usize,
    log: Arc<Mutex<Vec<String>>>,
    fail_destroy: bool,
    destroyed: bool,
}

impl ChartHandle for FakeHandle {
    fn destroy(&mut self) -> Result<()> {
        assert!(!self.destroyed, "chart {} destroyed twice", self.id);
        self.destroyed = true;
        if self.fail_destroy {
            return Err(anyhow!("surface rejected destroy"));
        }
        self.log.lock().unwrap().push(format!("destroy {}", self.id));
        Ok(())
    }
}

struct FakeSurface {
    log: Arc<Mutex<Vec<String>>>,
    counter: AtomicUsize,
    fail_destroy: bool,
}

impl FakeSurface {
    fn new() -> FakeSurface {
        FakeSurface {
            log: Arc::new(Mutex::new(Vec::new())),
            counter: AtomicUsize::new(0),
            fail_destroy: false,
        }
    }

    fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl PlottingSurface for FakeSurface {
    fn create(&self, _spec: &ChartSpec) -> Result<Box<dyn ChartHandle>> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("create {}", id));
        Ok(Box::new(FakeHandle {
            id,
            log: self.log.clone(),
            fail_destroy: self.fail_destroy,
            destroyed: false,
        }))
    }
}

fn spec(title: &str) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: title.to_string(),
        labels: vec!["2025-07".to_string(), "2025-08".to_string()],
        series: vec![Series {
            name: "Expense".to_string(),
            values: vec![Decimal::from(10), Decimal::from(40)],
        }],
    }
}

#[test]
fn replacing_a_slot_destroys_the_previous_chart_first() {
    let surface = FakeSurface::new();
    let mut slots = ChartSlots::new();

    slots.show(&surface, ChartSlot::Trend, &spec("first")).unwrap();
    slots.show(&surface, ChartSlot::Trend, &spec("second")).unwrap();

    assert_eq!(surface.entries(), vec!["create 0", "destroy 0", "create 1"]);
    assert!(slots.is_live(ChartSlot::Trend));
}

#[test]
fn slots_do_not_interfere() {
    let surface = FakeSurface::new();
    let mut slots = ChartSlots::new();

    slots.show(&surface, ChartSlot::Trend, &spec("trend")).unwrap();
    slots.show(&surface, ChartSlot::Category, &spec("category")).unwrap();

    assert_eq!(surface.entries(), vec!["create 0", "create 1"]);
    assert!(slots.is_live(ChartSlot::Trend));
    assert!(slots.is_live(ChartSlot::Category));
}

#[test]
fn destroy_failure_aborts_the_replacement() {
    let mut surface = FakeSurface::new();
    surface.fail_destroy = true;
    let mut slots = ChartSlots::new();

    slots.show(&surface, ChartSlot::Trend, &spec("first")).unwrap();
    let err = slots.show(&surface, ChartSlot::Trend, &spec("second"));
    assert!(err.is_err());
    // The failed occupant is gone and nothing replaced it.
    assert!(!slots.is_live(ChartSlot::Trend));
    assert_eq!(surface.entries(), vec!["create 0"]);
}

#[test]
fn clear_destroys_every_live_chart() {
    let surface = FakeSurface::new();
    let mut slots = ChartSlots::new();

    slots.show(&surface, ChartSlot::Trend, &spec("trend")).unwrap();
    slots.show(&surface, ChartSlot::Category, &spec("category")).unwrap();
    slots.clear().unwrap();

    let entries = surface.entries();
    assert!(entries.contains(&"destroy 0".to_string()));
    assert!(entries.contains(&"destroy 1".to_string()));
    assert!(!slots.is_live(ChartSlot::Trend));
    assert!(!slots.is_live(ChartSlot::Category));
}

#[test]
fn ascii_render_scales_bars_to_the_maximum() {
    let out = render_ascii(&spec("Income vs expense"));
    assert!(out.starts_with("Income vs expense\n"));
    assert!(out.contains("2025-08"));
    // The largest value fills the full bar width.
    assert!(out.contains(&"#".repeat(40)));
}

#[test]
fn pie_render_includes_shares() {
    let pie = ChartSpec {
        kind: ChartKind::Pie,
        title: "Expense by category".to_string(),
        labels: vec!["Rent".to_string(), "Dining".to_string()],
        series: vec![Series {
            name: "Expense".to_string(),
            values: vec![Decimal::from(75), Decimal::from(25)],
        }],
    };
    let out = render_ascii(&pie);
    assert!(out.contains("(75.0%)"));
    assert!(out.contains("(25.0%)"));
}
