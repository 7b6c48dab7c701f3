// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart slot lifecycle: each named slot holds at most one live chart, and
//! the previous occupant is destroyed before its replacement is created.

use std::collections::HashMap;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Trend,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Pie,
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub values: Vec<Decimal>,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// A live chart. Dropping the handle without calling `destroy` leaks the
/// underlying surface resource, so `ChartSlots` always destroys explicitly.
pub trait ChartHandle {
    fn destroy(&mut self) -> Result<()>;
}

pub trait PlottingSurface {
    fn create(&self, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>>;
}

#[derive(Default)]
pub struct ChartSlots {
    live: HashMap<ChartSlot, Box<dyn ChartHandle>>,
}

impl ChartSlots {
    pub fn new() -> ChartSlots {
        ChartSlots {
            live: HashMap::new(),
        }
    }

    /// Replace whatever occupies `slot` with a chart built from `spec`.
    /// The old chart is destroyed first; a destroy failure aborts the
    /// replacement and leaves the slot empty.
    pub fn show(
        &mut self,
        surface: &dyn PlottingSurface,
        slot: ChartSlot,
        spec: &ChartSpec,
    ) -> Result<()> {
        if let Some(mut old) = self.live.remove(&slot) {
            old.destroy()?;
        }
        let handle = surface.create(spec)?;
        self.live.insert(slot, handle);
        Ok(())
    }

    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.live.contains_key(&slot)
    }

    /// Tear down every live chart, keeping the first error.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_err = None;
        for (_, mut handle) in self.live.drain() {
            if let Err(e) = handle.destroy() {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Render a spec as fixed-width ASCII bars scaled to the series maximum.
pub fn render_ascii(spec: &ChartSpec) -> String {
    const WIDTH: usize = 40;

    let max = spec
        .series
        .iter()
        .flat_map(|s| s.values.iter())
        .cloned()
        .fold(Decimal::ZERO, Decimal::max);
    let total: Decimal = spec
        .series
        .iter()
        .flat_map(|s| s.values.iter())
        .cloned()
        .sum();

    let mut out = String::new();
    out.push_str(&spec.title);
    out.push('\n');

    for series in &spec.series {
        if spec.series.len() > 1 {
            out.push_str(&format!("[{}]\n", series.name));
        }
        for (i, value) in series.values.iter().enumerate() {
            let label = spec.labels.get(i).map(String::as_str).unwrap_or("");
            let scaled = if max.is_zero() {
                0
            } else {
                let frac = (*value / max).to_f64().unwrap_or(0.0);
                (frac * WIDTH as f64).round() as usize
            };
            out.push_str(&format!(
                "{:>12} | {} {:.2}",
                label,
                "#".repeat(scaled),
                value
            ));
            if spec.kind == ChartKind::Pie && !total.is_zero() {
                let share = *value / total * Decimal::ONE_HUNDRED;
                out.push_str(&format!(" ({:.1}%)", share));
            }
            out.push('\n');
        }
    }
    out
}

struct TermChart;

impl ChartHandle for TermChart {
    fn destroy(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Surface that prints charts to stdout. The terminal has nothing to
/// release, so destroy is a no-op.
pub struct TermSurface;

impl PlottingSurface for TermSurface {
    fn create(&self, spec: &ChartSpec) -> Result<Box<dyn ChartHandle>> {
        println!("{}", render_ascii(spec));
        Ok(Box::new(TermChart))
    }
}
