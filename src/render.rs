// src/render.rs
//
// Pure render planning: (config, changes, expanded set) -> ordered section
// plans with fields packed into a two-column grid. The UI layer only draws
// what is planned here.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::changes::{ChangeTree, FieldValue};
use crate::config::{FieldConfig, FormConfig, SectionLayout};

#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub sections: Vec<SectionPlan>,
}

#[derive(Debug, Clone)]
pub struct SectionPlan {
    pub id: String,
    pub title: String,
    pub layout: SectionLayout,
    pub expanded: bool,
    /// Rows of the two-column grid; empty when collapsed.
    pub rows: Vec<Vec<FieldCell>>,
}

#[derive(Debug, Clone)]
pub struct FieldCell {
    pub field: FieldConfig,
    /// Current value from the changes map; `None` renders the empty default.
    pub value: Option<FieldValue>,
}

pub fn build_render_plan(
    config: &FormConfig,
    changes: &ChangeTree,
    expanded: &BTreeSet<String>,
) -> RenderPlan {
    let mut ordered: Vec<&_> = config.sections.iter().collect();
    // sort_by_key is stable: equal orders keep config sequence.
    ordered.sort_by_key(|s| s.order);

    let sections = ordered
        .into_iter()
        .map(|s| {
            let is_open = expanded.contains(&s.id);
            SectionPlan {
                id: s.id.clone(),
                title: s.title.clone(),
                layout: s.layout,
                expanded: is_open,
                rows: if is_open {
                    pack_rows(&s.fields, changes)
                } else {
                    Vec::new()
                },
            }
        })
        .collect();

    RenderPlan { sections }
}

/// Pack fields into two-column rows. A colSpan-2 field takes a full row;
/// colSpan-1 fields pair up left-to-right in config order.
fn pack_rows(fields: &[FieldConfig], changes: &ChangeTree) -> Vec<Vec<FieldCell>> {
    let mut rows: Vec<Vec<FieldCell>> = Vec::new();
    let mut current: Vec<FieldCell> = Vec::new();

    for field in fields {
        let cell = FieldCell {
            value: changes.get(&field.key).cloned(),
            field: field.clone(),
        };

        if cell.field.col_span >= 2 {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            rows.push(vec![cell]);
            continue;
        }

        current.push(cell);
        if current.len() == 2 {
            rows.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

/// Reduce a stored date value to a date-only string for display. RFC 3339
/// timestamps and `YYYY-MM-DD` both normalize; anything else passes through.
pub fn normalize_date_display(raw: &str) -> String {
    let s = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }

    s.to_string()
}
