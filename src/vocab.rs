//! Canonical metric vocabulary: sections, required fields, and aliases.
//!
//! The four business sections and their metrics form a closed, static
//! vocabulary. Every canonical metric belongs to exactly one section for the
//! lifetime of the process, and the alias table maps the normalized spellings
//! seen in real ERP exports onto that vocabulary. All tables here are `const`
//! data shared read-only across invocations.

use std::fmt;

/// One of the four fixed business domains that partition all metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Sales,
    Warehouse,
    Finance,
    Crm,
}

impl Section {
    /// All sections in declaration order. Validation and rendering walk this
    /// order so reports stay stable across runs.
    pub const ALL: [Section; 4] = [
        Section::Sales,
        Section::Warehouse,
        Section::Finance,
        Section::Crm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Sales => "sales",
            Section::Warehouse => "warehouse",
            Section::Finance => "finance",
            Section::Crm => "crm",
        }
    }

    /// Required metrics for this section, in declaration order.
    pub fn metrics(&self) -> &'static [&'static str] {
        match self {
            Section::Sales => &["total_orders", "cancelled", "aov", "repeat"],
            Section::Warehouse => &["skus", "out_of_stock", "dead_stock"],
            Section::Finance => &["revenue", "expenses", "profit"],
            Section::Crm => &["leads", "converted", "lost"],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized spellings observed in ERP exports, mapped to canonical metric
/// names. Keys are already lowercased and stripped of separators; several
/// canonical names alias to themselves so a direct hit resolves in one pass.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("totalorders", "total_orders"),
    ("total_order", "total_orders"),
    ("orders", "total_orders"),
    ("cancelledorders", "cancelled"),
    ("cancellations", "cancelled"),
    ("avgordervalue", "aov"),
    ("averageordervalue", "aov"),
    ("repeatrate", "repeat"),
    ("repeatcustomers", "repeat"),
    ("skus", "skus"),
    ("stockkeepingunits", "skus"),
    ("outofstock", "out_of_stock"),
    ("stockouts", "out_of_stock"),
    ("deadstock", "dead_stock"),
    ("overstocks", "dead_stock"),
    ("revenue", "revenue"),
    ("expenses", "expenses"),
    ("profit", "profit"),
    ("netprofit", "profit"),
    ("leads", "leads"),
    ("converted", "converted"),
    ("conversions", "converted"),
    ("lost", "lost"),
    ("lostleads", "lost"),
];

/// Looks up a normalized token in the alias table.
pub fn resolve_alias(token: &str) -> Option<&'static str> {
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

/// The full alias table; exposed for exhaustive coverage in tests.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
    FIELD_ALIASES
}

/// Returns the section a canonical metric is bound to, or `None` for names
/// outside the vocabulary. This binding, not any category stated by the
/// input, decides where a metric is stored.
pub fn metric_section(metric: &str) -> Option<Section> {
    match metric {
        "total_orders" | "cancelled" | "aov" | "repeat" => Some(Section::Sales),
        "skus" | "out_of_stock" | "dead_stock" => Some(Section::Warehouse),
        "revenue" | "expenses" | "profit" => Some(Section::Finance),
        "leads" | "converted" | "lost" => Some(Section::Crm),
        _ => None,
    }
}

pub fn is_canonical_metric(name: &str) -> bool {
    metric_section(name).is_some()
}
