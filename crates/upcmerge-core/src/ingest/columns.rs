//! Column-to-role resolution.
//!
//! Source workbooks name the same field many ways ("GTIN", "UPC", "Barcode").
//! Each merge role carries an ordered alias list; resolution walks the
//! aliases and binds the first one present among the source columns. Matching
//! is case-insensitive on trimmed names, and the first column wins when two
//! columns normalize to the same name. Explicit per-run overrides take the
//! place of the alias match for the barcode and description roles.

use indexmap::IndexMap;
use pyo3::prelude::*;

use crate::errors::{MergeError, MergeResult};
use crate::ingest::table::SourceTable;
use crate::merge::config::MergeProfile;
use crate::models::ColumnMap;

/// Normalize a column name for matching: trim and lowercase.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The merge roles a source column can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Barcode,
    Description,
    Brand,
    Department,
    Category,
    Segment,
    ProductType,
}

impl Role {
    /// Every role, in output order.
    pub const ALL: [Role; 7] = [
        Role::Barcode,
        Role::Description,
        Role::Brand,
        Role::Department,
        Role::Category,
        Role::Segment,
        Role::ProductType,
    ];

    /// Stable key used in payloads and error messages.
    pub fn key(self) -> &'static str {
        match self {
            Role::Barcode => "barcode",
            Role::Description => "description",
            Role::Brand => "brand",
            Role::Department => "department",
            Role::Category => "category",
            Role::Segment => "segment",
            Role::ProductType => "product_type",
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Per-run column overrides supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RoleOverrides {
    pub barcode: Option<String>,
    pub description: Option<String>,
}

/// Resolved role bindings, each holding the display name of a source column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleMap {
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub segment: Option<String>,
    pub product_type: Option<String>,
}

impl RoleMap {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Barcode => self.barcode.as_deref(),
            Role::Description => self.description.as_deref(),
            Role::Brand => self.brand.as_deref(),
            Role::Department => self.department.as_deref(),
            Role::Category => self.category.as_deref(),
            Role::Segment => self.segment.as_deref(),
            Role::ProductType => self.product_type.as_deref(),
        }
    }

    fn set(&mut self, role: Role, name: String) {
        match role {
            Role::Barcode => self.barcode = Some(name),
            Role::Description => self.description = Some(name),
            Role::Brand => self.brand = Some(name),
            Role::Department => self.department = Some(name),
            Role::Category => self.category = Some(name),
            Role::Segment => self.segment = Some(name),
            Role::ProductType => self.product_type = Some(name),
        }
    }

    /// Return the bound column for `role` or fail with the role's key.
    pub fn require(&self, role: Role) -> MergeResult<&str> {
        self.get(role)
            .ok_or_else(|| MergeError::MissingRequiredColumn(role.key().to_string()))
    }
}

/// Resolve roles against the source column list.
///
/// `aliases` pairs each role with its candidate names in priority order.
/// Overrides replace the alias match for their role and must name an actual
/// source column.
pub fn resolve_roles(
    columns: &[String],
    aliases: &[(Role, &[String])],
    overrides: &RoleOverrides,
) -> MergeResult<RoleMap> {
    let mut by_norm: IndexMap<String, &str> = IndexMap::new();
    for column in columns {
        by_norm
            .entry(normalize_name(column))
            .or_insert(column.as_str());
    }

    let mut roles = RoleMap::default();
    for (role, candidates) in aliases {
        for candidate in candidates.iter() {
            if let Some(display) = by_norm.get(&normalize_name(candidate)) {
                roles.set(*role, (*display).to_string());
                break;
            }
        }
    }

    let mut apply_override = |role: Role, choice: &Option<String>| -> MergeResult<()> {
        if let Some(choice) = choice {
            let display = by_norm.get(&normalize_name(choice)).ok_or_else(|| {
                MergeError::Profile(format!(
                    "{} override {choice:?} does not name a source column",
                    role.key()
                ))
            })?;
            roles.set(role, (*display).to_string());
        }
        Ok(())
    };
    apply_override(Role::Barcode, &overrides.barcode)?;
    apply_override(Role::Description, &overrides.description)?;

    Ok(roles)
}

// ---------------------------------------------------------------------------
// Binding to a concrete table
// ---------------------------------------------------------------------------

/// Role bindings resolved to column indices of one [`SourceTable`].
#[derive(Debug, Clone)]
pub struct RoleIndices {
    pub barcode: usize,
    pub description: usize,
    pub brand: Option<usize>,
    pub department: Option<usize>,
    pub category: Option<usize>,
    pub segment: Option<usize>,
    pub product_type: Option<usize>,
}

impl RoleIndices {
    /// Bind a [`RoleMap`] to the columns of `source`.
    ///
    /// Barcode and description are mandatory; the merge cannot reconcile or
    /// project rows without them.
    pub fn bind(source: &SourceTable, roles: &RoleMap) -> MergeResult<RoleIndices> {
        let required = |role: Role| -> MergeResult<usize> {
            let name = roles.require(role)?;
            source
                .column_index(name)
                .ok_or_else(|| MergeError::MissingRequiredColumn(role.key().to_string()))
        };
        let optional =
            |role: Role| roles.get(role).and_then(|name| source.column_index(name));

        Ok(RoleIndices {
            barcode: required(Role::Barcode)?,
            description: required(Role::Description)?,
            brand: optional(Role::Brand),
            department: optional(Role::Department),
            category: optional(Role::Category),
            segment: optional(Role::Segment),
            product_type: optional(Role::ProductType),
        })
    }
}

// ---------------------------------------------------------------------------
// Python surface
// ---------------------------------------------------------------------------

/// Resolve roles for a column list without reading a workbook.
#[pyfunction]
#[pyo3(signature = (columns, profile=None, barcode_column=None, description_column=None))]
pub fn resolve_columns(
    columns: Vec<String>,
    profile: Option<MergeProfile>,
    barcode_column: Option<String>,
    description_column: Option<String>,
) -> PyResult<ColumnMap> {
    let profile = profile.unwrap_or_default();
    let overrides = RoleOverrides {
        barcode: barcode_column,
        description: description_column,
    };
    let aliases = profile.alias_table();
    let roles = resolve_roles(&columns, &aliases, &overrides)?;
    Ok(ColumnMap::from(&roles))
}
