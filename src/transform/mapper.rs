//! Row → [`ServiceRecord`] mapping.

use tracing::warn;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{Named, ProviderOffer, ServiceRecord};
use crate::types::{Schema, Value};

use super::ProviderColumn;

/// Scalar fields of a [`ServiceRecord`] and the source column each one is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Name,
    ProductIndex,
    Department,
    Speciality,
    Category,
    NatureOfProcedure,
}

impl ServiceField {
    pub const ALL: [ServiceField; 6] = [
        ServiceField::Name,
        ServiceField::ProductIndex,
        ServiceField::Department,
        ServiceField::Speciality,
        ServiceField::Category,
        ServiceField::NatureOfProcedure,
    ];

    pub fn source_column(self) -> &'static str {
        match self {
            ServiceField::Name => "SERVICE",
            ServiceField::ProductIndex => "PRODUCT INDEX",
            ServiceField::Department => "DEPARTMENT",
            ServiceField::Speciality => "SPECIALTY",
            ServiceField::Category => "CATEGORY",
            ServiceField::NatureOfProcedure => "NATURE OF ENT. PROCEDURE",
        }
    }
}

/// Maps rows of one table shape to records.
///
/// Column positions are resolved once in [`RowMapper::new`]. Columns that are absent from the
/// table behave like null cells: scalars become `""` and the provider is omitted.
#[derive(Debug, Clone)]
pub struct RowMapper {
    scalars: [Option<usize>; 6],
    providers: Vec<(usize, ProviderColumn)>,
}

impl RowMapper {
    pub fn new(schema: &Schema, provider_columns: &[ProviderColumn]) -> Self {
        let scalars = ServiceField::ALL.map(|f| schema.index_of(f.source_column()));

        let mut providers = Vec::with_capacity(provider_columns.len());
        for p in provider_columns {
            match schema.index_of(&p.column) {
                Some(idx) => providers.push((idx, p.clone())),
                None => warn!(column = %p.column, id = p.id, "provider column not in table; never priced"),
            }
        }

        Self { scalars, providers }
    }

    /// Build the record for `row`.
    ///
    /// `row_number` is only used in error messages.
    pub fn map_row(&self, row_number: usize, row: &[Value]) -> PipelineResult<ServiceRecord> {
        let text = |field: ServiceField| -> PipelineResult<String> {
            let idx = self.scalars[field as usize];
            let cell = idx.and_then(|i| row.get(i)).unwrap_or(&Value::Null);
            match cell {
                Value::Null => Ok(String::new()),
                Value::Utf8(s) => Ok(s.clone()),
                other => Err(PipelineError::validation(
                    row_number,
                    field.source_column(),
                    format!("expected text, got {} '{other}'", other.kind()),
                )),
            }
        };

        let mut service_providers = Vec::with_capacity(self.providers.len());
        for (idx, provider) in &self.providers {
            let cell = row.get(*idx).unwrap_or(&Value::Null);
            if cell.is_null() {
                continue;
            }
            let price = price_of(cell).map_err(|message| {
                PipelineError::validation(row_number, &provider.column, message)
            })?;
            service_providers.push(ProviderOffer {
                id: provider.id,
                price,
            });
        }

        Ok(ServiceRecord {
            name: text(ServiceField::Name)?,
            product_index: text(ServiceField::ProductIndex)?,
            department: Named::new(text(ServiceField::Department)?),
            speciality: Named::new(text(ServiceField::Speciality)?),
            category: Named::new(text(ServiceField::Category)?),
            nature_of_procedure: Named::new(text(ServiceField::NatureOfProcedure)?),
            service_providers,
        })
    }
}

/// Map a single row without keeping the resolved mapper around.
pub fn map_row(
    schema: &Schema,
    row: &[Value],
    provider_columns: &[ProviderColumn],
) -> PipelineResult<ServiceRecord> {
    RowMapper::new(schema, provider_columns).map_row(1, row)
}

fn price_of(cell: &Value) -> Result<f64, String> {
    let price = match cell {
        Value::Int64(_) | Value::Float64(_) => cell.as_f64(),
        Value::Utf8(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("expected a numeric price, got {} '{cell}'", cell.kind()))?;

    if price.is_finite() {
        Ok(price)
    } else {
        Err(format!("price must be finite, got '{cell}'"))
    }
}
